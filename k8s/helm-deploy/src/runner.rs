use crate::common::error::{Result, RunCommand, U8VectorToString};
use snafu::ResultExt;
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    str,
};

/// A single external command line, with the process settings it runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    discard_output: bool,
}

impl Invocation {
    /// Creates an invocation of `program` with the given arguments.
    pub fn new<P, A>(program: P, args: Vec<A>) -> Self
    where
        P: ToString,
        A: ToString,
    {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            current_dir: None,
            envs: vec![],
            discard_output: false,
        }
    }

    /// Runs the command from inside `dir`.
    #[must_use]
    pub fn in_dir<P>(mut self, dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds an environment variable to the command's environment.
    #[must_use]
    pub fn with_env<K, V>(mut self, key: K, value: V) -> Self
    where
        K: ToString,
        V: ToString,
    {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Sends standard output and standard error to /dev/null.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.discard_output = true;
        self
    }

    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    pub fn args(&self) -> &[String] {
        self.args.as_slice()
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn envs(&self) -> &[(String, String)] {
        self.envs.as_slice()
    }

    pub fn discards_output(&self) -> bool {
        self.discard_output
    }
}

/// What a finished command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, None if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Output of a command which exited with `code` and printed nothing.
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    /// True if the command exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Standard output as UTF-8.
    pub fn stdout_str(&self) -> Result<&str> {
        str::from_utf8(self.stdout.as_slice()).context(U8VectorToString)
    }

    /// Standard error as an owned UTF-8 string, for error reports.
    pub fn stderr_string(&self) -> Result<String> {
        Ok(str::from_utf8(self.stderr.as_slice())
            .context(U8VectorToString)?
            .to_string())
    }
}

/// Executes external commands. The helm client is generic over this so the binaries it
/// shells out to can be swapped, e.g. in tests.
pub trait CommandRunner {
    /// Runs the command to completion. A non-zero exit is not an error here, only a failure
    /// to start the process is.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.args())
            .envs(invocation.envs().iter().map(|(k, v)| (k, v)));

        if let Some(dir) = invocation.current_dir() {
            command.current_dir(dir);
        }

        if invocation.discards_output() {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let output = command.output().context(RunCommand {
            command: invocation.program().to_string(),
            args: invocation.args().to_vec(),
        })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandRunner, Invocation, SystemRunner};
    use crate::vec_to_strings;

    #[test]
    fn system_runner_reports_exit_code() {
        let ok = SystemRunner
            .run(&Invocation::new("sh", vec_to_strings!["-c", "exit 0"]))
            .unwrap();
        assert!(ok.success());

        let failed = SystemRunner
            .run(&Invocation::new("sh", vec_to_strings!["-c", "exit 3"]))
            .unwrap();
        assert!(!failed.success());
        assert_eq!(failed.code, Some(3));
    }

    #[test]
    fn system_runner_captures_output_in_dir_with_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Chart.yaml"), b"name: api\n").unwrap();
        let invocation = Invocation::new("sh", vec_to_strings!["-c", "echo $CHART_ENV; ls"])
            .in_dir(dir.path())
            .with_env("CHART_ENV", "staging");

        let output = SystemRunner.run(&invocation).unwrap();
        assert_eq!(output.stdout_str().unwrap(), "staging\nChart.yaml\n");
    }

    #[test]
    fn quiet_invocation_discards_output() {
        let invocation = Invocation::new("sh", vec_to_strings!["-c", "echo noisy"]).quiet();
        let output = SystemRunner.run(&invocation).unwrap();
        assert!(output.success());
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn missing_binary_is_an_error() {
        let invocation = Invocation::new("definitely-not-a-real-helm-binary", Vec::<String>::new());
        assert!(SystemRunner.run(&invocation).is_err());
    }
}

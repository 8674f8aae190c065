use crate::{
    common::error::Result,
    runner::{CommandOutput, CommandRunner, Invocation},
};
use std::{cell::RefCell, collections::HashMap};

type Responder = Box<dyn Fn(&Invocation) -> CommandOutput>;

/// A CommandRunner which records every invocation instead of spawning it. Responses are
/// keyed by the first argument (the helm subcommand, or the tar flags); anything without
/// a response exits 0 with empty output.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    responders: HashMap<String, Responder>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers invocations whose first argument is `subcommand` with a fixed output.
    pub(crate) fn respond(self, subcommand: &str, output: CommandOutput) -> Self {
        self.respond_with(subcommand, move |_| output.clone())
    }

    /// Answers invocations whose first argument is `subcommand` by calling `responder`.
    pub(crate) fn respond_with<F>(mut self, subcommand: &str, responder: F) -> Self
    where
        F: Fn(&Invocation) -> CommandOutput + 'static,
    {
        self.responders
            .insert(subcommand.to_string(), Box::new(responder));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// The argument lists of every recorded invocation, in order.
    pub(crate) fn arg_lists(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.args().to_vec())
            .collect()
    }

    /// The first argument of every recorded invocation, in order.
    pub(crate) fn subcommands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.args().first().cloned())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let output = invocation
            .args()
            .first()
            .and_then(|subcommand| self.responders.get(subcommand))
            .map(|responder| responder(invocation))
            .unwrap_or_else(|| CommandOutput::with_code(0));
        Ok(output)
    }
}

/// Output of a failed command which printed `stderr`.
pub(crate) fn failure(stderr: &str) -> CommandOutput {
    CommandOutput {
        code: Some(1),
        stdout: vec![],
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Output of a successful command which printed `stdout`.
pub(crate) fn printed(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: vec![],
    }
}

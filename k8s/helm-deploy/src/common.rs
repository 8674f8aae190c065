/// Contains constant values which are used as arguments to functions and in log messages.
pub mod constants;

/// Contains the error handling tooling.
pub mod error;

/// Contains macros.
pub(crate) mod macros;

/// Contains tools for working with files.
pub(crate) mod file;

/// Contains the tracing subscriber setup.
pub mod logging;

//! Error types for help probing and parsing.

use std::process::ExitStatus;

use thiserror::Error;

/// Help text that does not fit the expected dialect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A flag header names more than one value placeholder.
    #[error("flag header `{header}` has more than one placeholder: {}", .placeholders.join(", "))]
    MultiplePlaceholders {
        header: String,
        placeholders: Vec<String>,
    },
}

/// Errors raised while harvesting a command tree.
///
/// All of them abort the harvest; there is no retry.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The invocation path was empty.
    #[error("cannot probe an empty command")]
    EmptyInvocation,

    /// The executable does not exist on `PATH`.
    #[error("command not found: {program}")]
    CommandNotFound { program: String },

    /// The probed command exited unsuccessfully.
    #[error("`{}` failed with {status}: {stderr}", .invocation.join(" "))]
    CommandFailed {
        invocation: Vec<String>,
        status: ExitStatus,
        stderr: String,
    },

    /// The probed command did not finish in time and was killed.
    #[error("`{}` timed out after {timeout_ms}ms", .invocation.join(" "))]
    Timeout {
        invocation: Vec<String>,
        timeout_ms: u128,
    },

    /// Spawning, waiting on, or reading from the command failed.
    #[error("I/O error while running `{}`: {source}", .invocation.join(" "))]
    Io {
        invocation: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The help text could not be parsed.
    #[error("cannot parse help of `{}`: {source}", .invocation.join(" "))]
    Parse {
        invocation: Vec<String>,
        #[source]
        source: ParseError,
    },

    /// Subcommands nest deeper than the configured limit.
    #[error("`{}` is nested deeper than {max_depth} subcommands", .invocation.join(" "))]
    DepthExceeded {
        invocation: Vec<String>,
        max_depth: usize,
    },
}

/// Convenience alias for results with [`DiscoveryError`].
pub type Result<T> = std::result::Result<T, DiscoveryError>;

//! Error types surfaced by the bridge to the invoking caller.

use thiserror::Error;

/// Errors that can occur while executing a script through the bridge.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// No configured interpreter candidate resolved to an executable.
    /// Raised before any subprocess is spawned.
    #[error("no usable Node.js interpreter found (candidates: {0:?})")]
    InterpreterNotFound(Vec<String>),

    /// The interpreter itself failed: non-zero exit status with stderr
    /// output, e.g. a syntax error in the composed script or the binary
    /// crashing.
    #[error("Node.js exited with an error: {message}")]
    InterpreterFatal {
        /// The child's stderr text.
        message: String,
        /// A synthetic script frame plus the host backtrace.
        frames: Vec<String>,
    },

    /// The script's own function threw or rejected.
    #[error("{message}")]
    Script {
        /// The stringified JavaScript error.
        message: String,
        /// Translated script frames followed by the host backtrace.
        frames: Vec<String>,
    },

    /// Failed to encode call arguments or parse the child's result tuple.
    #[error("failed to serialize or deserialize bridge data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Temporary-file or process I/O failure.
    #[error("I/O error while executing script: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// The stack frames attached to this error, if any.
    pub fn frames(&self) -> &[String] {
        match self {
            Self::InterpreterFatal { frames, .. } | Self::Script { frames, .. } => frames,
            _ => &[],
        }
    }
}

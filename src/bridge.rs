//! The bridge façade: owns the script source and drives an invocation
//! through composition, execution, and decoding.

use serde_json::Value;

use crate::{config::RunnerConfig, error::RunnerError, executor::ProcessExecutor};

/// Executes functions defined in a JavaScript snippet via a Node.js
/// subprocess.
///
/// Each invocation is independent: a fresh temp file and a fresh child
/// process, with no shared state beyond the frozen interpreter resolution.
/// A runner may therefore be invoked concurrently from multiple tasks.
///
/// ```no_run
/// # async fn demo() -> Result<(), node_runner::RunnerError> {
/// use node_runner::NodeRunner;
/// use serde_json::json;
///
/// let runner = NodeRunner::new("const hello = (response) => `Hello? ${response}!`");
/// let value = runner.invoke("hello", &[json!("Goodbye")]).await?;
/// assert_eq!(value, json!("Hello? Goodbye!"));
/// # Ok(())
/// # }
/// ```
pub struct NodeRunner {
    source: String,
    config: RunnerConfig,
    executor: ProcessExecutor,
}

impl NodeRunner {
    /// Creates a runner over the given source with default configuration.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_config(source, RunnerConfig::default())
    }

    /// Creates a runner over the given source with explicit configuration.
    /// The source is trimmed of surrounding whitespace at construction.
    pub fn with_config(source: impl Into<String>, config: RunnerConfig) -> Self {
        let executor = ProcessExecutor::new(&config);
        Self { source: source.into().trim().to_string(), config, executor }
    }

    /// Invokes `function_name` in the script with the given positional
    /// arguments and returns its JSON-decoded result.
    ///
    /// The name is not validated; an unknown name surfaces as a
    /// [`RunnerError::Script`] carrying the interpreter's own
    /// `ReferenceError` message.
    pub async fn invoke(&self, function_name: &str, args: &[Value]) -> Result<Value, RunnerError> {
        let args_json = serde_json::to_string(args)?;
        tracing::debug!(function = function_name, "invoking script function");
        self.executor.exec(&self.source, &args_json, function_name).await
    }

    /// Invokes the configured default function with the configured default
    /// arguments.
    pub async fn output(&self) -> Result<Value, RunnerError> {
        self.invoke(&self.config.default_function, &self.config.default_args).await
    }
}

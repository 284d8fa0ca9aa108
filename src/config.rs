//! Configuration for a bridge instance.

use std::{env, path::PathBuf};

use serde::Deserialize;

/// Provides the default interpreter candidate list.
fn default_interpreter_candidates() -> Vec<String> {
    vec!["node".to_string()]
}

/// Provides the default module resolution path for the child process.
fn default_modules_path() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("node_modules")
}

/// Provides the default function name for the `output` shortcut.
fn default_function_name() -> String {
    "main".to_string()
}

/// Configuration for a [`NodeRunner`](crate::NodeRunner) instance.
///
/// All fields default sensibly, so `RunnerConfig::default()` gives a working
/// setup for a project with `node` on `PATH` and a local `node_modules`.
#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    /// Interpreter commands to try, in order. A candidate may carry trailing
    /// arguments after the command name, e.g. `"node --no-warnings"`.
    #[serde(default = "default_interpreter_candidates")]
    pub interpreter_candidates: Vec<String>,

    /// Directory the child's `NODE_PATH` points at, so `require` calls in
    /// the script resolve against the host project's installed dependencies.
    #[serde(default = "default_modules_path")]
    pub modules_path: PathBuf,

    /// Function invoked by the `output` shortcut.
    #[serde(default = "default_function_name")]
    pub default_function: String,

    /// Arguments supplied by the `output` shortcut.
    #[serde(default)]
    pub default_args: Vec<serde_json::Value>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter_candidates: default_interpreter_candidates(),
            modules_path: default_modules_path(),
            default_function: default_function_name(),
            default_args: Vec::new(),
        }
    }
}

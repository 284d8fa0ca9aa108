#![warn(missing_docs)]
//! Run JavaScript functions from Rust through a Node.js subprocess.
//!
//! A [`NodeRunner`] owns a snippet of JavaScript source. Each invocation
//! composes a self-contained script from that source plus a runner epilogue,
//! writes it to an exclusive-create temporary file, executes it under a
//! located `node` binary, and decodes the child's stdout as a tagged
//! `["ok" | "err", value, stack]` tuple. Successful calls yield a
//! [`serde_json::Value`]; failures yield a [`RunnerError`] carrying the
//! script's message and a path-scrubbed stack trace.
//!
//! ```no_run
//! # async fn demo() -> Result<(), node_runner::RunnerError> {
//! use node_runner::NodeRunner;
//! use serde_json::json;
//!
//! let runner = NodeRunner::new("const hello = (response) => `Hello? ${response}!`");
//! let value = runner.invoke("hello", &[json!("Goodbye")]).await?;
//! assert_eq!(value, json!("Hello? Goodbye!"));
//! # Ok(())
//! # }
//! ```

pub mod bridge;
mod composer;
pub mod config;
mod decoder;
pub mod error;
pub mod executor;
pub mod locator;

pub use bridge::NodeRunner;
pub use config::RunnerConfig;
pub use error::RunnerError;

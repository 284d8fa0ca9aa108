//! Subprocess execution: temp-file lifecycle and interpreter invocation.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Output, Stdio},
    sync::OnceLock,
};

use tempfile::{Builder, NamedTempFile};
use tokio::process::Command;

use crate::{
    composer::compose,
    config::RunnerConfig,
    decoder::{decode, fatal_error},
    error::RunnerError,
    locator::{self, Interpreter},
};

/// Executes composed scripts under the configured Node.js interpreter.
///
/// The interpreter is resolved once per executor and the result frozen, so
/// concurrent first use is safe and later calls skip the `PATH` scan.
#[derive(Debug)]
pub struct ProcessExecutor {
    candidates: Vec<String>,
    modules_path: PathBuf,
    interpreter: OnceLock<Option<Interpreter>>,
}

impl ProcessExecutor {
    /// Creates an executor from the bridge configuration.
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            candidates: config.interpreter_candidates.clone(),
            modules_path: config.modules_path.clone(),
            interpreter: OnceLock::new(),
        }
    }

    /// Composes the final script, runs it, and decodes the result tuple.
    ///
    /// The script is written to an exclusive-create temp file with
    /// owner-only permissions. The file is removed on every path out of
    /// this function, including decoder failures.
    pub async fn exec(
        &self,
        source: &str,
        args_json: &str,
        function_name: &str,
    ) -> Result<serde_json::Value, RunnerError> {
        let script = compose(source, args_json, function_name);
        let file = write_script(&script)?;
        tracing::debug!(
            path = %file.path().display(),
            function = function_name,
            "running composed script"
        );
        let output = self.run(file.path()).await?;
        // Decode while the temp file still exists: frame translation needs
        // to resolve the file's canonical path.
        decode(&output.stdout, file.path())
    }

    /// Resolves the interpreter, caching the outcome either way.
    fn interpreter(&self) -> Result<&Interpreter, RunnerError> {
        self.interpreter
            .get_or_init(|| locator::locate(&self.candidates))
            .as_ref()
            .ok_or_else(|| RunnerError::InterpreterNotFound(self.candidates.clone()))
    }

    /// Invokes the interpreter on the script file, capturing stdout, stderr,
    /// and exit status. A failure status with non-empty stderr is an
    /// interpreter-level fatal error and is never fed to the decoder.
    async fn run(&self, script_path: &Path) -> Result<Output, RunnerError> {
        let interpreter = self.interpreter()?;
        let mut cmd = Command::new(&interpreter.program);
        cmd.args(&interpreter.args)
            .arg(script_path)
            .env("NODE_PATH", &self.modules_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().await?;

        if !output.status.success() && !output.stderr.is_empty() {
            tracing::warn!(status = ?output.status, "interpreter exited with failure");
            return Err(fatal_error(&output.stderr));
        }
        Ok(output)
    }
}

/// Writes the composed script to a fresh `node_runner*.js` temp file.
/// `tempfile` creates it exclusively with mode 0600; the file is deleted
/// when the returned handle drops.
fn write_script(script: &str) -> Result<NamedTempFile, RunnerError> {
    let mut file = Builder::new().prefix("node_runner").suffix(".js").tempfile()?;
    file.write_all(script.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_script_creates_owner_only_js_file() {
        let file = write_script("const x = 1").unwrap();
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("node_runner"));
        assert!(name.ends_with(".js"));
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "const x = 1");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn temp_file_is_removed_on_drop() {
        let file = write_script("const x = 1").unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        drop(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn missing_interpreter_fails_before_spawn() {
        let config = RunnerConfig {
            interpreter_candidates: vec!["definitely-not-a-real-interpreter".to_string()],
            ..RunnerConfig::default()
        };
        let executor = ProcessExecutor::new(&config);
        let err = executor.exec("const f = () => 1", "[]", "f").await.unwrap_err();
        match err {
            RunnerError::InterpreterNotFound(candidates) => {
                assert_eq!(candidates, vec!["definitely-not-a-real-interpreter".to_string()]);
            }
            other => panic!("expected InterpreterNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn interpreter_resolution_is_cached() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fake-node");
        std::fs::write(&fake, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = RunnerConfig {
            interpreter_candidates: vec![fake.display().to_string()],
            ..RunnerConfig::default()
        };
        let executor = ProcessExecutor::new(&config);

        let first = executor.interpreter().unwrap().clone();
        // Removing the binary does not invalidate the frozen resolution.
        std::fs::remove_file(&fake).unwrap();
        let second = executor.interpreter().unwrap();
        assert_eq!(&first, second);
        assert_eq!(second.program, fake);
    }
}

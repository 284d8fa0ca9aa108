//! Resolution of a configured interpreter candidate list to an executable.

use std::{
    env, fmt,
    path::{Path, PathBuf},
};

/// A resolved interpreter invocation: the executable plus any trailing
/// arguments carried by the configured candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Path to the interpreter executable.
    pub program: PathBuf,
    /// Arguments passed before the script path.
    pub args: Vec<String>,
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Resolves the first usable interpreter from an ordered candidate list.
///
/// Only the leading token of a candidate is looked up as an executable;
/// trailing tokens are carried as arguments on the resolved [`Interpreter`].
/// A candidate resolves either as a directly-executable path, or to the
/// first directory on `PATH` containing an executable regular file of that
/// name. Returns `None` when no candidate resolves.
pub fn locate(candidates: &[String]) -> Option<Interpreter> {
    let search_dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|path| env::split_paths(&path).collect())
        .unwrap_or_default();
    locate_in(candidates, &search_dirs)
}

fn locate_in(candidates: &[String], search_dirs: &[PathBuf]) -> Option<Interpreter> {
    candidates.iter().find_map(|candidate| {
        let mut tokens = candidate.split_whitespace();
        let name = tokens.next()?;
        let args: Vec<String> = tokens.map(String::from).collect();
        resolve(name, search_dirs).map(|program| {
            tracing::debug!(candidate = %candidate, program = %program.display(), "resolved interpreter");
            Interpreter { program, args }
        })
    })
}

fn resolve(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if is_executable(direct) {
        return Some(direct.to_path_buf());
    }
    search_dirs.iter().map(|dir| dir.join(name)).find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

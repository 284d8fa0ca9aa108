//! Decoding of the child's result tuple into a value or a reconstructed
//! error with a translated stack trace.

use std::{backtrace::Backtrace, path::Path};

use serde::Deserialize;
use serde_json::Value;

use crate::error::RunnerError;

/// Placeholder substituted for the temp script's path in translated frames.
pub(crate) const PLACEHOLDER: &str = "node_runner";

/// The stack portion of the result tuple. Node's `err.stack` is one
/// newline-joined string, but an array of lines and a JSON null (a
/// stack-less error serialized through `JSON.stringify`) are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StackPayload {
    Text(String),
    Lines(Vec<String>),
}

type ResultTuple = (Option<String>, Value, Option<StackPayload>);

/// Parses the child's stdout as a `[status, value, stack]` tuple.
///
/// An `"ok"` status yields the value unchanged. Any other status yields a
/// [`RunnerError::Script`] whose message is the tuple's value and whose
/// frames are the translated stack lines followed by the host backtrace.
/// Empty stdout means the child crashed before emitting JSON; it decodes as
/// a status-less tuple and surfaces as a `Script` error with an empty
/// message.
pub(crate) fn decode(stdout: &[u8], temp_path: &Path) -> Result<Value, RunnerError> {
    let (status, value, stack) = if stdout.is_empty() {
        (None, Value::Null, None)
    } else {
        serde_json::from_slice::<ResultTuple>(stdout)?
    };

    if status.as_deref() == Some("ok") {
        return Ok(value);
    }

    let message = match &value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    let raw_lines: Vec<String> = match stack {
        Some(StackPayload::Text(text)) => text.lines().map(String::from).collect(),
        Some(StackPayload::Lines(lines)) => lines,
        None => Vec::new(),
    };

    // Node may report the canonical form of the script path, which differs
    // from the raw temp path when the temp directory is behind a symlink.
    let canonical = temp_path.canonicalize().unwrap_or_else(|_| temp_path.to_path_buf());
    let mut frames: Vec<String> = raw_lines
        .iter()
        .map(|line| translate_frame(line, &canonical, temp_path))
        .collect();
    // The first frame repeats the error message itself.
    if !frames.is_empty() {
        frames.remove(0);
    }
    frames.extend(host_frames());

    Err(RunnerError::Script { message, frames })
}

/// Cleans one raw stack line: drops the leading `" at "` marker, swaps both
/// forms of the temp file's path for [`PLACEHOLDER`], and trims the rest.
///
/// The heuristic is tied to V8's stack format; supporting another
/// interpreter's traces means swapping this function, not the decode logic.
fn translate_frame(raw: &str, canonical: &Path, raw_path: &Path) -> String {
    let line = raw.replacen(" at ", "", 1);
    let line = line.replace(&*canonical.to_string_lossy(), PLACEHOLDER);
    let line = line.replace(&*raw_path.to_string_lossy(), PLACEHOLDER);
    line.trim().to_string()
}

/// Builds the error for an interpreter-level failure: non-zero exit with
/// stderr output. The stderr text becomes the message; a best-effort line
/// number is taken from the first line's trailing `:<digits>`, defaulting
/// to line 1.
pub(crate) fn fatal_error(stderr: &[u8]) -> RunnerError {
    let message = String::from_utf8_lossy(stderr).into_owned();
    let line = message.lines().next().and_then(trailing_line_number).unwrap_or(1);
    let mut frames = vec![format!("({PLACEHOLDER}):{line}")];
    frames.extend(host_frames());
    RunnerError::InterpreterFatal { message, frames }
}

fn trailing_line_number(line: &str) -> Option<u32> {
    let (_, digits) = line.rsplit_once(':')?;
    digits.parse().ok()
}

/// The host side of the combined backtrace, appended after the translated
/// script frames.
fn host_frames() -> Vec<String> {
    Backtrace::force_capture()
        .to_string()
        .lines()
        .map(|line| line.trim().to_string())
        .collect()
}

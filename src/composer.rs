//! Composition of the self-contained script sent to the child interpreter.
//!
//! The user source is embedded as literal code, followed by a fixed runner
//! epilogue that binds the call arguments, invokes the target function, and
//! writes the result tuple to stdout. Because the source is embedded as code
//! rather than inside a quoted string literal, no code-point escaping of
//! non-ASCII characters is needed.

/// Builds the final script text from the user source, the JSON-encoded
/// argument list, and the function name to invoke.
///
/// The epilogue wraps the call in `Promise.resolve(...)`, so synchronous
/// return values and pending promises are handled uniformly: output is
/// written exactly once, after resolution. A rejected promise is caught and
/// reported as an `err` tuple, as is any synchronous throw. An unknown
/// `function_name` is deliberately not validated here; the interpreter's own
/// `ReferenceError` becomes the error message.
pub(crate) fn compose(source: &str, args_json: &str, function_name: &str) -> String {
    format!(
        r#"{source}

try {{
  const args = {args_json}
  Promise.resolve({function_name}(...args)).then(result => {{
    process.stdout.write(JSON.stringify(['ok', result, []]))
  }}).catch(err => {{
    process.stdout.write(JSON.stringify(['err', '' + err, err.stack || '']))
  }})
}} catch (err) {{
  process.stdout.write(JSON.stringify(['err', '' + err, err.stack || '']))
}}
"#
    )
}

use serde_json::Value;
use std::io::{self, Read};

/// Read piped input from stdin, if any.
///
/// A pipe has no extension to dispatch on, so this accepts the same
/// formats as --input files: JSON first, then YAML. Interactive sessions
/// (stdin is a TTY) and empty pipes both yield None so the caller can fall
/// back to requiring --input.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        // JSON is the common case; keep its error when YAML fails too.
        Err(json_err) => match serde_yaml::from_str::<Value>(trimmed) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(json_err.into()),
        },
    }
}

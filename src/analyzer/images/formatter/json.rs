//! JSON formatter.

use crate::error::Result;
use serde::Serialize;

/// Pretty-printed JSON, newline terminated.
pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

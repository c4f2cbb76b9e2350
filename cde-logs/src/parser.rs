//! Log body parsing
//!
//! The jobs API hands logs back either as plain text or JSON-encoded
//! (a single string literal, or an array of lines). Whatever arrives is
//! turned into the text that ends up in the `.log` file.

use serde_json::Value;

use crate::error::FetchError;

/// Turns a downloaded log body into final text
pub trait LogParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<String, FetchError>;
}

/// Parser for Spark driver and executor logs
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkLogParser;

impl LogParser for SparkLogParser {
    fn parse(&self, raw: &str) -> Result<String, FetchError> {
        let text = decode_body(raw);

        if text.contains('\0') {
            return Err(FetchError::Parse(
                "log body contains binary data".to_string(),
            ));
        }

        Ok(normalize(&text))
    }
}

/// Unwrap JSON-encoded bodies; anything else is already text
fn decode_body(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(text)) => text,
        Ok(Value::Array(items)) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => raw.to_string(),
    }
}

/// LF line endings and exactly one trailing newline
fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let body = text.trim_end_matches('\n');

    if body.is_empty() {
        String::new()
    } else {
        format!("{}\n", body)
    }
}

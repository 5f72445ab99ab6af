pub mod archive;
pub mod core;
pub mod index;
pub mod push_cmd;
pub mod transform;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("archive error: {0}")]
    Archive(String),
    #[error("malformed record in '{entry}' at line {line}: {reason}")]
    MalformedRecord {
        entry: String,
        line: usize,
        reason: String,
    },
    #[error("invalid @timestamp '{value}': {reason}")]
    TimestampFormat { value: String, reason: String },
    #[error("index submission failed: {0}")]
    IndexSubmission(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
}

pub type PushResult<T> = Result<T, PushError>;

// Shared helpers
pub fn now_string() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".to_string())
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> PushResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| PushError::Message(e.to_string()))?;
        }
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| PushError::Message(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| PushError::Message(e.to_string()))
}

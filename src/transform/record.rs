//! Turns JSONL lines into documents tagged with their artifact name.

use serde_json::{Map, Value};
use tracing::debug;

use super::timestamp::normalize_timestamp;
use crate::core::Document;
use crate::core::schema::{ARTIFACT_NAME_KEY, TIMESTAMP_KEY};
use crate::{PushError, PushResult};

/// Collector field holding the record time; replaced by `timestamp`.
pub const SOURCE_TIMESTAMP_KEY: &str = "@timestamp";

/// Base filename of `entry_name` with its last extension removed.
pub fn artifact_name(entry_name: &str) -> String {
    let base = entry_name.rsplit('/').next().unwrap_or(entry_name);
    match base.rfind('.') {
        Some(dot) => base[..dot].to_string(),
        None => base.to_string(),
    }
}

/// Decode one line as a JSON object.
pub fn parse_record(entry: &str, line: usize, text: &str) -> PushResult<Map<String, Value>> {
    let malformed = |reason: String| PushError::MalformedRecord {
        entry: entry.to_string(),
        line,
        reason,
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(malformed(format!("expected a JSON object, found {}", json_kind(&other)))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

/// Build the indexed document for a record.
///
/// The derived `artifact_name` and `timestamp` go in first and the record's
/// remaining fields are layered on top, so a record that already has either
/// key keeps its own value.
pub fn build_document(artifact_name: &str, record: Map<String, Value>) -> PushResult<Document> {
    let timestamp = normalize_timestamp(record.get(SOURCE_TIMESTAMP_KEY))?;

    let mut fields = Map::with_capacity(record.len() + 2);
    fields.insert(ARTIFACT_NAME_KEY.to_string(), Value::String(artifact_name.to_string()));
    fields.insert(TIMESTAMP_KEY.to_string(), Value::String(timestamp));
    for (key, value) in record {
        if key == SOURCE_TIMESTAMP_KEY {
            continue;
        }
        fields.insert(key, value);
    }
    Ok(Document::new(fields))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Per-entry transformer; knows which entry the lines come from.
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    entry: String,
    artifact_name: String,
}

impl RecordTransformer {
    pub fn new(entry: impl Into<String>) -> Self {
        let entry = entry.into();
        let artifact_name = artifact_name(&entry);
        RecordTransformer { entry, artifact_name }
    }

    /// Transform one raw line (1-based `line` number). Blank lines yield `None`.
    pub fn transform_line(&self, line: usize, text: &str) -> PushResult<Option<Document>> {
        let text = text.trim();
        if text.is_empty() {
            debug!(entry = %self.entry, line, "skipping blank line");
            return Ok(None);
        }
        let record = parse_record(&self.entry, line, text)?;
        build_document(&self.artifact_name, record).map(Some)
    }
}

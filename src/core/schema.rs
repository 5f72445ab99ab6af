//! Document and run summary schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key carrying the artifact name derived from the source entry.
pub const ARTIFACT_NAME_KEY: &str = "artifact_name";

/// Key carrying the normalized timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// A record ready for indexing.
///
/// Serializes as the bare JSON object, so key order is the insertion order:
/// the derived keys first, then the record's own keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Document(fields)
    }

    pub fn artifact_name(&self) -> Option<&str> {
        self.0.get(ARTIFACT_NAME_KEY).and_then(Value::as_str)
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.0.get(TIMESTAMP_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Per-entry outcome of a push run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    pub entry: String,
    pub artifact_name: String,
    pub documents: usize,
}

/// Machine-readable report of a completed push run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// RFC 3339 start time
    pub started_at: String,
    pub archive: String,
    /// Datastore URL with any credentials removed
    pub es_url: String,
    pub index: String,
    pub entries: Vec<EntrySummary>,
    pub total_documents: usize,
    pub elapsed_ms: u128,
}

impl RunSummary {
    pub fn documents_for(&self, entry: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.entry == entry).map(|e| e.documents)
    }
}

//! Indexer trait and submission result type.

use serde::{Deserialize, Serialize};

use crate::PushResult;
use crate::core::Document;

/// Acknowledgement returned by the datastore for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReceipt {
    /// Identifier assigned by the datastore
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Outcome reported by the datastore (e.g. "created")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Something that can store documents in a named index.
pub trait Indexer: Send + Sync {
    /// Returns the indexer name (e.g., "elasticsearch", "mock").
    fn name(&self) -> &str;

    /// Submit one document to `index`, blocking until it is acknowledged.
    ///
    /// No document id is supplied; the datastore assigns one.
    ///
    /// # Errors
    /// `PushError::IndexSubmission` if the datastore is unreachable or rejects
    /// the document.
    fn index(&self, index: &str, document: &Document) -> PushResult<IndexReceipt>;
}

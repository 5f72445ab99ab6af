//! Mock indexer for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::traits::{IndexReceipt, Indexer};
use crate::core::Document;
use crate::{PushError, PushResult};

/// Configuration for mock indexer behaviour.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Name to report
    pub name: String,
    /// 1-based submission attempt that should fail, if any
    pub fail_on: Option<usize>,
}

impl MockConfig {
    pub fn new(name: impl Into<String>) -> Self {
        MockConfig { name: name.into(), fail_on: None }
    }

    /// Reject the `attempt`-th submission (1-based).
    pub fn failing_on(mut self, attempt: usize) -> Self {
        self.fail_on = Some(attempt);
        self
    }
}

/// Records every accepted document instead of sending it anywhere.
#[derive(Debug, Default)]
pub struct MockIndexer {
    config: MockConfig,
    attempts: AtomicUsize,
    accepted: Mutex<Vec<(String, Document)>>,
}

impl MockIndexer {
    pub fn new(config: MockConfig) -> Self {
        MockIndexer { config, attempts: AtomicUsize::new(0), accepted: Mutex::new(Vec::new()) }
    }

    /// Submission attempts so far, including the failed one.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Accepted `(index, document)` pairs in submission order.
    pub fn submitted(&self) -> Vec<(String, Document)> {
        self.accepted.lock().map(|docs| docs.clone()).unwrap_or_default()
    }

    /// Accepted documents only.
    pub fn documents(&self) -> Vec<Document> {
        self.submitted().into_iter().map(|(_, doc)| doc).collect()
    }
}

impl Indexer for MockIndexer {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn index(&self, index: &str, document: &Document) -> PushResult<IndexReceipt> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.config.fail_on == Some(attempt) {
            return Err(PushError::IndexSubmission(format!("mock rejected document #{attempt}")));
        }
        let mut accepted = self
            .accepted
            .lock()
            .map_err(|_| PushError::IndexSubmission("mock indexer poisoned".into()))?;
        accepted.push((index.to_string(), document.clone()));
        Ok(IndexReceipt { id: Some(format!("mock-{attempt}")), result: Some("created".into()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_documents() {
        let mock = MockIndexer::new(MockConfig::new("mock"));
        let receipt = mock.index("fennec", &Document::default()).unwrap();
        assert_eq!(receipt.id.as_deref(), Some("mock-1"));
        assert_eq!(mock.submitted().len(), 1);
        assert_eq!(mock.submitted()[0].0, "fennec");
    }

    #[test]
    fn test_mock_fails_on_configured_attempt() {
        let mock = MockIndexer::new(MockConfig::new("mock").failing_on(2));
        mock.index("fennec", &Document::default()).unwrap();
        let err = mock.index("fennec", &Document::default()).unwrap_err();
        assert!(matches!(err, PushError::IndexSubmission(_)));
        assert_eq!(mock.attempts(), 2);
        assert_eq!(mock.documents().len(), 1);
    }
}

//! Document submission to the search datastore.
//!
//! The pipeline talks to an `Indexer`; `ElasticsearchIndexer` is the real
//! one and `MockIndexer` stands in for it in tests.

pub mod elasticsearch;
pub mod mock;
pub mod traits;

// Re-export key types
pub use elasticsearch::ElasticsearchIndexer;
pub use mock::{MockConfig, MockIndexer};
pub use traits::{IndexReceipt, Indexer};

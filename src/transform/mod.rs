//! Record transformation: one JSONL line in, one indexable document out.

pub mod record;
pub mod timestamp;

pub use record::{RecordTransformer, SOURCE_TIMESTAMP_KEY, artifact_name, build_document, parse_record};
pub use timestamp::{EPOCH_TIMESTAMP, normalize_timestamp};

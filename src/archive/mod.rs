//! Triage image access.
//!
//! A triage image is a zip archive whose top-level `.jsonl` members hold the
//! collected artifacts, one JSON object per line.

pub mod scanner;

pub use scanner::{ArchiveEntry, JSONL_EXTENSION, TriageImage, is_qualifying_entry};

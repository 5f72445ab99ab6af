//! Core types for fennec-es.
//!
//! This module contains the run configuration and the document/summary schema
//! shared by the scanner, transformer and indexers.

pub mod config;
pub mod schema;

// Re-export key types for convenience
pub use config::{DEFAULT_INDEX, PushConfig};
pub use schema::{Document, EntrySummary, RunSummary};

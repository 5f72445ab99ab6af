use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use crate::archive::{ArchiveEntry, TriageImage};
use crate::core::{EntrySummary, PushConfig, RunSummary};
use crate::index::Indexer;
use crate::transform::RecordTransformer;
use crate::{PushError, PushResult, now_string, write_json};

/// Push every record of the triage image in `config` to `indexer`.
///
/// Entries are processed in stored order, lines in file order, one
/// submission per record. The first failure aborts the run; documents
/// submitted before it stay in the index.
pub fn push(config: &PushConfig, indexer: &dyn Indexer) -> PushResult<RunSummary> {
    let started_at = now_string();
    let start = Instant::now();
    let es_url = config.display_url();

    let mut image = TriageImage::open(&config.archive)?;
    let entries = image.qualifying_entries()?;
    info!(archive = %config.archive.display(), entries = entries.len(), indexer = indexer.name(), "pushing triage image");

    let mut summaries = Vec::with_capacity(entries.len());
    for entry in &entries {
        println!("{}", start_line(&entry.name, &es_url));
        let documents = push_entry(&mut image, entry, &config.index, indexer)?;
        println!("{}", done_line(&entry.name));
        info!(entry = %entry.name, documents, "entry done");
        summaries.push(EntrySummary { entry: entry.name.clone(), artifact_name: entry.artifact_name(), documents });
    }

    let total_documents = summaries.iter().map(|s| s.documents).sum();
    Ok(RunSummary {
        started_at,
        archive: config.archive.display().to_string(),
        es_url,
        index: config.index.clone(),
        entries: summaries,
        total_documents,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

fn start_line(entry: &str, es_url: &str) -> String {
    format!("[!] Start processing the file '{entry}' and pushing records to ES '{es_url}'")
}

fn done_line(entry: &str) -> String {
    format!("[!] Done processing the file '{entry}'")
}

fn push_entry(image: &mut TriageImage, entry: &ArchiveEntry, index: &str, indexer: &dyn Indexer) -> PushResult<usize> {
    let transformer = RecordTransformer::new(entry.name.as_str());
    let reader = image.open_entry(entry)?;

    let mut documents = 0usize;
    for (line_idx, line_result) in reader.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = line_result.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => PushError::MalformedRecord {
                entry: entry.name.clone(),
                line: line_num,
                reason: format!("not valid UTF-8: {e}"),
            },
            _ => PushError::Archive(format!("failed to read '{}' at line {line_num}: {e}", entry.name)),
        })?;

        let Some(document) = transformer.transform_line(line_num, &line)? else {
            continue;
        };
        let receipt = indexer.index(index, &document)?;
        debug!(entry = %entry.name, line = line_num, id = ?receipt.id, "record submitted");
        documents += 1;
    }
    Ok(documents)
}

/// Command entry point: push, print the elapsed time, optionally write a report.
pub fn run(config: PushConfig, indexer: &dyn Indexer, json_out: Option<PathBuf>) -> PushResult<RunSummary> {
    let summary = push(&config, indexer)?;

    if let Some(json_path) = json_out {
        write_json(&json_path, &summary)?;
    }

    println!("[!] Done! Took '{}' seconds", summary.elapsed_ms as f64 / 1000.0);
    Ok(summary)
}

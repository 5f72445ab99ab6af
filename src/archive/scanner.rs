//! Opens a triage image and selects the entries worth indexing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;
use zip::read::ZipFile;

use crate::transform::artifact_name;
use crate::{PushError, PushResult};

/// Suffix of the entries that carry records.
pub const JSONL_EXTENSION: &str = ".jsonl";

/// Buffer size for reading decompressed entry data.
const ENTRY_BUFFER_SIZE: usize = 128 * 1024;

/// A member of the archive selected for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the archive's central directory
    pub index: usize,
    pub name: String,
}

impl ArchiveEntry {
    pub fn artifact_name(&self) -> String {
        artifact_name(&self.name)
    }
}

/// Top-level `.jsonl` members only; anything inside a directory is skipped.
pub fn is_qualifying_entry(name: &str) -> bool {
    name.ends_with(JSONL_EXTENSION) && !name.contains('/')
}

/// An opened, read-only triage image. The underlying file is closed on drop.
pub struct TriageImage {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl std::fmt::Debug for TriageImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageImage")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl TriageImage {
    /// Open the zip archive at `path` for reading.
    ///
    /// # Errors
    /// Returns `PushError::Archive` if the file is missing, unreadable or not
    /// a zip archive.
    pub fn open(path: impl AsRef<Path>) -> PushResult<Self> {
        let path = path.as_ref();
        println!("[!] Opening triage image '{}'", path.display());

        let file = File::open(path)
            .map_err(|e| PushError::Archive(format!("unable to open '{}': {e}", path.display())))?;
        let archive = ZipArchive::new(file)
            .map_err(|e| PushError::Archive(format!("'{}' is not a valid zip archive: {e}", path.display())))?;
        debug!(path = %path.display(), entries = archive.len(), "opened triage image");

        Ok(TriageImage { path: path.to_path_buf(), archive })
    }

    /// Total number of members, selected or not.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Members to index, in stored order.
    pub fn qualifying_entries(&mut self) -> PushResult<Vec<ArchiveEntry>> {
        let mut entries = Vec::new();
        for index in 0..self.archive.len() {
            let name = self.name_at(index)?;
            if is_qualifying_entry(&name) {
                entries.push(ArchiveEntry { index, name });
            } else {
                debug!(entry = %name, "skipping entry");
            }
        }
        Ok(entries)
    }

    /// Open an entry for line-by-line reading.
    pub fn open_entry(&mut self, entry: &ArchiveEntry) -> PushResult<impl BufRead + '_> {
        let file = self.entry_at(entry.index)?;
        Ok(BufReader::with_capacity(ENTRY_BUFFER_SIZE, file))
    }

    fn name_at(&mut self, index: usize) -> PushResult<String> {
        Ok(self.entry_at(index)?.name().to_string())
    }

    fn entry_at(&mut self, index: usize) -> PushResult<ZipFile<'_>> {
        let path = self.path.display().to_string();
        self.archive
            .by_index(index)
            .map_err(|e| PushError::Archive(format!("unable to read entry #{index} of '{path}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn write_archive(path: &Path, members: &[(&str, &str)]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, body) in members {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_is_qualifying_entry() {
        assert!(is_qualifying_entry("alerts.jsonl"));
        assert!(is_qualifying_entry("a.b.jsonl"));
        assert!(!is_qualifying_entry("sub/alerts.jsonl"));
        assert!(!is_qualifying_entry("alerts.json"));
        assert!(!is_qualifying_entry("alerts.jsonl.bak"));
        assert!(!is_qualifying_entry("logs/"));
    }

    #[test]
    fn test_qualifying_entries_keep_stored_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.zip");
        write_archive(
            &path,
            &[
                ("zeta.jsonl", "{}\n"),
                ("fennec.log", "log\n"),
                ("nested/alpha.jsonl", "{}\n"),
                ("alpha.jsonl", "{}\n"),
                ("beta.json", "{}\n"),
            ],
        );

        let mut image = TriageImage::open(&path).unwrap();
        assert_eq!(image.len(), 5);
        let names: Vec<String> = image.qualifying_entries().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["zeta.jsonl", "alpha.jsonl"]);
    }

    #[test]
    fn test_open_entry_reads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.zip");
        write_archive(&path, &[("users.jsonl", "{\"uid\":0}\n{\"uid\":1000}\n")]);

        let mut image = TriageImage::open(&path).unwrap();
        let entry = image.qualifying_entries().unwrap().remove(0);
        assert_eq!(entry.artifact_name(), "users");
        let lines: Vec<String> = image.open_entry(&entry).unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec![r#"{"uid":0}"#, r#"{"uid":1000}"#]);
    }

    #[test]
    fn test_open_missing_path_is_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TriageImage::open(dir.path().join("missing.zip")).unwrap_err();
        assert!(matches!(err, PushError::Archive(_)));
    }

    #[test]
    fn test_open_non_zip_is_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a.zip");
        std::fs::write(&path, b"plain text, not a zip").unwrap();
        let err = TriageImage::open(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid zip archive"));
    }
}

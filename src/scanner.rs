//! Recursive scan of a template tree.
//!
//! The scan owns a [`ScanOutcome`] accumulator for its whole lifetime and hands
//! it back when the walk is done; nothing is shared between scans.

use crate::format::{CatalogFormat, ExistingKeys};
use crate::fs_utils::read_file_lossy;
use crate::matcher::TagPattern;
use crate::transform::normalize_placeholders;
use globset::GlobSet;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Tag key to the files it was found in, in order of first discovery
pub type TagTable = IndexMap<String, Vec<PathBuf>>;

/// Counters collected during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Files read successfully
    pub files_read: usize,
    /// Distinct tags added to the table
    pub new_tags: usize,
    /// Matches skipped because the catalog already has them (counted once per file)
    pub matched_existing: usize,
}

/// A file or directory entry the scan could not read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a scan produces
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub table: TagTable,
    pub stats: ScanStats,
    pub skipped: Vec<SkippedFile>,
}

impl ScanOutcome {
    /// Adds one occurrence of `tag` in `path`.
    fn record(&mut self, tag: String, path: &Path) {
        match self.table.entry(tag) {
            Entry::Occupied(mut entry) => {
                let occurrences = entry.get_mut();
                if occurrences.last().map(PathBuf::as_path) != Some(path) {
                    occurrences.push(path.to_path_buf());
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(vec![path.to_path_buf()]);
                self.stats.new_tags += 1;
            }
        }
    }

    fn skip(&mut self, path: PathBuf, reason: String) {
        tracing::warn!(path = %path.display(), %reason, "skipping unreadable entry");
        self.skipped.push(SkippedFile { path, reason });
    }
}

/// Walks a file or directory and collects the tags missing from the catalog
pub struct DirectoryScanner<'a> {
    pattern: &'a TagPattern,
    format: &'a dyn CatalogFormat,
    existing: &'a ExistingKeys,
    exclude: Option<&'a GlobSet>,
}

impl<'a> DirectoryScanner<'a> {
    #[must_use]
    pub fn new(
        pattern: &'a TagPattern,
        format: &'a dyn CatalogFormat,
        existing: &'a ExistingKeys,
    ) -> Self {
        Self {
            pattern,
            format,
            existing,
            exclude: None,
        }
    }

    /// Skips entries whose path relative to the scan root matches `exclude`.
    #[must_use]
    pub fn with_exclude(mut self, exclude: Option<&'a GlobSet>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Scans `root`. A single file is processed on its own, a directory is walked
    /// depth-first. A path that doesn't exist contributes nothing.
    ///
    /// Unreadable entries are recorded in [`ScanOutcome::skipped`] and the walk
    /// carries on.
    #[must_use]
    pub fn scan(&self, root: &Path) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        if !root.exists() {
            tracing::debug!(root = %root.display(), "scan root does not exist");
            return outcome;
        }

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(root, entry.path()));

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    self.scan_file(entry.path(), &mut outcome);
                }
                Ok(_) => {}
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    outcome.skip(path, err.to_string());
                }
            }
        }

        tracing::debug!(
            files_read = outcome.stats.files_read,
            new_tags = outcome.stats.new_tags,
            matched_existing = outcome.stats.matched_existing,
            skipped = outcome.skipped.len(),
            "scan finished"
        );
        outcome
    }

    /// Reads one file and folds its tags into `outcome`.
    pub fn scan_file(&self, path: &Path, outcome: &mut ScanOutcome) {
        let text = match read_file_lossy(path) {
            Ok(text) => text,
            Err(err) => {
                outcome.skip(path.to_path_buf(), err.to_string());
                return;
            }
        };
        outcome.stats.files_read += 1;
        self.scan_text(&text, path, outcome);
    }

    fn scan_text(&self, text: &str, path: &Path, outcome: &mut ScanOutcome) {
        let tags = self.pattern.find_tags(text);
        tracing::debug!(path = %path.display(), tags = tags.len(), "read file");

        for raw in tags {
            let tag = normalize_placeholders(&raw.text);
            // An empty key would collide with the catalog header
            if tag.trim().is_empty() {
                tracing::debug!(path = %path.display(), "ignoring empty tag");
                continue;
            }

            let stored = self.format.normalize_for_comparison(&raw.text);
            if self.existing.contains(&stored) {
                tracing::trace!(tag = %raw.text, "already in catalog");
                outcome.stats.matched_existing += 1;
                continue;
            }
            outcome.record(tag, path);
        }
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let Some(exclude) = self.exclude else {
            return false;
        };
        match path.strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => exclude.is_match(relative),
            _ => false,
        }
    }
}

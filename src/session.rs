use crate::error::Result;
use crate::format::FormatKind;
use crate::fs_utils::{append_to_catalog, normalize_root, read_catalog};
use crate::matcher::TagPattern;
use crate::scanner::{DirectoryScanner, ScanStats, SkippedFile};
use globset::GlobSet;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Template file or directory to scan
    pub root: PathBuf,
    /// Catalog checked for existing keys and appended to
    pub catalog: PathBuf,
    /// Catalog dialect
    pub format: FormatKind,
    /// Pattern locating tags in templates
    pub pattern: TagPattern,
    /// Report only, never touch the catalog
    pub dry_run: bool,
    /// Paths (relative to `root`) left out of the scan
    pub exclude: Option<GlobSet>,
}

impl ExtractConfig {
    /// Config with the default pattern and format
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, catalog: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            catalog: catalog.into(),
            format: FormatKind::default(),
            pattern: TagPattern::default(),
            dry_run: false,
            exclude: None,
        }
    }
}

/// What an extraction run did
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub root: PathBuf,
    pub catalog: PathBuf,
    pub format: FormatKind,
    /// Keys the catalog held before the run
    pub existing_keys: usize,
    #[serde(flatten)]
    pub stats: ScanStats,
    /// Keys rendered into `output`, in discovery order
    pub tags: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub dry_run: bool,
    /// Whether `output` was appended to the catalog
    pub written: bool,
    /// Catalog text for the new tags, absent when nothing new was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Loads the catalog, scans the templates and appends what's missing
#[derive(Debug, Clone)]
pub struct ExtractionSession {
    config: ExtractConfig,
}

impl ExtractionSession {
    #[must_use]
    pub const fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Runs the extraction.
    ///
    /// Configuration problems (missing root, unreadable catalog) fail before any
    /// file is scanned. In dry-run mode the catalog is only ever read; a missing
    /// catalog is then treated as empty rather than created.
    ///
    /// # Errors
    ///
    /// - `TransfindError::RootNotFound` if the templates path doesn't exist.
    /// - `TransfindError::CatalogUnreadable` if the catalog can't be read or created.
    /// - `TransfindError::CatalogUnwritable` if appending the new entries fails.
    pub fn run(&self) -> Result<ExtractionReport> {
        let config = &self.config;
        let root = normalize_root(&config.root)?;
        let format = config.format.catalog();

        let catalog_text = read_catalog(&config.catalog, !config.dry_run)?;
        let existing = format.parse_existing_keys(&catalog_text);
        tracing::info!(
            catalog = %config.catalog.display(),
            existing = existing.len(),
            "loaded catalog keys"
        );

        let outcome = DirectoryScanner::new(&config.pattern, format, &existing)
            .with_exclude(config.exclude.as_ref())
            .scan(&root);

        let output = (!outcome.table.is_empty()).then(|| format.serialize_table(&outcome.table));

        let mut written = false;
        if let Some(blob) = &output
            && !config.dry_run
        {
            append_to_catalog(&config.catalog, blob)?;
            written = true;
            tracing::info!(
                catalog = %config.catalog.display(),
                tags = outcome.table.len(),
                "catalog updated"
            );
        }

        Ok(ExtractionReport {
            root,
            catalog: config.catalog.clone(),
            format: config.format,
            existing_keys: existing.len(),
            stats: outcome.stats,
            tags: outcome.table.keys().cloned().collect(),
            skipped: outcome.skipped,
            dry_run: config.dry_run,
            written,
            output,
        })
    }
}

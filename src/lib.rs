//! # transfind
//!
//! A library and CLI tool that finds translatable tags in template trees and
//! appends the ones missing from a message catalog.
//!
//! ## Features
//!
//! - Finds `{% trans %}...{% endtrans %}` tags (or any custom pattern) recursively
//! - Converts `{{ name }}` placeholders into catalog `%name%` placeholders
//! - Skips tags the catalog already contains
//! - Appends new entries only, never rewrites the catalog
//! - Pluggable catalog dialects (currently gettext `.po`)
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use transfind::{ExtractConfig, ExtractionSession};
//!
//! let mut config = ExtractConfig::new("templates/", "locale/en/LC_MESSAGES/messages.po");
//! config.dry_run = true;
//!
//! match ExtractionSession::new(config).run() {
//!     Ok(report) => print!("{}", report.output.unwrap_or_default()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Append new tags to a catalog
//! transfind templates/ locale/en/LC_MESSAGES/messages.po Po
//!
//! # Show what would be appended
//! transfind templates/ messages.po --dry-run
//!
//! # Use a custom pattern
//! transfind templates/ messages.po -t '\{\{ _\("(.*)"\) \}\}'
//! ```

pub mod error;
pub mod format;
pub mod fs_utils;
pub mod matcher;
pub mod scanner;
pub mod session;
pub mod transform;

// Re-export main types and functions for convenience
pub use error::{Result, TransfindError};
pub use format::{CatalogFormat, ExistingKeys, FormatKind, PoFormat};
pub use matcher::{PluralClause, RawTag, TagPattern};
pub use scanner::{DirectoryScanner, ScanOutcome, ScanStats, SkippedFile, TagTable};
pub use session::{ExtractConfig, ExtractionReport, ExtractionSession};
pub use transform::normalize_placeholders;

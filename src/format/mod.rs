//! Catalog dialects.
//!
//! A dialect knows how to read the keys already present in a catalog, how a
//! template tag is spelled once stored, and how to render a new entry. Adding a
//! dialect means implementing [`CatalogFormat`] and registering it in
//! [`FormatKind`]; nothing else in the crate changes.

pub mod po;

use crate::error::{Result, TransfindError};
use crate::scanner::TagTable;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use po::PoFormat;

/// Keys found in an existing catalog, in file order
pub type ExistingKeys = IndexSet<String>;

/// One catalog dialect
pub trait CatalogFormat {
    /// Reads every key from the catalog text. Unparsable content yields no keys.
    fn parse_existing_keys(&self, catalog: &str) -> ExistingKeys;

    /// Spells a raw template tag the way the catalog stores it, for comparison
    /// against [`CatalogFormat::parse_existing_keys`].
    fn normalize_for_comparison(&self, raw_tag: &str) -> String;

    /// Renders one entry ready to be appended to the catalog.
    fn serialize_entry(&self, tag: &str, occurrences: &[PathBuf]) -> String;

    /// Renders every entry of `table` in discovery order.
    fn serialize_table(&self, table: &TagTable) -> String {
        table
            .iter()
            .map(|(tag, occurrences)| self.serialize_entry(tag, occurrences))
            .collect()
    }
}

/// Registry of supported catalog dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// GNU gettext `.po` catalogs
    #[default]
    Po,
}

static PO: PoFormat = PoFormat;

impl FormatKind {
    /// Every registered dialect
    pub const ALL: &'static [Self] = &[Self::Po];

    /// Canonical lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Po => "po",
        }
    }

    /// Resolves a format name, ignoring case (`Po`, `po`, `PO`).
    ///
    /// # Errors
    ///
    /// Returns `TransfindError::UnknownFormat` if no dialect is registered under `name`.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| TransfindError::UnknownFormat {
                name: name.to_string(),
                known: Self::ALL
                    .iter()
                    .map(|kind| kind.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// The implementation behind this name
    #[must_use]
    pub fn catalog(self) -> &'static dyn CatalogFormat {
        match self {
            Self::Po => &PO,
        }
    }
}

impl FromStr for FormatKind {
    type Err = TransfindError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

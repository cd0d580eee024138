use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for transfind operations
#[derive(Error, Debug)]
pub enum TransfindError {
    /// IO error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Templates root does not exist
    #[error("Templates path does not exist: {path}")]
    RootNotFound { path: PathBuf },

    /// Catalog file could not be read (or created)
    #[error("Could not read or create catalog file {path}: {source}")]
    CatalogUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Catalog file could not be appended to
    #[error("Could not write catalog file {path}: {source}")]
    CatalogUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Format name with no registered catalog dialect
    #[error("Unknown catalog format '{name}' (known formats: {known})")]
    UnknownFormat { name: String, known: String },

    /// Custom tag pattern failed to compile
    #[error("Invalid tag pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Tag name unusable for the default pattern
    #[error("Invalid tag name '{name}': must be non-empty and contain no whitespace")]
    InvalidTagName { name: String },

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Exclude glob compilation error
    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransfindError {
    /// Configuration errors are reported before any scanning takes place.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound { .. }
                | Self::CatalogUnreadable { .. }
                | Self::CatalogUnwritable { .. }
                | Self::UnknownFormat { .. }
                | Self::InvalidPattern { .. }
                | Self::InvalidTagName { .. }
                | Self::Glob(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TransfindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransfindError::RootNotFound {
            path: PathBuf::from("/test/templates"),
        };
        assert_eq!(
            format!("{err}"),
            "Templates path does not exist: /test/templates"
        );

        let err = TransfindError::UnknownFormat {
            name: "Xliff".to_string(),
            known: "po".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Unknown catalog format 'Xliff' (known formats: po)"
        );

        let err = TransfindError::InvalidTagName {
            name: "my tag".to_string(),
        };
        assert!(format!("{err}").contains("'my tag'"));

        let err = TransfindError::CatalogUnreadable {
            path: PathBuf::from("messages.po"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(format!("{err}").contains("messages.po"));
        assert!(format!("{err}").contains("denied"));
    }

    #[test]
    fn test_configuration_classification() {
        let err = TransfindError::RootNotFound {
            path: PathBuf::from("missing"),
        };
        assert!(err.is_configuration());

        let err: TransfindError = io::Error::new(io::ErrorKind::NotFound, "test").into();
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: TransfindError = io_err.into();
        assert!(matches!(err, TransfindError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: TransfindError = json_err.into();
        assert!(matches!(err, TransfindError::Json(_)));
    }
}

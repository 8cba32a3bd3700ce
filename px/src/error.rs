//! Loader error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a single proposal file
///
/// These never abort a batch load: the caller logs the failure and skips the file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front matter in {path}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Front matter in {path} is never closed")]
    UnterminatedFrontMatter { path: PathBuf },

    #[error("Front matter in {path} is not a key-value mapping")]
    NotAMapping { path: PathBuf },

    #[error("Invalid slug: {slug}")]
    InvalidSlug { slug: String },
}

impl LoadError {
    /// True when the file simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unterminated_message() {
        let err = LoadError::UnterminatedFrontMatter {
            path: PathBuf::from("/docs/lp-7.md"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/docs/lp-7.md"));
        assert!(msg.contains("never closed"));
    }

    #[test]
    fn test_is_not_found() {
        let err = LoadError::Read {
            path: PathBuf::from("missing.md"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_not_found());

        let err = LoadError::Read {
            path: PathBuf::from("locked.md"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_not_found());

        let err = LoadError::NotAMapping {
            path: PathBuf::from("lp-1.md"),
        };
        assert!(!err.is_not_found());
    }
}

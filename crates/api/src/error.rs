use std::path::PathBuf;

/// Failures surfaced by resource resolution and resource access.
///
/// Absence is never one of these: a missing file is `exists() == false`, a
/// pattern with no matches is an empty result set.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Malformed pattern `{pattern}`: {reason}")]
    PatternSyntax { pattern: String, reason: String },
    #[error("Corrupt archive {}: {reason}", path.display())]
    ArchiveCorrupt { path: PathBuf, reason: String },
    #[error("Entry `{entry}` not found in archive {}", archive.display())]
    EntryNotFound { archive: PathBuf, entry: String },
    #[error("Cannot access {location}: {reason}")]
    ResourceAccess { location: String, reason: String },
    #[error("{what} unavailable for {location}")]
    MetadataUnavailable {
        location: String,
        what: &'static str,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ResourceError {
    pub fn access(location: impl Into<String>, reason: impl ToString) -> Self {
        ResourceError::ResourceAccess {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn metadata_unavailable(location: impl Into<String>, what: &'static str) -> Self {
        ResourceError::MetadataUnavailable {
            location: location.into(),
            what,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;

//! Error kinds for modgraph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// This enum categorizes errors so callers can decide per kind whether to
/// abort the run or skip the offending archive and keep scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid argument passed on the command line or to an API
    InvalidArgument,

    // =========================================================================
    // Scan errors
    // =========================================================================
    /// Walking the mods folder failed
    TraversalFailed,

    /// File or folder not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Archive / metadata errors
    // =========================================================================
    /// The file is not a readable zip archive
    ArchiveInvalid,

    /// The archive carries no recognized mod descriptor
    MetadataMissing,

    /// A mod descriptor exists but could not be parsed
    MetadataInvalid,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::IoFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ArchiveInvalid.to_string(), "ArchiveInvalid");
        assert_eq!(ErrorKind::MetadataMissing.to_string(), "MetadataMissing");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(!ErrorKind::MetadataInvalid.is_retryable());
        assert!(!ErrorKind::TraversalFailed.is_retryable());
    }
}

//! Error types for minigit

use crate::model::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for minigit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ways an encoded object can fail validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no NUL separator between header and payload")]
    MalformedSeparator,

    #[error("header must have exactly two space-separated fields")]
    MalformedHeader,

    #[error("unsupported object kind: {0:?}")]
    UnsupportedKind(String),

    #[error("invalid length field: {0:?}")]
    InvalidLength(String),

    #[error("length mismatch: header declares {declared} bytes, payload has {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// Errors that can occur in minigit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write object {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("failed to read object {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("object {id} is not a valid zlib stream: {source}")]
    DecompressFailed {
        id: ObjectId,
        #[source]
        source: std::io::Error,
    },

    #[error("integrity check failed: requested {expected}, content hashes to {computed}")]
    IntegrityMismatch {
        expected: ObjectId,
        computed: ObjectId,
    },

    #[error("corrupt object {id}: {source}")]
    CorruptObject {
        id: ObjectId,
        #[source]
        source: DecodeError,
    },

    #[error("Compression error: {0}")]
    Compress(#[source] std::io::Error),

    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),
}

impl Error {
    /// Whether the error means stored bytes did not hold what their name
    /// promised, as opposed to an I/O or lookup failure.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Error::DecompressFailed { .. }
                | Error::IntegrityMismatch { .. }
                | Error::CorruptObject { .. }
        )
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::DirectoryCreateFailed { .. } => "directory_create_failed",
            Error::WriteFailed { .. } => "write_failed",
            Error::NotFound(_) => "not_found",
            Error::ReadFailed { .. } => "read_failed",
            Error::DecompressFailed { .. } => "decompress_failed",
            Error::IntegrityMismatch { .. } => "integrity_mismatch",
            Error::CorruptObject { .. } => "corrupt_object",
            Error::Compress(_) => "compress_failed",
            Error::InvalidObjectId(_) => "invalid_object_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_classification() {
        let id = ObjectId::digest(b"x");
        let mismatch = Error::IntegrityMismatch {
            expected: id,
            computed: ObjectId::digest(b"y"),
        };
        let corrupt = Error::CorruptObject {
            id,
            source: DecodeError::MalformedHeader,
        };

        assert!(mismatch.is_integrity_error());
        assert!(corrupt.is_integrity_error());
        assert!(!Error::NotFound(id).is_integrity_error());
        assert_eq!(mismatch.kind(), "integrity_mismatch");
    }

    #[test]
    fn test_display_includes_ids() {
        let id = ObjectId::digest(b"x");
        let msg = Error::NotFound(id).to_string();
        assert!(msg.contains(&id.to_hex()));
    }
}

//! Storage collaborator errors.

/// Storage-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// Requested record does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),

    /// Write rejected by the backend
    #[display("Write rejected: {}", _0)]
    WriteRejected(String),

    /// Backend is unreachable or misbehaving
    #[display("Backend failure: {}", _0)]
    Backend(String),
}

/// Storage error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at {}:{}", kind, file, line)]
pub struct StorageError {
    /// The specific error kind
    pub kind: StorageErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

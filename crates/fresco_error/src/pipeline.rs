//! Generation pipeline errors.

/// Pipeline-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Both the primary and the backup provider failed for one request
    #[display("Provider chain exhausted: primary={}, backup={}", primary, backup)]
    ProviderChainExhausted {
        /// Name of the primary provider
        primary: String,
        /// Name of the backup provider
        backup: String,
    },

    /// LLM response violated the output contract
    #[display("Contract violation: {}", _0)]
    ContractViolation(String),

    /// Month key could not be parsed
    #[display("Invalid month key: {}", _0)]
    InvalidMonthKey(String),

    /// Request parameters were rejected before any work started
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at {}:{}", kind, file, line)]
pub struct PipelineError {
    /// The specific error kind
    pub kind: PipelineErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

//! Model provider errors.

/// Anthropic-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AnthropicErrorKind {
    /// Transport-level failure reaching the API
    #[display("HTTP failure: {}", _0)]
    Http(String),

    /// API returned a non-success status
    #[display("API error {}: {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body returned with the error
        message: String,
    },

    /// Response body could not be parsed
    #[display("Parse error: {}", _0)]
    Parse(String),

    /// Missing or malformed credentials
    #[display("Auth error: {}", _0)]
    Auth(String),

    /// Error converting between Fresco and Anthropic types
    #[display("Conversion error: {}", _0)]
    Conversion(String),
}

impl AnthropicErrorKind {
    /// Whether a retry against the same endpoint could plausibly succeed.
    ///
    /// Auth and conversion failures are permanent; transport failures and
    /// 5xx/429 statuses are transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnthropicErrorKind::Http(_) => true,
            AnthropicErrorKind::ApiError { status, .. } => {
                *status == 429 || *status >= 500
            }
            AnthropicErrorKind::Parse(_)
            | AnthropicErrorKind::Auth(_)
            | AnthropicErrorKind::Conversion(_) => false,
        }
    }
}

/// OpenAI-compatible provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OpenAiErrorKind {
    /// Transport-level failure reaching the API
    #[display("HTTP failure: {}", _0)]
    Http(String),

    /// API returned a non-success status
    #[display("API error {}: {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body returned with the error
        message: String,
    },

    /// Rate limit exceeded
    #[display("Rate limit exceeded")]
    RateLimit,

    /// Requested model does not exist
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),

    /// Response body could not be parsed
    #[display("Parse error: {}", _0)]
    Parse(String),

    /// Request was rejected before reaching the model
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

impl OpenAiErrorKind {
    /// Whether a retry against the same endpoint could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiErrorKind::Http(_) | OpenAiErrorKind::RateLimit => true,
            OpenAiErrorKind::ApiError { status, .. } => *status >= 500,
            OpenAiErrorKind::ModelNotFound(_)
            | OpenAiErrorKind::Parse(_)
            | OpenAiErrorKind::InvalidRequest(_) => false,
        }
    }
}

/// Model provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub enum ModelsErrorKind {
    /// Anthropic-specific error
    #[display("Anthropic: {}", _0)]
    Anthropic(AnthropicErrorKind),

    /// OpenAI-compatible provider error
    #[display("OpenAI: {}", _0)]
    OpenAi(OpenAiErrorKind),

    /// Provider call exceeded its deadline
    #[display("Timed out after {} seconds", _0)]
    #[from(skip)]
    Timeout(u64),

    /// Builder error (derive_builder failures)
    #[display("Builder error: {}", _0)]
    #[from(skip)]
    Builder(String),
}

impl ModelsErrorKind {
    /// Whether a retry against the same provider could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelsErrorKind::Anthropic(kind) => kind.is_retryable(),
            ModelsErrorKind::OpenAi(kind) => kind.is_retryable(),
            ModelsErrorKind::Timeout(_) => true,
            ModelsErrorKind::Builder(_) => false,
        }
    }
}

/// Model provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;

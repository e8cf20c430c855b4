//! Top-level error wrapper types.

use crate::{
    BackendError, BuilderError, ConfigError, HttpError, JsonError, ModelsError, PipelineError,
    StorageError,
};

/// The foundation error enum uniting every Fresco concern.
///
/// # Examples
///
/// ```
/// use fresco_error::{FrescoError, HttpError};
///
/// let http_err = HttpError::new("connection refused");
/// let err: FrescoError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FrescoErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Storage collaborator error
    #[from(StorageError)]
    Storage(StorageError),
    /// Generation pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Fresco error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fresco_error::{ConfigError, FrescoResult};
///
/// fn might_fail() -> FrescoResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fresco Error: {}", _0)]
pub struct FrescoError(Box<FrescoErrorKind>);

impl FrescoError {
    /// Create a new error from a kind.
    pub fn new(kind: FrescoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FrescoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FrescoErrorKind
impl<T> From<T> for FrescoError
where
    T: Into<FrescoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fresco operations.
pub type FrescoResult<T> = std::result::Result<T, FrescoError>;

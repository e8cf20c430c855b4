//! Provider failover orchestration.
//!
//! One request, two providers: the primary is tried once (with an
//! explicit deadline), and any failure — timeout included — moves the
//! identical request to the backup. No prompt mutation happens between
//! attempts, and nothing is retained between invocations.

use fresco_core::GenerateRequest;
use fresco_error::{FrescoError, FrescoResult, PipelineError, PipelineErrorKind};
use fresco_interface::FrescoDriver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Sequential-with-failover provider chain.
pub struct GenerationOrchestrator {
    primary: Arc<dyn FrescoDriver>,
    backup: Arc<dyn FrescoDriver>,
    call_timeout: Duration,
}

impl GenerationOrchestrator {
    /// Create a chain with the default per-call timeout.
    pub fn new(primary: Arc<dyn FrescoDriver>, backup: Arc<dyn FrescoDriver>) -> Self {
        Self::with_timeout(primary, backup, DEFAULT_CALL_TIMEOUT)
    }

    /// Create a chain with an explicit per-call timeout.
    pub fn with_timeout(
        primary: Arc<dyn FrescoDriver>,
        backup: Arc<dyn FrescoDriver>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            backup,
            call_timeout,
        }
    }

    /// Run the request through the chain, returning the raw response text.
    ///
    /// Fails only after both providers have failed, with a
    /// provider-chain-exhausted error naming both.
    #[instrument(skip(self, request), fields(primary = self.primary.provider_name(), backup = self.backup.provider_name()))]
    pub async fn generate(&self, request: &GenerateRequest) -> FrescoResult<String> {
        match self.call(&self.primary, request).await {
            Ok(text) => {
                info!(provider = self.primary.provider_name(), "Primary provider succeeded");
                Ok(text)
            }
            Err(primary_err) => {
                warn!(
                    provider = self.primary.provider_name(),
                    error = %primary_err,
                    "Primary provider failed, switching to backup"
                );
                match self.call(&self.backup, request).await {
                    Ok(text) => {
                        info!(provider = self.backup.provider_name(), "Backup provider succeeded");
                        Ok(text)
                    }
                    Err(backup_err) => {
                        warn!(
                            provider = self.backup.provider_name(),
                            error = %backup_err,
                            "Backup provider failed, chain exhausted"
                        );
                        Err(PipelineError::new(PipelineErrorKind::ProviderChainExhausted {
                            primary: self.primary.provider_name().to_string(),
                            backup: self.backup.provider_name().to_string(),
                        })
                        .into())
                    }
                }
            }
        }
    }

    /// Name of the provider tried first.
    pub fn primary_name(&self) -> &'static str {
        self.primary.provider_name()
    }

    async fn call(
        &self,
        driver: &Arc<dyn FrescoDriver>,
        request: &GenerateRequest,
    ) -> FrescoResult<String> {
        match tokio::time::timeout(self.call_timeout, driver.generate(request)).await {
            Ok(Ok(response)) => Ok(response.text),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(timeout_error(self.call_timeout)),
        }
    }
}

fn timeout_error(timeout: Duration) -> FrescoError {
    fresco_error::ModelsError::new(fresco_error::ModelsErrorKind::Timeout(timeout.as_secs()))
        .into()
}

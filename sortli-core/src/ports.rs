//! Traits describing upstream model capabilities and their errors.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::prompt::CompletionRequest;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the upstream model.
pub enum PortError {
    /// No credential is configured for the upstream service.
    #[error("AI gateway credential not configured")]
    MissingCredential,
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Upstream answered with a non-success status.
    #[error("AI Gateway error: {status}")]
    UpstreamStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },
    /// Upstream answered 2xx with a body that is not a completion.
    #[error("Invalid AI Gateway response: {0}")]
    InvalidEnvelope(String),
}

#[async_trait]
/// Trait for chat-completion backends.
pub trait CompletionPort: Send + Sync {
    /// Short name of the backend, used in logs.
    fn provider_name(&self) -> &str;

    /// Run a completion and return the assistant text.
    ///
    /// An empty string is returned when the upstream reply carries no text.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend is unconfigured, unreachable,
    /// or answers with a failure.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PortError>;
}

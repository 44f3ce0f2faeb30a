//! Completion provider for OpenAI-compatible AI gateways.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::error;

use sortli_core::{
    ports::{CompletionPort, PortError},
    prompt::CompletionRequest,
};

/// Gateway used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Bearer credential for the gateway.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, ignoring blank values.
    #[must_use]
    pub fn new<S: Into<String>>(raw: S) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ApiKey(***)")
    }
}

/// Where the gateway lives and how to authenticate.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Credential; calls fail with [`PortError::MissingCredential`] without it.
    pub api_key: Option<ApiKey>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
        }
    }
}

impl GatewayConfig {
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Envelope of /chat/completions
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Single choice inside the envelope
#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<AssistantMessage>,
}

/// Assistant message of a choice; `content` is null for some refusals
#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl CompletionResponse {
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

/// Chat completion backend talking to the gateway over HTTPS.
pub struct GatewayCompletionPort {
    client: Client,
    config: GatewayConfig,
}

impl GatewayCompletionPort {
    /// Create a new port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl CompletionPort for GatewayCompletionPort {
    fn provider_name(&self) -> &str {
        "ai-gateway"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, PortError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(PortError::MissingCredential)?;

        let req = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key.expose())
            .json(request);

        let envelope = fetch_completion(req).await?;
        Ok(envelope.into_content())
    }
}

/// Shared-client port, ready to hand to the classification service.
#[must_use]
pub fn port(client: Client, config: GatewayConfig) -> Arc<dyn CompletionPort> {
    Arc::new(GatewayCompletionPort::new(client, config))
}

// Send the request, keeping the body of failed responses for diagnostics.
async fn fetch_completion(req: RequestBuilder) -> Result<CompletionResponse, PortError> {
    let resp = req.send().await.map_err(PortError::from)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        error!(status = status.as_u16(), %body, "AI Gateway error");
        return Err(PortError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp.bytes().await.map_err(PortError::from)?;
    serde_json::from_slice(&bytes).map_err(|err| PortError::InvalidEnvelope(err.to_string()))
}

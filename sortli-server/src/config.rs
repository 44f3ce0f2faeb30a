//! Command line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;
use sortli_core::ModelPolicy;
use sortli_provider_gateway::{ApiKey, DEFAULT_BASE_URL, GatewayConfig};

use crate::routes::DEFAULT_MAX_BODY_BYTES;

/// Runtime settings for the classification server.
///
/// Every flag can also be set through the environment; a `.env` file in the
/// working directory is loaded first.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Config {
    /// Address to bind the HTTP server
    #[arg(long, env = "SORTLI_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Base URL of the OpenAI-compatible AI gateway
    #[arg(long, env = "AI_GATEWAY_URL", default_value = DEFAULT_BASE_URL)]
    pub gateway_url: String,

    /// Bearer credential for the AI gateway
    #[arg(long, env = "AI_GATEWAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for photos
    #[arg(long, env = "SORTLI_IMAGE_MODEL", default_value = "google/gemini-2.5-flash")]
    pub image_model: String,

    /// Model used for text descriptions
    #[arg(long, env = "SORTLI_TEXT_MODEL", default_value = "google/gemini-2.5-flash-lite")]
    pub text_model: String,

    /// Sampling temperature sent upstream
    #[arg(long, env = "SORTLI_TEMPERATURE", default_value_t = 0.3)]
    pub temperature: f32,

    /// Output token ceiling sent upstream
    #[arg(long, env = "SORTLI_MAX_TOKENS", default_value_t = 200)]
    pub max_tokens: u32,

    /// Largest accepted request body in bytes
    #[arg(long, env = "SORTLI_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Tracing filter directives
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    /// Load `.env` (if any) and parse flags and environment.
    #[must_use]
    pub fn load() -> Self {
        // a missing .env file is fine
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// Model selection derived from the flags.
    #[must_use]
    pub fn model_policy(&self) -> ModelPolicy {
        ModelPolicy {
            image_model: self.image_model.clone(),
            text_model: self.text_model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Gateway location and credential derived from the flags.
    #[must_use]
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.gateway_url.clone(),
            api_key: self.api_key.clone().and_then(ApiKey::new),
        }
    }
}

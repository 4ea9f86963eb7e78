//! Sources of `PromptSpec`s: the deterministic template builder, or a hosted
//! text model asked to write the spec as JSON.
//!
//! Every provider resolves to a usable spec. Remote failures are retried when
//! transient and otherwise downgrade to the template builder.

pub mod anthropic;
pub mod gemini;
pub mod prompts;
pub mod schema;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{GeneratorInput, PromptSpec};
use crate::spec_builder::build_spec;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Empty response: {0}")] Empty(String),
}

impl LlmError {
    /// Transient failures are worth another attempt; everything else falls back at once.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(_) | LlmError::RateLimited { .. } | LlmError::Empty(_) => true,
            LlmError::Api { status, .. } => *status >= 500 || *status == 408,
        }
    }
}

/// The single capability every spec source offers.
#[async_trait]
pub trait SpecProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never fails: remote providers fall back to the template builder.
    async fn generate_spec(&self, input: &GeneratorInput) -> PromptSpec;
}

/// Template mode. No I/O, fully deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProvider;

#[async_trait]
impl SpecProvider for LocalProvider {
    fn name(&self) -> &'static str { "mock" }

    async fn generate_spec(&self, input: &GeneratorInput) -> PromptSpec {
        build_spec(input)
    }
}

/// A hosted chat/text backend that can answer one system + user prompt pair.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(base_delay: Duration) -> Self {
        Self { max_attempts: 3, base_delay }
    }

    /// `base * 2^attempt`, attempt counted from zero.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Backoff for a failed attempt, stretched to the server's `Retry-After` when that is longer.
    pub fn delay_after(&self, attempt: u32, error: &LlmError) -> Duration {
        let backoff = self.delay_for(attempt);
        match error {
            LlmError::RateLimited { retry_after_secs: Some(secs) } => backoff.max(Duration::from_secs(*secs)),
            _ => backoff,
        }
    }
}

/// Asks a `TextModel` for a spec, validates the answer and falls back to the template builder.
pub struct RemoteSpecProvider<M> {
    model: M,
    retry: RetryPolicy,
}

impl<M: TextModel> RemoteSpecProvider<M> {
    pub fn new(model: M, retry: RetryPolicy) -> Self {
        Self { model, retry }
    }

    fn fallback(&self, input: &GeneratorInput, reason: &str) -> PromptSpec {
        warn!("🔄 {} spec generation fell back to template mode: {}", self.model.name(), reason);
        build_spec(input)
    }
}

#[async_trait]
impl<M: TextModel> SpecProvider for RemoteSpecProvider<M> {
    fn name(&self) -> &'static str { self.model.name() }

    async fn generate_spec(&self, input: &GeneratorInput) -> PromptSpec {
        let system = prompts::system_prompt();
        let user = prompts::user_prompt(input);
        let provider = self.model.name();

        for attempt in 0..self.retry.max_attempts {
            let text = match self.model.complete(&system, &user).await {
                Ok(text) => text,
                Err(e) if e.is_transient() => {
                    let remaining = self.retry.max_attempts - attempt - 1;
                    if remaining == 0 {
                        error!("❌ {} attempt {}/{} failed: {}", provider, attempt + 1, self.retry.max_attempts, e);
                        break;
                    }
                    let delay = self.retry.delay_after(attempt, &e);
                    warn!(
                        "⏳ {} attempt {}/{} failed: {}. Retrying in {:?}",
                        provider, attempt + 1, self.retry.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(e) => return self.fallback(input, &e.to_string()),
            };

            return match schema::parse_spec(&text) {
                Ok(mut spec) => {
                    spec.stamp_user_intent(input);
                    info!("✅ {} produced a valid spec for '{}' (attempt {})", provider, input.dish_name, attempt + 1);
                    spec
                }
                Err(e) => self.fallback(input, &e.to_string()),
            };
        }

        self.fallback(input, "all retries failed")
    }
}

/// Picks the provider for this process: Gemini if keyed, else Anthropic, else template mode.
pub fn provider_from_config(config: &Config) -> Arc<dyn SpecProvider> {
    if let Some(key) = &config.gemini_api_key {
        info!("🤖 Using Gemini spec provider ({})", config.gemini_model);
        let client = GeminiClient::new(key.clone(), config.gemini_api_base.clone(), config.gemini_model.clone());
        return Arc::new(RemoteSpecProvider::new(client, RetryPolicy::new(gemini::RATE_LIMIT_BASE_DELAY)));
    }
    if let Some(key) = &config.anthropic_api_key {
        info!("🤖 Using Anthropic spec provider ({})", config.anthropic_model);
        let client = AnthropicClient::new(key.clone(), config.anthropic_api_base.clone(), config.anthropic_model.clone());
        return Arc::new(RemoteSpecProvider::new(client, RetryPolicy::new(anthropic::RATE_LIMIT_BASE_DELAY)));
    }
    info!("📝 No LLM key configured, using template mode");
    Arc::new(LocalProvider)
}

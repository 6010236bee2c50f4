//! Completion gateway.
//!
//! A completion service takes a system prompt, a user prompt and sampling
//! parameters and answers with generated text. [`CompletionGateway`] is the
//! only thing the rest of the application knows about it; the concrete
//! provider is picked from configuration when the process starts.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::Deserialize;

pub use error::GatewayError;
pub use gemini::Gemini;
pub use openai::OpenAi;

mod error;
mod gemini;
mod openai;

type ResultGateway<T> = Result<T, GatewayError>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sampling parameters forwarded to the provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl SamplingParams {
    /// Conversational replies for the community assistant.
    pub const CHAT: SamplingParams = SamplingParams {
        temperature: 0.7,
        max_tokens: 500,
    };

    /// Low temperature keeps the advice format consistent.
    pub const ADVICE: SamplingParams = SamplingParams {
        temperature: 0.3,
        max_tokens: 500,
    };
}

#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Returns the trimmed generated text.
    ///
    /// Fails with [`GatewayError::EmptyResponse`] when the provider answers
    /// without text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: SamplingParams,
    ) -> ResultGateway<String>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Gemini => "gemini-1.5-flash",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com",
            Provider::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    /// Environment variable read when no key is configured explicitly.
    pub fn key_env(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => f.write_str("openai"),
            Provider::Gemini => f.write_str("gemini"),
        }
    }
}

/// Return a builder for a provider-backed gateway.
pub fn builder() -> GatewayBuilder {
    GatewayBuilder::default()
}

#[derive(Debug, Default)]
pub struct GatewayBuilder {
    provider: Provider,
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl GatewayBuilder {
    pub fn provider(mut self, provider: Provider) -> GatewayBuilder {
        self.provider = provider;
        self
    }

    pub fn model(mut self, model: Option<String>) -> GatewayBuilder {
        self.model = model;
        self
    }

    /// Explicit credential. When absent the provider's environment variable
    /// is used.
    pub fn api_key(mut self, api_key: Option<String>) -> GatewayBuilder {
        self.api_key = api_key;
        self
    }

    pub fn base_url(mut self, base_url: Option<String>) -> GatewayBuilder {
        self.base_url = base_url;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> GatewayBuilder {
        self.timeout = Some(timeout);
        self
    }

    /// Construct the gateway.
    ///
    /// A missing or blank credential is an error: the caller is expected to
    /// treat it as fatal.
    pub fn build(self) -> ResultGateway<Arc<dyn CompletionGateway>> {
        let provider = self.provider;
        let api_key = self
            .api_key
            .or_else(|| std::env::var(provider.key_env()).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(GatewayError::MissingCredential(provider))?;

        let model = self
            .model
            .unwrap_or_else(|| provider.default_model().to_string());
        let base_url = self
            .base_url
            .unwrap_or_else(|| provider.default_base_url().to_string());
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        tracing::info!("Using {provider} completion gateway with model {model}");

        let gateway: Arc<dyn CompletionGateway> = match provider {
            Provider::OpenAi => Arc::new(OpenAi::new(&api_key, &base_url, &model, timeout)?),
            Provider::Gemini => Arc::new(Gemini::new(&api_key, &base_url, &model, timeout)?),
        };
        Ok(gateway)
    }
}

fn http_client(
    auth_header: header::HeaderName,
    auth_value: &str,
    timeout: Duration,
) -> ResultGateway<Client> {
    let mut auth = header::HeaderValue::try_from(auth_value)
        .map_err(|err| GatewayError::Config(format!("invalid credential header: {err}")))?;
    auth.set_sensitive(true);

    let mut headers = header::HeaderMap::new();
    headers.insert(auth_header, auth);

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Decodes a successful body or turns a failing one into
/// [`GatewayError::Upstream`].
async fn read_reply<T: for<'de> Deserialize<'de>>(resp: Response) -> ResultGateway<T> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| "completion service error".to_string());
        return Err(GatewayError::Upstream { status, message });
    }

    serde_json::from_str(&body).map_err(|err| GatewayError::Decode(err.to_string()))
}

/// Trims a reply; nothing left means nothing was generated.
fn non_empty(reply: Option<String>) -> ResultGateway<String> {
    match reply.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(GatewayError::EmptyResponse),
    }
}

use std::sync::Arc;
use std::time::Duration;
use reqwest::{Client, StatusCode};
use bp_core::{ContentProvider, Error, ProviderError, Result, Topic};
use tracing::info;
use crate::{Config, ModelKind};

pub mod deepseek;
pub mod dummy;
pub mod gemini;

pub use deepseek::DeepSeekProvider;
pub use dummy::DummyProvider;
pub use gemini::GeminiProvider;

/// Build the provider selected by `config`.
///
/// Missing credentials and malformed endpoints are reported here, before any
/// topic is attempted.
pub fn create_provider(config: &Config) -> Result<Arc<dyn ContentProvider>> {
    let provider: Arc<dyn ContentProvider> = match config.model {
        ModelKind::Gemini => Arc::new(GeminiProvider::new(config)?),
        ModelKind::DeepSeek => Arc::new(DeepSeekProvider::new(config)?),
        ModelKind::Dummy => Arc::new(DummyProvider::new()),
    };
    info!("🧠 Content provider ready (using {})", provider.name());
    Ok(provider)
}

pub(crate) fn require_api_key(config: &Config) -> Result<String> {
    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => {
            let hint = config
                .model
                .api_key_env()
                .map(|var| format!(" (set --api-key, BULKPRESS_API_KEY or {})", var))
                .unwrap_or_default();
            Err(Error::Config(format!("{} API key is required{}", config.model, hint)))
        }
    }
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(crate) fn require_title(topic: &Topic) -> std::result::Result<(), ProviderError> {
    if topic.title.trim().is_empty() {
        return Err(ProviderError::invalid("topic title is empty"));
    }
    Ok(())
}

/// Map a non-success HTTP status to the retry taxonomy.
pub(crate) fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let message = format!("HTTP {}: {}", status.as_u16(), error_detail(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT => ProviderError::transient(message),
        s if s.is_server_error() => ProviderError::transient(message),
        s if s.is_client_error() => ProviderError::invalid(message),
        _ => ProviderError::unknown(message),
    }
}

/// Map a transport-level failure to the retry taxonomy.
pub(crate) fn classify_transport(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        ProviderError::transient(error.to_string())
    } else if let Some(status) = error.status() {
        classify_status(status, "")
    } else {
        ProviderError::unknown(error.to_string())
    }
}

/// Pull `error.message` out of a JSON error payload, or fall back to the raw text.
fn error_detail(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match from_json {
        Some(message) => message,
        None => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        }
    }
}

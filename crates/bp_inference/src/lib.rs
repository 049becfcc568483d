use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub mod metadata;
pub mod models;
pub mod prompt;

/// Which content provider backs a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    #[default]
    Gemini,
    #[value(name = "deepseek")]
    DeepSeek,
    /// Offline generator, no network or API key
    Dummy,
}

impl ModelKind {
    pub fn requires_api_key(self) -> bool {
        !matches!(self, ModelKind::Dummy)
    }

    /// Provider-specific environment variable consulted for the API key.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            ModelKind::Gemini => Some("GEMINI_API_KEY"),
            ModelKind::DeepSeek => Some("DEEPSEEK_API_KEY"),
            ModelKind::Dummy => None,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Gemini => f.write_str("gemini"),
            ModelKind::DeepSeek => f.write_str("deepseek"),
            ModelKind::Dummy => f.write_str("dummy"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = bp_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ModelKind::Gemini),
            "deepseek" => Ok(ModelKind::DeepSeek),
            "dummy" => Ok(ModelKind::Dummy),
            other => Err(bp_core::Error::Config(format!(
                "Unknown model '{}'. Available models: gemini, deepseek, dummy",
                other
            ))),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub model: ModelKind,
    pub api_key: Option<String>,
    /// Overrides the provider's default model name
    pub model_name: Option<String>,
    /// Overrides the provider's default API base URL
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            api_key: None,
            model_name: None,
            base_url: None,
            timeout: Duration::from_secs(120),
        }
    }
}

pub mod prelude {
    pub use super::{Config, ModelKind};
    pub use super::models::create_provider;
    pub use bp_core::{ArticleContent, ContentProvider, ProviderError, ProviderErrorKind, Result, Topic};
}

pub use models::create_provider;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("gemini".parse::<ModelKind>().unwrap(), ModelKind::Gemini);
        assert_eq!("DeepSeek".parse::<ModelKind>().unwrap(), ModelKind::DeepSeek);
        assert_eq!(" dummy ".parse::<ModelKind>().unwrap(), ModelKind::Dummy);
        assert!("gpt".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = Config {
            api_key: Some("secret-key".to_string()),
            ..Config::default()
        };
        let printed = format!("{:?}", config);
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("secret-key"));
    }
}

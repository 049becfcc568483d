use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use bp_core::{ArticleContent, ContentProvider, Error, ProviderError, Result, Topic};
use tracing::debug;
use crate::{metadata, prompt, Config};
use super::{build_client, classify_status, classify_transport, require_api_key, require_title};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Finish reasons for which Gemini deterministically withholds the text.
const WITHHELD_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 4096,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> std::result::Result<String, ProviderError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => ProviderError::invalid(format!("prompt blocked by Gemini: {}", reason)),
                None => ProviderError::unknown("Gemini response contained no candidates"),
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            if let Some(reason) = candidate
                .finish_reason
                .as_deref()
                .filter(|r| WITHHELD_FINISH_REASONS.contains(r))
            {
                return Err(ProviderError::invalid(format!("Gemini withheld the article ({})", reason)));
            }
        }
        Ok(text)
    }
}

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = require_api_key(config)?;
        let model = config.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let endpoint = Url::parse(&format!(
            "{}/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        ))
        .map_err(|e| Error::Config(format!("Invalid Gemini base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            client: build_client(config.timeout)?,
            api_key,
            model,
            endpoint,
        })
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, topic: &Topic) -> std::result::Result<ArticleContent, ProviderError> {
        require_title(topic)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt::build_prompt(topic)),
                }],
            }],
            generation_config: GenerationConfig::default(),
        };

        debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self.client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::unknown(format!("unreadable Gemini response: {}", e)))?;
        let text = parsed.into_text()?;

        Ok(metadata::derive_content(&topic.title, &text))
    }
}

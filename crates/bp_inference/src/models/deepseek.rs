use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use bp_core::{ArticleContent, ContentProvider, Error, ProviderError, Result, Topic};
use tracing::debug;
use crate::{metadata, prompt, Config};
use super::{build_client, classify_status, classify_transport, require_api_key, require_title};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Any OpenAI-compatible chat completions endpoint; DeepSeek by default.
pub struct DeepSeekProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl fmt::Debug for DeepSeekProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl DeepSeekProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = require_api_key(config)?;
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let endpoint = Url::parse(&format!("{}/chat/completions", base_url.trim_end_matches('/')))
            .map_err(|e| Error::Config(format!("Invalid DeepSeek base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            client: build_client(config.timeout)?,
            api_key,
            model: config.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint,
        })
    }
}

#[async_trait]
impl ContentProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn generate(&self, topic: &Topic) -> std::result::Result<ArticleContent, ProviderError> {
        require_title(topic)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt::build_prompt(topic),
            }],
            temperature: 0.7,
            max_tokens: 4096,
        };

        debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self.client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::unknown(format!("unreadable chat completion: {}", e)))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::unknown("chat completion contained no choices"))?
            .message
            .content
            .unwrap_or_default();

        Ok(metadata::derive_content(&topic.title, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::ProviderErrorKind;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> DeepSeekProvider {
        let config = Config {
            model: crate::ModelKind::DeepSeek,
            api_key: Some("test-key".to_string()),
            base_url: Some(format!("{}/v1/", server.uri())),
            ..Config::default()
        };
        DeepSeekProvider::new(&config).unwrap()
    }

    #[test]
    fn test_model_requires_api_key() {
        let config = Config {
            model: crate::ModelKind::DeepSeek,
            ..Config::default()
        };
        let result = DeepSeekProvider::new(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("deepseek API key is required"));
    }

    #[tokio::test]
    async fn test_generate_from_chat_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Microservices split systems apart."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let topic = Topic::new("Microservices Architecture", "patterns");
        let content = provider_for(&server).generate(&topic).await.unwrap();
        assert!(content.body.starts_with("# Microservices Architecture\n\n"));
        assert_eq!(content.meta_description, "Microservices split systems apart.");
    }

    #[tokio::test]
    async fn test_missing_choices_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = provider_for(&server).generate(&Topic::titled("Rust")).await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Unknown);
    }

    #[tokio::test]
    async fn test_unauthorized_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Authentication Fails", "type": "authentication_error"}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).generate(&Topic::titled("Rust")).await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Invalid);
        assert_eq!(err.message, "HTTP 401: Authentication Fails");
    }
}

use async_trait::async_trait;
use crate::error::ProviderError;
use crate::types::{ArticleContent, Topic};

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Generate an article for a topic with exactly one outbound call.
    ///
    /// A topic with an empty title fails with `ProviderErrorKind::Invalid`.
    /// The provider does not judge whether the body is long enough.
    async fn generate(&self, topic: &Topic) -> Result<ArticleContent, ProviderError>;
}

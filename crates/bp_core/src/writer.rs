use std::path::PathBuf;
use async_trait::async_trait;
use crate::types::{ArticleContent, RunSummary, Topic};
use crate::Result;

#[async_trait]
pub trait DocumentWriter: Send + Sync {
    /// Persist one generated article, returning the path written.
    async fn write_article(&self, topic: &Topic, content: &ArticleContent) -> Result<PathBuf>;

    /// Persist the run summary artifact, returning the path written.
    async fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf>;
}

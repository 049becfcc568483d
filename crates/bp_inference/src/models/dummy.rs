use std::fmt;
use async_trait::async_trait;
use bp_core::{ArticleContent, ContentProvider, ProviderError, Topic};
use crate::metadata;
use super::require_title;

const SECTIONS: &[&str] = &[
    "Why It Matters",
    "Core Concepts",
    "Getting Started",
    "A Practical Example",
    "Common Pitfalls",
    "Best Practices",
    "Real-World Use Cases",
    "Conclusion",
];

/// Offline provider that writes a deterministic placeholder article.
pub struct DummyProvider;

impl fmt::Debug for DummyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyProvider").finish()
    }
}

impl DummyProvider {
    pub fn new() -> Self {
        Self
    }

    fn render(topic: &Topic) -> String {
        let title = topic.title.trim();
        let focus = if topic.description.trim().is_empty() {
            "the fundamentals every developer should know".to_string()
        } else {
            topic.description.trim().to_string()
        };

        let mut article = format!(
            "# {title}\n\nThis article walks through {title} with a focus on {focus}. \
             It is generated offline so the whole pipeline can be exercised without calling a model.\n"
        );
        for heading in SECTIONS {
            article.push_str(&format!(
                "\n## {heading}\n\n\
                 When working with {title}, this part of the story covers {lower}. \
                 Start small, measure what changes, and keep the feedback loop short so mistakes stay cheap to fix.\n\n\
                 Teams that adopt {title} well usually write down their conventions early. \
                 Revisit them as the codebase grows and prune anything nobody follows anymore.\n",
                lower = heading.to_lowercase(),
            ));
        }
        article
    }
}

impl Default for DummyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentProvider for DummyProvider {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, topic: &Topic) -> Result<ArticleContent, ProviderError> {
        require_title(topic)?;
        Ok(metadata::derive_content(&topic.title, &Self::render(topic)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::ProviderErrorKind;

    #[tokio::test]
    async fn test_dummy_provider() {
        let provider = DummyProvider::new();
        let topic = Topic::new("Database Indexing", "index types and pitfalls");

        let content = provider.generate(&topic).await.unwrap();
        assert!(content.body.starts_with("# Database Indexing\n\n"));
        assert!(content.body.contains("## Common Pitfalls"));
        assert!(content.word_count > 300);
        assert!(content.meta_description.starts_with("This article walks through Database Indexing"));
        assert_eq!(content.keywords, vec!["database", "indexing"]);

        let again = provider.generate(&topic).await.unwrap();
        assert_eq!(content, again);
    }

    #[tokio::test]
    async fn test_dummy_rejects_empty_title() {
        let err = DummyProvider::new().generate(&Topic::titled("")).await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Invalid);
    }
}

use bp_core::ArticleContent;

/// Decides whether generated content is good enough to keep.
///
/// A rejection is treated like a retryable provider failure.
pub trait ContentValidator: Send + Sync {
    fn validate(&self, content: &ArticleContent) -> Result<(), String>;
}

impl<F> ContentValidator for F
where
    F: Fn(&ArticleContent) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, content: &ArticleContent) -> Result<(), String> {
        self(content)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmpty;

impl ContentValidator for NonEmpty {
    fn validate(&self, content: &ArticleContent) -> Result<(), String> {
        if content.body.trim().is_empty() {
            Err("generated body is empty".to_string())
        } else {
            Ok(())
        }
    }
}

/// Rejects bodies shorter than the given number of words.
#[derive(Debug, Clone, Copy)]
pub struct MinWordCount(pub usize);

impl MinWordCount {
    pub const DEFAULT_MIN_WORDS: usize = 300;
}

impl Default for MinWordCount {
    fn default() -> Self {
        Self(Self::DEFAULT_MIN_WORDS)
    }
}

impl ContentValidator for MinWordCount {
    fn validate(&self, content: &ArticleContent) -> Result<(), String> {
        NonEmpty.validate(content)?;
        let words = content.body.split_whitespace().count();
        if words < self.0 {
            return Err(format!("generated body too short ({} words, minimum {})", words, self.0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> ArticleContent {
        ArticleContent {
            body: text.to_string(),
            meta_description: String::new(),
            keywords: Vec::new(),
            word_count: 0,
        }
    }

    #[test]
    fn test_non_empty() {
        assert!(NonEmpty.validate(&body("  \n")).is_err());
        assert!(NonEmpty.validate(&body("# Title")).is_ok());
    }

    #[test]
    fn test_min_word_count_counts_body_words() {
        let validator = MinWordCount(4);
        assert_eq!(
            validator.validate(&body("one two three")).unwrap_err(),
            "generated body too short (3 words, minimum 4)"
        );
        assert!(validator.validate(&body("one two three four")).is_ok());
        assert!(MinWordCount(0).validate(&body("")).is_err());
    }

    #[test]
    fn test_closures_are_validators() {
        let needs_heading = |content: &ArticleContent| {
            if content.body.starts_with("# ") {
                Ok(())
            } else {
                Err("missing title heading".to_string())
            }
        };
        assert!(needs_heading.validate(&body("# T\n\ntext")).is_ok());
        assert!(needs_heading.validate(&body("text")).is_err());
    }
}

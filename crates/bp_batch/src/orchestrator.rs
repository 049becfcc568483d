use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use bp_core::{
    ArticleContent, ArticleResult, Clock, ContentProvider, DocumentWriter, Error, ProviderError,
    Result, RunSummary, SystemClock, Topic,
};
use tracing::{error, info};
use crate::logging::Logger;
use crate::validation::{ContentValidator, MinWordCount};

pub const INTERRUPTED_MESSAGE: &str = "run interrupted before this topic was attempted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Provider calls allowed per topic, first attempt included
    pub max_attempts: u32,
    /// Delay after the first retryable failure; doubles after each further one
    pub base_backoff: Duration,
    /// Fixed wait between consecutive topics, whatever their outcome
    pub pacing_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(2),
            pacing_delay: Duration::from_secs(2),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::Config("max attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Wait before retrying after `failures` consecutive retryable failures:
/// `base × 2^(failures-1)`, saturating instead of overflowing.
pub fn backoff_delay(base: Duration, failures: u32) -> Duration {
    let exponent = failures.saturating_sub(1).min(31);
    base.saturating_mul(1u32 << exponent)
}

/// Runs topics one at a time through a provider, retrying and pacing, and
/// collects the outcome of every topic into a `RunSummary`.
pub struct BatchOrchestrator {
    provider: Arc<dyn ContentProvider>,
    writer: Arc<dyn DocumentWriter>,
    clock: Arc<dyn Clock>,
    validator: Box<dyn ContentValidator>,
    config: BatchConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl fmt::Debug for BatchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOrchestrator")
            .field("provider", &self.provider.name())
            .field("writer", &"<dyn DocumentWriter>")
            .field("config", &self.config)
            .finish()
    }
}

impl BatchOrchestrator {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        writer: Arc<dyn DocumentWriter>,
        config: BatchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            writer,
            clock: Arc::new(SystemClock),
            validator: Box::new(MinWordCount::default()),
            config,
            interrupt: None,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_validator(mut self, validator: impl ContentValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Checked before each topic; once set, the remaining topics are recorded as failed.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    pub async fn run(&self, topics: &[Topic]) -> RunSummary {
        let total = topics.len();
        info!("🚀 Starting bulk generation of {} articles (using {})", total, self.provider.name());
        let mut summary = RunSummary::start(self.clock.now());

        for (index, topic) in topics.iter().enumerate() {
            let logger = Logger::new().with_prefix(format!("[{}/{}]", index + 1, total));

            if self.interrupted() {
                logger.warn(&format!("⏹️ Skipping '{}': run interrupted", topic.title));
                summary.record(ArticleResult::failure(topic.clone(), 0, INTERRUPTED_MESSAGE));
                continue;
            }

            let result = self.process_topic(topic, &logger).await;
            summary.record(result);

            if index + 1 < total && !self.interrupted() {
                logger.debug(&format!("Pacing for {:?} before the next topic", self.config.pacing_delay));
                self.clock.sleep(self.config.pacing_delay).await;
            }
        }

        summary.finish(self.clock.now());
        info!(
            "🏁 Bulk generation complete! Generated {}/{} articles ({} failed)",
            summary.succeeded, summary.total, summary.failed
        );

        match self.writer.write_summary(&summary).await {
            Ok(path) => summary.summary_file = Some(path),
            Err(e) => error!("Failed to save generation summary: {}", e),
        }
        summary
    }

    async fn process_topic(&self, topic: &Topic, logger: &Logger) -> ArticleResult {
        logger.info(&format!("📰 Generating article: '{}'", topic.title));

        let (outcome, attempts) = self.generate_with_retries(topic, logger).await;
        let content = match outcome {
            Ok(content) => content,
            Err(err) => {
                logger.error(&format!(
                    "❌ Failed to generate '{}' after {} attempt(s): {}",
                    topic.title, attempts, err
                ));
                return ArticleResult::failure(topic.clone(), attempts, err.to_string());
            }
        };

        match self.writer.write_article(topic, &content).await {
            Ok(path) => {
                logger.info(&format!(
                    "✅ Generated '{}' ({} words, {} attempt(s))",
                    topic.title, content.word_count, attempts
                ));
                ArticleResult::success(topic.clone(), content, attempts, path)
            }
            Err(err) => {
                logger.error(&format!("❌ Generated '{}' but could not save it: {}", topic.title, err));
                ArticleResult::failure(topic.clone(), attempts, err.to_string())
            }
        }
    }

    /// Returns the final outcome together with the number of provider calls made.
    async fn generate_with_retries(
        &self,
        topic: &Topic,
        logger: &Logger,
    ) -> (std::result::Result<ArticleContent, ProviderError>, u32) {
        let max_attempts = self.config.max_attempts;
        let mut attempts = 0;

        loop {
            attempts += 1;
            logger.debug(&format!("Attempt {}/{} with {}", attempts, max_attempts, self.provider.name()));

            let failure = match self.provider.generate(topic).await {
                Ok(content) => match self.validator.validate(&content) {
                    Ok(()) => return (Ok(content), attempts),
                    Err(reason) => ProviderError::unknown(format!("generated content rejected: {}", reason)),
                },
                Err(err) => err,
            };

            if !failure.is_retryable() {
                logger.warn(&format!("🚫 Attempt {} failed and will not be retried: {}", attempts, failure));
                return (Err(failure), attempts);
            }
            if attempts >= max_attempts {
                return (Err(failure), attempts);
            }

            let delay = backoff_delay(self.config.base_backoff, attempts);
            logger.warn(&format!(
                "⚠️ Attempt {}/{} failed: {}. Retrying in {:?}",
                attempts, max_attempts, failure, delay
            ));
            self.clock.sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_from_base() {
        let base = Duration::from_secs(2);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_is_strictly_increasing() {
        let base = Duration::from_millis(250);
        for failures in 1..10 {
            assert!(backoff_delay(base, failures + 1) > backoff_delay(base, failures));
        }
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(backoff_delay(Duration::from_secs(u64::MAX / 2), 40), Duration::MAX);
        assert_eq!(backoff_delay(Duration::ZERO, 5), Duration::ZERO);
    }

    #[test]
    fn test_zero_attempts_is_a_config_error() {
        let config = BatchConfig {
            max_attempts: 0,
            ..BatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(BatchConfig::default().validate().is_ok());
    }
}

use std::path::PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Topic {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(title, String::new())
    }
}

/// Generated article text plus the SEO metadata derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub body: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResult {
    pub topic: Topic,
    pub body: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub succeeded: bool,
    pub error_message: Option<String>,
    pub attempts: u32,
    pub output_file: Option<PathBuf>,
}

impl ArticleResult {
    pub fn success(topic: Topic, content: ArticleContent, attempts: u32, output_file: PathBuf) -> Self {
        Self {
            topic,
            body: content.body,
            meta_description: content.meta_description,
            keywords: content.keywords,
            word_count: content.word_count,
            succeeded: true,
            error_message: None,
            attempts,
            output_file: Some(output_file),
        }
    }

    pub fn failure(topic: Topic, attempts: u32, error_message: impl Into<String>) -> Self {
        Self {
            topic,
            body: String::new(),
            meta_description: String::new(),
            keywords: Vec::new(),
            word_count: 0,
            succeeded: false,
            error_message: Some(error_message.into()),
            attempts,
            output_file: None,
        }
    }
}

/// Aggregate record of one batch run, filled in as topics reach a terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ArticleResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Where the summary artifact was written, if it was.
    #[serde(skip)]
    pub summary_file: Option<PathBuf>,
}

impl RunSummary {
    pub fn start(started_at: DateTime<Utc>) -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            results: Vec::new(),
            started_at,
            finished_at: None,
            summary_file: None,
        }
    }

    pub fn record(&mut self, result: ArticleResult) {
        self.total += 1;
        if result.succeeded {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
        debug_assert_eq!(self.succeeded + self.failed, self.total);
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

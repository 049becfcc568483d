use chrono::{DateTime, Utc};
use serde::Serialize;
use bp_core::{ArticleResult, RunSummary};

pub const SUMMARY_FILE_NAME: &str = "generation_summary.json";

/// On-disk shape of the run summary artifact.
#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
    pub articles: Vec<SummaryEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SummaryEntry<'a> {
    pub title: &'a str,
    pub succeeded: bool,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    pub word_count: usize,
    pub meta_description: &'a str,
    pub keywords: &'a [String],
}

impl<'a> From<&'a ArticleResult> for SummaryEntry<'a> {
    fn from(result: &'a ArticleResult) -> Self {
        Self {
            title: &result.topic.title,
            succeeded: result.succeeded,
            attempts: result.attempts,
            error: result.error_message.as_deref(),
            output_file: result.output_file.as_ref().map(|p| p.display().to_string()),
            word_count: result.word_count,
            meta_description: &result.meta_description,
            keywords: &result.keywords,
        }
    }
}

impl<'a> From<&'a RunSummary> for SummaryDocument<'a> {
    fn from(summary: &'a RunSummary) -> Self {
        Self {
            total: summary.total,
            succeeded: summary.succeeded,
            failed: summary.failed,
            started_at: summary.started_at,
            finished_at: summary.finished_at,
            duration_seconds: summary.duration_seconds(),
            articles: summary.results.iter().map(SummaryEntry::from).collect(),
        }
    }
}

pub fn to_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SummaryDocument::from(summary))
}

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use async_trait::async_trait;
use bp_core::{ArticleContent, DocumentWriter, Error, Result, RunSummary, Topic};
use tracing::{debug, info};

pub mod formats;
pub mod slug;
pub mod summary;

pub use formats::OutputFormat;
pub use slug::slugify;
pub use summary::SUMMARY_FILE_NAME;

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("blog"),
            format: OutputFormat::default(),
        }
    }
}

/// Writes one document per article plus the summary artifact into a directory.
#[derive(Debug)]
pub struct FileWriter {
    config: OutputConfig,
    used_names: Mutex<HashSet<String>>,
}

impl FileWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            used_names: Mutex::new(HashSet::new()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Claim a file name for `title`; repeats within one run get `-2`, `-3`, ...
    fn reserve_file_name(&self, title: &str) -> String {
        let stem = slugify(title);
        let extension = self.config.format.extension();
        let mut used = self.used_names.lock().unwrap_or_else(PoisonError::into_inner);

        let mut candidate = format!("{}.{}", stem, extension);
        let mut n = 1;
        while used.contains(&candidate) {
            n += 1;
            candidate = format!("{}-{}.{}", stem, n, extension);
        }
        used.insert(candidate.clone());
        candidate
    }

    fn release_file_name(&self, file_name: &str) {
        self.used_names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(file_name);
    }

    async fn write_file(&self, file_name: &str, contents: String) -> Result<PathBuf> {
        let dir = &self.config.output_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::Write(format!("could not create {}: {}", dir.display(), e)))?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| Error::Write(format!("could not write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

#[async_trait]
impl DocumentWriter for FileWriter {
    async fn write_article(&self, topic: &Topic, content: &ArticleContent) -> Result<PathBuf> {
        let file_name = self.reserve_file_name(&topic.title);
        debug!("Rendering {} as {}", topic.title, self.config.format);
        let document = self.config.format.render(topic, content);
        match self.write_file(&file_name, document).await {
            Ok(path) => {
                info!("💾 Saved: {}", path.display());
                Ok(path)
            }
            Err(e) => {
                self.release_file_name(&file_name);
                Err(e)
            }
        }
    }

    async fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf> {
        let json = summary::to_json(summary)?;
        let path = self.write_file(SUMMARY_FILE_NAME, json).await?;
        info!("📋 Generation summary saved: {}", path.display());
        Ok(path)
    }
}

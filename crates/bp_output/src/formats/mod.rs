use std::fmt;
use std::str::FromStr;
use bp_core::{ArticleContent, Error, Topic};

pub mod html;
pub mod markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    #[value(alias = "md")]
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
        }
    }

    pub fn render(self, topic: &Topic, content: &ArticleContent) -> String {
        match self {
            OutputFormat::Html => html::render(topic, content),
            OutputFormat::Markdown => markdown::render(topic, content),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => f.write_str("html"),
            OutputFormat::Markdown => f.write_str("markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(Error::Config(format!("Unknown output format '{}': expected html or markdown", other))),
        }
    }
}

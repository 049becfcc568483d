use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use bp_batch::{init_logging, BatchConfig, BatchOrchestrator, MinWordCount, NonEmpty};
use bp_core::{RunSummary, Topic};
use bp_inference::{Config as InferenceConfig, ModelKind};
use bp_output::{FileWriter, OutputConfig, OutputFormat};
use clap::Parser;
use tracing::warn;

mod topics;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_ms = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;
        let mut chars = s.trim().chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }

            let num: u64 = current_number
                .parse()
                .map_err(|_| format!("Duration unit '{}' must follow a number", c))?;
            let unit_ms = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1_000,
                'm' => 60_000,
                'h' => 3_600_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_ms = num
                .checked_mul(unit_ms)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or("Duration is too large")?;
            current_number.clear();
            has_value = true;
        }

        // A trailing bare number is seconds
        if !current_number.is_empty() {
            let secs: u64 = current_number
                .parse()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_ms = secs
                .checked_mul(1_000)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or("Duration is too large")?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_ms)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a batch of blog articles with an LLM", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = ModelKind::Gemini, global = true)]
    model: ModelKind,
    /// Falls back to GEMINI_API_KEY or DEEPSEEK_API_KEY for the chosen model
    #[arg(long, env = "BULKPRESS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, global = true)]
    model_name: Option<String>,
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate one article per topic
    Generate(GenerateArgs),
    /// Write the sample topic list as JSON
    InitTopics {
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Topic file (.json, .toml, or one title per line)
    #[arg(long)]
    topics: Option<PathBuf>,
    /// Extra topic as "Title" or "Title :: description"; may be repeated
    #[arg(long = "topic", value_parser = topics::parse_topic_flag)]
    topic: Vec<Topic>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,
    #[arg(long, default_value = "blog")]
    output_dir: PathBuf,
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,
    /// First retry delay, doubled after each further failure (e.g. 500ms, 2s, 1m30s)
    #[arg(long, default_value = "2s")]
    backoff: HumanDuration,
    /// Wait between topics
    #[arg(long, default_value = "2s")]
    pacing: HumanDuration,
    /// Reject articles shorter than this; 0 only rejects empty bodies
    #[arg(long, default_value_t = MinWordCount::DEFAULT_MIN_WORDS)]
    min_words: usize,
}

fn resolve_api_key(model: ModelKind, explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| model.api_key_env().and_then(|var| std::env::var(var).ok()))
        .filter(|key| !key.trim().is_empty())
}

fn collect_topics(args: &GenerateArgs) -> anyhow::Result<Vec<Topic>> {
    let mut all = match &args.topics {
        Some(path) => topics::load_topics(path)
            .with_context(|| format!("Failed to load topics from {}", path.display()))?,
        None => Vec::new(),
    };
    all.extend(args.topic.iter().cloned());

    if args.topics.is_none() && all.is_empty() {
        bail!("No topics given: pass --topics FILE or --topic TITLE (`bulkpress init-topics topics.json` writes a sample list)");
    }
    Ok(all)
}

/// Sets the stop flag; returns true when it was already set by an earlier interrupt.
fn record_interrupt(flag: &AtomicBool) -> bool {
    flag.swap(true, Ordering::SeqCst)
}

fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(60));
    println!("📊 GENERATION SUMMARY");
    println!("{}", "=".repeat(60));
    for (i, result) in summary.results.iter().enumerate() {
        if result.succeeded {
            let file = result
                .output_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!(
                "{:>3}. ✅ {} ({} words, {} attempt(s)) -> {}",
                i + 1,
                result.topic.title,
                result.word_count,
                result.attempts,
                file
            );
        } else {
            println!(
                "{:>3}. ❌ {} ({} attempt(s)): {}",
                i + 1,
                result.topic.title,
                result.attempts,
                result.error_message.as_deref().unwrap_or("unknown error")
            );
        }
    }
    println!("{}", "-".repeat(60));
    println!(
        "Total: {}  Succeeded: {}  Failed: {}",
        summary.total, summary.succeeded, summary.failed
    );
    if let Some(seconds) = summary.duration_seconds() {
        println!("Elapsed: {:.1}s", seconds);
    }
    if let Some(path) = &summary.summary_file {
        println!("Summary: {}", path.display());
    }
}

async fn generate(inference: InferenceConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let topics = collect_topics(&args)?;

    let provider = bp_inference::create_provider(&inference)
        .with_context(|| format!("Failed to set up the {} provider", inference.model))?;
    let writer = Arc::new(FileWriter::new(OutputConfig {
        output_dir: args.output_dir.clone(),
        format: args.format,
    }));
    let batch = BatchConfig {
        max_attempts: args.max_attempts,
        base_backoff: args.backoff.0,
        pacing_delay: args.pacing.0,
    };

    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if record_interrupt(&flag) {
                warn!("⏹️ Second interrupt received, exiting immediately");
                std::process::exit(130);
            }
            warn!("⏹️ Interrupt received, finishing the current topic and stopping (Ctrl-C again to exit now)");
        }
    });

    let orchestrator = BatchOrchestrator::new(provider, writer, batch)?.with_interrupt(stop);
    let orchestrator = if args.min_words == 0 {
        orchestrator.with_validator(NonEmpty)
    } else {
        orchestrator.with_validator(MinWordCount(args.min_words))
    };

    let summary = orchestrator.run(&topics).await;
    print_summary(&summary);

    if summary.summary_file.is_none() {
        bail!("Generation summary could not be written to {}", args.output_dir.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = init_logging(cli.verbose);

    let inference = InferenceConfig {
        model: cli.model,
        api_key: resolve_api_key(cli.model, cli.api_key),
        model_name: cli.model_name,
        base_url: cli.base_url,
        ..InferenceConfig::default()
    };

    match cli.command {
        Commands::Generate(args) => generate(inference, args).await,
        Commands::InitTopics { path, force } => {
            topics::write_sample_topics(&path, force)?;
            logger.info(&format!(
                "📝 Wrote {} sample topics to {}",
                topics::sample_topics().len(),
                path.display()
            ));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Duration {
        s.parse::<HumanDuration>().unwrap().0
    }

    #[test]
    fn test_human_duration() {
        assert_eq!(parse("2s"), Duration::from_secs(2));
        assert_eq!(parse("500ms"), Duration::from_millis(500));
        assert_eq!(parse("1m30s"), Duration::from_secs(90));
        assert_eq!(parse("1h"), Duration::from_secs(3600));
        assert_eq!(parse("1s250ms"), Duration::from_millis(1250));
        assert_eq!(parse("5"), Duration::from_secs(5));
        assert_eq!(parse("0"), Duration::ZERO);
    }

    #[test]
    fn test_human_duration_rejects_garbage() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
        assert!("3x".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["bulkpress", "generate", "--topic", "Rust :: ownership"]).unwrap();
        assert_eq!(cli.model, ModelKind::Gemini);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.topic, vec![Topic::new("Rust", "ownership")]);
        assert_eq!(args.format, OutputFormat::Html);
        assert_eq!(args.output_dir, PathBuf::from("blog"));
        assert_eq!(args.max_attempts, 3);
        assert_eq!(args.backoff.0, Duration::from_secs(2));
        assert_eq!(args.pacing.0, Duration::from_secs(2));
        assert_eq!(args.min_words, 300);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bulkpress", "generate", "--model", "dummy", "--format", "md", "--pacing", "0", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.model, ModelKind::Dummy);
        assert_eq!(cli.verbose, 2);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.pacing.0, Duration::ZERO);
    }

    #[test]
    fn test_explicit_api_key_wins() {
        assert_eq!(
            resolve_api_key(ModelKind::Gemini, Some("flag-key".to_string())),
            Some("flag-key".to_string())
        );
        assert_eq!(resolve_api_key(ModelKind::Dummy, None), None);
        assert_eq!(resolve_api_key(ModelKind::Dummy, Some("  ".to_string())), None);
    }

    #[test]
    fn test_second_interrupt_is_detected() {
        let flag = AtomicBool::new(false);
        assert!(!record_interrupt(&flag));
        assert!(flag.load(Ordering::SeqCst));
        assert!(record_interrupt(&flag));
    }

    #[test]
    fn test_no_topics_is_an_error() {
        let cli = Cli::try_parse_from(["bulkpress", "generate"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(collect_topics(&args).is_err());
    }
}

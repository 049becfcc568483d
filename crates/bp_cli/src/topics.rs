//! Topic lists: JSON, TOML or plain-text files, `--topic` flags, and the
//! built-in sample list written by `init-topics`.

use std::path::Path;
use bp_core::{Error, Result, Topic};
use serde::Deserialize;

const SAMPLE_TOPICS: &[(&str, &str)] = &[
    (
        "Understanding Python Decorators: A Complete Guide",
        "Explain decorators with practical examples, common patterns, and best practices",
    ),
    (
        "RESTful API Design Best Practices",
        "Cover REST principles, HTTP methods, status codes, versioning, and security",
    ),
    (
        "Introduction to Docker for Developers",
        "Docker basics, containers, images, Docker Compose, and common use cases",
    ),
    (
        "Git Branching Strategies for Teams",
        "Git Flow, GitHub Flow, trunk-based development, and when to use each",
    ),
    (
        "JavaScript Async/Await: From Callbacks to Modern Async",
        "Evolution from callbacks to Promises to async/await with examples",
    ),
    (
        "Database Indexing: When and How to Use Indexes",
        "Index types, performance impact, when to add indexes, and common pitfalls",
    ),
    (
        "Building Scalable Microservices Architecture",
        "Microservices patterns, communication, service discovery, and challenges",
    ),
    (
        "React Hooks: A Practical Deep Dive",
        "useState, useEffect, custom hooks, and advanced patterns",
    ),
    (
        "SQL vs NoSQL: Choosing the Right Database",
        "Compare relational and NoSQL databases, use cases, and decision criteria",
    ),
    (
        "Test-Driven Development (TDD) in Practice",
        "TDD principles, writing testable code, common patterns, and benefits",
    ),
];

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTopics {
    List(Vec<Topic>),
    Wrapped { topics: Vec<Topic> },
}

#[derive(Deserialize)]
struct TomlTopics {
    #[serde(default)]
    topics: Vec<Topic>,
}

pub fn sample_topics() -> Vec<Topic> {
    SAMPLE_TOPICS
        .iter()
        .map(|(title, description)| Topic::new(*title, *description))
        .collect()
}

/// Read topics from `path`; the extension picks the format.
pub fn load_topics(path: &Path) -> Result<Vec<Topic>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Topics(format!("could not read {}: {}", path.display(), e)))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => parse_json(&text)
            .map_err(|e| Error::Topics(format!("invalid JSON in {}: {}", path.display(), e))),
        Some("toml") => parse_toml(&text)
            .map_err(|e| Error::Topics(format!("invalid TOML in {}: {}", path.display(), e))),
        _ => Ok(parse_lines(&text)),
    }
}

fn parse_json(text: &str) -> serde_json::Result<Vec<Topic>> {
    Ok(match serde_json::from_str::<JsonTopics>(text)? {
        JsonTopics::List(topics) => topics,
        JsonTopics::Wrapped { topics } => topics,
    })
}

fn parse_toml(text: &str) -> std::result::Result<Vec<Topic>, toml::de::Error> {
    Ok(toml::from_str::<TomlTopics>(text)?.topics)
}

/// One topic per non-empty line; `#` starts a comment line.
fn parse_lines(text: &str) -> Vec<Topic> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(split_topic)
        .collect()
}

fn split_topic(value: &str) -> Topic {
    match value.split_once("::") {
        Some((title, description)) => Topic::new(title.trim(), description.trim()),
        None => Topic::titled(value.trim()),
    }
}

/// Value parser for `--topic "Title"` and `--topic "Title :: description"`.
pub fn parse_topic_flag(value: &str) -> std::result::Result<Topic, String> {
    let topic = split_topic(value);
    if topic.title.is_empty() {
        return Err("topic title must not be empty".to_string());
    }
    Ok(topic)
}

/// Write the sample list as JSON; an existing file is kept unless `force` is set.
pub fn write_sample_topics(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Topics(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&sample_topics())?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_array_and_wrapped_object() {
        let dir = tempdir().unwrap();

        let list = dir.path().join("list.json");
        std::fs::write(&list, r#"[{"title": "Rust Traits", "description": "dyn vs impl"}, {"title": "Tokio"}]"#).unwrap();
        let topics = load_topics(&list).unwrap();
        assert_eq!(topics, vec![Topic::new("Rust Traits", "dyn vs impl"), Topic::titled("Tokio")]);

        let wrapped = dir.path().join("wrapped.JSON");
        std::fs::write(&wrapped, r#"{"topics": [{"title": "Serde"}]}"#).unwrap();
        assert_eq!(load_topics(&wrapped).unwrap(), vec![Topic::titled("Serde")]);
    }

    #[test]
    fn test_toml_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topics.toml");
        std::fs::write(
            &path,
            "[[topics]]\ntitle = \"Cargo Workspaces\"\ndescription = \"shared deps\"\n\n[[topics]]\ntitle = \"Clippy\"\n",
        )
        .unwrap();

        let topics = load_topics(&path).unwrap();
        assert_eq!(topics, vec![Topic::new("Cargo Workspaces", "shared deps"), Topic::titled("Clippy")]);
    }

    #[test]
    fn test_plain_text_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topics.txt");
        std::fs::write(&path, "# backlog\nGit Rebase\n\n  Kubernetes Operators :: writing a controller  \n").unwrap();

        let topics = load_topics(&path).unwrap();
        assert_eq!(
            topics,
            vec![
                Topic::titled("Git Rebase"),
                Topic::new("Kubernetes Operators", "writing a controller"),
            ]
        );
    }

    #[test]
    fn test_bad_files_are_topic_errors() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();

        assert!(matches!(load_topics(&broken), Err(Error::Topics(_))));
        assert!(matches!(load_topics(&dir.path().join("missing.txt")), Err(Error::Topics(_))));
    }

    #[test]
    fn test_topic_flag() {
        assert_eq!(parse_topic_flag("GraphQL").unwrap(), Topic::titled("GraphQL"));
        assert_eq!(
            parse_topic_flag("GraphQL :: schema design").unwrap(),
            Topic::new("GraphQL", "schema design")
        );
        assert!(parse_topic_flag("  :: no title").is_err());
    }

    #[test]
    fn test_sample_file_round_trips_and_is_not_clobbered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("topics.json");

        write_sample_topics(&path, false).unwrap();
        let topics = load_topics(&path).unwrap();
        assert_eq!(topics.len(), 10);
        assert_eq!(topics, sample_topics());

        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(write_sample_topics(&path, false), Err(Error::Topics(_))));
        write_sample_topics(&path, true).unwrap();
        assert_eq!(load_topics(&path).unwrap().len(), 10);
    }
}

use serde_json::Value;
use bp_core::{ArticleContent, Topic};

/// Body prefixed with YAML front matter. JSON scalars and arrays are valid YAML,
/// so serde_json handles the quoting.
pub fn render(topic: &Topic, content: &ArticleContent) -> String {
    let mut doc = String::with_capacity(content.body.len() + 256);
    doc.push_str("---\n");
    doc.push_str(&format!("title: {}\n", Value::from(topic.title.trim())));
    doc.push_str(&format!("description: {}\n", Value::from(content.meta_description.as_str())));
    doc.push_str(&format!("keywords: {}\n", Value::from(content.keywords.clone())));
    doc.push_str("---\n\n");
    doc.push_str(content.body.trim_end());
    doc.push('\n');
    doc
}

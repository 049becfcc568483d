//! SEO metadata derived locally from generated text, so a provider makes a single
//! API call per article.

use bp_core::ArticleContent;

const META_DESCRIPTION_LIMIT: usize = 160;
const MAX_KEYWORDS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "how", "in", "into", "is",
    "it", "of", "on", "or", "the", "to", "vs", "what", "when", "why", "with", "your",
];

/// Build the full `ArticleContent` for raw model output.
pub fn derive_content(title: &str, raw: &str) -> ArticleContent {
    let body = clean_body(title, raw);
    ArticleContent {
        meta_description: meta_description(title, &body),
        keywords: keywords(title),
        word_count: word_count(&body),
        body,
    }
}

/// Strip a fence wrapping the whole article and make sure it opens with a `#` title.
pub fn clean_body(title: &str, raw: &str) -> String {
    let mut body = raw.trim();

    if body.starts_with("```") {
        let first_line_end = body.find('\n').unwrap_or(body.len());
        let fence = body[..first_line_end].trim();
        if matches!(fence, "```" | "```markdown" | "```md") {
            body = body[first_line_end..].trim();
            if let Some(stripped) = body.strip_suffix("```") {
                body = stripped.trim();
            }
        }
    }

    if body.is_empty() {
        return String::new();
    }

    if body.starts_with("# ") {
        body.to_string()
    } else {
        format!("# {}\n\n{}", title.trim(), body)
    }
}

pub fn meta_description(title: &str, body: &str) -> String {
    let text = first_paragraph(body)
        .map(|p| collapse_whitespace(&strip_inline_markdown(&p)))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| title.trim().to_string());

    if text.chars().count() <= META_DESCRIPTION_LIMIT {
        text
    } else {
        let cut: String = text.chars().take(META_DESCRIPTION_LIMIT - 3).collect();
        format!("{}...", cut.trim_end())
    }
}

pub fn keywords(title: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in title.split(|c: char| !c.is_alphanumeric()) {
        let word = word.to_lowercase();
        if word.chars().count() < 2 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if !keywords.contains(&word) {
            keywords.push(word);
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// First prose paragraph, skipping headings and fenced code.
fn first_paragraph(body: &str) -> Option<String> {
    let mut in_fence = false;
    let mut lines: Vec<&str> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            if !lines.is_empty() {
                break;
            }
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let content = strip_block_markers(trimmed);
        if content.is_empty() || trimmed.starts_with('#') {
            if !lines.is_empty() {
                break;
            }
            continue;
        }
        lines.push(content);
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// Strip leading blockquote and list markers (`>`, `-`, `*`, `+`, `1.`).
fn strip_block_markers(line: &str) -> &str {
    let mut rest = line;
    while let Some(quoted) = rest.strip_prefix('>') {
        rest = quoted.trim_start();
    }

    for bullet in ["- ", "* ", "+ "] {
        if let Some(item) = rest.strip_prefix(bullet) {
            return item.trim_start();
        }
    }

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let after = &rest[digits..];
        if let Some(item) = after.strip_prefix(". ").or_else(|| after.strip_prefix(") ")) {
            return item.trim_start();
        }
    }
    rest
}

/// Drop emphasis and code markers and keep only the text of links.
/// Underscores inside words (`snake_case`) are kept.
fn strip_inline_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' | '`' | '[' => {}
            '_' => {
                let inside_word = prev.is_some_and(char::is_alphanumeric)
                    && chars.peek().is_some_and(|next| next.is_alphanumeric());
                if inside_word {
                    out.push(c);
                }
            }
            '!' if chars.peek() == Some(&'[') => {}
            ']' if chars.peek() == Some(&'(') => {
                let mut depth = 0usize;
                for next in chars.by_ref() {
                    match next {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => out.push(c),
        }
        prev = Some(c);
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

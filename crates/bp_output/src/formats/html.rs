//! Standalone HTML page: markdown rendered with pulldown-cmark, an embedded
//! stylesheet, and highlight.js picking up the `language-*` classes on code blocks.

use pulldown_cmark::{html, Event, Options, Parser};
use bp_core::{ArticleContent, Topic};

const HIGHLIGHT_CDN: &str = "https://cdn.jsdelivr.net/gh/highlightjs/cdn-release@11.9.0/build";

const STYLESHEET: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        code {
            background-color: #f4f4f4;
            padding: 2px 6px;
            border-radius: 3px;
            font-family: 'Courier New', monospace;
        }
        pre {
            background-color: #f4f4f4;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
        }
        pre code {
            background-color: transparent;
            padding: 0;
        }
        blockquote {
            border-left: 4px solid #ddd;
            margin: 0;
            padding-left: 16px;
            color: #555;
        }
        table {
            border-collapse: collapse;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 6px 12px;
        }
        img {
            max-width: 100%;
            height: auto;
        }
"#;

pub fn render(topic: &Topic, content: &ArticleContent) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">

<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description}">
    <meta name="keywords" content="{keywords}">
    <title>{title}</title>
    <link rel="stylesheet" href="{cdn}/styles/github.min.css">
    <style>
{style}    </style>
</head>

<body>
    <article>
{body}    </article>
    <script src="{cdn}/highlight.min.js"></script>
    <script>hljs.highlightAll();</script>
</body>

</html>
"#,
        description = escape_html(&content.meta_description),
        keywords = escape_html(&content.keywords.join(", ")),
        title = escape_html(topic.title.trim()),
        cdn = HIGHLIGHT_CDN,
        style = STYLESHEET,
        body = markdown_to_html(&content.body),
    )
}

/// Raw HTML from the model is escaped rather than passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(body: &str) -> ArticleContent {
        ArticleContent {
            body: body.to_string(),
            meta_description: "Learn \"decorators\" & more".to_string(),
            keywords: vec!["python".to_string(), "decorators".to_string()],
            word_count: body.split_whitespace().count(),
        }
    }

    #[test]
    fn test_code_blocks_carry_language_class() {
        let html = markdown_to_html("# Title\n\n```python\nprint('hi')\n```\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains(r#"<code class="language-python">"#));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = markdown_to_html("Hello <script>alert(1)</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_page_metadata_is_escaped() {
        let topic = Topic::titled("Python <Decorators>");
        let page = render(&topic, &content("# Python Decorators\n\nBody text."));

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Python &lt;Decorators&gt;</title>"));
        assert!(page.contains(r#"content="Learn &quot;decorators&quot; &amp; more""#));
        assert!(page.contains(r#"<meta name="keywords" content="python, decorators">"#));
        assert!(page.contains("<p>Body text.</p>"));
        assert!(page.contains("hljs.highlightAll()"));
    }
}

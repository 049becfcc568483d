use bp_core::Topic;

const DEFAULT_CONTEXT: &str =
    "Cover the topic comprehensively for intermediate to advanced developers";

pub fn build_prompt(topic: &Topic) -> String {
    let context = if topic.description.trim().is_empty() {
        DEFAULT_CONTEXT
    } else {
        topic.description.trim()
    };

    format!(
        "You are a professional technical content writer specializing in programming and software development.

Create a comprehensive, well-structured blog article on the following topic:

**Title**: {title}

**Additional Context**: {context}

**Requirements**:
1. Write a 1500-2000 word article in Markdown format
2. Include an engaging introduction that hooks the reader
3. Create 8-12 well-organized sections with clear headings (use ## for main sections, ### for subsections)
4. Provide practical code examples where relevant (use fenced code blocks with a language tag)
5. Include real-world use cases and best practices
6. Add tips, warnings, or important notes as blockquotes
7. End with a strong conclusion summarizing key takeaways
8. Write in a conversational yet professional tone
9. Ensure content is technically accurate and up-to-date
10. Make it SEO-friendly with natural keyword usage

**Format**: Return ONLY the article content in Markdown format, starting with the title as a # heading.

Do NOT include any preamble, explanations, or meta-commentary. Start directly with the article.
",
        title = topic.title.trim(),
        context = context,
    )
}

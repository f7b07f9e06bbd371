//! Markdown body compilation

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::highlight::{FenceInfo, Highlighter};

/// Compiles markdown bodies to HTML, routing code fences through the
/// highlighting transform.
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    pub fn new(theme: &str) -> Self {
        Self {
            highlighter: Highlighter::new(theme),
        }
    }

    /// Render a markdown body to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut fence: Option<FenceInfo> = None;
        let mut fence_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    fence = Some(match kind {
                        CodeBlockKind::Fenced(info) => FenceInfo::parse(&info),
                        CodeBlockKind::Indented => FenceInfo::default(),
                    });
                    fence_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let info = fence.take().unwrap_or_default();
                    let highlighted = self.highlighter.highlight(&fence_content, &info);
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if fence.is_some() => {
                    fence_content.push_str(&text);
                }
                _ if fence.is_some() => {}
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

//! Code-fence highlighting
//!
//! Fence bodies are tokenized into an explicit tree (`CodeBlock` ->
//! `Line` -> `Segment`) which a pure decoration step rewrites before
//! serialization: empty lines receive a whitespace segment so they keep
//! their height, fence-meta markers flag emphasized lines (`{1,3-5}`)
//! and words (`/word/`). An unrecognized language falls back to plain
//! uncolored segments instead of failing the build.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

lazy_static! {
    static ref LINE_MARKER: Regex = Regex::new(r"\{([\d,\s\-]+)\}").unwrap();
    static ref WORD_MARKER: Regex = Regex::new(r"/([^/\s][^/]*)/").unwrap();
}

/// Parsed code-fence info string, e.g. `rust {1,3-5} /spawn/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    /// Language identifier, if any
    pub language: Option<String>,
    /// 1-based numbers of lines flagged for emphasis
    pub marked_lines: BTreeSet<usize>,
    /// Literal words flagged for emphasis
    pub marked_words: Vec<String>,
}

impl FenceInfo {
    pub fn parse(info: &str) -> Self {
        let mut marked_lines = BTreeSet::new();
        for cap in LINE_MARKER.captures_iter(info) {
            for part in cap[1].split(',') {
                let part = part.trim();
                if let Some((start, end)) = part.split_once('-') {
                    if let (Ok(s), Ok(e)) =
                        (start.trim().parse::<usize>(), end.trim().parse::<usize>())
                    {
                        marked_lines.extend(s..=e);
                    }
                } else if let Ok(n) = part.parse::<usize>() {
                    marked_lines.insert(n);
                }
            }
        }

        let marked_words: Vec<String> = WORD_MARKER
            .captures_iter(info)
            .map(|cap| cap[1].to_string())
            .collect();

        // The language is the first token that is not a marker
        let without_lines = LINE_MARKER.replace_all(info, " ");
        let stripped = WORD_MARKER.replace_all(&without_lines, " ");
        let language = stripped
            .split_whitespace()
            .next()
            .map(|s| s.to_string());

        Self {
            language,
            marked_lines,
            marked_words,
        }
    }
}

/// One classified span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Foreground color as `#rrggbb`, absent for plain-text fallback
    pub color: Option<String>,
    /// Word-level emphasis; exclusive, a marked segment carries no color
    pub marked: bool,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            marked: false,
        }
    }
}

/// One line of a code block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub segments: Vec<Segment>,
    pub marked: bool,
}

/// A tokenized code fence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub lines: Vec<Line>,
}

/// Tokenizes code fences against a single fixed theme
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl Highlighter {
    pub fn new(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Tokenize, decorate and serialize one code fence
    pub fn highlight(&self, code: &str, info: &FenceInfo) -> String {
        let block = self.tokenize(code, info);
        let block = decorate(block, info);
        render_html(&block)
    }

    /// Tokenize a fence body into a `CodeBlock`. An unknown language
    /// yields uncolored segments rather than an error.
    pub fn tokenize(&self, code: &str, info: &FenceInfo) -> CodeBlock {
        let syntax = info
            .language
            .as_deref()
            .and_then(|lang| {
                self.syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            });

        let mut lines = Vec::new();

        match syntax {
            Some(syntax) => {
                let theme = self
                    .theme_set
                    .themes
                    .get(&self.theme_name)
                    .unwrap_or_else(|| {
                        self.theme_set
                            .themes
                            .values()
                            .next()
                            .expect("syntect default themes are never empty")
                    });
                let mut highlighter = HighlightLines::new(syntax, theme);

                for raw_line in LinesWithEndings::from(code) {
                    let mut line = Line::default();
                    match highlighter.highlight_line(raw_line, &self.syntax_set) {
                        Ok(ranges) => {
                            for (style, text) in ranges {
                                let text = text.trim_end_matches('\n');
                                if text.is_empty() {
                                    continue;
                                }
                                let fg = style.foreground;
                                line.segments.push(Segment {
                                    text: text.to_string(),
                                    color: Some(format!(
                                        "#{:02x}{:02x}{:02x}",
                                        fg.r, fg.g, fg.b
                                    )),
                                    marked: false,
                                });
                            }
                        }
                        Err(_) => {
                            let text = raw_line.trim_end_matches('\n');
                            if !text.is_empty() {
                                line.segments.push(Segment::plain(text));
                            }
                        }
                    }
                    lines.push(line);
                }
            }
            None => {
                for raw_line in LinesWithEndings::from(code) {
                    let text = raw_line.trim_end_matches('\n');
                    let mut line = Line::default();
                    if !text.is_empty() {
                        line.segments.push(Segment::plain(text));
                    }
                    lines.push(line);
                }
            }
        }

        CodeBlock {
            language: info.language.clone(),
            lines,
        }
    }
}

/// The decoration transform: pure, synchronous, deterministic.
///
/// Applying it twice yields the same tree as applying it once: a line
/// that already holds the injected whitespace segment is no longer
/// empty, and a word segment that is already marked is left alone.
pub fn decorate(block: CodeBlock, info: &FenceInfo) -> CodeBlock {
    let lines = block
        .lines
        .into_iter()
        .enumerate()
        .map(|(idx, mut line)| {
            if line.segments.is_empty() {
                // Keep empty lines selectable and vertically present
                line.segments.push(Segment::plain(" "));
            }

            line.marked = line.marked || info.marked_lines.contains(&(idx + 1));
            line.segments = mark_words(line.segments, &info.marked_words);
            line
        })
        .collect();

    CodeBlock {
        language: block.language,
        lines,
    }
}

/// Split segments around marked words. The emphasized span's class is
/// exclusive: it drops the token color it was split out of.
fn mark_words(segments: Vec<Segment>, words: &[String]) -> Vec<Segment> {
    if words.is_empty() {
        return segments;
    }

    let mut out = Vec::new();
    for segment in segments {
        if segment.marked {
            out.push(segment);
            continue;
        }

        let mut rest = segment.text.as_str();
        loop {
            let hit = words
                .iter()
                .filter_map(|w| rest.find(w.as_str()).map(|pos| (pos, w.len())))
                .min();
            match hit {
                Some((pos, len)) => {
                    if pos > 0 {
                        out.push(Segment {
                            text: rest[..pos].to_string(),
                            color: segment.color.clone(),
                            marked: false,
                        });
                    }
                    out.push(Segment {
                        text: rest[pos..pos + len].to_string(),
                        color: None,
                        marked: true,
                    });
                    rest = &rest[pos + len..];
                }
                None => {
                    if !rest.is_empty() {
                        out.push(Segment {
                            text: rest.to_string(),
                            color: segment.color.clone(),
                            marked: false,
                        });
                    }
                    break;
                }
            }
        }
    }
    out
}

/// Serialize a decorated block to HTML
pub fn render_html(block: &CodeBlock) -> String {
    let language = block.language.as_deref().unwrap_or("text");

    let mut html = format!(
        r#"<figure class="code-block"><pre><code data-language="{}">"#,
        html_escape(language)
    );

    for (idx, line) in block.lines.iter().enumerate() {
        if line.marked {
            html.push_str(r#"<span class="line line--marked">"#);
        } else {
            html.push_str(r#"<span class="line">"#);
        }
        for segment in &line.segments {
            let text = html_escape(&segment.text);
            if segment.marked {
                html.push_str(&format!(r#"<span class="word">{}</span>"#, text));
            } else if let Some(color) = &segment.color {
                html.push_str(&format!(r#"<span style="color:{}">{}</span>"#, color, text));
            } else {
                html.push_str(&text);
            }
        }
        html.push_str("</span>");
        if idx < block.lines.len() - 1 {
            html.push('\n');
        }
    }

    html.push_str("</code></pre></figure>");
    html
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

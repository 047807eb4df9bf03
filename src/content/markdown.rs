//! Markdown bodies to HTML, with syntect highlighting for code blocks

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;

/// Turns a markdown body into the HTML stored on a record.
///
/// Implementations must be deterministic. The output is trusted and is
/// never sanitized, so documents must come from trusted authors.
pub trait RenderBody {
    fn render_body(&self, markdown: &str) -> Result<String>;
}

impl<F> RenderBody for F
where
    F: Fn(&str) -> Result<String>,
{
    fn render_body(&self, markdown: &str) -> Result<String> {
        self(markdown)
    }
}

/// Code collected between a block's start and end events
struct PendingCode {
    lang: Option<String>,
    text: String,
}

/// CommonMark + GFM renderer that highlights code blocks with inline styles
pub struct MarkdownRenderer {
    syntaxes: SyntaxSet,
    /// `None` when the configured theme does not exist; code is then escaped
    /// but not colored
    theme: Option<Theme>,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create from the site's highlight settings
    pub fn from_config(highlight: &HighlightConfig) -> Self {
        Self::with_options(&highlight.theme, highlight.line_number)
    }

    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        let found = ThemeSet::load_defaults().themes.remove(theme);
        if found.is_none() {
            tracing::warn!("Unknown highlight theme {:?}, code blocks will not be colored", theme);
        }

        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: found,
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // No YAML metadata blocks: front-matter is split off before rendering
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;

        let mut events = Vec::new();
        let mut pending: Option<PendingCode> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    pending = Some(PendingCode {
                        lang: info_lang(&kind),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(code) = pending.take() {
                        events.push(Event::Html(CowStr::from(self.code_block(&code))));
                    }
                }
                Event::Text(text) => match pending.as_mut() {
                    Some(code) => code.text.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }

    fn code_block(&self, code: &PendingCode) -> String {
        let class = code
            .lang
            .as_deref()
            .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
            .unwrap_or_default();
        let body = self
            .highlight(&code.text, code.lang.as_deref())
            .unwrap_or_else(|| self.plain(&code.text));

        format!("<pre class=\"highlight\"><code{}>{}</code></pre>\n", class, body)
    }

    /// Inline-styled spans per line, or `None` when there is no theme or
    /// syntect fails on the input
    fn highlight(&self, code: &str, lang: Option<&str>) -> Option<String> {
        let theme = self.theme.as_ref()?;
        let syntax = lang
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut out = String::new();
        for (i, line) in LinesWithEndings::from(code).enumerate() {
            let styled = match highlighter
                .highlight_line(line, &self.syntaxes)
                .and_then(|regions| styled_line_to_highlighted_html(&regions, IncludeBackground::No))
            {
                Ok(styled) => styled,
                Err(e) => {
                    tracing::debug!("Highlighting failed, using plain text: {}", e);
                    return None;
                }
            };
            self.push_line(&mut out, i + 1, &styled);
        }
        Some(out)
    }

    fn plain(&self, code: &str) -> String {
        let mut out = String::new();
        for (i, line) in LinesWithEndings::from(code).enumerate() {
            self.push_line(&mut out, i + 1, &escape_html(line));
        }
        out
    }

    fn push_line(&self, out: &mut String, number: usize, line: &str) {
        if self.line_numbers {
            out.push_str(&format!("<span class=\"ln\">{}</span>", number));
        }
        out.push_str(line);
    }
}

impl RenderBody for MarkdownRenderer {
    fn render_body(&self, markdown: &str) -> Result<String> {
        self.render(markdown)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a fence's info string (` ```rust,ignore ` gives `rust`)
fn info_lang(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

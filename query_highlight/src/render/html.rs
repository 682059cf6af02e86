//! HTML overlay rendering

use super::classes::{HighlightClass, PARAGRAPH_CLASS, SEGMENT_HIGHLIGHT_CLASS};
use crate::config::runtime::RenderPreferences;
use crate::logging::codes;
use crate::markers::Segment;
use crate::tokens::{QuotedValue, Token, TokenSequence};
use crate::{log_debug, log_success};
use std::borrow::Cow;

/// Turns classified output into markup
pub trait Renderer {
    /// Overlay markup for one query; the text content equals the query
    fn render_query(&self, tokens: &TokenSequence) -> String;

    /// One paragraph per segment list
    fn render_segments(&self, paragraphs: &[Vec<Segment>]) -> String;
}

pub struct HtmlRenderer {
    preferences: RenderPreferences,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::with_preferences(RenderPreferences::default())
    }

    pub fn with_preferences(preferences: RenderPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &RenderPreferences {
        &self.preferences
    }

    fn push_span(&self, out: &mut String, class: HighlightClass, text: &str, escaped: &mut usize) {
        out.push_str("<span class=\"");
        out.push_str(class.class_name(self.preferences.class_style));
        out.push_str("\">");
        push_escaped(out, text, escaped);
        out.push_str("</span>");
    }

    fn push_value(&self, out: &mut String, value: &QuotedValue, escaped: &mut usize) {
        if self.preferences.quotes_inside_value_span {
            self.push_span(out, HighlightClass::String, &value.to_query_string(), escaped);
        } else {
            push_escaped(out, &value.open.to_string(), escaped);
            self.push_span(out, HighlightClass::String, value.value(), escaped);
            push_escaped(out, &value.close.to_string(), escaped);
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn render_query(&self, tokens: &TokenSequence) -> String {
        let mut out = String::with_capacity(tokens.source_len() * 2);
        let mut escaped = 0;

        for token in tokens {
            match &token.value {
                Token::Operator(op) => {
                    self.push_span(&mut out, HighlightClass::Keyword, op.as_str(), &mut escaped)
                }
                Token::FieldKey { key, value } => {
                    self.push_span(&mut out, HighlightClass::Key, key.as_str(), &mut escaped);
                    if let Some(value) = value {
                        out.push('=');
                        self.push_value(&mut out, value, &mut escaped);
                    }
                }
                Token::QuotedValue(value) => self.push_value(&mut out, value, &mut escaped),
                Token::Plain(text) => push_escaped(&mut out, text, &mut escaped),
            }
        }

        if escaped > 0 {
            log_debug!(codes::render::MARKUP_ESCAPED, "Query text contained markup characters",
                "escaped" => escaped
            );
        }
        log_success!(codes::success::RENDER_COMPLETE, "Query markup rendered",
            "tokens" => tokens.len(),
            "bytes" => out.len()
        );
        out
    }

    fn render_segments(&self, paragraphs: &[Vec<Segment>]) -> String {
        let mut out = String::new();
        let mut escaped = 0;

        for (index, segments) in paragraphs.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str("<p class=\"");
            out.push_str(PARAGRAPH_CLASS);
            out.push_str("\">");
            for segment in segments {
                if segment.marked {
                    out.push_str("<span class=\"");
                    out.push_str(SEGMENT_HIGHLIGHT_CLASS);
                    out.push_str("\">");
                    push_escaped(&mut out, &segment.text, &mut escaped);
                    out.push_str("</span>");
                } else {
                    push_escaped(&mut out, &segment.text, &mut escaped);
                }
            }
            out.push_str("</p>");
        }

        if escaped > 0 {
            log_debug!(codes::render::MARKUP_ESCAPED, "Snippet text contained markup characters",
                "escaped" => escaped
            );
        }
        log_success!(codes::success::RENDER_COMPLETE, "Snippet markup rendered",
            "paragraphs" => paragraphs.len(),
            "bytes" => out.len()
        );
        out
    }
}

fn push_escaped(out: &mut String, text: &str, escaped: &mut usize) {
    let text = escape_html(text);
    if let Cow::Owned(_) = text {
        *escaped += 1;
    }
    out.push_str(&text);
}

/// Escapes `& < > " '`; borrows when nothing needs escaping
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Text content of rendered markup: tags removed, entities decoded
#[cfg(test)]
pub(crate) fn strip_markup(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::ClassNameStyle;
    use crate::lexical::tokenize;
    use proptest::prelude::*;

    fn renderer(class_style: ClassNameStyle, quotes_inside_value_span: bool) -> HtmlRenderer {
        HtmlRenderer::with_preferences(RenderPreferences {
            class_style,
            quotes_inside_value_span,
        })
    }

    #[test]
    fn test_operator_and_plain() {
        let html = renderer(ClassNameStyle::Prism, true).render_query(&tokenize("A AND B"));
        assert_eq!(
            html,
            "A <span class=\"token keyword custom-keyword\">AND</span> B"
        );
    }

    #[test]
    fn test_field_pair_split_into_key_and_value() {
        let html = renderer(ClassNameStyle::Plain, true).render_query(&tokenize("TI=\"sea\""));
        assert_eq!(
            html,
            "<span class=\"key\">TI</span>=<span class=\"string\">&quot;sea&quot;</span>"
        );

        let html = renderer(ClassNameStyle::Plain, false).render_query(&tokenize("TI=\"sea\""));
        assert_eq!(
            html,
            "<span class=\"key\">TI</span>=&quot;<span class=\"string\">sea</span>&quot;"
        );
    }

    #[test]
    fn test_bare_key_and_curly_quotes() {
        let html = renderer(ClassNameStyle::Plain, true).render_query(&tokenize("AB “x”"));
        assert_eq!(
            html,
            "<span class=\"key\">AB</span> <span class=\"string\">“x”</span>"
        );
    }

    #[test]
    fn test_plain_markup_is_escaped() {
        let html = renderer(ClassNameStyle::Plain, true).render_query(&tokenize("a<b> & 'c'"));
        assert_eq!(html, "a&lt;b&gt; &amp; &#39;c&#39;");
    }

    #[test]
    fn test_render_segments() {
        let paragraphs = vec![
            vec![Segment::unmarked("The "), Segment::marked("climate"), Segment::unmarked(" <b>")],
            vec![Segment::unmarked("abstract")],
        ];
        let html = HtmlRenderer::new().render_segments(&paragraphs);
        assert_eq!(
            html,
            "<p class=\"ellipsis-text\">The <span class=\"highlight\">climate</span> &lt;b&gt;</p>\n\
             <p class=\"ellipsis-text\">abstract</p>"
        );
    }

    #[test]
    fn test_render_no_paragraphs() {
        assert_eq!(HtmlRenderer::new().render_segments(&[]), "");
    }

    #[test]
    fn test_render_reports_completion() {
        let Some(events) = crate::logging::capture::render_events() else {
            return;
        };
        HtmlRenderer::new().render_query(&tokenize("AND \"completion check\""));
        HtmlRenderer::new().render_segments(&[vec![Segment::marked("completion check")]]);

        let completed = events.get_events_with_code(codes::success::RENDER_COMPLETE);
        assert!(completed.iter().any(|e| e.message == "Query markup rendered"
            && e.context.get("tokens").map(String::as_str) == Some("3")));
        assert!(completed.iter().any(|e| e.message == "Snippet markup rendered"
            && e.context.get("paragraphs").map(String::as_str) == Some("1")));
    }

    #[test]
    fn test_escape_borrows_clean_text() {
        assert!(matches!(escape_html("clean"), Cow::Borrowed("clean")));
        assert_eq!(escape_html("\"&\""), "&quot;&amp;&quot;");
    }

    proptest! {
        #[test]
        fn prop_rendered_text_equals_query(input in "[a-zA-Z =\"“”\\\\<>&']{0,40}") {
            for quotes_inside in [true, false] {
                let html = renderer(ClassNameStyle::Prism, quotes_inside).render_query(&tokenize(&input));
                prop_assert_eq!(strip_markup(&html), input.clone());
            }
        }
    }
}

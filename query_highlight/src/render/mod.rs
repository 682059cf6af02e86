//! Markup for token sequences and snippet segments
//!
//! Renderers only depend on [`TokenKind`](crate::tokens::TokenKind) and
//! [`Segment`](crate::markers::Segment); classification stays in `lexical`
//! and `markers`.

pub mod classes;
pub mod html;

pub use classes::{HighlightClass, PARAGRAPH_CLASS, SEGMENT_HIGHLIGHT_CLASS};
pub use html::{escape_html, HtmlRenderer, Renderer};

use crate::config::runtime::RenderPreferences;
use crate::markers::Segment;
use crate::tokens::TokenSequence;

pub fn render_query_html(tokens: &TokenSequence, preferences: RenderPreferences) -> String {
    HtmlRenderer::with_preferences(preferences).render_query(tokens)
}

pub fn render_segments_html(paragraphs: &[Vec<Segment>], preferences: RenderPreferences) -> String {
    HtmlRenderer::with_preferences(preferences).render_segments(paragraphs)
}

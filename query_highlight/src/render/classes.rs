//! CSS class names for highlighted output

use crate::config::runtime::ClassNameStyle;
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};

/// Class of a marked snippet segment
pub const SEGMENT_HIGHLIGHT_CLASS: &str = "highlight";

/// Class of a snippet paragraph
pub const PARAGRAPH_CLASS: &str = "ellipsis-text";

/// Highlight role of a rendered span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightClass {
    Keyword,
    Key,
    String,
}

impl HighlightClass {
    /// Role for a token kind; plain text is not wrapped
    pub fn for_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Operator => Some(Self::Keyword),
            TokenKind::FieldKey => Some(Self::Key),
            TokenKind::QuotedValue => Some(Self::String),
            TokenKind::Plain => None,
        }
    }

    pub fn class_name(&self, style: ClassNameStyle) -> &'static str {
        match (style, self) {
            (ClassNameStyle::Prism, Self::Keyword) => "token keyword custom-keyword",
            (ClassNameStyle::Prism, Self::Key) => "token key custom-key",
            (ClassNameStyle::Prism, Self::String) => "token string custom-string",
            (ClassNameStyle::Plain, Self::Keyword) => "keyword",
            (ClassNameStyle::Plain, Self::Key) => "key",
            (ClassNameStyle::Plain, Self::String) => "string",
        }
    }
}

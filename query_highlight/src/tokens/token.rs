//! Query token model
//!
//! Four kinds of token cover any query text: logical operators, field keys
//! (optionally carrying a quoted value), bare quoted spans, and plain filler.
//! Every token reproduces its exact source text.
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// QUOTE CLASS
// ============================================================================

/// Straight quote, left curly quote, right curly quote. Any member opens and
/// any member closes.
pub const QUOTE_CHARS: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

pub fn is_quote_char(ch: char) -> bool {
    QUOTE_CHARS.contains(&ch)
}

/// Escape introducer inside quoted spans
pub const ESCAPE_CHAR: char = '\\';

// ============================================================================
// LOGICAL OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub const ALL: [LogicalOperator; 3] = [Self::And, Self::Or, Self::Not];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Exact, case-sensitive match; `and` is not an operator
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    /// Whether `word` is an operator in some other letter case
    pub fn is_miscased(word: &str) -> bool {
        Self::from_word(word).is_none()
            && Self::ALL
                .iter()
                .any(|op| op.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD KEYS
// ============================================================================

/// Closed set of searchable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    /// `TI` - title
    Title,
    /// `AB` - abstract
    Abstract,
    /// `DP` - date published
    DatePublished,
    /// `URL`
    Url,
}

impl FieldKey {
    pub const ALL: [FieldKey; 4] = [Self::Title, Self::Abstract, Self::DatePublished, Self::Url];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "TI",
            Self::Abstract => "AB",
            Self::DatePublished => "DP",
            Self::Url => "URL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Abstract => "abstract",
            Self::DatePublished => "date published",
            Self::Url => "url",
        }
    }

    /// Case-sensitive lookup
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == word)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// QUOTED VALUES
// ============================================================================

/// A terminated quoted span
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotedValue {
    /// Opening quote character
    pub open: char,
    /// Inner text with quotes stripped and escapes preserved
    pub value: String,
    /// Closing quote character
    pub close: char,
}

impl QuotedValue {
    pub fn new(open: char, value: impl Into<String>, close: char) -> Self {
        Self {
            open,
            value: value.into(),
            close,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Inner text with `\x` resolved to `x`
    pub fn unescaped(&self) -> String {
        let mut out = String::with_capacity(self.value.len());
        let mut chars = self.value.chars();
        while let Some(ch) = chars.next() {
            if ch == ESCAPE_CHAR {
                if let Some(next) = chars.next() {
                    out.push(next);
                    continue;
                }
            }
            out.push(ch);
        }
        out
    }

    /// Source text including both quote characters
    pub fn to_query_string(&self) -> String {
        let mut out = String::with_capacity(self.value.len() + 6);
        out.push(self.open);
        out.push_str(&self.value);
        out.push(self.close);
        out
    }
}

impl fmt::Display for QuotedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

// ============================================================================
// TOKEN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// `AND`, `OR`, `NOT` as whole uppercase words
    Operator(LogicalOperator),
    /// Known field key; `value` is set when written as `KEY="..."`
    FieldKey {
        key: FieldKey,
        value: Option<QuotedValue>,
    },
    /// Quoted span not attached to a key
    QuotedValue(QuotedValue),
    /// Everything else, verbatim
    Plain(String),
}

/// Classification renderers depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    Operator,
    FieldKey,
    QuotedValue,
    Plain,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        Self::Operator,
        Self::FieldKey,
        Self::QuotedValue,
        Self::Plain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::FieldKey => "field_key",
            Self::QuotedValue => "quoted_value",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Operator(_) => TokenKind::Operator,
            Self::FieldKey { .. } => TokenKind::FieldKey,
            Self::QuotedValue(_) => TokenKind::QuotedValue,
            Self::Plain(_) => TokenKind::Plain,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    pub fn is_field_key(&self) -> bool {
        matches!(self, Self::FieldKey { .. })
    }

    /// Field key written with `=` and a quoted value
    pub fn is_field_pair(&self) -> bool {
        matches!(self, Self::FieldKey { value: Some(_), .. })
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    /// Quoted value, whether bare or attached to a key
    pub fn quoted_value(&self) -> Option<&QuotedValue> {
        match self {
            Self::QuotedValue(q) => Some(q),
            Self::FieldKey { value, .. } => value.as_ref(),
            _ => None,
        }
    }

    /// Exact source text of this token
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Operator(op) => op.as_str().to_string(),
            Self::FieldKey { key, value: None } => key.as_str().to_string(),
            Self::FieldKey {
                key,
                value: Some(value),
            } => format!("{}={}", key.as_str(), value.to_query_string()),
            Self::QuotedValue(value) => value.to_query_string(),
            Self::Plain(text) => text.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_words_are_case_sensitive() {
        assert_eq!(LogicalOperator::from_word("AND"), Some(LogicalOperator::And));
        assert_eq!(LogicalOperator::from_word("and"), None);
        assert!(LogicalOperator::is_miscased("and"));
        assert!(LogicalOperator::is_miscased("Not"));
        assert!(!LogicalOperator::is_miscased("OR"));
        assert!(!LogicalOperator::is_miscased("nor"));
    }

    #[test]
    fn test_field_key_lookup() {
        assert_eq!(FieldKey::from_word("TI"), Some(FieldKey::Title));
        assert_eq!(FieldKey::from_word("URL"), Some(FieldKey::Url));
        assert_eq!(FieldKey::from_word("ti"), None);
        assert_eq!(FieldKey::from_word("XX"), None);
        assert_eq!(FieldKey::DatePublished.description(), "date published");
    }

    #[test]
    fn test_quote_class() {
        for ch in ['"', '“', '”'] {
            assert!(is_quote_char(ch));
        }
        assert!(!is_quote_char('\''));
        assert!(!is_quote_char('„'));
    }

    #[test]
    fn test_quoted_value_text() {
        let value = QuotedValue::new('“', r#"say \"hi\""#, '"');
        assert_eq!(value.value(), r#"say \"hi\""#);
        assert_eq!(value.unescaped(), r#"say "hi""#);
        assert_eq!(value.to_query_string(), r#"“say \"hi\"""#);
    }

    #[test]
    fn test_unescaped_keeps_trailing_backslash() {
        let value = QuotedValue::new('"', "a\\", '"');
        assert_eq!(value.unescaped(), "a\\");
    }

    #[test]
    fn test_token_source_text() {
        let pair = Token::FieldKey {
            key: FieldKey::Title,
            value: Some(QuotedValue::new('"', "Climate Change", '"')),
        };
        assert_eq!(pair.to_query_string(), "TI=\"Climate Change\"");
        assert_eq!(pair.kind(), TokenKind::FieldKey);
        assert!(pair.is_field_pair());
        assert_eq!(pair.quoted_value().map(|q| q.value()), Some("Climate Change"));

        let bare = Token::FieldKey {
            key: FieldKey::Url,
            value: None,
        };
        assert_eq!(bare.to_string(), "URL");
        assert!(!bare.is_field_pair());

        assert_eq!(Token::Operator(LogicalOperator::Not).to_string(), "NOT");
        assert_eq!(Token::Plain(" x ".into()).to_string(), " x ");
    }

    #[test]
    fn test_token_serialization() {
        let token = Token::Operator(LogicalOperator::Or);
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}

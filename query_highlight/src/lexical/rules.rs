//! Classification rules, one matcher per rule
//!
//! Each matcher looks at `input[pos..]` and either returns the token it
//! recognizes together with its byte length, or `None`. The analyzer tries
//! them in priority order:
//!
//! 1. [`field_pair`] - `KEY="..."`
//! 2. [`operator`] - `AND`, `OR`, `NOT` as whole uppercase words
//! 3. [`quoted`] - bare quoted span
//! 4. [`bare_key`] - `KEY` as a whole word
//!
//! Anything else is plain text. [`degradation`] reports why a position that
//! looks like it could have matched fell through to plain.

use crate::logging::{codes, Code};
use crate::tokens::{is_quote_char, FieldKey, LogicalOperator, QuotedValue, Token, ESCAPE_CHAR};

/// Token recognized by a rule and the number of bytes it consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub token: Token,
    pub len: usize,
}

impl RuleMatch {
    fn new(token: Token, len: usize) -> Self {
        Self { token, len }
    }
}

// ============================================================================
// WORD BOUNDARIES
// ============================================================================

pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// No word character immediately before `pos`
pub fn at_word_start(input: &str, pos: usize) -> bool {
    !input[..pos].chars().next_back().is_some_and(is_word_char)
}

/// No word character at `pos`
pub fn at_word_end(input: &str, pos: usize) -> bool {
    !input[pos..].chars().next().is_some_and(is_word_char)
}

/// The run of word characters starting at `pos`
pub fn word_at(input: &str, pos: usize) -> &str {
    let rest = &input[pos..];
    let end = rest
        .char_indices()
        .find(|&(_, ch)| !is_word_char(ch))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..end]
}

// ============================================================================
// QUOTE SCANNING
// ============================================================================

/// Remembers where a quote scan first failed.
///
/// A scan from opener `p` fails only when every quote character after `p` is
/// escaped. An opener `q > p` is then itself an escaped character of that
/// scan, and scanning from `q` walks the same suffix, so it fails too.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteMemo {
    unterminated_from: Option<usize>,
}

impl QuoteMemo {
    pub fn is_known_unterminated(&self, pos: usize) -> bool {
        self.unterminated_from.is_some_and(|start| pos >= start)
    }

    fn record_unterminated(&mut self, pos: usize) {
        if self.unterminated_from.is_none() {
            self.unterminated_from = Some(pos);
        }
    }
}

/// Scan a quoted span whose opening quote is at `pos`
pub fn scan_quoted(input: &str, pos: usize, memo: &mut QuoteMemo) -> Option<(QuotedValue, usize)> {
    let rest = &input[pos..];
    let mut chars = rest.char_indices();
    let (_, open) = chars.next()?;
    if !is_quote_char(open) || memo.is_known_unterminated(pos) {
        return None;
    }

    let inner_start = open.len_utf8();
    let mut escaped = false;
    for (i, ch) in chars {
        if escaped {
            escaped = false;
        } else if ch == ESCAPE_CHAR {
            escaped = true;
        } else if is_quote_char(ch) {
            let value = QuotedValue::new(open, &rest[inner_start..i], ch);
            return Some((value, i + ch.len_utf8()));
        }
    }

    memo.record_unterminated(pos);
    None
}

// ============================================================================
// RULES
// ============================================================================

/// Known key starting at `pos` with a leading word boundary
fn key_at(input: &str, pos: usize) -> Option<FieldKey> {
    if !at_word_start(input, pos) {
        return None;
    }
    let rest = &input[pos..];
    FieldKey::ALL
        .into_iter()
        .find(|key| rest.starts_with(key.as_str()))
}

/// Rule 1: known key, `=`, terminated quoted span
pub fn field_pair(input: &str, pos: usize, memo: &mut QuoteMemo) -> Option<RuleMatch> {
    let key = key_at(input, pos)?;
    let eq = pos + key.as_str().len();
    if !input[eq..].starts_with('=') {
        return None;
    }
    let (value, quoted_len) = scan_quoted(input, eq + 1, memo)?;
    let len = key.as_str().len() + 1 + quoted_len;
    Some(RuleMatch::new(
        Token::FieldKey {
            key,
            value: Some(value),
        },
        len,
    ))
}

/// Rule 2: uppercase logical operator as a whole word
pub fn operator(input: &str, pos: usize) -> Option<RuleMatch> {
    if !at_word_start(input, pos) {
        return None;
    }
    let rest = &input[pos..];
    LogicalOperator::ALL
        .into_iter()
        .find(|op| rest.starts_with(op.as_str()) && at_word_end(input, pos + op.as_str().len()))
        .map(|op| RuleMatch::new(Token::Operator(op), op.as_str().len()))
}

/// Rule 3: bare quoted span
pub fn quoted(input: &str, pos: usize, memo: &mut QuoteMemo) -> Option<RuleMatch> {
    let (value, len) = scan_quoted(input, pos, memo)?;
    Some(RuleMatch::new(Token::QuotedValue(value), len))
}

/// Rule 4: known key as a whole word, value-less
pub fn bare_key(input: &str, pos: usize) -> Option<RuleMatch> {
    let key = key_at(input, pos)?;
    let len = key.as_str().len();
    if !at_word_end(input, pos + len) {
        return None;
    }
    Some(RuleMatch::new(Token::FieldKey { key, value: None }, len))
}

// ============================================================================
// DEGRADED CLASSIFICATIONS
// ============================================================================

/// Text that was classified plain (or bare) although the user likely meant
/// something more specific
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Quote character with no closing quote
    UnterminatedQuote(char),
    /// `and`, `Or`, ...
    LowercaseOperator(String),
    /// `XX=` where `XX` is not a known key
    UnknownFieldKey(String),
    /// Known key followed by `=` but no terminated quoted value
    IncompleteFieldValue(FieldKey),
}

impl Degradation {
    pub fn code(&self) -> Code {
        match self {
            Degradation::UnterminatedQuote(_) => codes::lexical::UNTERMINATED_QUOTE,
            Degradation::LowercaseOperator(_) => codes::lexical::LOWERCASE_OPERATOR,
            Degradation::UnknownFieldKey(_) => codes::lexical::UNKNOWN_FIELD_KEY,
            Degradation::IncompleteFieldValue(_) => codes::lexical::INCOMPLETE_FIELD_VALUE,
        }
    }

    /// Source text the degradation refers to
    pub fn text(&self) -> String {
        match self {
            Degradation::UnterminatedQuote(ch) => ch.to_string(),
            Degradation::LowercaseOperator(word) | Degradation::UnknownFieldKey(word) => {
                word.clone()
            }
            Degradation::IncompleteFieldValue(key) => key.as_str().to_string(),
        }
    }
}

fn looks_like_key(word: &str) -> bool {
    (2..=4).contains(&word.len()) && word.bytes().all(|b| b.is_ascii_uppercase())
}

/// Why `pos` falls through to plain text, if it looks meaningful.
/// Only call this where no rule matched.
pub fn degradation(input: &str, pos: usize) -> Option<Degradation> {
    let ch = input[pos..].chars().next()?;
    if is_quote_char(ch) {
        return Some(Degradation::UnterminatedQuote(ch));
    }
    if !is_word_char(ch) || !at_word_start(input, pos) {
        return None;
    }

    let word = word_at(input, pos);
    if LogicalOperator::is_miscased(word) {
        return Some(Degradation::LowercaseOperator(word.to_string()));
    }
    if looks_like_key(word)
        && FieldKey::from_word(word).is_none()
        && input[pos + word.len()..].starts_with('=')
    {
        return Some(Degradation::UnknownFieldKey(word.to_string()));
    }
    None
}

/// A bare key match that was written with `=`
pub fn incomplete_value(input: &str, pos: usize, matched: &RuleMatch) -> Option<Degradation> {
    match &matched.token {
        Token::FieldKey { key, value: None } if input[pos + matched.len..].starts_with('=') => {
            Some(Degradation::IncompleteFieldValue(*key))
        }
        _ => None,
    }
}

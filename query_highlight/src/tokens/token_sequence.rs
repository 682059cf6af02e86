//! Ordered, gap-free token sequence for one query string

use crate::tokens::token::{Token, TokenKind};
use crate::utils::Spanned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Why a sequence fails to tile its source text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("Token {index} starts at byte {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Token {index} text does not match source at byte {offset}")]
    TextMismatch { index: usize, offset: usize },

    #[error("Tokens cover {covered} bytes of {source_len}")]
    Incomplete { covered: usize, source_len: usize },
}

/// Per-kind token counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub total: usize,
    pub operators: usize,
    pub field_keys: usize,
    pub field_pairs: usize,
    pub quoted_values: usize,
    pub plain: usize,
}

impl TokenCounts {
    pub fn record(&mut self, token: &Token) {
        self.total += 1;
        match token.kind() {
            TokenKind::Operator => self.operators += 1,
            TokenKind::FieldKey => {
                self.field_keys += 1;
                if token.is_field_pair() {
                    self.field_pairs += 1;
                }
            }
            TokenKind::QuotedValue => self.quoted_values += 1,
            TokenKind::Plain => self.plain += 1,
        }
    }

    pub fn of_kind(&self, kind: TokenKind) -> usize {
        match kind {
            TokenKind::Operator => self.operators,
            TokenKind::FieldKey => self.field_keys,
            TokenKind::QuotedValue => self.quoted_values,
            TokenKind::Plain => self.plain,
        }
    }

    /// Tokens that receive highlighting
    pub fn highlighted(&self) -> usize {
        self.total - self.plain
    }
}

/// Tokens of a single input, ordered by start offset, contiguous, and
/// jointly covering `[0, source_len)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSequence {
    tokens: Vec<SpannedToken>,
    source_len: usize,
}

impl TokenSequence {
    pub fn new(tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        Self { tokens, source_len }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Byte length of the tokenized input
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<SpannedToken> {
        self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpannedToken> {
        self.tokens.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SpannedToken> {
        self.tokens.get(index)
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.value.kind()).collect()
    }

    /// Concatenated token texts; equals the tokenized input
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.source_len);
        for token in &self.tokens {
            out.push_str(&token.value.to_query_string());
        }
        out
    }

    /// Check that spans are contiguous, start at 0, end at `source.len()`,
    /// and that each token's text equals the source under its span
    pub fn verify_coverage(&self, source: &str) -> Result<(), CoverageError> {
        let mut expected = 0;
        for (index, token) in self.tokens.iter().enumerate() {
            let span = token.span;
            if span.start.offset != expected {
                return Err(CoverageError::Gap {
                    index,
                    expected,
                    found: span.start.offset,
                });
            }
            let text = token.value.to_query_string();
            if source.get(span.start.offset..span.end.offset) != Some(text.as_str()) {
                return Err(CoverageError::TextMismatch {
                    index,
                    offset: span.start.offset,
                });
            }
            expected = span.end.offset;
        }
        if expected != source.len() {
            return Err(CoverageError::Incomplete {
                covered: expected,
                source_len: source.len(),
            });
        }
        Ok(())
    }

    pub fn counts(&self) -> TokenCounts {
        let mut counts = TokenCounts::default();
        for token in &self.tokens {
            counts.record(&token.value);
        }
        counts
    }

    pub fn tokens_of_kind(&self, kind: TokenKind) -> impl Iterator<Item = &SpannedToken> {
        self.tokens.iter().filter(move |t| t.value.kind() == kind)
    }

    /// Token under a caret at byte `offset`. A caret at the very end of the
    /// input belongs to the last token.
    pub fn token_at(&self, offset: usize) -> Option<&SpannedToken> {
        if offset > self.source_len {
            return None;
        }
        if offset == self.source_len {
            return self.tokens.last();
        }
        let index = self
            .tokens
            .partition_point(|t| t.span.end.offset <= offset);
        self.tokens.get(index)
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a SpannedToken;
    type IntoIter = std::slice::Iter<'a, SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenSequence {
    type Item = SpannedToken;
    type IntoIter = std::vec::IntoIter<SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

//! Lexical classification of query text
//!
//! Splits a boolean search query into operators, field keys, quoted values
//! and plain filler. The result always covers the input exactly; malformed
//! input degrades to plain text instead of failing.

pub mod analyzer;
pub mod rules;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenSequence;

pub use analyzer::{LexicalMetrics, QueryLexer};
pub use rules::{Degradation, RuleMatch};

/// Tokenize with default preferences
pub fn tokenize(input: &str) -> TokenSequence {
    QueryLexer::new().tokenize(input)
}

pub fn tokenize_with_preferences(input: &str, preferences: LexicalPreferences) -> TokenSequence {
    QueryLexer::with_preferences(preferences).tokenize(input)
}

pub fn create_lexer() -> QueryLexer {
    QueryLexer::new()
}

pub fn create_lexer_with_preferences(preferences: LexicalPreferences) -> QueryLexer {
    QueryLexer::with_preferences(preferences)
}

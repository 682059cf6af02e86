//! Token model for query highlighting
//!
//! - **[`Token`]** - the four token kinds a query is split into
//! - **[`QuotedValue`]** - a terminated quoted span, quote characters kept
//! - **[`TokenSequence`]** - ordered tokens of one input with coverage checks
//!
//! Tokens carry the exact source text they were scanned from, so a sequence
//! can always reproduce its input.

pub mod token;
pub mod token_sequence;

pub use token::{
    is_quote_char, FieldKey, LogicalOperator, QuotedValue, Token, TokenKind, ESCAPE_CHAR,
    QUOTE_CHARS,
};
pub use token_sequence::{CoverageError, SpannedToken, TokenCounts, TokenSequence};

pub use crate::utils::{Position, Span, Spanned};

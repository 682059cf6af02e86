//! Query lexer: ordered-rule scan over the input text
//!
//! At each position the rules in [`super::rules`] are tried in priority
//! order; the first match becomes a token. Positions no rule claims are
//! accumulated into plain runs, so the output always tiles the input.

use super::rules::{self, Degradation, QuoteMemo, RuleMatch};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{SpannedToken, Token, TokenCounts, TokenSequence};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;

/// Counters accumulated across every input a lexer has processed
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub inputs_processed: usize,
    pub bytes_processed: usize,
    pub large_inputs: usize,

    /// Only populated when `collect_detailed_metrics` is set
    pub token_counts: TokenCounts,

    // Degraded classifications
    pub unterminated_quotes: usize,
    pub lowercase_operators: usize,
    pub unknown_field_keys: usize,
    pub incomplete_field_values: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_input(&mut self, len: usize) {
        self.inputs_processed += 1;
        self.bytes_processed += len;
        if len > LARGE_QUERY_THRESHOLD {
            self.large_inputs += 1;
        }
    }

    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        if preferences.collect_detailed_metrics {
            self.token_counts.record(token);
        }
    }

    pub(crate) fn record_degradation(&mut self, degradation: &Degradation) {
        match degradation {
            Degradation::UnterminatedQuote(_) => self.unterminated_quotes += 1,
            Degradation::LowercaseOperator(_) => self.lowercase_operators += 1,
            Degradation::UnknownFieldKey(_) => self.unknown_field_keys += 1,
            Degradation::IncompleteFieldValue(_) => self.incomplete_field_values += 1,
        }
    }

    pub fn degraded_total(&self) -> usize {
        self.unterminated_quotes
            + self.lowercase_operators
            + self.unknown_field_keys
            + self.incomplete_field_values
    }
}

/// Stateless with respect to inputs; only metrics persist between calls
pub struct QueryLexer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl QueryLexer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    pub fn reset_metrics(&mut self) {
        self.metrics = LexicalMetrics::default();
    }

    /// Split `input` into classified tokens. Never fails; the worst case is a
    /// single plain token.
    pub fn tokenize(&mut self, input: &str) -> TokenSequence {
        self.metrics.record_input(input.len());
        if input.len() > LARGE_QUERY_THRESHOLD {
            log_warning!(codes::lexical::LARGE_QUERY, "Query exceeds large query threshold",
                "length" => input.len(),
                "threshold" => LARGE_QUERY_THRESHOLD
            );
        }

        let mut scan = Scan::new(input);
        let mut memo = QuoteMemo::default();

        while let Some(ch) = scan.peek() {
            let pos = scan.pos;
            match Self::match_at(input, pos, &mut memo) {
                Some(matched) => {
                    if let Some(degradation) = rules::incomplete_value(input, pos, &matched) {
                        self.report(&degradation, scan.position, scan.position.advance_str(
                            &input[pos..pos + matched.len],
                        ));
                    }
                    self.flush_plain(&mut scan);
                    let token = scan.take(matched);
                    self.metrics.record_token(&token.value, &self.preferences);
                    scan.tokens.push(token);
                }
                None => {
                    if let Some(degradation) = rules::degradation(input, pos) {
                        let end = scan.position.advance_str(&degradation.text());
                        self.report(&degradation, scan.position, end);
                    }
                    scan.extend_plain(ch);
                }
            }
        }
        self.flush_plain(&mut scan);

        let sequence = TokenSequence::new(scan.tokens, input.len());
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Query tokenized",
            "length" => input.len(),
            "tokens" => sequence.len()
        );
        sequence
    }

    fn match_at(input: &str, pos: usize, memo: &mut QuoteMemo) -> Option<RuleMatch> {
        rules::field_pair(input, pos, memo)
            .or_else(|| rules::operator(input, pos))
            .or_else(|| rules::quoted(input, pos, memo))
            .or_else(|| rules::bare_key(input, pos))
    }

    fn flush_plain(&mut self, scan: &mut Scan<'_>) {
        if let Some(token) = scan.take_plain() {
            self.metrics.record_token(&token.value, &self.preferences);
            scan.tokens.push(token);
        }
    }

    fn report(&mut self, degradation: &Degradation, start: Position, end: Position) {
        self.metrics.record_degradation(degradation);
        if !self.preferences.log_degraded_classifications {
            return;
        }
        let text = degradation.text();
        if self.preferences.include_position_in_events {
            log_debug!(degradation.code(), "Degraded classification",
                span = Span::new(start, end),
                "text" => text
            );
        } else {
            log_debug!(degradation.code(), "Degraded classification",
                "text" => text
            );
        }
    }
}

impl Default for QueryLexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor state for one tokenize call
struct Scan<'a> {
    input: &'a str,
    pos: usize,
    position: Position,
    plain_start: Option<(usize, Position)>,
    tokens: Vec<SpannedToken>,
}

impl<'a> Scan<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            position: Position::start(),
            plain_start: None,
            tokens: Vec::with_capacity(TOKEN_CAPACITY_HINT.min(input.len() / 2 + 1)),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn extend_plain(&mut self, ch: char) {
        if self.plain_start.is_none() {
            self.plain_start = Some((self.pos, self.position));
        }
        self.pos += ch.len_utf8();
        self.position = self.position.advance(ch);
    }

    fn take_plain(&mut self) -> Option<SpannedToken> {
        let (start, start_position) = self.plain_start.take()?;
        let text = &self.input[start..self.pos];
        Some(Spanned::new(
            Token::Plain(text.to_string()),
            Span::new(start_position, self.position),
        ))
    }

    fn take(&mut self, matched: RuleMatch) -> SpannedToken {
        let text = &self.input[self.pos..self.pos + matched.len];
        let end = self.position.advance_str(text);
        let token = Spanned::new(matched.token, Span::new(self.position, end));
        self.pos += matched.len;
        self.position = end;
        token
    }
}

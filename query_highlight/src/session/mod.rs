//! Keystroke-driven highlighting for one input field
//!
//! Every input change gets a new [`Revision`]. A result is applied only when
//! its revision is the newest one issued, so a slow result for an old input
//! can never overwrite the highlight of a newer one.

use crate::config::compile_time::session::STALE_HISTORY_SIZE;
use crate::config::runtime::LexicalPreferences;
use crate::lexical::QueryLexer;
use crate::logging::codes;
use crate::tokens::TokenSequence;
use crate::{log_debug, log_success};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Monotonically increasing input state number; `0` is never issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Revision(u64);

impl Revision {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Tokens computed for one revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub revision: Revision,
    pub tokens: TokenSequence,
}

impl Highlight {
    /// Computes a highlight without a session, for hosts tokenizing off the
    /// input thread
    pub fn compute(revision: Revision, text: &str, preferences: LexicalPreferences) -> Self {
        Self {
            revision,
            tokens: QueryLexer::with_preferences(preferences).tokenize(text),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SessionMetrics {
    pub revisions_issued: u64,
    pub results_applied: u64,
    pub stale_discarded: u64,
    pub unknown_rejected: u64,
}

pub struct HighlightSession {
    lexer: QueryLexer,
    latest: Revision,
    current: Option<Highlight>,
    superseded: VecDeque<Revision>,
    metrics: SessionMetrics,
}

impl HighlightSession {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            lexer: QueryLexer::with_preferences(preferences),
            latest: Revision::default(),
            current: None,
            superseded: VecDeque::with_capacity(STALE_HISTORY_SIZE),
            metrics: SessionMetrics::default(),
        }
    }

    /// Synchronous path: issue a revision, tokenize and apply in one step
    pub fn on_input(&mut self, text: &str) -> &Highlight {
        let revision = self.begin();
        let highlight = self.complete(revision, text);
        self.install(highlight)
    }

    /// Issues the revision for a new input state
    pub fn begin(&mut self) -> Revision {
        if self.latest != Revision::default() {
            if self.superseded.len() == STALE_HISTORY_SIZE {
                self.superseded.pop_front();
            }
            self.superseded.push_back(self.latest);
        }
        self.latest = self.latest.next();
        self.metrics.revisions_issued += 1;
        self.latest
    }

    /// Tokenizes `text` for `revision` without applying the result
    pub fn complete(&mut self, revision: Revision, text: &str) -> Highlight {
        Highlight {
            revision,
            tokens: self.lexer.tokenize(text),
        }
    }

    /// Applies `highlight` if it belongs to the newest revision. Stale,
    /// duplicate and never-issued revisions are discarded.
    pub fn apply(&mut self, highlight: Highlight) -> bool {
        let revision = highlight.revision;

        if revision == Revision::default() || revision > self.latest {
            self.metrics.unknown_rejected += 1;
            log_debug!(codes::session::UNKNOWN_REVISION, "Result for a revision that was never issued",
                "revision" => revision,
                "latest" => self.latest
            );
            return false;
        }

        let already_applied = self.current.as_ref().map(|h| h.revision) == Some(revision);
        if revision < self.latest || already_applied {
            self.metrics.stale_discarded += 1;
            log_debug!(codes::session::STALE_RESULT_DISCARDED, "Discarded stale highlight result",
                "revision" => revision,
                "latest" => self.latest,
                "remembered" => self.superseded.contains(&revision)
            );
            return false;
        }

        self.install(highlight);
        true
    }

    fn install(&mut self, highlight: Highlight) -> &Highlight {
        self.metrics.results_applied += 1;
        log_success!(codes::success::SESSION_RESULT_APPLIED, "Highlight applied",
            "revision" => highlight.revision,
            "tokens" => highlight.tokens.len()
        );
        self.current.insert(highlight)
    }

    /// Highlight currently shown, if any result was applied
    pub fn current(&self) -> Option<&Highlight> {
        self.current.as_ref()
    }

    pub fn latest_revision(&self) -> Revision {
        self.latest
    }

    pub fn is_latest(&self, revision: Revision) -> bool {
        revision != Revision::default() && revision == self.latest
    }

    /// Most recent superseded revisions, oldest first
    pub fn superseded(&self) -> impl Iterator<Item = Revision> + '_ {
        self.superseded.iter().copied()
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn lexer(&self) -> &QueryLexer {
        &self.lexer
    }
}

impl Default for HighlightSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;

    #[test]
    fn test_on_input_recomputes_each_keystroke() {
        let mut session = HighlightSession::new();
        for (i, text) in ["A", "A ", "A A", "A AN", "A AND"].iter().enumerate() {
            let highlight = session.on_input(text);
            assert_eq!(highlight.revision.value(), i as u64 + 1);
            assert_eq!(highlight.tokens.reconstruct(), *text);
        }
        let current = session.current().unwrap();
        assert_eq!(current.tokens.kinds().last(), Some(&TokenKind::Operator));
        assert_eq!(session.metrics().results_applied, 5);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = HighlightSession::new();
        let first = session.begin();
        let second = session.begin();

        let slow = session.complete(first, "TI");
        let fast = session.complete(second, "TI=\"x\"");

        assert!(session.apply(fast));
        assert!(!session.apply(slow));
        assert_eq!(session.current().unwrap().revision, second);
        assert_eq!(session.metrics().stale_discarded, 1);
    }

    #[test]
    fn test_older_result_after_newer_begin_is_discarded() {
        let mut session = HighlightSession::new();
        let first = session.begin();
        let pending = session.complete(first, "a");
        session.begin();
        assert!(!session.apply(pending));
        assert!(session.current().is_none());
    }

    #[test]
    fn test_unknown_and_duplicate_revisions() {
        let mut session = HighlightSession::new();
        let bogus = Highlight::compute(Revision(7), "x", LexicalPreferences::default());
        assert!(!session.apply(bogus));
        assert_eq!(session.metrics().unknown_rejected, 1);

        let revision = session.begin();
        let highlight = session.complete(revision, "x");
        assert!(session.apply(highlight.clone()));
        assert!(!session.apply(highlight));
    }

    #[test]
    fn test_superseded_history_is_bounded() {
        let mut session = HighlightSession::new();
        for _ in 0..STALE_HISTORY_SIZE + 5 {
            session.begin();
        }
        let superseded: Vec<Revision> = session.superseded().collect();
        assert_eq!(superseded.len(), STALE_HISTORY_SIZE);
        assert_eq!(superseded.last().map(|r| r.value()), Some(session.latest_revision().value() - 1));
        assert!(session.is_latest(session.latest_revision()));
    }
}

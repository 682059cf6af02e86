use crate::markers::{BodySource, Segment};
use crate::tokens::{TokenCounts, TokenSequence};
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

/// Result of highlighting one query
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub query: String,
    pub tokens: TokenSequence,
    pub html: String,
    pub counts: TokenCounts,
    /// Degraded classifications seen while scanning this query
    pub degraded: usize,
    pub duration_ms: f64,
}

impl QueryOutput {
    pub fn new(
        query: &str,
        tokens: TokenSequence,
        html: String,
        degraded: usize,
        duration: Duration,
    ) -> Self {
        Self {
            query: query.to_string(),
            counts: tokens.counts(),
            tokens,
            html,
            degraded,
            duration_ms: duration.as_secs_f64() * 1000.0,
        }
    }

    /// One line per token: span, kind, source text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let _ = writeln!(
                out,
                "{}\t{}\t{:?}",
                token.span,
                token.value.kind(),
                token.value.to_query_string()
            );
        }
        out
    }
}

/// Result of extracting markers from a snippet body
#[derive(Debug, Clone, Serialize)]
pub struct SnippetOutput {
    pub source: BodySource,
    pub paragraphs: Vec<Vec<Segment>>,
    pub html: String,
    pub marked_segments: usize,
    pub duration_ms: f64,
}

impl SnippetOutput {
    pub fn new(
        source: BodySource,
        paragraphs: Vec<Vec<Segment>>,
        html: String,
        duration: Duration,
    ) -> Self {
        let marked_segments = paragraphs.iter().flatten().filter(|s| s.marked).count();
        Self {
            source,
            paragraphs,
            html,
            marked_segments,
            duration_ms: duration.as_secs_f64() * 1000.0,
        }
    }

    /// One line per segment, paragraphs separated by a blank line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (index, segments) in self.paragraphs.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            for segment in segments {
                let label = if segment.marked { "marked" } else { "text" };
                let _ = writeln!(out, "{}\t{:?}", label, segment.text);
            }
        }
        out
    }
}

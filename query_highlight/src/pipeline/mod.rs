//! One-call processing for queries and snippets
//!
//! Each call tokenizes or extracts, renders, and returns a serializable
//! output. The only fallible parts are reading inputs and JSON handling.

mod error;
mod info;
pub mod output;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::{QueryOutput, SnippetOutput};

use crate::config::RuntimeConfig;
use crate::lexical::QueryLexer;
use crate::logging::codes;
use crate::markers::{MarkerExtractor, MarkerTags, SnippetBody, SnippetDocument};
use crate::render::{HtmlRenderer, Renderer};
use crate::{log_error, log_info, log_performance};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Tokenize and render a single query
pub fn highlight_query(text: &str, config: &RuntimeConfig) -> QueryOutput {
    let mut lexer = QueryLexer::with_preferences(config.lexical.clone());
    let renderer = HtmlRenderer::with_preferences(config.render.clone());
    highlight_with(&mut lexer, &renderer, text)
}

/// Tokenize and render several queries with one lexer
pub fn highlight_queries<S: AsRef<str>>(texts: &[S], config: &RuntimeConfig) -> Vec<QueryOutput> {
    let start_time = Instant::now();
    let mut lexer = QueryLexer::with_preferences(config.lexical.clone());
    let renderer = HtmlRenderer::with_preferences(config.render.clone());

    let outputs: Vec<QueryOutput> = texts
        .iter()
        .map(|text| highlight_with(&mut lexer, &renderer, text.as_ref()))
        .collect();

    log_performance!(codes::success::PIPELINE_COMPLETE, "Query pipeline completed",
        duration = start_time.elapsed(),
        "queries" => texts.len(),
        "degraded" => lexer.metrics().degraded_total()
    );
    outputs
}

fn highlight_with(lexer: &mut QueryLexer, renderer: &HtmlRenderer, text: &str) -> QueryOutput {
    let start_time = Instant::now();
    let degraded_before = lexer.metrics().degraded_total();
    let tokens = lexer.tokenize(text);
    let html = renderer.render_query(&tokens);
    let degraded = lexer.metrics().degraded_total() - degraded_before;
    QueryOutput::new(text, tokens, html, degraded, start_time.elapsed())
}

/// Extract markers from highlight items and render them as paragraphs
pub fn highlight_snippets<S: AsRef<str>>(
    items: &[S],
    tags: &MarkerTags,
    config: &RuntimeConfig,
) -> SnippetOutput {
    let start_time = Instant::now();
    let mut extractor = MarkerExtractor::with_preferences(tags.clone(), config.markers.clone());
    let body = SnippetBody::select(items, None, &mut extractor);
    finish_snippet(body, config, start_time)
}

/// Highlights when present, otherwise the abstract
pub fn highlight_document(
    document: &SnippetDocument,
    tags: &MarkerTags,
    config: &RuntimeConfig,
) -> SnippetOutput {
    let start_time = Instant::now();
    let mut extractor = MarkerExtractor::with_preferences(tags.clone(), config.markers.clone());
    let body = document.body(&mut extractor);
    finish_snippet(body, config, start_time)
}

fn finish_snippet(body: SnippetBody, config: &RuntimeConfig, start_time: Instant) -> SnippetOutput {
    let html = HtmlRenderer::with_preferences(config.render.clone()).render_segments(&body.paragraphs);
    let output = SnippetOutput::new(body.source, body.paragraphs, html, start_time.elapsed());

    log_performance!(codes::success::PIPELINE_COMPLETE, "Snippet pipeline completed",
        duration = start_time.elapsed(),
        "paragraphs" => output.paragraphs.len(),
        "marked" => output.marked_segments
    );
    output
}

// ============================================================================
// INPUTS
// ============================================================================

/// Snippet input file: a list of highlight strings or a backend document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetInput {
    Items(Vec<String>),
    Document(SnippetDocument),
}

pub fn parse_snippet_input(json: &str) -> Result<SnippetInput, PipelineError> {
    serde_json::from_str(json).map_err(|e| {
        log_error!(codes::pipeline::JSON_DECODE_FAILURE, "Snippet input is not valid JSON",
            "line" => e.line(),
            "column" => e.column()
        );
        PipelineError::JsonDecode(e)
    })
}

pub fn read_snippet_input(path: &Path) -> Result<SnippetInput, PipelineError> {
    parse_snippet_input(&read_input(path)?)
}

/// Non-blank lines of a file, one query each
pub fn read_queries(path: &Path) -> Result<Vec<String>, PipelineError> {
    let content = read_input(path)?;
    Ok(split_queries(&content))
}

pub fn split_queries(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn read_input(path: &Path) -> Result<String, PipelineError> {
    log_info!("Reading input", "path" => path.display());
    std::fs::read_to_string(path).map_err(|e| {
        log_error!(codes::pipeline::INPUT_READ_FAILURE, "Cannot read input file",
            "path" => path.display(),
            "error" => e
        );
        PipelineError::input_read(path, e)
    })
}

/// JSON text of any pipeline output
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, PipelineError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| {
        log_error!(codes::pipeline::JSON_ENCODE_FAILURE, "Cannot encode output", "error" => e);
        PipelineError::JsonEncode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{BodySource, Segment};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn kw() -> MarkerTags {
        MarkerTags::new("<kw>", "</kw>").unwrap()
    }

    #[test]
    fn test_highlight_query() {
        let output = highlight_query("TI=\"Climate Change\" AND x", &RuntimeConfig::default());
        assert_eq!(output.tokens.reconstruct(), output.query);
        assert_eq!(output.counts.field_pairs, 1);
        assert_eq!(output.counts.operators, 1);
        assert_eq!(output.degraded, 0);
        assert!(output.html.contains(">AND</span>"));
    }

    #[test]
    fn test_highlight_queries_counts_degradations_per_query() {
        let outputs = highlight_queries(&["a and b", "A AND B", "\"open"], &RuntimeConfig::default());
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].degraded, 1);
        assert_eq!(outputs[1].degraded, 0);
        assert_eq!(outputs[2].degraded, 1);
        assert_eq!(
            outputs[1].tokens.kinds(),
            vec![TokenKind::Plain, TokenKind::Operator, TokenKind::Plain]
        );
    }

    #[test]
    fn test_highlight_snippets() {
        let output = highlight_snippets(&["The <kw>climate</kw> summit"], &kw(), &RuntimeConfig::default());
        assert_eq!(output.source, BodySource::Highlights);
        assert_eq!(output.paragraphs[0][1], Segment::marked("climate"));
        assert_eq!(output.marked_segments, 1);

        let none: [&str; 0] = [];
        let output = highlight_snippets(&none, &kw(), &RuntimeConfig::default());
        assert_eq!(output.source, BodySource::Empty);
        assert_eq!(output.html, "");
    }

    #[test]
    fn test_highlight_document_falls_back_to_abstract() {
        let document = SnippetDocument {
            highlights: Some(Vec::new()),
            abstract_text: Some("Sea <level>".to_string()),
        };
        let output = highlight_document(&document, &kw(), &RuntimeConfig::default());
        assert_eq!(output.source, BodySource::Abstract);
        assert!(output.html.contains("Sea &lt;level&gt;"));
    }

    #[test]
    fn test_parse_snippet_input_shapes() {
        assert_matches!(
            parse_snippet_input(r#"["a <kw>b</kw>"]"#),
            Ok(SnippetInput::Items(items)) if items.len() == 1
        );
        assert_matches!(
            parse_snippet_input(r#"{"AB": "x"}"#),
            Ok(SnippetInput::Document(doc)) if doc.abstract_text.as_deref() == Some("x")
        );
        assert_matches!(parse_snippet_input("[1, 2]"), Err(PipelineError::JsonDecode(_)));
        assert_matches!(parse_snippet_input("not json"), Err(PipelineError::JsonDecode(_)));
    }

    #[test]
    fn test_read_queries_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A AND B").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "TI=\"x\"").unwrap();

        let queries = read_queries(file.path()).unwrap();
        assert_eq!(queries, vec!["A AND B".to_string(), "TI=\"x\"".to_string()]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_queries(&dir.path().join("missing.txt"));
        assert_matches!(result, Err(PipelineError::InputRead { .. }));
    }

    #[test]
    fn test_to_json() {
        let output = highlight_query("NOT a", &RuntimeConfig::default());
        let json = to_json(&output, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"], "NOT a");
        assert_eq!(value["counts"]["operators"], 1);
        assert!(to_json(&output, true).unwrap().contains('\n'));
    }
}

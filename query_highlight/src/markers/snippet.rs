//! News snippet bodies: highlight paragraphs with an abstract fallback

use super::extractor::{MarkerExtractor, Segment};
use serde::{Deserialize, Serialize};

/// Backend payload fields the snippet body is built from. Unknown fields are
/// ignored and missing ones default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDocument {
    #[serde(rename = "HIGHLIGHTS", default)]
    pub highlights: Option<Vec<String>>,

    #[serde(rename = "AB", default)]
    pub abstract_text: Option<String>,
}

impl SnippetDocument {
    pub fn body(&self, extractor: &mut MarkerExtractor) -> SnippetBody {
        SnippetBody::select(
            self.highlights.as_deref().unwrap_or_default(),
            self.abstract_text.as_deref(),
            extractor,
        )
    }
}

/// Where the paragraphs of a body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySource {
    Highlights,
    Abstract,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetBody {
    pub source: BodySource,
    /// One segment list per paragraph
    pub paragraphs: Vec<Vec<Segment>>,
}

impl SnippetBody {
    /// Each highlight becomes a paragraph with marker segments. Without
    /// highlights the abstract is one unmarked paragraph, taken verbatim.
    pub fn select<S: AsRef<str>>(
        highlights: &[S],
        abstract_text: Option<&str>,
        extractor: &mut MarkerExtractor,
    ) -> Self {
        if !highlights.is_empty() {
            return Self {
                source: BodySource::Highlights,
                paragraphs: extractor.extract_all(highlights),
            };
        }
        match abstract_text {
            Some(text) => Self {
                source: BodySource::Abstract,
                paragraphs: vec![vec![Segment::unmarked(text)]],
            },
            None => Self {
                source: BodySource::Empty,
                paragraphs: Vec::new(),
            },
        }
    }

    pub fn has_marks(&self) -> bool {
        self.paragraphs.iter().flatten().any(|s| s.marked)
    }
}

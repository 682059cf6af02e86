//! Splits snippet strings into marked and unmarked segments

use super::tags::MarkerTags;
use crate::config::compile_time::markers::LARGE_ITEM_LIST_THRESHOLD;
use crate::config::runtime::MarkerPreferences;
use crate::logging::codes;
use crate::{log_debug, log_success, log_warning};
use serde::{Deserialize, Serialize};

/// A piece of snippet text; `marked` pieces were wrapped in marker tags
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub marked: bool,
    pub text: String,
}

impl Segment {
    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            marked: true,
            text: text.into(),
        }
    }

    pub fn unmarked(text: impl Into<String>) -> Self {
        Self {
            marked: false,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ExtractionMetrics {
    pub items_processed: usize,
    pub segments_emitted: usize,
    pub marked_segments: usize,
    pub dangling_open_tags: usize,
    pub stray_close_tags: usize,
}

pub struct MarkerExtractor {
    tags: MarkerTags,
    preferences: MarkerPreferences,
    metrics: ExtractionMetrics,
}

impl MarkerExtractor {
    pub fn new(tags: MarkerTags) -> Self {
        Self::with_preferences(tags, MarkerPreferences::default())
    }

    pub fn with_preferences(tags: MarkerTags, preferences: MarkerPreferences) -> Self {
        Self {
            tags,
            preferences,
            metrics: ExtractionMetrics::default(),
        }
    }

    pub fn tags(&self) -> &MarkerTags {
        &self.tags
    }

    pub fn metrics(&self) -> &ExtractionMetrics {
        &self.metrics
    }

    /// Segments of one string.
    ///
    /// Marked regions run from an open tag to the first close tag after it.
    /// An open tag with no close leaves the rest of the string, tag included,
    /// as one unmarked segment. Empty unmarked pieces are dropped; an input
    /// without any complete pair comes back as a single unmarked segment.
    pub fn extract(&mut self, text: &str) -> Vec<Segment> {
        let Self {
            tags,
            preferences,
            metrics,
        } = self;
        let open = tags.open();
        let close = tags.close();
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(open_at) = rest.find(open) {
            let inner = &rest[open_at + open.len()..];
            let Some(close_at) = inner.find(close) else {
                metrics.dangling_open_tags += 1;
                if preferences.log_malformed_tags {
                    log_debug!(codes::markers::DANGLING_OPEN_TAG, "Open tag without close tag",
                        "offset" => text.len() - rest.len() + open_at
                    );
                }
                break;
            };

            if open_at > 0 {
                push_unmarked(&mut segments, &rest[..open_at], tags, preferences, metrics);
            }
            segments.push(Segment::marked(&inner[..close_at]));
            metrics.marked_segments += 1;
            rest = &inner[close_at + close.len()..];
        }

        if !rest.is_empty() || segments.is_empty() {
            push_unmarked(&mut segments, rest, tags, preferences, metrics);
        }

        metrics.items_processed += 1;
        metrics.segments_emitted += segments.len();
        segments
    }

    /// One segment list per item, in input order
    pub fn extract_all<S: AsRef<str>>(&mut self, items: &[S]) -> Vec<Vec<Segment>> {
        if items.len() > LARGE_ITEM_LIST_THRESHOLD {
            log_warning!(codes::markers::LARGE_ITEM_LIST, "Item list exceeds threshold",
                "items" => items.len(),
                "threshold" => LARGE_ITEM_LIST_THRESHOLD
            );
        }

        let result: Vec<Vec<Segment>> = items.iter().map(|item| self.extract(item.as_ref())).collect();

        log_success!(codes::success::MARKER_EXTRACTION_COMPLETE, "Marker segments extracted",
            "items" => items.len(),
            "marked" => self.metrics.marked_segments
        );
        result
    }
}

fn push_unmarked(
    segments: &mut Vec<Segment>,
    text: &str,
    tags: &MarkerTags,
    preferences: &MarkerPreferences,
    metrics: &mut ExtractionMetrics,
) {
    if tags.open() != tags.close() && text.contains(tags.close()) {
        metrics.stray_close_tags += 1;
        if preferences.log_malformed_tags {
            log_debug!(codes::markers::STRAY_CLOSE_TAG, "Close tag without open tag",
                "text" => text
            );
        }
    }
    segments.push(Segment::unmarked(text));
}

/// Concatenated segment texts with marked segments re-wrapped in `tags`
pub fn rejoin(segments: &[Segment], tags: &MarkerTags) -> String {
    segments
        .iter()
        .map(|s| {
            if s.marked {
                tags.wrap(&s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

/// Concatenated segment texts, delimiters removed
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extract(text: &str) -> Vec<Segment> {
        MarkerExtractor::new(MarkerTags::default()).extract(text)
    }

    fn kw() -> MarkerTags {
        MarkerTags::new("<kw>", "</kw>").unwrap()
    }

    #[test]
    fn test_single_marked_keyword() {
        let segments = MarkerExtractor::new(kw()).extract("The <kw>climate</kw> summit");
        assert_eq!(
            segments,
            vec![
                Segment::unmarked("The "),
                Segment::marked("climate"),
                Segment::unmarked(" summit"),
            ]
        );
    }

    #[test]
    fn test_no_tags_single_segment() {
        let mut extractor = MarkerExtractor::new(kw());
        assert_eq!(extractor.extract("plain text"), vec![Segment::unmarked("plain text")]);
        assert_eq!(extractor.extract(""), vec![Segment::unmarked("")]);
    }

    #[test]
    fn test_adjacent_and_edge_markers() {
        let segments = MarkerExtractor::new(kw()).extract("<kw>a</kw><kw>b</kw>");
        assert_eq!(segments, vec![Segment::marked("a"), Segment::marked("b")]);
    }

    #[test]
    fn test_empty_marked_region() {
        let segments = MarkerExtractor::new(kw()).extract("x<kw></kw>y");
        assert_eq!(
            segments,
            vec![Segment::unmarked("x"), Segment::marked(""), Segment::unmarked("y")]
        );
    }

    #[test]
    fn test_dangling_open_tag() {
        let mut extractor = MarkerExtractor::new(kw());
        let segments = extractor.extract("a <kw>b</kw> c <kw>d");
        assert_eq!(
            segments,
            vec![
                Segment::unmarked("a "),
                Segment::marked("b"),
                Segment::unmarked(" c <kw>d"),
            ]
        );
        assert_eq!(extractor.metrics().dangling_open_tags, 1);
    }

    #[test]
    fn test_stray_close_tag_is_text() {
        let mut extractor = MarkerExtractor::new(kw());
        let segments = extractor.extract("a</kw> b");
        assert_eq!(segments, vec![Segment::unmarked("a</kw> b")]);
        assert_eq!(extractor.metrics().stray_close_tags, 1);
    }

    #[test]
    fn test_nested_open_is_not_special() {
        let segments = MarkerExtractor::new(kw()).extract("<kw>a<kw>b</kw>c</kw>");
        assert_eq!(
            segments,
            vec![Segment::marked("a<kw>b"), Segment::unmarked("c</kw>")]
        );
    }

    #[test]
    fn test_marked_text_may_span_lines() {
        let segments = MarkerExtractor::new(kw()).extract("<kw>sea\nlevel</kw>");
        assert_eq!(segments, vec![Segment::marked("sea\nlevel")]);
    }

    #[test]
    fn test_custom_and_identical_tags() {
        let tags = MarkerTags::new("**", "**").unwrap();
        let segments = MarkerExtractor::new(tags).extract("a **b** c **d");
        assert_eq!(
            segments,
            vec![
                Segment::unmarked("a "),
                Segment::marked("b"),
                Segment::unmarked(" c **d"),
            ]
        );
    }

    #[test]
    fn test_extract_all_preserves_order() {
        let mut extractor = MarkerExtractor::new(kw());
        let items = ["<kw>one</kw>", "two", "<kw>three</kw>!"];
        let out = extractor.extract_all(&items);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], vec![Segment::unmarked("two")]);
        assert_eq!(plain_text(&out[2]), "three!");
        assert_eq!(extractor.metrics().items_processed, 3);
        assert_eq!(extractor.metrics().marked_segments, 2);
    }

    #[test]
    fn test_default_extractor_uses_configured_tags() {
        let tags = MarkerTags::default();
        let text = format!("x {} y", tags.wrap("kw"));
        let segments = extract(&text);
        assert_eq!(segments[1], Segment::marked("kw"));
    }

    fn snippet() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("<kw>".to_string()),
                Just("</kw>".to_string()),
                Just("<k".to_string()),
                Just("w>".to_string()),
                "[a-z \n<>/]{1,5}",
            ],
            0..16,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_rejoin_restores_input(text in snippet()) {
            let tags = kw();
            let segments = MarkerExtractor::new(tags.clone()).extract(&text);
            prop_assert_eq!(rejoin(&segments, &tags), text);
        }

        #[test]
        fn prop_segments_are_well_formed(text in snippet()) {
            let tags = kw();
            let segments = MarkerExtractor::new(tags.clone()).extract(&text);
            prop_assert!(!segments.is_empty());
            for segment in &segments {
                if segment.marked {
                    prop_assert!(!segment.text.contains(tags.close()));
                } else if segments.len() > 1 {
                    prop_assert!(!segment.text.is_empty());
                }
            }
        }
    }
}

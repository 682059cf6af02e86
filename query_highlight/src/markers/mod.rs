//! Inline marker extraction for backend snippets
//!
//! Snippet strings arrive with matched keywords wrapped in a literal tag pair
//! (`<kw>climate</kw>`). This module splits them into marked and unmarked
//! segments without interpreting any other markup.

pub mod extractor;
pub mod snippet;
pub mod tags;

pub use extractor::{plain_text, rejoin, ExtractionMetrics, MarkerExtractor, Segment};
pub use snippet::{BodySource, SnippetBody, SnippetDocument};
pub use tags::{MarkerTagError, MarkerTags};

/// One segment list per item, in input order
pub fn extract_markers<S: AsRef<str>>(items: &[S], tags: &MarkerTags) -> Vec<Vec<Segment>> {
    MarkerExtractor::new(tags.clone()).extract_all(items)
}

/// Segments of a single string
pub fn extract_segments(text: &str, tags: &MarkerTags) -> Vec<Segment> {
    MarkerExtractor::new(tags.clone()).extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_markers_one_output_per_item() {
        let tags = MarkerTags::new("<kw>", "</kw>").unwrap();
        let out = extract_markers(&["The <kw>climate</kw> summit", "", "none"], &tags);
        assert_eq!(out.len(), 3);
        assert_eq!(
            out[0],
            vec![
                Segment::unmarked("The "),
                Segment::marked("climate"),
                Segment::unmarked(" summit"),
            ]
        );
        assert_eq!(out[1], vec![Segment::unmarked("")]);
        assert_eq!(out[2], vec![Segment::unmarked("none")]);
    }

    #[test]
    fn test_extract_markers_empty_list() {
        let items: Vec<String> = Vec::new();
        assert!(extract_markers(&items, &MarkerTags::default()).is_empty());
    }

    #[test]
    fn test_extract_segments_with_custom_tags() {
        let tags = MarkerTags::new("[[", "]]").unwrap();
        let segments = extract_segments("sea [[level]] rise", &tags);
        assert_eq!(plain_text(&segments), "sea level rise");
        assert_eq!(rejoin(&segments, &tags), "sea [[level]] rise");
    }
}

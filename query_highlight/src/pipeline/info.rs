use crate::config::build_info;
use crate::config::compile_time::{lexical, markers};
use crate::tokens::{FieldKey, LogicalOperator, QUOTE_CHARS};

/// Vocabulary and limits the highlighter was built with
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub operators: Vec<&'static str>,
    pub field_keys: Vec<(&'static str, &'static str)>,
    pub quote_chars: Vec<char>,
    pub default_open_tag: &'static str,
    pub default_close_tag: &'static str,
    pub large_query_threshold: usize,
    pub large_item_list_threshold: usize,
    pub config_source: String,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        let keys: Vec<String> = self
            .field_keys
            .iter()
            .map(|(key, description)| format!("{} ({})", key, description))
            .collect();
        let quotes: String = self.quote_chars.iter().collect();
        format!(
            "Query Highlight Pipeline:\n\
             - Operators: {}\n\
             - Field Keys: {}\n\
             - Quote Characters: {}\n\
             - Default Marker Tags: {} {}\n\
             - Large Query Threshold: {} bytes\n\
             - Large Item List Threshold: {} items\n\
             - Configuration: {}\n\
             - Global Logging: {}",
            self.operators.join(", "),
            keys.join(", "),
            quotes,
            self.default_open_tag,
            self.default_close_tag,
            self.large_query_threshold,
            self.large_item_list_threshold,
            self.config_source,
            self.global_logging_enabled
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{} operators, {} field keys, markers {}...{}",
            self.operators.len(),
            self.field_keys.len(),
            self.default_open_tag,
            self.default_close_tag
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        operators: LogicalOperator::ALL.iter().map(|op| op.as_str()).collect(),
        field_keys: FieldKey::ALL
            .iter()
            .map(|key| (key.as_str(), key.description()))
            .collect(),
        quote_chars: QUOTE_CHARS.to_vec(),
        default_open_tag: markers::DEFAULT_OPEN_TAG,
        default_close_tag: markers::DEFAULT_CLOSE_TAG,
        large_query_threshold: lexical::LARGE_QUERY_THRESHOLD,
        large_item_list_threshold: markers::LARGE_ITEM_LIST_THRESHOLD,
        config_source: build_info::source_info(),
        global_logging_enabled: crate::logging::is_initialized(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_info_lists_vocabulary() {
        let info = get_pipeline_info();
        assert_eq!(info.operators, vec!["AND", "OR", "NOT"]);
        assert_eq!(info.field_keys.len(), 4);
        assert_eq!(info.quote_chars.len(), 3);

        let report = info.report();
        assert!(report.contains("TI (title)"));
        assert!(report.contains(markers::DEFAULT_OPEN_TAG));
        assert!(info.summary().starts_with("3 operators, 4 field keys"));
    }
}

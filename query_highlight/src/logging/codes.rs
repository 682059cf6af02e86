//! Event codes and their classification metadata
//!
//! Every code the crate emits is declared here, grouped by the area that emits
//! it, together with the metadata registry consulted by `LogEvent`.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Stable identifier attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata for a single code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    const fn new(
        code: Code,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.0,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR001");
}

/// Degraded classifications reported by the query lexer
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_QUOTE: Code = Code::new("L001");
    pub const LOWERCASE_OPERATOR: Code = Code::new("L002");
    pub const UNKNOWN_FIELD_KEY: Code = Code::new("L003");
    pub const INCOMPLETE_FIELD_VALUE: Code = Code::new("L004");
    pub const LARGE_QUERY: Code = Code::new("L010");
}

pub mod markers {
    use super::Code;

    pub const INVALID_MARKER_TAGS: Code = Code::new("M001");
    pub const DANGLING_OPEN_TAG: Code = Code::new("M002");
    pub const STRAY_CLOSE_TAG: Code = Code::new("M003");
    pub const LARGE_ITEM_LIST: Code = Code::new("M010");
}

pub mod render {
    use super::Code;

    pub const MARKUP_ESCAPED: Code = Code::new("R001");
}

pub mod session {
    use super::Code;

    pub const STALE_RESULT_DISCARDED: Code = Code::new("S001");
    pub const UNKNOWN_REVISION: Code = Code::new("S002");
}

pub mod pipeline {
    use super::Code;

    pub const INPUT_READ_FAILURE: Code = Code::new("P001");
    pub const JSON_DECODE_FAILURE: Code = Code::new("P002");
    pub const JSON_ENCODE_FAILURE: Code = Code::new("P003");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const MARKER_EXTRACTION_COMPLETE: Code = Code::new("I030");
    pub const RENDER_COMPLETE: Code = Code::new("I040");
    pub const SESSION_RESULT_APPLIED: Code = Code::new("I050");
    pub const PIPELINE_COMPLETE: Code = Code::new("I060");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

const METADATA: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        system::INITIALIZATION_FAILURE,
        "System",
        Severity::Critical,
        false,
        "Logging or configuration initialization failed",
        "Check runtime preferences and initialization order",
    ),
    // Lexical
    ErrorMetadata::new(
        lexical::UNTERMINATED_QUOTE,
        "Lexical",
        Severity::Low,
        true,
        "Quote character has no closing quote; treated as plain text",
        "Close the quoted phrase",
    ),
    ErrorMetadata::new(
        lexical::LOWERCASE_OPERATOR,
        "Lexical",
        Severity::Low,
        true,
        "Lowercase operator word treated as plain text",
        "Write logical operators in uppercase",
    ),
    ErrorMetadata::new(
        lexical::UNKNOWN_FIELD_KEY,
        "Lexical",
        Severity::Low,
        true,
        "Unrecognized field key treated as plain text",
        "Use one of TI, AB, DP, URL",
    ),
    ErrorMetadata::new(
        lexical::INCOMPLETE_FIELD_VALUE,
        "Lexical",
        Severity::Low,
        true,
        "Field key is not followed by a terminated quoted value",
        "Quote the field value",
    ),
    ErrorMetadata::new(
        lexical::LARGE_QUERY,
        "Lexical",
        Severity::Medium,
        true,
        "Query exceeds the large query threshold",
        "Consider shortening the query",
    ),
    // Markers
    ErrorMetadata::new(
        markers::INVALID_MARKER_TAGS,
        "Markers",
        Severity::High,
        false,
        "Marker delimiters must be non-empty",
        "Provide non-empty open and close tags",
    ),
    ErrorMetadata::new(
        markers::DANGLING_OPEN_TAG,
        "Markers",
        Severity::Low,
        true,
        "Open tag without a closing tag; remainder left unmarked",
        "Check the snippet source for truncation",
    ),
    ErrorMetadata::new(
        markers::STRAY_CLOSE_TAG,
        "Markers",
        Severity::Low,
        true,
        "Close tag without a preceding open tag; kept as text",
        "Check the snippet source for truncation",
    ),
    ErrorMetadata::new(
        markers::LARGE_ITEM_LIST,
        "Markers",
        Severity::Medium,
        true,
        "Item list exceeds the large item list threshold",
        "Page the snippet list",
    ),
    // Render
    ErrorMetadata::new(
        render::MARKUP_ESCAPED,
        "Render",
        Severity::Low,
        true,
        "Input contained markup characters that were escaped",
        "No action required",
    ),
    // Session
    ErrorMetadata::new(
        session::STALE_RESULT_DISCARDED,
        "Session",
        Severity::Low,
        true,
        "Result for a superseded revision was discarded",
        "No action required",
    ),
    ErrorMetadata::new(
        session::UNKNOWN_REVISION,
        "Session",
        Severity::Medium,
        true,
        "Result carries a revision that was never issued",
        "Only complete revisions returned by begin()",
    ),
    // Pipeline
    ErrorMetadata::new(
        pipeline::INPUT_READ_FAILURE,
        "Pipeline",
        Severity::High,
        false,
        "Input could not be read",
        "Check the input path and permissions",
    ),
    ErrorMetadata::new(
        pipeline::JSON_DECODE_FAILURE,
        "Pipeline",
        Severity::High,
        false,
        "Input is not a JSON string array or snippet document",
        "Provide an array of strings or an object with HIGHLIGHTS/AB",
    ),
    ErrorMetadata::new(
        pipeline::JSON_ENCODE_FAILURE,
        "Pipeline",
        Severity::High,
        false,
        "Output could not be serialized",
        "File a bug report with the failing input",
    ),
    // Success
    ErrorMetadata::new(
        success::SYSTEM_INITIALIZATION_COMPLETED,
        "System",
        Severity::Low,
        true,
        "Logging system initialized",
        "No action required",
    ),
    ErrorMetadata::new(
        success::TOKENIZATION_COMPLETE,
        "Lexical",
        Severity::Low,
        true,
        "Query tokenized",
        "No action required",
    ),
    ErrorMetadata::new(
        success::MARKER_EXTRACTION_COMPLETE,
        "Markers",
        Severity::Low,
        true,
        "Marker segments extracted",
        "No action required",
    ),
    ErrorMetadata::new(
        success::RENDER_COMPLETE,
        "Render",
        Severity::Low,
        true,
        "Markup rendered",
        "No action required",
    ),
    ErrorMetadata::new(
        success::SESSION_RESULT_APPLIED,
        "Session",
        Severity::Low,
        true,
        "Latest revision applied",
        "No action required",
    ),
    ErrorMetadata::new(
        success::PIPELINE_COMPLETE,
        "Pipeline",
        Severity::Low,
        true,
        "Pipeline run completed",
        "No action required",
    ),
];

static REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    REGISTRY.get_or_init(|| METADATA.iter().map(|meta| (meta.code, meta)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    registry().get(code).copied()
}

pub fn get_severity(code: &str) -> Severity {
    get_metadata(code)
        .map(|meta| meta.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|meta| meta.recoverable).unwrap_or(true)
}

pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|meta| meta.description)
        .unwrap_or("Unknown code")
}

pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|meta| meta.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_metadata(code)
        .map(|meta| meta.category)
        .unwrap_or("Unknown")
}

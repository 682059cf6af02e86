// RUNTIME PREFERENCES (User Experience)

use super::compile_time::markers::{DEFAULT_CLOSE_TAG, DEFAULT_OPEN_TAG};
use serde::{Deserialize, Serialize};
use std::env;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token counts while scanning
    pub collect_detailed_metrics: bool,

    /// Whether to emit debug events for degraded classifications
    /// (unterminated quotes, lowercase operators, unknown keys)
    pub log_degraded_classifications: bool,

    /// Whether degraded-classification events carry the source span
    pub include_position_in_events: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            log_degraded_classifications: env_flag(env_vars::LEXICAL_LOG_DEGRADED, true),
            include_position_in_events: env_flag(env_vars::LEXICAL_INCLUDE_POSITIONS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerPreferences {
    /// Opening marker delimiter
    pub open_tag: String,

    /// Closing marker delimiter
    pub close_tag: String,

    /// Whether to emit debug events for dangling or stray delimiters
    pub log_malformed_tags: bool,
}

impl Default for MarkerPreferences {
    fn default() -> Self {
        Self {
            open_tag: env::var(env_vars::MARKER_OPEN_TAG)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_OPEN_TAG.to_string()),
            close_tag: env::var(env_vars::MARKER_CLOSE_TAG)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_CLOSE_TAG.to_string()),
            log_malformed_tags: env_flag(env_vars::MARKER_LOG_MALFORMED, true),
        }
    }
}

/// Class name vocabulary used by renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassNameStyle {
    /// `token keyword custom-keyword`, `token key custom-key`, `token string custom-string`
    Prism,
    /// `keyword`, `key`, `string`
    Plain,
}

impl ClassNameStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassNameStyle::Prism => "prism",
            ClassNameStyle::Plain => "plain",
        }
    }
}

fn parse_class_style(style: &str) -> Option<ClassNameStyle> {
    match style.to_lowercase().as_str() {
        "prism" => Some(ClassNameStyle::Prism),
        "plain" | "short" => Some(ClassNameStyle::Plain),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPreferences {
    /// Class name vocabulary for highlighted spans
    pub class_style: ClassNameStyle,

    /// Whether the value span of a field pair includes its quote characters
    pub quotes_inside_value_span: bool,
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            class_style: env::var(env_vars::RENDER_CLASS_STYLE)
                .ok()
                .and_then(|v| parse_class_style(&v))
                .unwrap_or(ClassNameStyle::Prism),
            quotes_inside_value_span: env_flag(env_vars::RENDER_QUOTES_IN_VALUE, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to include timing metrics in logs
    pub log_performance_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env_flag(env_vars::LOGGING_LOG_PERFORMANCE, false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub markers: MarkerPreferences,
    pub render: RenderPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "QHL_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_LOG_DEGRADED: &str = "QHL_LEXICAL_LOG_DEGRADED";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "QHL_LEXICAL_INCLUDE_POSITIONS";

    // Markers
    pub const MARKER_OPEN_TAG: &str = "QHL_MARKER_OPEN_TAG";
    pub const MARKER_CLOSE_TAG: &str = "QHL_MARKER_CLOSE_TAG";
    pub const MARKER_LOG_MALFORMED: &str = "QHL_MARKER_LOG_MALFORMED";

    // Render
    pub const RENDER_CLASS_STYLE: &str = "QHL_RENDER_CLASS_STYLE";
    pub const RENDER_QUOTES_IN_VALUE: &str = "QHL_RENDER_QUOTES_IN_VALUE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "QHL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "QHL_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "QHL_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "QHL_LOGGING_LOG_PERFORMANCE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_class_style_parsing() {
        assert_eq!(parse_class_style("Prism"), Some(ClassNameStyle::Prism));
        assert_eq!(parse_class_style("short"), Some(ClassNameStyle::Plain));
        assert_eq!(parse_class_style("fancy"), None);
    }

    #[test]
    fn test_marker_preferences_never_empty() {
        let prefs = MarkerPreferences::default();
        assert!(!prefs.open_tag.is_empty());
        assert!(!prefs.close_tag.is_empty());
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        for name in [
            env_vars::LEXICAL_DETAILED_METRICS,
            env_vars::MARKER_OPEN_TAG,
            env_vars::RENDER_CLASS_STYLE,
            env_vars::LOGGING_MIN_LEVEL,
        ] {
            assert!(name.starts_with("QHL_"));
        }
    }
}

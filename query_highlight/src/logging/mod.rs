//! Global logging for the highlighter
//!
//! The library emits coded events through a process-wide `LoggingService`.
//! Nothing is printed until a host initializes the service; before that,
//! events are dropped.

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, EventSummary, Logger, LoggingService, MemoryLogger, MultiLogger,
    StructuredLogger,
};

use crate::config::runtime::LoggingPreferences;
use crate::utils::Span;

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize the global service from runtime preferences
pub fn init_global_logging(preferences: LoggingPreferences) -> Result<(), String> {
    config::init_runtime_preferences(preferences)?;

    let service = Arc::new(service::create_configured_service());
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("min_level", config::get_min_log_level().as_str()),
    );

    Ok(())
}

/// Initialize with a caller-built service (embedding hosts, tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Whether debug events would reach any logger
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

/// Attach span and context to an event and hand it to the global service
pub fn log_with_context(mut event: LogEvent, span: Option<Span>, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }

    if let Some(s) = span {
        event = event.with_span(s);
    }
    for (key, value) in context {
        event = event.with_context(key, &value);
    }
    logger.log_event(event);
}

// ============================================================================
// FALLBACK
// ============================================================================

/// Log an error even when the global service is missing
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_error(code, message),
        None => eprintln!("[ERROR] {} - {}", code.as_str(), message),
    }
}

pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();
    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    if let Some(logger) = try_get_global_logger() {
        diagnostics.push_str(&format!("Service level: {}\n", logger.min_level().as_str()));
    }
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());
    diagnostics
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_without_initialization_is_silent() {
        if is_initialized() {
            return;
        }
        assert!(!debug_enabled());
        log_with_context(LogEvent::info("dropped"), None, vec![("k", "v".to_string())]);
        safe_log_error(codes::system::INITIALIZATION_FAILURE, "fallback path");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Initialized:"));
        assert!(diagnostics.contains("Logging Configuration"));
    }
}

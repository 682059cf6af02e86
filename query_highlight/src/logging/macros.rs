//! Logging macros with `"key" => value` context pairs
//!
//! Context values accept anything implementing `Display`.

// ============================================================================
// ERROR
// ============================================================================

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::error($code, $message), None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::error($code, $message), Some($span), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::error($code, $message), None, context)
        }
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::error($code, $message), Some($span), context)
        }
    };
}

// ============================================================================
// WARNING
// ============================================================================

#[macro_export]
macro_rules! log_warning {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::warning($code, $message), None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::warning($code, $message), Some($span), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::warning($code, $message), None, context)
        }
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::warning($code, $message), Some($span), context)
        }
    };
}

// ============================================================================
// SUCCESS / INFO
// ============================================================================

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::success($code, $message), None, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::success($code, $message), None, context)
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::info($message), None, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::info($message), None, context)
        }
    };
}

// ============================================================================
// DEBUG
// ============================================================================

/// Skips building the event entirely unless debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($code:expr, $message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::debug($code, $message), None, vec![])
        }
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::debug($code, $message), Some($span), vec![])
        }
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::debug_enabled() {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::debug($code, $message), None, context)
        }
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::debug_enabled() {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::debug($code, $message), Some($span), context)
        }
    };
}

/// Success event with a `duration_ms` entry, emitted only when performance
/// events are enabled
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        if $crate::logging::config::log_performance_events() {
            $crate::log_success!($code, $message,
                "duration_ms" => $duration.as_secs_f64() * 1000.0
            );
        }
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::log_performance_events() {
            $crate::log_success!($code, $message,
                "duration_ms" => $duration.as_secs_f64() * 1000.0,
                $($key => $value),+
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::Span;

    #[test]
    fn test_macros_expand_without_global_logger() {
        let length: usize = 42;
        let duration = std::time::Duration::from_millis(3);

        log_error!(codes::pipeline::INPUT_READ_FAILURE, "Cannot read", "path" => "missing.txt");
        log_warning!(codes::lexical::LARGE_QUERY, "Large query", "length" => length);
        log_warning!(codes::markers::DANGLING_OPEN_TAG, "Dangling", span = Span::empty());
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Done", "tokens" => 7);
        log_info!("Processing", "items" => 3, "json" => true);
        log_debug!(codes::lexical::UNTERMINATED_QUOTE, "Quote",
            span = Span::empty(),
            "quote" => '"'
        );
        log_performance!(codes::success::PIPELINE_COMPLETE, "Pipeline",
            duration = duration,
            "inputs" => 1
        );
    }
}

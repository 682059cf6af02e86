// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    markers: MarkerDefaults,
    session: SessionLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    large_query_threshold: usize,
    token_capacity_hint: usize,
}

#[derive(serde::Deserialize)]
struct MarkerDefaults {
    default_open_tag: String,
    default_close_tag: String,
    large_item_list_threshold: usize,
}

#[derive(serde::Deserialize)]
struct SessionLimits {
    stale_history_size: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=QHL_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=QHL_CONFIG_DIR");

    let profile = env::var("QHL_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("QHL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of query_highlight directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    if config.markers.default_open_tag.is_empty() || config.markers.default_close_tag.is_empty() {
        panic!("CONFIG: marker delimiters must be non-empty");
    }

    if config.lexical.large_query_threshold == 0 {
        panic!("CONFIG: large_query_threshold must be positive");
    }

    if config.session.stale_history_size == 0 {
        panic!("CONFIG: stale_history_size must be positive");
    }

    if config.logging.log_buffer_size < 100 || config.logging.log_buffer_size > 100_000 {
        panic!("CONFIG: log_buffer_size must be within 100..=100000");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("CONFIG: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.lexical.large_query_threshold > 1_000_000 {
        panic!("PRODUCTION: large_query_threshold too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const LARGE_QUERY_THRESHOLD: usize = {};
        pub const TOKEN_CAPACITY_HINT: usize = {};
    }}

    pub mod markers {{
        pub const DEFAULT_OPEN_TAG: &str = {:?};
        pub const DEFAULT_CLOSE_TAG: &str = {:?};
        pub const LARGE_ITEM_LIST_THRESHOLD: usize = {};
    }}

    pub mod session {{
        pub const STALE_HISTORY_SIZE: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Lexical
        config.lexical.large_query_threshold,
        config.lexical.token_capacity_hint,
        // Markers
        config.markers.default_open_tag,
        config.markers.default_close_tag,
        config.markers.large_item_list_threshold,
        // Session
        config.session.stale_history_size,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}

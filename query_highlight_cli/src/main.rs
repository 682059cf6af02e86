//! # qhl
//!
//! Tokenizes boolean search queries and extracts snippet markers from the
//! command line. Results go to stdout; log events go to stderr.

use clap::{Args, Parser, Subcommand, ValueEnum};
use query_highlight::config::runtime::{parse_log_level, ClassNameStyle, LogLevel, LoggingPreferences};
use query_highlight::config::RuntimeConfig;
use query_highlight::logging::{self, codes};
use query_highlight::markers::MarkerTags;
use query_highlight::pipeline::{self, PipelineError, SnippetInput};
use query_highlight::{log_error, log_info};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qhl", version)]
#[command(about = "Query syntax highlighting and snippet marker extraction", long_about = None)]
struct Cli {
    /// Minimum log level (error, warn, info, debug)
    #[arg(long, global = true, default_value = "warn", value_parser = parse_level)]
    log_level: LogLevel,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    structured_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify query text into operators, field keys, quoted values and plain text
    Tokenize(TokenizeArgs),
    /// Split snippet strings into marked and unmarked segments
    Markers(MarkersArgs),
    /// Show the vocabulary and limits the highlighter was built with
    Info,
}

#[derive(Args, Debug)]
struct TokenizeArgs {
    /// Queries to tokenize; reads one query per line from stdin when empty
    queries: Vec<String>,

    /// Read one query per line from a file
    #[arg(long, short)]
    file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Use short class names (`keyword`, `key`, `string`) in HTML output
    #[arg(long)]
    plain_classes: bool,
}

#[derive(Args, Debug)]
struct MarkersArgs {
    /// Snippet strings; reads a JSON file or stdin when empty
    items: Vec<String>,

    /// JSON array of strings, or a document with HIGHLIGHTS and AB fields
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Opening marker tag
    #[arg(long)]
    open: Option<String>,

    /// Closing marker tag
    #[arg(long)]
    close: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Cannot read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

impl CliError {
    fn error_code(&self) -> logging::Code {
        match self {
            Self::Pipeline(e) => e.error_code(),
            Self::Stdin(_) => codes::pipeline::INPUT_READ_FAILURE,
        }
    }
}

fn parse_level(level: &str) -> Result<LogLevel, String> {
    parse_log_level(level).ok_or_else(|| format!("unknown log level '{}'", level))
}

fn main() {
    let cli = Cli::parse();

    let preferences = LoggingPreferences {
        use_structured_logging: cli.structured_logs,
        enable_console_logging: true,
        min_log_level: cli.log_level,
        ..LoggingPreferences::default()
    };
    if let Err(e) = logging::init_global_logging(preferences) {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    log_info!("qhl starting", "version" => env!("CARGO_PKG_VERSION"));

    match run(cli.command, &mut std::io::stdin()) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            log_error!(e.error_code(), "Command failed", "error" => e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Output of one command; `stdin` is read only when no other input is given
fn run(command: Command, stdin: &mut dyn Read) -> Result<String, CliError> {
    match command {
        Command::Tokenize(args) => tokenize(args, stdin),
        Command::Markers(args) => markers(args, stdin),
        Command::Info => Ok(format!("{}\n", pipeline::get_pipeline_info().report())),
    }
}

fn read_stdin(stdin: &mut dyn Read) -> Result<String, CliError> {
    let mut content = String::new();
    stdin.read_to_string(&mut content).map_err(CliError::Stdin)?;
    Ok(content)
}

fn tokenize(args: TokenizeArgs, stdin: &mut dyn Read) -> Result<String, CliError> {
    let queries = match (&args.file, args.queries.is_empty()) {
        (Some(path), _) => pipeline::read_queries(path)?,
        (None, false) => args.queries,
        (None, true) => pipeline::split_queries(&read_stdin(stdin)?),
    };

    let mut config = RuntimeConfig::default();
    if args.plain_classes {
        config.render.class_style = ClassNameStyle::Plain;
    }
    let outputs = pipeline::highlight_queries(&queries, &config);

    let mut out = match args.format {
        OutputFormat::Json => pipeline::to_json(&outputs, true)?,
        OutputFormat::Html => outputs
            .iter()
            .map(|o| o.html.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Text => outputs
            .iter()
            .map(|o| o.to_text())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn markers(args: MarkersArgs, stdin: &mut dyn Read) -> Result<String, CliError> {
    let config = RuntimeConfig::default();
    let tags = MarkerTags::new(
        args.open.unwrap_or_else(|| config.markers.open_tag.clone()),
        args.close.unwrap_or_else(|| config.markers.close_tag.clone()),
    )
    .map_err(PipelineError::from)?;

    let input = match (&args.file, args.items.is_empty()) {
        (Some(path), _) => pipeline::read_snippet_input(path)?,
        (None, false) => SnippetInput::Items(args.items),
        (None, true) => pipeline::parse_snippet_input(&read_stdin(stdin)?)?,
    };

    let output = match &input {
        SnippetInput::Items(items) => pipeline::highlight_snippets(items, &tags, &config),
        SnippetInput::Document(document) => pipeline::highlight_document(document, &tags, &config),
    };

    let mut out = match args.format {
        OutputFormat::Json => pipeline::to_json(&output, true)?,
        OutputFormat::Html => output.html.clone(),
        OutputFormat::Text => output.to_text(),
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

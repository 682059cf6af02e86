// Internal modules
pub mod config;
#[macro_use]
pub mod logging;
pub mod lexical;
pub mod markers;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, QueryLexer};
pub use markers::{extract_markers, extract_segments, MarkerTags, Segment};
pub use pipeline::{PipelineError, QueryOutput, SnippetOutput};
pub use render::{HtmlRenderer, Renderer};
pub use session::{Highlight, HighlightSession, Revision};
pub use tokens::{Token, TokenKind, TokenSequence};

use crate::logging::{codes, Code};
use crate::markers::MarkerTagError;
use std::path::PathBuf;

/// Errors of the input/output surface around the core
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Cannot read '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON input: {0}")]
    JsonDecode(#[source] serde_json::Error),

    #[error("Cannot encode output as JSON: {0}")]
    JsonEncode(#[source] serde_json::Error),

    #[error("Invalid marker tags: {0}")]
    MarkerTags(#[from] MarkerTagError),
}

impl PipelineError {
    pub fn input_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputRead {
            path: path.into(),
            source,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::InputRead { .. } => codes::pipeline::INPUT_READ_FAILURE,
            Self::JsonDecode(_) => codes::pipeline::JSON_DECODE_FAILURE,
            Self::JsonEncode(_) => codes::pipeline::JSON_ENCODE_FAILURE,
            Self::MarkerTags(e) => e.error_code(),
        }
    }
}

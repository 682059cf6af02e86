//! Marker delimiter pair

use crate::config::compile_time::markers::{DEFAULT_CLOSE_TAG, DEFAULT_OPEN_TAG};
use crate::config::runtime::MarkerPreferences;
use crate::logging::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerTagError {
    #[error("Open marker tag must not be empty")]
    EmptyOpenTag,

    #[error("Close marker tag must not be empty")]
    EmptyCloseTag,
}

impl MarkerTagError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::markers::INVALID_MARKER_TAGS
    }
}

/// Literal open/close delimiters around a matched keyword, e.g. `<kw>` and
/// `</kw>`. Both are non-empty; they may be identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerTags {
    open: String,
    close: String,
}

impl MarkerTags {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, MarkerTagError> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() {
            return Err(MarkerTagError::EmptyOpenTag);
        }
        if close.is_empty() {
            return Err(MarkerTagError::EmptyCloseTag);
        }
        Ok(Self { open, close })
    }

    pub fn from_preferences(preferences: &MarkerPreferences) -> Result<Self, MarkerTagError> {
        Self::new(preferences.open_tag.clone(), preferences.close_tag.clone())
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// `text` wrapped in the delimiters
    pub fn wrap(&self, text: &str) -> String {
        format!("{}{}{}", self.open, text, self.close)
    }
}

impl Default for MarkerTags {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN_TAG.to_string(),
            close: DEFAULT_CLOSE_TAG.to_string(),
        }
    }
}

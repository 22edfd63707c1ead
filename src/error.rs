use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

/// Failures that stop an operation outright.
///
/// Misses that callers are expected to render as ordinary UI states (an identifier that does
/// not parse, a passage that is not in the corpus, a chapter with no connections) are not
/// represented here. See [`crate::reference::parse`], [`crate::text::TextNotFound`] and
/// [`crate::query::query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum ScriptureError {
    #[error("Invalid Command: {0}")]
    Command(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Corpus error: {0}")]
    Corpus(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("Permission denied")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ScriptureError {
    fn from(src: toml::de::Error) -> ScriptureError {
        ScriptureError::Config(format!("Toml deserialization error: {src}"))
    }
}

impl From<JsonError> for ScriptureError {
    fn from(src: JsonError) -> ScriptureError {
        ScriptureError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for ScriptureError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => ScriptureError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => ScriptureError::PermissionDenied,
            _ => ScriptureError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

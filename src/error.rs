//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror. The
//! HTTP rendering of these errors lives in [`crate::api::error`].

use std::fmt;
use thiserror::Error;

/// Which kind of record a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Template,
    MadLib,
    Image,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Template => "Template",
            RecordKind::MadLib => "MadLib",
            RecordKind::Image => "Image",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    #[error("Mismatch between words extracted and words needed (declared {declared:?}, found {found:?})")]
    PlaceholderMismatch {
        declared: Vec<String>,
        found: Vec<String>,
    },

    #[error("No image generated")]
    NoImageProduced,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

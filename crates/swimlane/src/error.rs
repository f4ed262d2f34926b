//! Error types for Swimlane operations.
//!
//! This module provides the main error type [`SwimlaneError`] which wraps
//! the error conditions that can occur while loading, laying out and
//! rendering a pipeline.

use std::io;

use thiserror::Error;

use crate::source::ParseError;

/// The main error type for Swimlane operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the definition source next to the error so that
/// callers can render a snippet around the offending span.
#[derive(Debug, Error)]
pub enum SwimlaneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for SwimlaneError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl SwimlaneError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

//! Export of laid-out pipelines.
//!
//! # Pipeline Position
//!
//! ```text
//! Pipeline + PipelineLayout
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`SwimlaneError::Export`](crate::SwimlaneError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use swimlane_core::semantic::Pipeline;

use crate::layout::PipelineLayout;

/// Abstraction for export backends.
pub trait Exporter {
    /// Renders `layout` of `pipeline` to the backend's text format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStatus`] if the exporter was asked to highlight
    /// a status the pipeline does not define, or [`Error::Render`] if the
    /// output cannot be produced.
    fn export(&self, pipeline: &Pipeline, layout: &PipelineLayout) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The requested status overlay is not defined by the pipeline.
    UnknownStatus(String),
    /// A rendering failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStatus(name) => write!(f, "Unknown status `{name}`"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

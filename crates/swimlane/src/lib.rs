//! Swimlane - zone-aware layout and rendering of pipeline diagrams.
//!
//! A pipeline is a directed graph of software tools, file formats and file
//! packages, each assigned to a horizontal zone. This crate loads pipeline
//! definitions, computes a zone-aware tree layout and renders it to SVG.

pub mod config;
pub mod export;
pub mod layout;

mod error;
mod source;
mod structure;

pub use swimlane_core::{color, draw, geometry, identifier, semantic, status, style};

pub use error::SwimlaneError;
pub use source::ParseError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use geometry::Size;
use layout::{EngineBuilder, PipelineLayout};
use semantic::Pipeline;

/// Builder for loading, laying out and rendering pipelines.
///
/// # Examples
///
/// ```rust
/// use swimlane::{PipelineBuilder, config::AppConfig};
///
/// let source = r#"
/// [[zone]]
/// name = "Design"
///
/// [[node]]
/// id = 1
/// title = "CAD"
/// kind = "software"
/// zone = 1
/// "#;
///
/// let builder = PipelineBuilder::new(AppConfig::default());
/// let pipeline = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&pipeline).expect("Failed to lay out");
/// let svg = builder
///     .render_svg(&pipeline, &layout, None)
///     .expect("Failed to render");
/// assert!(svg.contains("CAD"));
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    config: AppConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swimlane::{PipelineBuilder, config::AppConfig};
    ///
    /// let builder = PipelineBuilder::new(AppConfig::default());
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a TOML pipeline definition.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError::Parse` for malformed TOML, duplicate node ids
    /// and nodes assigned to undeclared zones.
    pub fn parse(&self, source: &str) -> Result<Pipeline, SwimlaneError> {
        info!("Parsing pipeline definition");

        let pipeline =
            source::parse(source).map_err(|err| SwimlaneError::new_parse_error(err, source))?;

        debug!("Pipeline parsed successfully");
        trace!(pipeline:?; "Parsed pipeline");

        Ok(pipeline)
    }

    /// Lay out a pipeline at the configured viewport.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError::Graph` if the edges form a cycle, or
    /// `SwimlaneError::Layout` if the configured viewport is empty.
    pub fn layout(&self, pipeline: &Pipeline) -> Result<PipelineLayout, SwimlaneError> {
        self.layout_with_viewport(pipeline, self.config.layout().viewport())
    }

    /// Lay out a pipeline at an explicit viewport, e.g. after a resize.
    ///
    /// # Errors
    ///
    /// Same as [`PipelineBuilder::layout`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swimlane::{PipelineBuilder, geometry::Size};
    ///
    /// let builder = PipelineBuilder::default();
    /// let pipeline = builder.parse("[[zone]]\nname = \"Empty\"").unwrap();
    /// let layout = builder
    ///     .layout_with_viewport(&pipeline, Size::new(1600.0, 1200.0))
    ///     .unwrap();
    /// assert_eq!(layout.zones().len(), 1);
    /// ```
    pub fn layout_with_viewport(
        &self,
        pipeline: &Pipeline,
        viewport: Size,
    ) -> Result<PipelineLayout, SwimlaneError> {
        let engine = EngineBuilder::new()
            .with_viewport(viewport)
            .with_ratios(*self.config.layout().ratios())
            .build()?;
        engine.calculate(pipeline)
    }

    /// Render a laid-out pipeline to an SVG string.
    ///
    /// `status` names one of the pipeline's status overlays to highlight.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError::Export` if `status` is not defined by the
    /// pipeline or the configured background color is invalid.
    pub fn render_svg(
        &self,
        pipeline: &Pipeline,
        layout: &PipelineLayout,
        status: Option<&str>,
    ) -> Result<String, SwimlaneError> {
        info!(status = status.unwrap_or("none"); "Rendering SVG");

        let style = self.config.style();
        let background = style.background_color().map_err(export::Error::Render)?;

        let exporter = export::svg::SvgBuilder::new()
            .with_background_color(background)
            .with_legend(style.legend())
            .with_status(status)
            .build();
        let svg = exporter.export(pipeline, layout)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}

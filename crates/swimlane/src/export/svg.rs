//! SVG rendering of a pipeline layout.
//!
//! The document is painted back to front: background, zone bands, edges,
//! status highlights, node boxes with their labels, and finally the legend to
//! the right of the drawing area.

mod edges;
mod legend;
mod nodes;
mod zones;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use swimlane_core::{
    color::Color,
    geometry::Size,
    semantic::Pipeline,
    status::StatusOverlay,
    style::{Palette, StyleTable},
};

use super::{Error, Exporter};
use crate::layout::PipelineLayout;

/// Builder for an [`Svg`] exporter.
#[derive(Debug, Clone, Default)]
pub struct SvgBuilder {
    palette: Palette,
    styles: Option<StyleTable>,
    background: Option<Color>,
    legend: bool,
    status: Option<String>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors for zones, edges, highlights and the default style table.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Replace the style table derived from the palette.
    pub fn with_style_table(mut self, styles: StyleTable) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Highlight the nodes tagged by the named status overlay.
    pub fn with_status(mut self, status: Option<&str>) -> Self {
        self.status = status.map(str::to_string);
        self
    }

    pub fn build(self) -> Svg {
        let styles = self
            .styles
            .unwrap_or_else(|| StyleTable::from_palette(&self.palette));
        Svg {
            palette: self.palette,
            styles,
            background: self.background,
            legend: self.legend,
            status: self.status,
        }
    }
}

/// SVG exporter.
#[derive(Debug, Clone)]
pub struct Svg {
    palette: Palette,
    styles: StyleTable,
    background: Option<Color>,
    legend: bool,
    status: Option<String>,
}

impl Svg {
    fn overlay<'a>(&self, pipeline: &'a Pipeline) -> Result<Option<&'a StatusOverlay>, Error> {
        self.status
            .as_deref()
            .map(|name| {
                pipeline
                    .status(name)
                    .ok_or_else(|| Error::UnknownStatus(name.to_string()))
            })
            .transpose()
    }

    /// The document covers the viewport, grows to fit bands that run past its
    /// bottom, and widens to make room for the legend.
    fn document_size(&self, layout: &PipelineLayout) -> Size {
        let geometry = layout.geometry();
        let viewport = geometry.viewport();

        let content_bottom = layout
            .zones()
            .last()
            .map_or(0.0, |band| band.y_end() + geometry.zone_padding());
        let mut height = viewport.height().max(content_bottom);
        let mut width = viewport.width();

        if self.legend {
            let legend = legend::size();
            width += legend.width() + 2.0 * legend::OFFSET;
            height = height.max(legend.height() + 2.0 * legend::OFFSET);
        }

        Size::new(width, height)
    }

    /// Renders the full document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStatus`] if the configured status is not
    /// defined by `pipeline`.
    pub fn render(&self, pipeline: &Pipeline, layout: &PipelineLayout) -> Result<Document, Error> {
        let overlay = self.overlay(pipeline)?;
        let size = self.document_size(layout);

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background.to_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        doc = doc
            .add(self.render_zones(pipeline, layout))
            .add(self.render_edges(pipeline, layout));

        if let Some(overlay) = overlay {
            doc = doc.add(self.render_highlights(overlay, layout));
        }

        doc = doc.add(self.render_nodes(pipeline, layout));

        if self.legend {
            let x = layout.geometry().viewport().width() + legend::OFFSET;
            doc = doc.add(self.render_legend(x));
        }

        debug!(width = size.width(), height = size.height(); "SVG document rendered");
        Ok(doc)
    }
}

impl Exporter for Svg {
    fn export(&self, pipeline: &Pipeline, layout: &PipelineLayout) -> Result<String, Error> {
        let doc = self.render(pipeline, layout)?;
        let output = doc.to_string();
        info!(bytes = output.len(); "SVG export finished");
        Ok(output)
    }
}

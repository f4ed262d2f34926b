//! Viewport-proportional drawing constants.

use serde::Deserialize;

use swimlane_core::geometry::Size;

use crate::error::SwimlaneError;

/// Fractions of the viewport used to derive every layout distance.
///
/// Width-relative: `box_width`, `margin`. Height-relative: everything else
/// except `text_size`, which is a fraction of the resolved box width.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutRatios {
    box_width: f32,
    box_height: f32,
    zone_padding: f32,
    zone_start: f32,
    margin: f32,
    level_spacing: f32,
    zone_top_margin: f32,
    node_bottom_margin: f32,
    text_size: f32,
}

impl Default for LayoutRatios {
    fn default() -> Self {
        Self {
            box_width: 0.1,
            box_height: 0.05,
            zone_padding: 0.02,
            zone_start: 0.01,
            margin: 0.05,
            level_spacing: 0.08,
            zone_top_margin: 0.04,
            node_bottom_margin: 0.02,
            text_size: 0.08,
        }
    }
}

impl LayoutRatios {
    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    pub fn box_height(&self) -> f32 {
        self.box_height
    }

    pub fn zone_padding(&self) -> f32 {
        self.zone_padding
    }

    pub fn zone_start(&self) -> f32 {
        self.zone_start
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn zone_top_margin(&self) -> f32 {
        self.zone_top_margin
    }

    pub fn node_bottom_margin(&self) -> f32 {
        self.node_bottom_margin
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Sets the vertical distance between consecutive zone levels.
    pub fn with_level_spacing(mut self, ratio: f32) -> Self {
        self.level_spacing = ratio;
        self
    }

    /// Sets the node box size as fractions of the viewport.
    pub fn with_box(mut self, width: f32, height: f32) -> Self {
        self.box_width = width;
        self.box_height = height;
        self
    }

    /// Sets the horizontal margin on both sides of the drawing.
    pub fn with_margin(mut self, ratio: f32) -> Self {
        self.margin = ratio;
        self
    }
}

/// Absolute drawing constants for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    viewport: Size,
    box_width: f32,
    box_height: f32,
    zone_padding: f32,
    zone_start: f32,
    margin: f32,
    level_spacing: f32,
    zone_top_margin: f32,
    node_bottom_margin: f32,
    text_size: f32,
}

impl Geometry {
    /// Resolves `ratios` against `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`SwimlaneError::Layout`] if either viewport dimension is not a
    /// positive finite number.
    pub fn from_viewport(viewport: Size, ratios: &LayoutRatios) -> Result<Self, SwimlaneError> {
        if !viewport.is_drawable() {
            return Err(SwimlaneError::Layout(format!(
                "viewport must have a positive size, got {}x{}",
                viewport.width(),
                viewport.height()
            )));
        }

        let width = viewport.width();
        let height = viewport.height();
        let box_width = width * ratios.box_width;

        Ok(Self {
            viewport,
            box_width,
            box_height: height * ratios.box_height,
            zone_padding: height * ratios.zone_padding,
            zone_start: height * ratios.zone_start,
            margin: width * ratios.margin,
            level_spacing: height * ratios.level_spacing,
            zone_top_margin: height * ratios.zone_top_margin,
            node_bottom_margin: height * ratios.node_bottom_margin,
            text_size: box_width * ratios.text_size,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Size of a node box.
    pub fn box_size(&self) -> Size {
        Size::new(self.box_width, self.box_height)
    }

    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    pub fn box_height(&self) -> f32 {
        self.box_height
    }

    pub fn zone_padding(&self) -> f32 {
        self.zone_padding
    }

    pub fn zone_start(&self) -> f32 {
        self.zone_start
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn zone_top_margin(&self) -> f32 {
        self.zone_top_margin
    }

    pub fn node_bottom_margin(&self) -> f32 {
        self.node_bottom_margin
    }

    /// Font size for node labels.
    pub fn text_size(&self) -> f32 {
        self.text_size
    }
}

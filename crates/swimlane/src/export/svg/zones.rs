//! Zone band rendering.

use svg::node::element as svg_element;

use swimlane_core::{apply_stroke, draw::StrokeDefinition, semantic::Pipeline};

use super::Svg;
use crate::layout::PipelineLayout;

/// Inset of the band rectangle from the document edges.
const BAND_INSET: f32 = 2.0;
const LABEL_X: f32 = 10.0;
const LABEL_Y: f32 = 15.0;

impl Svg {
    /// One full-width rectangle per zone with its name in the top-left corner.
    pub(super) fn render_zones(
        &self,
        pipeline: &Pipeline,
        layout: &PipelineLayout,
    ) -> svg_element::Group {
        let geometry = layout.geometry();
        let width = geometry.viewport().width() - 2.0 * BAND_INSET;
        let stroke = StrokeDefinition::solid(self.palette.base_stroke, 1.0);

        let mut group = svg_element::Group::new().set("class", "zones");
        for band in layout.zones() {
            let rect = svg_element::Rectangle::new()
                .set("x", BAND_INSET)
                .set("y", band.y_start())
                .set("width", width)
                .set("height", band.height())
                .set("fill", self.palette.zone_fill.to_string());
            group = group.add(apply_stroke!(rect, stroke));

            if let Some(zone) = pipeline.zone(band.zone()) {
                let label = svg_element::Text::new(zone.name())
                    .set("x", LABEL_X)
                    .set("y", band.y_start() + LABEL_Y)
                    .set("text-anchor", "start")
                    .set("dominant-baseline", "central")
                    .set("font-size", geometry.text_size())
                    .set("fill", self.palette.text.to_string());
                group = group.add(label);
            }
        }
        group
    }
}

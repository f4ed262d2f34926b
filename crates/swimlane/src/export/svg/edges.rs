//! Edge rendering.

use svg::node::element as svg_element;

use swimlane_core::{
    apply_stroke,
    draw::StrokeDefinition,
    geometry::Point,
    semantic::{EdgeStrength, Pipeline},
};

use super::Svg;
use crate::layout::PipelineLayout;

const STRONG_WIDTH: f32 = 3.0;
const WEAK_WIDTH: f32 = 1.0;

impl Svg {
    /// Straight lines between box centers. Edges naming an undeclared node
    /// have no placement and are skipped.
    pub(super) fn render_edges(
        &self,
        pipeline: &Pipeline,
        layout: &PipelineLayout,
    ) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "edges");

        for edge in pipeline.edges() {
            let (Some(source), Some(target)) = (
                layout.node_bounds(edge.source()),
                layout.node_bounds(edge.target()),
            ) else {
                continue;
            };

            let width = match edge.strength() {
                EdgeStrength::Strong => STRONG_WIDTH,
                EdgeStrength::Weak => WEAK_WIDTH,
            };
            let stroke = StrokeDefinition::solid(self.palette.edge, width);
            group = group.add(line(source.center(), target.center(), &stroke));
        }
        group
    }
}

fn line(start: Point, end: Point, stroke: &StrokeDefinition) -> svg_element::Line {
    let line = svg_element::Line::new()
        .set("class", "edge")
        .set("x1", start.x())
        .set("y1", start.y())
        .set("x2", end.x())
        .set("y2", end.y());
    apply_stroke!(line, stroke)
}

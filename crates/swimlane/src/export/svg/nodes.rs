//! Node boxes, labels and status highlights.

use svg::node::element as svg_element;

use swimlane_core::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point, Size},
    semantic::{Node, NodeKind, Pipeline},
    status::StatusOverlay,
};

use super::Svg;
use crate::layout::PipelineLayout;

/// Growth of a highlight box, as a fraction of the node box width.
const HIGHLIGHT_GROWTH: f32 = 0.1;
/// Font scale for version lines and package components.
const SMALL_TEXT: f32 = 0.8;

impl Svg {
    /// Enlarged boxes behind every node tagged by `overlay`, painted in
    /// success, failure, in-progress order.
    pub(super) fn render_highlights(
        &self,
        overlay: &StatusOverlay,
        layout: &PipelineLayout,
    ) -> svg_element::Group {
        let geometry = layout.geometry();
        let growth = geometry.box_width() * HIGHLIGHT_GROWTH;
        let size = Size::new(geometry.box_width() + growth, geometry.box_height() + growth);
        let stroke = StrokeDefinition::solid(self.palette.base_stroke, 1.0);

        let mut group = svg_element::Group::new().set("class", "highlights");
        for placement in layout.nodes() {
            let Some(node_bounds) = layout.node_bounds(placement.id()) else {
                continue;
            };
            for highlight in overlay.highlights(placement.id()) {
                let bounds = Bounds::new_from_center(node_bounds.center(), size);
                let rect = rectangle(bounds, self.palette.highlight(highlight))
                    .set("class", "highlight");
                group = group.add(apply_stroke!(rect, stroke));
            }
        }
        group
    }

    pub(super) fn render_nodes(
        &self,
        pipeline: &Pipeline,
        layout: &PipelineLayout,
    ) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "nodes");
        for node in pipeline.nodes() {
            let Some(bounds) = layout.node_bounds(node.id()) else {
                continue;
            };
            let style = self.styles.resolve(node);

            let rect = rectangle(bounds, style.fill())
                .set("class", "node")
                .set("rx", style.corner_radius());
            let rect = apply_stroke!(rect, style.stroke());

            group = group
                .add(rect)
                .add(self.render_label(node, bounds, layout.geometry().text_size()));
        }
        group
    }

    /// Title only, title over version, or one `+ component` line per package
    /// member.
    fn render_label(&self, node: &Node, bounds: Bounds, text_size: f32) -> svg_element::Group {
        let x = bounds.center().x();
        let top = bounds.min_y();
        let height = bounds.height();
        let small = text_size * SMALL_TEXT;

        let mut group = svg_element::Group::new();
        if node.kind() == NodeKind::FilePackage {
            let step = height / (node.components().len() + 1) as f32;
            let mut y = top + height / 3.0;
            for component in node.components() {
                group = group.add(self.text(&format!("+ {component}"), Point::new(x, y), small));
                y += step;
            }
        } else if let Some(version) = node.version() {
            group = group
                .add(self.text(node.title(), Point::new(x, top + height / 3.0), text_size))
                .add(self.text(version, Point::new(x, top + 3.0 * height / 4.0), small));
        } else {
            let center = Point::new(x, top + height / 2.0);
            group = group.add(self.text(node.title(), center, text_size));
        }
        group
    }

    fn text(&self, content: &str, at: Point, size: f32) -> svg_element::Text {
        svg_element::Text::new(content)
            .set("x", at.x())
            .set("y", at.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-size", size)
            .set("fill", self.palette.text.to_string())
    }
}

pub(super) fn rectangle(bounds: Bounds, fill: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", fill.to_string())
        .set("fill-opacity", fill.alpha())
}

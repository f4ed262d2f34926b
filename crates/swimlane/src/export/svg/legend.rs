//! Legend block explaining the default style rules.

use svg::node::element as svg_element;

use swimlane_core::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point, Size},
    style::SOFTWARE_CORNER_RADIUS,
};

use super::{Svg, nodes::rectangle};

/// Distance between the legend and the drawing area or document edge.
pub(super) const OFFSET: f32 = 10.0;

const SWATCH: f32 = 20.0;
const LINE_SPACING: f32 = 25.0;
const PADDING: f32 = 10.0;
const WIDTH: f32 = 230.0;
const ROWS: f32 = 9.0;
const FONT_SIZE: f32 = 12.0;
const LABEL_GAP: f32 = 8.0;
const BORDER_WIDTH: f32 = 2.0;

pub(super) fn size() -> Size {
    Size::new(WIDTH, ROWS * LINE_SPACING + PADDING)
}

struct Entry {
    label: &'static str,
    fill: Color,
    stroke: Color,
    corner_radius: f32,
    /// Extra space above the row, in line spacings.
    gap: f32,
}

impl Svg {
    fn legend_entries(&self) -> [Entry; 8] {
        let palette = &self.palette;
        let entry = |label, fill, stroke, corner_radius, gap| Entry {
            label,
            fill,
            stroke,
            corner_radius,
            gap,
        };
        let (fill, stroke) = (palette.base_fill, palette.base_stroke);
        [
            entry("File Format (sharp corners)", fill, stroke, 0.0, 0.0),
            entry("Software (rounded corners)", fill, stroke, SOFTWARE_CORNER_RADIUS, 0.0),
            entry("Open Protocol", fill, palette.open_stroke, 0.0, 0.0),
            entry("Proprietary Protocol", fill, stroke, 0.0, 0.0),
            entry("Has Failure Mode", palette.failure_fill, palette.failure_stroke, 0.0, 0.0),
            entry("File Package", palette.package_fill, stroke, 0.0, 0.5),
            entry("File Package w/ PMI", palette.package_with_pmi_fill, stroke, 0.0, 0.0),
            entry("Has PMI", palette.pmi_fill, stroke, 0.0, 0.5),
        ]
    }

    /// The legend box with its top-left corner at (`x`, [`OFFSET`]).
    pub(super) fn render_legend(&self, x: f32) -> svg_element::Group {
        let origin = Point::new(x, OFFSET);
        let border = StrokeDefinition::solid(self.palette.base_stroke, BORDER_WIDTH);

        let frame = rectangle(Bounds::new_from_top_left(origin, size()), self.palette.base_fill);
        let mut group = svg_element::Group::new()
            .set("class", "legend")
            .add(apply_stroke!(frame, border));

        let swatch = Size::new(SWATCH, SWATCH);
        let mut cursor = origin.add_point(Point::new(PADDING, PADDING));
        for (row, entry) in self.legend_entries().into_iter().enumerate() {
            if row > 0 {
                cursor = cursor.add_point(Point::new(0.0, LINE_SPACING * (1.0 + entry.gap)));
            }

            let stroke = StrokeDefinition::solid(entry.stroke, BORDER_WIDTH);
            let rect = rectangle(Bounds::new_from_top_left(cursor, swatch), entry.fill)
                .set("rx", entry.corner_radius);

            let label = svg_element::Text::new(entry.label)
                .set("x", cursor.x() + SWATCH + LABEL_GAP)
                .set("y", cursor.y() + SWATCH / 2.0)
                .set("text-anchor", "start")
                .set("dominant-baseline", "central")
                .set("font-size", FONT_SIZE)
                .set("fill", self.palette.text.to_string());

            group = group.add(apply_stroke!(rect, stroke)).add(label);
        }
        group
    }
}

//! Declarative node styling.
//!
//! Node appearance is decided by an ordered [`StyleTable`] of
//! [`StyleRule`]s. Every rule whose [`NodePredicate`] matches a node is
//! applied in table order, so later rules override earlier ones. Fill,
//! stroke color and corner radius are overridden independently.
//!
//! The default table reproduces the pipeline diagram conventions:
//!
//! | Condition | Fill | Stroke |
//! |-----------|------|--------|
//! | (base) | white | black |
//! | software (rounded corners) | | |
//! | PMI | light cyan | |
//! | failure mode | light red | red |
//! | open (not proprietary) | | green |
//! | file package | light magenta | |
//! | file package with PMI | light green | |

use crate::{
    color::Color,
    draw::{StrokeDefinition, StrokeJoin},
    semantic::{Node, NodeKind},
    status::Highlight,
};

/// Corner radius of software boxes, in pixels.
pub const SOFTWARE_CORNER_RADIUS: f32 = 10.0;

/// Named colors used across the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub base_fill: Color,
    pub base_stroke: Color,
    pub pmi_fill: Color,
    pub failure_fill: Color,
    pub failure_stroke: Color,
    pub open_stroke: Color,
    pub package_fill: Color,
    pub package_with_pmi_fill: Color,
    pub success_highlight: Color,
    pub failure_highlight: Color,
    pub in_progress_highlight: Color,
    pub zone_fill: Color,
    pub edge: Color,
    pub text: Color,
}

impl Palette {
    /// Fill color of a status highlight.
    pub fn highlight(&self, highlight: Highlight) -> Color {
        match highlight {
            Highlight::Success => self.success_highlight,
            Highlight::Failure => self.failure_highlight,
            Highlight::InProgress => self.in_progress_highlight,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_fill: Color::builtin("rgb(255, 255, 255)"),
            base_stroke: Color::builtin("rgb(0, 0, 0)"),
            pmi_fill: Color::builtin("rgb(200, 255, 255)"),
            failure_fill: Color::builtin("rgb(255, 200, 200)"),
            failure_stroke: Color::builtin("rgb(255, 0, 0)"),
            open_stroke: Color::builtin("rgb(0, 155, 0)"),
            package_fill: Color::builtin("rgb(255, 200, 255)"),
            package_with_pmi_fill: Color::builtin("rgb(200, 255, 200)"),
            success_highlight: Color::builtin("rgb(200, 255, 200)"),
            failure_highlight: Color::builtin("rgb(255, 200, 200)"),
            in_progress_highlight: Color::builtin("rgb(255, 255, 200)"),
            zone_fill: Color::builtin("rgb(240, 240, 240)"),
            edge: Color::builtin("rgb(50, 50, 50)"),
            text: Color::builtin("rgb(0, 0, 0)"),
        }
    }
}

/// Condition under which a [`StyleRule`] applies.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePredicate {
    /// Matches every node.
    Any,
    Pmi,
    FailureMode,
    Proprietary,
    /// Matches nodes that are not proprietary.
    Open,
    Kind(NodeKind),
    /// Matches when every inner predicate matches.
    All(Vec<NodePredicate>),
}

impl NodePredicate {
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Any => true,
            Self::Pmi => node.pmi(),
            Self::FailureMode => node.failure_mode(),
            Self::Proprietary => node.proprietary(),
            Self::Open => !node.proprietary(),
            Self::Kind(kind) => node.kind() == *kind,
            Self::All(predicates) => predicates.iter().all(|p| p.matches(node)),
        }
    }
}

/// A single row of the style table.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    when: NodePredicate,
    fill: Option<Color>,
    stroke: Option<Color>,
    corner_radius: Option<f32>,
}

impl StyleRule {
    /// Creates a rule that changes nothing until one of the `with_*` setters is used.
    pub fn when(predicate: NodePredicate) -> Self {
        Self {
            when: predicate,
            fill: None,
            stroke: None,
            corner_radius: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn predicate(&self) -> &NodePredicate {
        &self.when
    }
}

/// Resolved appearance of one node box.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    fill: Color,
    stroke: StrokeDefinition,
    corner_radius: f32,
}

impl NodeStyle {
    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

/// Ordered list of style rules applied on top of a base style.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::{NodeId, ZoneId};
/// use swimlane_core::semantic::{Node, NodeKind};
/// use swimlane_core::style::{Palette, StyleTable};
///
/// let palette = Palette::default();
/// let table = StyleTable::from_palette(&palette);
///
/// let broken = Node::new(NodeId::new(7), "Unsupported", NodeKind::FileFormat, ZoneId::new(3))
///     .with_failure_mode(true);
/// let style = table.resolve(&broken);
/// assert_eq!(style.fill(), palette.failure_fill);
/// assert_eq!(style.stroke().color(), palette.failure_stroke);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    base: NodeStyle,
    rules: Vec<StyleRule>,
}

impl StyleTable {
    /// Creates an empty table: every node gets `fill` and a 1px `stroke` outline.
    pub fn new(fill: Color, stroke: Color) -> Self {
        Self {
            base: NodeStyle {
                fill,
                stroke: StrokeDefinition::solid(stroke, 1.0).with_join(StrokeJoin::Bevel),
                corner_radius: 0.0,
            },
            rules: Vec::new(),
        }
    }

    /// Builds the default pipeline table from a palette.
    pub fn from_palette(palette: &Palette) -> Self {
        Self::new(palette.base_fill, palette.base_stroke)
            .with_rule(
                StyleRule::when(NodePredicate::Kind(NodeKind::Software))
                    .with_corner_radius(SOFTWARE_CORNER_RADIUS),
            )
            .with_rule(StyleRule::when(NodePredicate::Pmi).with_fill(palette.pmi_fill))
            .with_rule(StyleRule::when(NodePredicate::FailureMode).with_fill(palette.failure_fill))
            .with_rule(StyleRule::when(NodePredicate::Open).with_stroke(palette.open_stroke))
            .with_rule(
                StyleRule::when(NodePredicate::FailureMode).with_stroke(palette.failure_stroke),
            )
            .with_rule(
                StyleRule::when(NodePredicate::Kind(NodeKind::FilePackage))
                    .with_fill(palette.package_fill),
            )
            .with_rule(
                StyleRule::when(NodePredicate::All(vec![
                    NodePredicate::Kind(NodeKind::FilePackage),
                    NodePredicate::Pmi,
                ]))
                .with_fill(palette.package_with_pmi_fill),
            )
    }

    /// Appends a rule; it overrides every rule already in the table.
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Applies every matching rule, in order, to the base style.
    pub fn resolve(&self, node: &Node) -> NodeStyle {
        self.rules
            .iter()
            .filter(|rule| rule.when.matches(node))
            .fold(self.base.clone(), |mut style, rule| {
                if let Some(fill) = rule.fill {
                    style.fill = fill;
                }
                if let Some(stroke) = rule.stroke {
                    style.stroke = style.stroke.with_color(stroke);
                }
                if let Some(radius) = rule.corner_radius {
                    style.corner_radius = radius;
                }
                style
            })
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{NodeId, ZoneId};

    fn node(kind: NodeKind) -> Node {
        Node::new(NodeId::new(1), "node", kind, ZoneId::new(1))
    }

    #[test]
    fn test_plain_proprietary_format_uses_base_style() {
        let palette = Palette::default();
        let table = StyleTable::from_palette(&palette);
        let style = table.resolve(&node(NodeKind::FileFormat).with_proprietary(true));

        assert_eq!(style.fill(), palette.base_fill);
        assert_eq!(style.stroke().color(), palette.base_stroke);
        assert_eq!(style.corner_radius(), 0.0);
    }

    #[test]
    fn test_open_format_gets_green_stroke() {
        let palette = Palette::default();
        let style = StyleTable::from_palette(&palette).resolve(&node(NodeKind::FileFormat));
        assert_eq!(style.stroke().color(), palette.open_stroke);
    }

    #[test]
    fn test_software_is_rounded() {
        let style = StyleTable::default().resolve(&node(NodeKind::Software));
        assert_eq!(style.corner_radius(), SOFTWARE_CORNER_RADIUS);
    }

    #[test]
    fn test_failure_overrides_pmi_and_open() {
        let palette = Palette::default();
        let failing = node(NodeKind::FileFormat)
            .with_pmi(true)
            .with_failure_mode(true);
        let style = StyleTable::from_palette(&palette).resolve(&failing);

        assert_eq!(style.fill(), palette.failure_fill);
        assert_eq!(style.stroke().color(), palette.failure_stroke);
    }

    #[test]
    fn test_package_fill_depends_on_pmi() {
        let palette = Palette::default();
        let table = StyleTable::from_palette(&palette);

        let plain = table.resolve(&node(NodeKind::FilePackage).with_proprietary(true));
        assert_eq!(plain.fill(), palette.package_fill);

        let with_pmi = table.resolve(&node(NodeKind::FilePackage).with_pmi(true));
        assert_eq!(with_pmi.fill(), palette.package_with_pmi_fill);
    }

    #[test]
    fn test_later_rule_wins() {
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        let table = StyleTable::new(Color::default(), Color::default())
            .with_rule(StyleRule::when(NodePredicate::Any).with_fill(red))
            .with_rule(StyleRule::when(NodePredicate::Any).with_fill(blue));

        assert_eq!(table.resolve(&node(NodeKind::Software)).fill(), blue);
    }

    #[test]
    fn test_rules_override_fields_independently() {
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        let table = StyleTable::new(Color::default(), Color::default())
            .with_rule(StyleRule::when(NodePredicate::Any).with_fill(red))
            .with_rule(StyleRule::when(NodePredicate::Any).with_stroke(blue));

        let style = table.resolve(&node(NodeKind::Software));
        assert_eq!(style.fill(), red);
        assert_eq!(style.stroke().color(), blue);
    }

    #[test]
    fn test_all_predicate() {
        let predicate = NodePredicate::All(vec![NodePredicate::Pmi, NodePredicate::Proprietary]);
        let both = node(NodeKind::FileFormat)
            .with_pmi(true)
            .with_proprietary(true);
        assert!(predicate.matches(&both));
        assert!(!predicate.matches(&node(NodeKind::FileFormat).with_pmi(true)));
        assert!(NodePredicate::All(vec![]).matches(&node(NodeKind::Software)));
    }

    #[test]
    fn test_highlight_colors() {
        let palette = Palette::default();
        assert_eq!(palette.highlight(Highlight::Success), palette.success_highlight);
        assert_eq!(palette.highlight(Highlight::Failure), palette.failure_highlight);
        assert_eq!(
            palette.highlight(Highlight::InProgress),
            palette.in_progress_highlight
        );
    }
}

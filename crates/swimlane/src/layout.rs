//! Zone-aware tree layout.
//!
//! # Pipeline Position
//!
//! ```text
//! Pipeline (semantic model)
//!     ↓ structure
//! Forest (adjacency)
//!     ↓ layout (this module)
//! PipelineLayout
//!     ↓ export
//! SVG
//! ```
//!
//! A pass runs four stages over the forest: global depth along the
//! designated-parent chain, per-zone level normalization, weighted horizontal
//! subdivision of every subtree, and band placement that stacks the zones.
//! Every pass starts from scratch; laying out the same pipeline at a new
//! viewport models a resize.

mod bands;
mod depth;
mod geometry;
mod levels;
mod tree;

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info, trace};

use swimlane_core::{
    geometry::{Bounds, Point, Size},
    identifier::{NodeId, ZoneId},
    semantic::{Node, Pipeline},
};

pub use geometry::{Geometry, LayoutRatios};

use crate::{
    error::SwimlaneError,
    structure::{Forest, NodeIndex},
};

/// Vertical extent of one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBand {
    zone: ZoneId,
    y_start: f32,
    y_end: f32,
}

impl ZoneBand {
    fn new(zone: ZoneId, y_start: f32, y_end: f32) -> Self {
        Self {
            zone,
            y_start,
            y_end,
        }
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    pub fn y_start(&self) -> f32 {
        self.y_start
    }

    pub fn y_end(&self) -> f32 {
        self.y_end
    }

    pub fn height(&self) -> f32 {
        self.y_end - self.y_start
    }
}

/// Layout-derived data for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePlacement {
    id: NodeId,
    zone: ZoneId,
    parent: Option<NodeId>,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    global_depth: u32,
    zone_level: u32,
    position: Point,
}

impl NodePlacement {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// The designated parent (source of the first edge targeting this node).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Every parent in edge order, the designated one first.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn global_depth(&self) -> u32 {
        self.global_depth
    }

    pub fn zone_level(&self) -> u32 {
        self.zone_level
    }

    /// Anchor point: `x` is the horizontal center of the node box and `y`
    /// its top edge.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone)]
pub struct PipelineLayout {
    geometry: Geometry,
    nodes: IndexMap<NodeId, NodePlacement>,
    zones: Vec<ZoneBand>,
}

impl PipelineLayout {
    /// Drawing constants the layout was computed with.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Placements in node declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodePlacement> {
        self.nodes.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodePlacement> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bands in zone order.
    pub fn zones(&self) -> &[ZoneBand] {
        &self.zones
    }

    pub fn zone(&self, zone: ZoneId) -> Option<&ZoneBand> {
        zone.index().and_then(|index| self.zones.get(index))
    }

    /// The box drawn for `id`, centered horizontally on its anchor.
    pub fn node_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.node(id).map(|placement| {
            let size = self.geometry.box_size();
            let top_left = placement
                .position()
                .sub_point(Point::new(size.width() / 2.0, 0.0));
            Bounds::new_from_top_left(top_left, size)
        })
    }

    /// A printable summary of one node's layout.
    pub fn report<'a>(&'a self, pipeline: &'a Pipeline, id: NodeId) -> Option<NodeReport<'a>> {
        Some(NodeReport {
            node: pipeline.node(id)?,
            placement: self.node(id)?,
        })
    }
}

/// Multi-line description of a node and its computed layout fields.
#[derive(Debug, Clone, Copy)]
pub struct NodeReport<'a> {
    node: &'a Node,
    placement: &'a NodePlacement,
}

impl fmt::Display for NodeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placement = self.placement;
        writeln!(f, "----- Node {} -----", self.node.id())?;
        writeln!(f, "Title: {}", self.node.title())?;
        writeln!(f, "Kind: {}", self.node.kind())?;
        writeln!(f, "PMI: {}", self.node.pmi())?;
        writeln!(f, "Zone: {}", placement.zone())?;
        writeln!(f, "Global depth: {}", placement.global_depth())?;
        writeln!(f, "Zone level: {}", placement.zone_level())?;
        match placement.parent() {
            Some(parent) => writeln!(f, "Parent: {parent}")?,
            None => writeln!(f, "Parent: none")?,
        }
        if placement.children().is_empty() {
            writeln!(f, "Children: none")?;
        } else {
            let children: Vec<String> = placement
                .children()
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(f, "Children: {}", children.join(", "))?;
        }
        write!(
            f,
            "Position: ({:.1}, {:.1})",
            placement.position().x(),
            placement.position().y()
        )
    }
}

/// Builder for a layout [`Engine`].
///
/// Defaults to a 1200x800 viewport with [`LayoutRatios::default`].
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    viewport: Size,
    ratios: LayoutRatios,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            viewport: Size::new(1200.0, 800.0),
            ratios: LayoutRatios::default(),
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the drawing area all ratios resolve against
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the proportional spacing constants
    pub fn with_ratios(mut self, ratios: LayoutRatios) -> Self {
        self.ratios = ratios;
        self
    }

    /// Resolve the ratios into an engine.
    ///
    /// # Errors
    /// Returns `SwimlaneError::Layout` if the viewport is empty or not finite.
    pub fn build(self) -> Result<Engine, SwimlaneError> {
        let geometry = Geometry::from_viewport(self.viewport, &self.ratios)?;
        Ok(Engine { geometry })
    }
}

/// Runs layout passes for one viewport.
#[derive(Debug, Clone)]
pub struct Engine {
    geometry: Geometry,
}

impl Engine {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Computes positions and zone bands for `pipeline`.
    ///
    /// Edges naming undeclared nodes are skipped.
    ///
    /// # Errors
    /// Returns `SwimlaneError::Graph` if the edges contain a cycle.
    pub fn calculate(&self, pipeline: &Pipeline) -> Result<PipelineLayout, SwimlaneError> {
        info!(
            nodes = pipeline.node_count(),
            zones = pipeline.zones().len(),
            width = self.geometry.viewport().width(),
            height = self.geometry.viewport().height();
            "Starting layout pass"
        );

        let forest = Forest::from_pipeline(pipeline)?;

        let depths = depth::global_depths(&forest)?;
        debug!(
            max_depth = depths.iter().max().copied().unwrap_or_default();
            "Global depths computed"
        );

        let levels = levels::zone_levels(&forest, &depths);
        debug!(
            max_level = levels.iter().max().copied().unwrap_or_default();
            "Zone levels computed"
        );

        let (positions, zones) =
            bands::place_zones(&forest, &levels, &self.geometry, pipeline.zones().len());

        let mut nodes = IndexMap::with_capacity(forest.len());
        for node in forest.indices() {
            let position = positions[node.value()].ok_or_else(|| {
                SwimlaneError::Layout(format!("node {} was never placed", forest.id(node)))
            })?;
            let placement = placement(
                &forest,
                node,
                depths[node.value()],
                levels[node.value()],
                position,
            );
            trace!(
                node_id = placement.id().value(),
                zone = placement.zone().position(),
                depth = placement.global_depth(),
                level = placement.zone_level(),
                x = position.x(),
                y = position.y();
                "Node placed"
            );
            nodes.insert(placement.id(), placement);
        }

        info!(nodes = nodes.len(), zones = zones.len(); "Layout pass finished");

        Ok(PipelineLayout {
            geometry: self.geometry,
            nodes,
            zones,
        })
    }
}

fn placement(
    forest: &Forest,
    node: NodeIndex,
    global_depth: u32,
    zone_level: u32,
    position: Point,
) -> NodePlacement {
    NodePlacement {
        id: forest.id(node),
        zone: forest.zone(node),
        parent: forest.parent(node).map(|parent| forest.id(parent)),
        parents: forest.parents(node).map(|parent| forest.id(parent)).collect(),
        children: forest.children(node).map(|child| forest.id(child)).collect(),
        global_depth,
        zone_level,
        position,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::structure::test_pipeline;

    fn engine() -> Engine {
        EngineBuilder::new()
            .with_viewport(Size::new(1000.0, 1000.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_placement_fields() {
        let pipeline = test_pipeline(2, &[(1, 1), (2, 1), (3, 2)], &[(1, 2), (1, 3), (2, 3)]);
        let layout = engine().calculate(&pipeline).unwrap();

        let shared = layout.node(NodeId::new(3)).unwrap();
        assert_eq!(shared.parent(), Some(NodeId::new(1)));
        assert_eq!(shared.parents(), &[NodeId::new(1), NodeId::new(2)]);
        assert_eq!(shared.global_depth(), 1);
        assert_eq!(shared.zone_level(), 0);

        let root = layout.node(NodeId::new(1)).unwrap();
        assert_eq!(root.children(), &[NodeId::new(2), NodeId::new(3)]);
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_layout_keeps_declaration_order() {
        let pipeline = test_pipeline(1, &[(5, 1), (1, 1), (3, 1)], &[(5, 1), (5, 3)]);
        let layout = engine().calculate(&pipeline).unwrap();

        let order: Vec<u32> = layout.nodes().map(|node| node.id().value()).collect();
        assert_eq!(order, vec![5, 1, 3]);
        assert_eq!(layout.zones().len(), 1);
    }

    #[test]
    fn test_node_bounds_are_centered_on_anchor() {
        let pipeline = test_pipeline(1, &[(1, 1)], &[]);
        let layout = engine().calculate(&pipeline).unwrap();
        let anchor = layout.node(NodeId::new(1)).unwrap().position();
        let bounds = layout.node_bounds(NodeId::new(1)).unwrap();

        assert_approx_eq!(f32, bounds.center().x(), anchor.x());
        assert_approx_eq!(f32, bounds.min_y(), anchor.y());
        assert_approx_eq!(f32, bounds.width(), 100.0);
        assert_approx_eq!(f32, bounds.height(), 50.0);
        assert!(layout.node_bounds(NodeId::new(2)).is_none());
    }

    #[test]
    fn test_zone_lookup() {
        let pipeline = test_pipeline(2, &[(1, 1)], &[]);
        let layout = engine().calculate(&pipeline).unwrap();

        assert!(layout.zone(ZoneId::new(2)).is_some());
        assert!(layout.zone(ZoneId::new(3)).is_none());
    }

    #[test]
    fn test_cycle_fails_layout() {
        let pipeline = test_pipeline(1, &[(1, 1), (2, 1), (3, 1)], &[(1, 2), (2, 3), (3, 2)]);
        let err = engine().calculate(&pipeline).unwrap_err();
        assert!(err.to_string().contains("cyclic graph"));
    }

    #[test]
    fn test_builder_rejects_empty_viewport() {
        let result = EngineBuilder::new()
            .with_viewport(Size::new(0.0, 0.0))
            .build();
        assert!(matches!(result, Err(SwimlaneError::Layout(_))));
    }

    #[test]
    fn test_report() {
        let pipeline = test_pipeline(1, &[(1, 1), (2, 1)], &[(1, 2)]);
        let layout = engine().calculate(&pipeline).unwrap();

        let report = layout.report(&pipeline, NodeId::new(1)).unwrap().to_string();
        assert!(report.starts_with("----- Node 1 -----"));
        assert!(report.contains("Title: node 1"));
        assert!(report.contains("Kind: Software"));
        assert!(report.contains("Parent: none"));
        assert!(report.contains("Children: 2"));
        assert!(report.contains("Position: ("));

        let leaf = layout.report(&pipeline, NodeId::new(2)).unwrap().to_string();
        assert!(leaf.contains("Parent: 1"));
        assert!(leaf.contains("Children: none"));

        assert!(layout.report(&pipeline, NodeId::new(9)).is_none());
    }
}

//! Semantic model of a pipeline diagram.
//!
//! A [`Pipeline`] is the static, hand-authored input of the layout engine:
//! an ordered list of [`Zone`]s, a table of [`Node`]s and an ordered list of
//! [`Edge`]s. Named [`StatusOverlay`]s ride along for the renderer.
//!
//! The model is immutable once built. Layout passes read it and produce a
//! separate result; nothing here carries positions.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    identifier::{NodeId, ZoneId},
    status::StatusOverlay,
};

/// The kind of entity a node stands for.
///
/// Only the renderer looks at the kind; layout treats every node alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A software product, drawn with rounded corners.
    Software,
    /// A single file format, drawn with sharp corners.
    FileFormat,
    /// A bundle of files, drawn with its component list instead of a title.
    FilePackage,
}

impl FromStr for NodeKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "software" => Ok(Self::Software),
            "file_format" => Ok(Self::FileFormat),
            "file_package" => Ok(Self::FilePackage),
            _ => Err("Unsupported node kind"),
        }
    }
}

impl From<NodeKind> for &'static str {
    fn from(val: NodeKind) -> Self {
        match val {
            NodeKind::Software => "Software",
            NodeKind::FileFormat => "File Format",
            NodeKind::FilePackage => "File Package",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Visual weight of an edge. Ignored by layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStrength {
    Strong,
    #[default]
    Weak,
}

/// A named horizontal lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    name: String,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display label of the zone.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One entity of the pipeline: a piece of software, a file format or a file bundle.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::{NodeId, ZoneId};
/// use swimlane_core::semantic::{Node, NodeKind};
///
/// let step = Node::new(NodeId::new(6), "STEP242", NodeKind::FileFormat, ZoneId::new(2))
///     .with_pmi(true)
///     .with_version("ed3");
/// assert!(step.pmi());
/// assert!(!step.proprietary());
/// assert_eq!(step.version(), Some("ed3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    title: String,
    kind: NodeKind,
    zone: ZoneId,
    pmi: bool,
    proprietary: bool,
    failure_mode: bool,
    version: Option<String>,
    components: Vec<String>,
}

impl Node {
    /// Creates a node with all flags cleared.
    pub fn new(id: NodeId, title: impl Into<String>, kind: NodeKind, zone: ZoneId) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            zone,
            pmi: false,
            proprietary: false,
            failure_mode: false,
            version: None,
            components: Vec::new(),
        }
    }

    pub fn with_pmi(mut self, pmi: bool) -> Self {
        self.pmi = pmi;
        self
    }

    pub fn with_proprietary(mut self, proprietary: bool) -> Self {
        self.proprietary = proprietary;
        self
    }

    pub fn with_failure_mode(mut self, failure_mode: bool) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_components(mut self, components: Vec<String>) -> Self {
        self.components = components;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The zone this node is drawn in.
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Whether the entity carries embedded product and manufacturing information.
    pub fn pmi(&self) -> bool {
        self.pmi
    }

    pub fn proprietary(&self) -> bool {
        self.proprietary
    }

    /// Whether the entity is a known point of failure in the pipeline.
    pub fn failure_mode(&self) -> bool {
        self.failure_mode
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Files bundled in a [`NodeKind::FilePackage`] node.
    pub fn components(&self) -> &[String] {
        &self.components
    }
}

/// A directed connection between two nodes.
///
/// Edges are kept exactly as authored. An edge may name a node id that does
/// not exist; such edges are skipped by layout and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    strength: EdgeStrength,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, strength: EdgeStrength) -> Self {
        Self { from, to, strength }
    }

    /// Node the edge leaves.
    pub fn source(&self) -> NodeId {
        self.from
    }

    /// Node the edge enters.
    pub fn target(&self) -> NodeId {
        self.to
    }

    pub fn strength(&self) -> EdgeStrength {
        self.strength
    }
}

/// Structural problems found while assembling a [`Pipeline`].
///
/// `index` is the position of the offending node in the input list, so that
/// callers holding source spans can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("node id {id} is declared more than once")]
    DuplicateNode { id: NodeId, index: usize },

    #[error("node {node} references zone {zone}, but only {zone_count} zone(s) are declared")]
    UnknownZone {
        node: NodeId,
        zone: ZoneId,
        zone_count: usize,
        index: usize,
    },
}

impl PipelineError {
    /// Position of the offending node in the input list.
    pub fn index(&self) -> usize {
        match self {
            Self::DuplicateNode { index, .. } | Self::UnknownZone { index, .. } => *index,
        }
    }
}

/// The complete static pipeline definition.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    zones: Vec<Zone>,
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    statuses: IndexMap<String, StatusOverlay>,
}

impl Pipeline {
    /// Assembles a pipeline, checking that node ids are unique and that every
    /// node references a declared zone.
    ///
    /// # Errors
    ///
    /// Returns the first [`PipelineError`] found in node order.
    ///
    /// # Examples
    ///
    /// ```
    /// use swimlane_core::identifier::{NodeId, ZoneId};
    /// use swimlane_core::semantic::{Edge, EdgeStrength, Node, NodeKind, Pipeline, Zone};
    ///
    /// let pipeline = Pipeline::new(
    ///     vec![Zone::new("Design")],
    ///     vec![
    ///         Node::new(NodeId::new(1), "CAD", NodeKind::Software, ZoneId::new(1)),
    ///         Node::new(NodeId::new(2), "STEP", NodeKind::FileFormat, ZoneId::new(1)),
    ///     ],
    ///     vec![Edge::new(NodeId::new(1), NodeId::new(2), EdgeStrength::Strong)],
    /// )
    /// .unwrap();
    /// assert_eq!(pipeline.nodes().count(), 2);
    /// ```
    pub fn new(
        zones: Vec<Zone>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Result<Self, PipelineError> {
        let mut table = IndexMap::with_capacity(nodes.len());
        for (index, node) in nodes.into_iter().enumerate() {
            let zone_known = node.zone.index().is_some_and(|idx| idx < zones.len());
            if !zone_known {
                return Err(PipelineError::UnknownZone {
                    node: node.id,
                    zone: node.zone,
                    zone_count: zones.len(),
                    index,
                });
            }
            if table.contains_key(&node.id) {
                return Err(PipelineError::DuplicateNode { id: node.id, index });
            }
            table.insert(node.id, node);
        }

        trace!(zones = zones.len(), nodes = table.len(), edges = edges.len(); "Pipeline assembled");

        Ok(Self {
            zones,
            nodes: table,
            edges,
            statuses: IndexMap::new(),
        })
    }

    /// Attaches named status overlays, replacing any existing ones.
    pub fn with_statuses(mut self, statuses: IndexMap<String, StatusOverlay>) -> Self {
        self.statuses = statuses;
        self
    }

    /// Zones in declared order; zone `n` is at index `n - 1`.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        id.index().and_then(|idx| self.zones.get(idx))
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Position of the node in declaration order.
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edges in input order, dangling ones included.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn statuses(&self) -> &IndexMap<String, StatusOverlay> {
        &self.statuses
    }

    pub fn status(&self, name: &str) -> Option<&StatusOverlay> {
        self.statuses.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, zone: u32) -> Node {
        Node::new(
            NodeId::new(id),
            format!("n{id}"),
            NodeKind::FileFormat,
            ZoneId::new(zone),
        )
    }

    #[test]
    fn test_node_kind_from_str() {
        assert_eq!("software".parse::<NodeKind>(), Ok(NodeKind::Software));
        assert_eq!("file_format".parse::<NodeKind>(), Ok(NodeKind::FileFormat));
        assert_eq!("file_package".parse::<NodeKind>(), Ok(NodeKind::FilePackage));
        assert!("hardware".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::FilePackage.to_string(), "File Package");
        assert_eq!(NodeKind::Software.to_string(), "Software");
    }

    #[test]
    fn test_edge_strength_default_is_weak() {
        assert_eq!(EdgeStrength::default(), EdgeStrength::Weak);
    }

    #[test]
    fn test_pipeline_preserves_declaration_order() {
        let pipeline = Pipeline::new(
            vec![Zone::new("a")],
            vec![node(3, 1), node(1, 1), node(2, 1)],
            vec![],
        )
        .unwrap();

        let ids: Vec<u32> = pipeline.nodes().map(|n| n.id().value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(pipeline.node_index(NodeId::new(1)), Some(1));
    }

    #[test]
    fn test_pipeline_rejects_duplicate_node() {
        let err = Pipeline::new(vec![Zone::new("a")], vec![node(1, 1), node(1, 1)], vec![])
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::DuplicateNode {
                id: NodeId::new(1),
                index: 1
            }
        );
        assert_eq!(err.index(), 1);
    }

    #[test]
    fn test_pipeline_rejects_unknown_zone() {
        let err = Pipeline::new(vec![Zone::new("a")], vec![node(1, 2)], vec![]).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownZone { zone_count: 1, .. }));

        let err = Pipeline::new(vec![Zone::new("a")], vec![node(1, 0)], vec![]).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownZone { index: 0, .. }));
    }

    #[test]
    fn test_pipeline_keeps_dangling_edges() {
        let pipeline = Pipeline::new(
            vec![Zone::new("a")],
            vec![node(1, 1)],
            vec![Edge::new(
                NodeId::new(1),
                NodeId::new(99),
                EdgeStrength::Strong,
            )],
        )
        .unwrap();

        assert_eq!(pipeline.edges().len(), 1);
        assert!(!pipeline.contains_node(NodeId::new(99)));
    }

    #[test]
    fn test_zone_lookup() {
        let pipeline =
            Pipeline::new(vec![Zone::new("first"), Zone::new("second")], vec![], vec![]).unwrap();
        assert_eq!(pipeline.zone(ZoneId::new(2)).map(Zone::name), Some("second"));
        assert!(pipeline.zone(ZoneId::new(0)).is_none());
        assert!(pipeline.zone(ZoneId::new(3)).is_none());
    }
}

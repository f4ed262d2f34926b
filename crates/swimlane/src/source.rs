//! Loading pipeline definitions.
//!
//! A pipeline is authored as a TOML document with four sections:
//!
//! ```toml
//! [[zone]]
//! name = "Design"
//!
//! [[node]]
//! id = 1
//! title = "3D Experience"
//! kind = "software"        # software | file_format | file_package
//! zone = 1                 # 1-based position in the zone list
//! proprietary = true       # pmi, proprietary, failure_mode default to false
//! version = "2022 hotfix9" # optional
//!
//! [[edge]]
//! from = 1
//! to = 2
//! strength = "strong"      # strong | weak, defaults to weak
//!
//! [status.release]
//! success = [1, 2]
//! failure = []
//! in_progress = []
//! ```
//!
//! Syntax errors and structural errors (duplicate node ids, unknown zones)
//! are reported as [`ParseError`]s carrying the byte span of the offending
//! text. Edges and status entries naming undeclared nodes are accepted.

use std::ops::Range;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;

use swimlane_core::{
    identifier::{NodeId, ZoneId},
    semantic::{Edge, EdgeStrength, Node, NodeKind, Pipeline, PipelineError, Zone},
    status::StatusOverlay,
};

/// A definition-file error with an optional location in the source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    span: Option<Range<usize>>,
    label: String,
    help: Option<String>,
}

impl ParseError {
    fn from_toml(err: &toml::de::Error) -> Self {
        Self {
            message: format!("invalid pipeline definition: {}", err.message().trim()),
            span: err.span(),
            label: "here".to_string(),
            help: None,
        }
    }

    fn from_pipeline(err: &PipelineError, span: Option<Range<usize>>) -> Self {
        let (label, help) = match err {
            PipelineError::DuplicateNode { .. } => (
                "duplicate node",
                "every [[node]] needs a distinct `id`".to_string(),
            ),
            PipelineError::UnknownZone { zone_count, .. } => (
                "node declared here",
                format!("`zone` must be between 1 and {zone_count}"),
            ),
        };
        Self {
            message: err.to_string(),
            span,
            label: label.to_string(),
            help: Some(help),
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the byte range of the offending text, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    /// Get the label describing the error location.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the help text, if any
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default, rename = "zone")]
    zones: Vec<RawZone>,
    #[serde(default, rename = "node")]
    nodes: Vec<Spanned<RawNode>>,
    #[serde(default, rename = "edge")]
    edges: Vec<RawEdge>,
    #[serde(default, rename = "status")]
    statuses: IndexMap<String, RawStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawZone {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    id: NodeId,
    title: String,
    kind: NodeKind,
    zone: ZoneId,
    #[serde(default)]
    pmi: bool,
    #[serde(default)]
    proprietary: bool,
    #[serde(default)]
    failure_mode: bool,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    components: Vec<String>,
}

impl RawNode {
    fn into_node(self) -> Node {
        let mut node = Node::new(self.id, self.title, self.kind, self.zone)
            .with_pmi(self.pmi)
            .with_proprietary(self.proprietary)
            .with_failure_mode(self.failure_mode)
            .with_components(self.components);
        if let Some(version) = self.version {
            node = node.with_version(version);
        }
        node
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEdge {
    from: NodeId,
    to: NodeId,
    #[serde(default)]
    strength: EdgeStrength,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStatus {
    #[serde(default)]
    success: Vec<NodeId>,
    #[serde(default)]
    failure: Vec<NodeId>,
    #[serde(default)]
    in_progress: Vec<NodeId>,
}

/// Parses a TOML pipeline definition.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed TOML, unknown keys, invalid enum
/// values, duplicate node ids and nodes referencing undeclared zones.
pub fn parse(source: &str) -> Result<Pipeline, ParseError> {
    let raw: RawDocument = toml::from_str(source).map_err(|err| ParseError::from_toml(&err))?;

    let spans: Vec<Range<usize>> = raw.nodes.iter().map(Spanned::span).collect();
    let zones = raw.zones.into_iter().map(|zone| Zone::new(zone.name)).collect();
    let nodes = raw
        .nodes
        .into_iter()
        .map(|node| node.into_inner().into_node())
        .collect();
    let edges = raw
        .edges
        .into_iter()
        .map(|edge| Edge::new(edge.from, edge.to, edge.strength))
        .collect();

    let pipeline = Pipeline::new(zones, nodes, edges)
        .map_err(|err| ParseError::from_pipeline(&err, spans.get(err.index()).cloned()))?;

    let statuses: IndexMap<String, StatusOverlay> = raw
        .statuses
        .into_iter()
        .map(|(name, status)| {
            let overlay = StatusOverlay::new()
                .with_success(status.success)
                .with_failure(status.failure)
                .with_in_progress(status.in_progress);
            for id in overlay.tagged_nodes() {
                if !pipeline.contains_node(id) {
                    warn!(
                        status = name,
                        node_id = id.value();
                        "Status references an undeclared node"
                    );
                }
            }
            (name, overlay)
        })
        .collect();

    debug!(
        zones = pipeline.zones().len(),
        nodes = pipeline.node_count(),
        edges = pipeline.edges().len(),
        statuses = statuses.len();
        "Pipeline definition loaded"
    );

    Ok(pipeline.with_statuses(statuses))
}

use std::collections::HashMap;

use log::{debug, trace};

use swimlane_core::{
    identifier::{NodeId, ZoneId},
    semantic::Pipeline,
};

use crate::error::SwimlaneError;

/// Dense index of a node in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn value(self) -> usize {
        self.0
    }
}

/// Position of a valid edge in the forest's edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeIndex(usize);

#[derive(Debug, Clone, Copy)]
struct Link {
    source: NodeIndex,
    target: NodeIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Directed adjacency over the declared nodes of a pipeline.
///
/// - `children(n)`: targets of edges leaving `n`, in edge input order.
/// - `parent(n)`: source of the first edge targeting `n` (the designated parent).
/// - `parents(n)`: sources of every edge targeting `n`, in edge input order.
///
/// Edges naming an undeclared node are dropped. Construction fails when the
/// remaining edges contain any directed cycle, including one that only closes
/// through a node's second or later parent.
#[derive(Debug)]
pub(crate) struct Forest {
    ids: Vec<NodeId>,
    zones: Vec<ZoneId>,
    lookup: HashMap<NodeId, NodeIndex>,
    links: Vec<Link>,
    incoming: Vec<Vec<EdgeIndex>>,
    outgoing: Vec<Vec<EdgeIndex>>,
}

impl Forest {
    /// Builds the adjacency for `pipeline`.
    ///
    /// Every valid edge takes part in the cycle check, not only the
    /// designated-parent chains. A loop that is reachable from a root, with
    /// every node on it still having a designated parent, is rejected too,
    /// because child spacing walks all outgoing edges and would never finish.
    ///
    /// # Errors
    ///
    /// Returns [`SwimlaneError::Graph`] if the valid edges contain any directed
    /// cycle.
    pub(crate) fn from_pipeline(pipeline: &Pipeline) -> Result<Self, SwimlaneError> {
        let ids: Vec<NodeId> = pipeline.nodes().map(|node| node.id()).collect();
        let zones = pipeline.nodes().map(|node| node.zone()).collect();
        let lookup = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, NodeIndex(index)))
            .collect();

        let mut forest = Self {
            incoming: vec![Vec::new(); ids.len()],
            outgoing: vec![Vec::new(); ids.len()],
            ids,
            zones,
            lookup,
            links: Vec::new(),
        };

        for edge in pipeline.edges() {
            let (Some(source), Some(target)) = (
                forest.index_of(edge.source()),
                forest.index_of(edge.target()),
            ) else {
                debug!(
                    source = edge.source().value(),
                    target = edge.target().value();
                    "Ignoring edge that references an undeclared node"
                );
                continue;
            };
            forest.add_link(source, target);
        }

        forest.check_acyclic()?;

        trace!(nodes = forest.len(), links = forest.links.len(); "Forest built");
        Ok(forest)
    }

    fn add_link(&mut self, source: NodeIndex, target: NodeIndex) {
        self.links.push(Link { source, target });
        let idx = EdgeIndex(self.links.len() - 1);
        self.outgoing[source.0].push(idx);
        self.incoming[target.0].push(idx);
    }

    /// Depth-first search over every valid edge. Reaching a node that is still
    /// on the current path means the graph loops back on itself.
    fn check_acyclic(&self) -> Result<(), SwimlaneError> {
        let mut marks = vec![Mark::Unvisited; self.len()];
        let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

        for start in self.indices() {
            if marks[start.0] != Mark::Unvisited {
                continue;
            }
            marks[start.0] = Mark::Active;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let Some(edge) = self.outgoing[node.0].get(next) else {
                    marks[node.0] = Mark::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                let child = self.links[edge.0].target;
                match marks[child.0] {
                    Mark::Active => {
                        return Err(SwimlaneError::Graph(format!(
                            "cyclic graph: node {} is reachable from itself",
                            self.id(child)
                        )));
                    }
                    Mark::Unvisited => {
                        marks[child.0] = Mark::Active;
                        stack.push((child, 0));
                    }
                    Mark::Done => {}
                }
            }
        }

        Ok(())
    }

    /// Number of declared nodes.
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    /// All node indices in declaration order.
    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.ids.len()).map(NodeIndex)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.lookup.get(&id).copied()
    }

    pub(crate) fn id(&self, node: NodeIndex) -> NodeId {
        self.ids[node.0]
    }

    pub(crate) fn zone(&self, node: NodeIndex) -> ZoneId {
        self.zones[node.0]
    }

    /// The designated parent: source of the first edge targeting `node`.
    pub(crate) fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.incoming[node.0]
            .first()
            .map(|edge| self.links[edge.0].source)
    }

    pub(crate) fn parents(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.incoming[node.0]
            .iter()
            .map(|edge| self.links[edge.0].source)
    }

    pub(crate) fn children(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.outgoing[node.0]
            .iter()
            .map(|edge| self.links[edge.0].target)
    }

    /// The child reached through the `position`-th outgoing edge of `node`.
    pub(crate) fn child(&self, node: NodeIndex, position: usize) -> Option<NodeIndex> {
        self.outgoing[node.0]
            .get(position)
            .map(|edge| self.links[edge.0].target)
    }

    pub(crate) fn is_leaf(&self, node: NodeIndex) -> bool {
        self.outgoing[node.0].is_empty()
    }

    /// Nodes without a designated parent, in declaration order.
    pub(crate) fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.indices().filter(|node| self.incoming[node.0].is_empty())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use swimlane_core::semantic::{Edge, EdgeStrength, Node, NodeKind, Zone};

    use super::*;

    /// Builds a pipeline from `(id, zone)` pairs and `(from, to)` edges.
    pub(crate) fn pipeline(
        zone_count: u32,
        nodes: &[(u32, u32)],
        edges: &[(u32, u32)],
    ) -> Pipeline {
        let zones = (1..=zone_count)
            .map(|zone| Zone::new(format!("zone {zone}")))
            .collect();
        let nodes = nodes
            .iter()
            .map(|&(id, zone)| {
                Node::new(
                    NodeId::new(id),
                    format!("node {id}"),
                    NodeKind::Software,
                    ZoneId::new(zone),
                )
            })
            .collect();
        let edges = edges
            .iter()
            .map(|&(from, to)| Edge::new(NodeId::new(from), NodeId::new(to), EdgeStrength::Weak))
            .collect();
        Pipeline::new(zones, nodes, edges).unwrap()
    }

    fn ids(forest: &Forest, nodes: impl Iterator<Item = NodeIndex>) -> Vec<u32> {
        nodes.map(|node| forest.id(node).value()).collect()
    }

    fn idx(forest: &Forest, id: u32) -> NodeIndex {
        forest.index_of(NodeId::new(id)).unwrap()
    }

    #[test]
    fn test_empty_forest() {
        let forest = Forest::from_pipeline(&pipeline(0, &[], &[])).unwrap();
        assert_eq!(forest.len(), 0);
        assert_eq!(forest.roots().count(), 0);
    }

    #[test]
    fn test_indices_follow_declaration_order() {
        let forest = Forest::from_pipeline(&pipeline(1, &[(7, 1), (3, 1), (5, 1)], &[])).unwrap();
        assert_eq!(ids(&forest, forest.indices()), vec![7, 3, 5]);
        assert_eq!(idx(&forest, 3), NodeIndex::new(1));
        assert_eq!(forest.index_of(NodeId::new(4)), None);
    }

    #[test]
    fn test_children_in_edge_order() {
        let forest = Forest::from_pipeline(&pipeline(
            1,
            &[(1, 1), (2, 1), (3, 1), (4, 1)],
            &[(1, 3), (1, 2), (1, 4)],
        ))
        .unwrap();

        assert_eq!(ids(&forest, forest.children(idx(&forest, 1))), vec![3, 2, 4]);
        assert_eq!(forest.child(idx(&forest, 1), 1), Some(idx(&forest, 2)));
        assert_eq!(forest.child(idx(&forest, 1), 3), None);
        assert!(forest.is_leaf(idx(&forest, 2)));
        assert!(!forest.is_leaf(idx(&forest, 1)));
    }

    #[test]
    fn test_designated_parent_is_first_incoming_edge() {
        let forest = Forest::from_pipeline(&pipeline(
            1,
            &[(1, 1), (2, 1), (3, 1)],
            &[(2, 3), (1, 3)],
        ))
        .unwrap();

        let node = idx(&forest, 3);
        assert_eq!(forest.parent(node), Some(idx(&forest, 2)));
        assert_eq!(ids(&forest, forest.parents(node)), vec![2, 1]);
        assert_eq!(ids(&forest, forest.roots()), vec![1, 2]);
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let forest =
            Forest::from_pipeline(&pipeline(1, &[(1, 1), (2, 1)], &[(1, 99), (99, 2), (1, 2)]))
                .unwrap();

        assert_eq!(ids(&forest, forest.children(idx(&forest, 1))), vec![2]);
        assert_eq!(forest.parent(idx(&forest, 2)), Some(idx(&forest, 1)));
        assert_eq!(ids(&forest, forest.roots()), vec![1]);
    }

    #[test]
    fn test_zone_lookup() {
        let forest = Forest::from_pipeline(&pipeline(2, &[(1, 2), (2, 1)], &[])).unwrap();
        assert_eq!(forest.zone(idx(&forest, 1)), ZoneId::new(2));
        assert_eq!(forest.zone(idx(&forest, 2)), ZoneId::new(1));
    }

    #[test]
    fn test_designated_parent_cycle_is_rejected() {
        let err = Forest::from_pipeline(&pipeline(1, &[(1, 1), (2, 1)], &[(1, 2), (2, 1)]))
            .unwrap_err();
        assert!(matches!(err, SwimlaneError::Graph(msg) if msg.starts_with("cyclic graph")));
    }

    #[test]
    fn test_cycle_behind_a_root_is_rejected() {
        // A and B both have R as designated parent; the A/B loop only shows up
        // through the children lists.
        let result = Forest::from_pipeline(&pipeline(
            1,
            &[(1, 1), (2, 1), (3, 1)],
            &[(1, 2), (1, 3), (2, 3), (3, 2)],
        ));
        assert!(matches!(result, Err(SwimlaneError::Graph(_))));
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let result = Forest::from_pipeline(&pipeline(1, &[(1, 1)], &[(1, 1)]));
        assert!(matches!(result, Err(SwimlaneError::Graph(_))));
    }

    #[test]
    fn test_diamond_is_accepted() {
        let forest = Forest::from_pipeline(&pipeline(
            1,
            &[(1, 1), (2, 1), (3, 1), (4, 1)],
            &[(1, 2), (1, 3), (2, 4), (3, 4)],
        ))
        .unwrap();

        assert_eq!(ids(&forest, forest.parents(idx(&forest, 4))), vec![2, 3]);
        assert_eq!(ids(&forest, forest.roots()), vec![1]);
    }
}

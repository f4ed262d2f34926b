//! Global depth along the designated-parent chain.

use crate::{
    error::SwimlaneError,
    structure::{Forest, NodeIndex},
};

/// Computes the global depth of every node, indexed by [`NodeIndex`].
///
/// Roots have depth 0; every other node sits one below its designated parent.
pub(super) fn global_depths(forest: &Forest) -> Result<Vec<u32>, SwimlaneError> {
    depths_along(forest.len(), |node| forest.parent(node)).map_err(|node| {
        SwimlaneError::Graph(format!(
            "cyclic graph: designated parent chain of node {} loops",
            forest.id(node)
        ))
    })
}

/// Climbs each node's parent chain until it reaches a root or a node whose
/// depth is already known, then assigns depths on the way back down.
///
/// Fails with the node at which the chain looped back onto itself.
fn depths_along(
    len: usize,
    parent: impl Fn(NodeIndex) -> Option<NodeIndex>,
) -> Result<Vec<u32>, NodeIndex> {
    let mut depths: Vec<Option<u32>> = vec![None; len];
    let mut on_path = vec![false; len];
    let mut path: Vec<NodeIndex> = Vec::new();

    for start in (0..len).map(NodeIndex::new) {
        let mut cursor = Some(start);
        let mut known = None;
        while let Some(node) = cursor {
            if let Some(depth) = depths[node.value()] {
                known = Some(depth);
                break;
            }
            if on_path[node.value()] {
                return Err(node);
            }
            on_path[node.value()] = true;
            path.push(node);
            cursor = parent(node);
        }

        let mut depth = known.map_or(0, |depth| depth + 1);
        while let Some(node) = path.pop() {
            depths[node.value()] = Some(depth);
            on_path[node.value()] = false;
            depth += 1;
        }
    }

    Ok(depths.into_iter().map(|depth| depth.unwrap_or_default()).collect())
}

//! Zone-level normalization.
//!
//! Turns global depths into per-zone levels in three passes:
//!
//! 1. subtract the shallowest depth found in each zone, so every zone starts
//!    at level 0;
//! 2. walking down from every root, push a same-zone child one level below
//!    its parent when the subtraction left it at or above the parent;
//! 3. reset every node whose designated parent lives in another zone to
//!    level 0 and re-level, from there, the same-zone descendants that hang
//!    off it through designated-parent links.
//!
//! The third pass runs last so zone boundaries override the spacing fixes.

use std::collections::HashMap;

use log::trace;

use swimlane_core::identifier::ZoneId;

use crate::structure::{Forest, NodeIndex};

/// Computes the zone level of every node, indexed by [`NodeIndex`].
pub(super) fn zone_levels(forest: &Forest, depths: &[u32]) -> Vec<u32> {
    let mut levels = normalize(forest, depths);
    ensure_child_spacing(forest, &mut levels);
    reset_cross_zone_roots(forest, &mut levels);
    levels
}

fn normalize(forest: &Forest, depths: &[u32]) -> Vec<u32> {
    let mut zone_min: HashMap<ZoneId, u32> = HashMap::new();
    for node in forest.indices() {
        let depth = depths[node.value()];
        zone_min
            .entry(forest.zone(node))
            .and_modify(|min| *min = (*min).min(depth))
            .or_insert(depth);
    }

    forest
        .indices()
        .map(|node| {
            let min = zone_min.get(&forest.zone(node)).copied().unwrap_or_default();
            depths[node.value()] - min
        })
        .collect()
}

/// Pre-order walk from every root. A node reached through several parents is
/// checked once per incoming path.
fn ensure_child_spacing(forest: &Forest, levels: &mut [u32]) {
    let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

    for root in forest.roots() {
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(child) = forest.child(node, next) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let same_zone = forest.zone(child) == forest.zone(node);
            if same_zone && levels[child.value()] <= levels[node.value()] {
                trace!(
                    node_id = forest.id(child).value(),
                    from = levels[child.value()],
                    to = levels[node.value()] + 1;
                    "Bumping zone level below same-zone parent"
                );
                levels[child.value()] = levels[node.value()] + 1;
            }
            stack.push((child, 0));
        }
    }
}

fn reset_cross_zone_roots(forest: &Forest, levels: &mut [u32]) {
    let cross_zone_roots: Vec<NodeIndex> = forest
        .indices()
        .filter(|&node| {
            forest
                .parent(node)
                .is_some_and(|parent| forest.zone(parent) != forest.zone(node))
        })
        .collect();

    for &node in &cross_zone_roots {
        levels[node.value()] = 0;
    }

    let mut stack: Vec<(NodeIndex, usize)> = Vec::new();
    for &root in &cross_zone_roots {
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(child) = forest.child(node, next) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            // Only designated children follow; a second parent never
            // re-levels a node.
            if forest.zone(child) == forest.zone(node) && forest.parent(child) == Some(node) {
                levels[child.value()] = levels[node.value()] + 1;
                stack.push((child, 0));
            }
        }
    }
}

//! Weighted horizontal subdivision of a subtree.

use swimlane_core::geometry::Point;

use crate::structure::{Forest, NodeIndex};

const LEAF_WEIGHT: f32 = 1.0;
const BRANCH_WEIGHT: f32 = 3.0;

/// Places subtrees over horizontal intervals.
///
/// Positions are written into a shared slot per node, so a node reached
/// through several parents keeps whatever the last visit computed. Settled
/// nodes are never rewritten.
pub(super) struct TreePlacer<'a> {
    forest: &'a Forest,
    levels: &'a [u32],
    level_spacing: f32,
}

struct Frame {
    node: NodeIndex,
    min_x: f32,
    max_x: f32,
    next: usize,
    cumulative: f32,
    total: f32,
}

impl<'a> TreePlacer<'a> {
    pub(super) fn new(forest: &'a Forest, levels: &'a [u32], level_spacing: f32) -> Self {
        Self {
            forest,
            levels,
            level_spacing,
        }
    }

    fn weight(&self, node: NodeIndex) -> f32 {
        if self.forest.is_leaf(node) {
            LEAF_WEIGHT
        } else {
            BRANCH_WEIGHT
        }
    }

    fn frame(&self, node: NodeIndex, min_x: f32, max_x: f32) -> Frame {
        let total = self
            .forest
            .children(node)
            .map(|child| self.weight(child))
            .sum();
        Frame {
            node,
            min_x,
            max_x,
            next: 0,
            cumulative: 0.0,
            total,
        }
    }

    /// Lays out the subtree under `root` across `[min_x, max_x]`.
    ///
    /// Each child gets a slot proportional to its weight (1 for a leaf, 3
    /// otherwise) in edge order. A leaf is centered in its slot; a branch sits
    /// at the mean x of its children. `y` is `y_offset` plus the node's zone
    /// level times the level spacing.
    ///
    /// A child marked in `settled` keeps its slot in the weighting but is not
    /// descended into; its current position still counts toward the parent's
    /// mean.
    pub(super) fn place(
        &self,
        root: NodeIndex,
        min_x: f32,
        max_x: f32,
        y_offset: f32,
        positions: &mut [Option<Point>],
        settled: &[bool],
    ) {
        let mut stack = vec![self.frame(root, min_x, max_x)];

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = self.forest.child(frame.node, frame.next) {
                frame.next += 1;

                let weight = self.weight(child);
                frame.cumulative += weight;
                if settled[child.value()] {
                    continue;
                }
                let span = frame.max_x - frame.min_x;
                let center = frame.min_x + span * ((frame.cumulative - weight / 2.0) / frame.total);
                let half_slot = span * (weight / frame.total) / 2.0;

                let child_frame = self.frame(child, center - half_slot, center + half_slot);
                stack.push(child_frame);
                continue;
            }

            let node = frame.node;
            let x = if self.forest.is_leaf(node) {
                (frame.min_x + frame.max_x) / 2.0
            } else {
                self.mean_child_x(node, positions)
            };
            let y = y_offset + self.levels[node.value()] as f32 * self.level_spacing;
            positions[node.value()] = Some(Point::new(x, y));
            stack.pop();
        }
    }

    fn mean_child_x(&self, node: NodeIndex, positions: &[Option<Point>]) -> f32 {
        let (sum, count) = self
            .forest
            .children(node)
            .filter_map(|child| positions[child.value()])
            .fold((0.0, 0usize), |(sum, count), point| (sum + point.x(), count + 1));
        if count == 0 { 0.0 } else { sum / count as f32 }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use swimlane_core::identifier::NodeId;

    use super::*;
    use crate::structure::test_pipeline;

    fn place(
        nodes: &[(u32, u32)],
        edges: &[(u32, u32)],
        root: u32,
        levels: Option<&[u32]>,
    ) -> (Forest, Vec<Option<Point>>) {
        let forest = Forest::from_pipeline(&test_pipeline(1, nodes, edges)).unwrap();
        let flat = vec![0; forest.len()];
        let levels = levels.unwrap_or(&flat);
        let mut positions = vec![None; forest.len()];
        let settled = vec![false; forest.len()];
        let root = forest.index_of(NodeId::new(root)).unwrap();
        TreePlacer::new(&forest, levels, 10.0).place(
            root,
            0.0,
            120.0,
            5.0,
            &mut positions,
            &settled,
        );
        (forest, positions)
    }

    fn at(forest: &Forest, positions: &[Option<Point>], id: u32) -> Point {
        positions[forest.index_of(NodeId::new(id)).unwrap().value()].unwrap()
    }

    #[test]
    fn test_single_leaf_is_centered() {
        let (forest, positions) = place(&[(1, 1)], &[], 1, None);
        let point = at(&forest, &positions, 1);
        assert_approx_eq!(f32, point.x(), 60.0);
        assert_approx_eq!(f32, point.y(), 5.0);
    }

    #[test]
    fn test_leaf_children_share_evenly() {
        let (forest, positions) = place(&[(1, 1), (2, 1), (3, 1)], &[(1, 2), (1, 3)], 1, None);

        assert_approx_eq!(f32, at(&forest, &positions, 2).x(), 30.0);
        assert_approx_eq!(f32, at(&forest, &positions, 3).x(), 90.0);
        assert_approx_eq!(f32, at(&forest, &positions, 1).x(), 60.0);
    }

    #[test]
    fn test_branch_child_gets_triple_weight() {
        // 1 has a leaf child 2 and a branch child 3 (with leaf 4):
        // weights 1 and 3 over [0, 120] -> slots [0, 30] and [30, 120].
        let (forest, positions) = place(
            &[(1, 1), (2, 1), (3, 1), (4, 1)],
            &[(1, 2), (1, 3), (3, 4)],
            1,
            None,
        );

        assert_approx_eq!(f32, at(&forest, &positions, 2).x(), 15.0);
        assert_approx_eq!(f32, at(&forest, &positions, 4).x(), 75.0);
        assert_approx_eq!(f32, at(&forest, &positions, 3).x(), 75.0);
        // parent sits at the mean of its children, not the interval middle
        assert_approx_eq!(f32, at(&forest, &positions, 1).x(), 45.0);
    }

    #[test]
    fn test_y_follows_zone_level() {
        let levels = [0, 1, 2];
        let (forest, positions) =
            place(&[(1, 1), (2, 1), (3, 1)], &[(1, 2), (2, 3)], 1, Some(&levels));

        assert_approx_eq!(f32, at(&forest, &positions, 1).y(), 5.0);
        assert_approx_eq!(f32, at(&forest, &positions, 2).y(), 15.0);
        assert_approx_eq!(f32, at(&forest, &positions, 3).y(), 25.0);
    }

    #[test]
    fn test_shared_child_keeps_last_visit() {
        // 4 is a child of both 2 and 3; it is placed under 3 last.
        let (forest, positions) = place(
            &[(1, 1), (2, 1), (3, 1), (4, 1)],
            &[(1, 2), (1, 3), (2, 4), (3, 4)],
            1,
            None,
        );

        let shared = at(&forest, &positions, 4).x();
        assert_approx_eq!(f32, shared, 90.0);
        assert_approx_eq!(f32, at(&forest, &positions, 3).x(), 90.0);
        // 2 was centered over 4's first placement
        assert_approx_eq!(f32, at(&forest, &positions, 2).x(), 30.0);
        // 1 averages the children's final positions
        assert_approx_eq!(f32, at(&forest, &positions, 1).x(), 60.0);
    }

    #[test]
    fn test_nodes_outside_subtree_are_untouched() {
        let (forest, positions) = place(&[(1, 1), (2, 1), (3, 1)], &[(1, 2)], 1, None);
        let other = forest.index_of(NodeId::new(3)).unwrap();
        assert!(positions[other.value()].is_none());
    }

    #[test]
    fn test_settled_child_is_not_moved() {
        // 3 was placed earlier at x = 10 and is settled; 2 still gets the
        // first slot and 1 averages over both.
        let forest = Forest::from_pipeline(&test_pipeline(
            1,
            &[(1, 1), (2, 1), (3, 1)],
            &[(1, 2), (1, 3)],
        ))
        .unwrap();
        let levels = vec![0; forest.len()];
        let third = forest.index_of(NodeId::new(3)).unwrap();
        let mut positions = vec![None; forest.len()];
        positions[third.value()] = Some(Point::new(10.0, 500.0));
        let mut settled = vec![false; forest.len()];
        settled[third.value()] = true;

        let root = forest.index_of(NodeId::new(1)).unwrap();
        TreePlacer::new(&forest, &levels, 10.0).place(
            root,
            0.0,
            120.0,
            5.0,
            &mut positions,
            &settled,
        );

        let kept = at(&forest, &positions, 3);
        assert_approx_eq!(f32, kept.x(), 10.0);
        assert_approx_eq!(f32, kept.y(), 500.0);
        assert_approx_eq!(f32, at(&forest, &positions, 2).x(), 30.0);
        assert_approx_eq!(f32, at(&forest, &positions, 1).x(), 20.0);
    }
}

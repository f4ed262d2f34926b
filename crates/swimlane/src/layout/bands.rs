//! Stacking zones into horizontal bands.

use log::debug;

use swimlane_core::{geometry::Point, identifier::ZoneId};

use super::{Geometry, ZoneBand, tree::TreePlacer};
use crate::structure::{Forest, NodeIndex};

/// Lays out every zone in declared order and returns the node positions
/// (indexed by [`NodeIndex`]) together with one band per zone.
///
/// Each zone lays out its zone-local roots across the full drawing width at
/// the running offset, then shifts its nodes so the topmost sits
/// `zone_top_margin` below the band start. A zone-local root is a node with no
/// designated parent, or one whose designated parent sits in another zone and
/// that no earlier walk has reached. Subtrees may cross into later zones; those
/// nodes are shifted when their own zone is processed. Once a zone has its
/// band, walks from later zones leave its nodes where they are.
pub(super) fn place_zones(
    forest: &Forest,
    levels: &[u32],
    geometry: &Geometry,
    zone_count: usize,
) -> (Vec<Option<Point>>, Vec<ZoneBand>) {
    let placer = TreePlacer::new(forest, levels, geometry.level_spacing());
    let min_x = geometry.margin();
    let max_x = geometry.viewport().width() - geometry.margin();

    let mut positions: Vec<Option<Point>> = vec![None; forest.len()];
    let mut settled = vec![false; forest.len()];
    let mut bands = Vec::with_capacity(zone_count);
    let mut current = geometry.zone_start();

    for zone in (0..zone_count).map(ZoneId::from_index) {
        for root in forest.roots().filter(|&root| forest.zone(root) == zone) {
            placer.place(root, min_x, max_x, current, &mut positions, &settled);
        }
        let entries: Vec<NodeIndex> = forest
            .indices()
            .filter(|&node| forest.zone(node) == zone && positions[node.value()].is_none())
            .filter(|&node| {
                forest
                    .parent(node)
                    .is_some_and(|parent| forest.zone(parent) != zone)
            })
            .collect();
        for entry in entries {
            // an earlier entry's walk may already have reached it
            if positions[entry.value()].is_none() {
                placer.place(entry, min_x, max_x, current, &mut positions, &settled);
            }
        }

        let members: Vec<NodeIndex> = forest
            .indices()
            .filter(|&node| forest.zone(node) == zone && positions[node.value()].is_some())
            .collect();
        for node in forest.indices().filter(|&node| forest.zone(node) == zone) {
            settled[node.value()] = true;
        }

        let Some((min_y, max_y)) = vertical_extent(&members, &positions) else {
            let band = ZoneBand::new(
                zone,
                current,
                current + geometry.box_height() + geometry.zone_padding(),
            );
            debug!(
                zone = zone.position(),
                y_start = band.y_start(),
                y_end = band.y_end();
                "Reserved empty zone band"
            );
            current = band.y_end() + geometry.zone_padding();
            bands.push(band);
            continue;
        };

        let shift = current + geometry.zone_top_margin() - min_y;
        for node in &members {
            if let Some(point) = &mut positions[node.value()] {
                *point = point.add_point(Point::new(0.0, shift));
            }
        }

        let band = ZoneBand::new(
            zone,
            current,
            max_y + shift + geometry.box_height() + geometry.node_bottom_margin(),
        );
        debug!(
            zone = zone.position(),
            nodes = members.len(),
            y_start = band.y_start(),
            y_end = band.y_end();
            "Placed zone band"
        );
        current = band.y_end() + geometry.zone_padding();
        bands.push(band);
    }

    (positions, bands)
}

fn vertical_extent(members: &[NodeIndex], positions: &[Option<Point>]) -> Option<(f32, f32)> {
    members
        .iter()
        .filter_map(|node| positions[node.value()])
        .fold(None, |extent, point| match extent {
            None => Some((point.y(), point.y())),
            Some((min, max)) => Some((point.y().min(min), point.y().max(max))),
        })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use swimlane_core::{geometry::Size, identifier::NodeId};

    use super::*;
    use crate::{
        layout::{LayoutRatios, depth::global_depths, levels::zone_levels},
        structure::test_pipeline,
    };

    // 1000x1000 viewport: box 100x50, padding 20, start 10, margin 50,
    // level spacing 80, zone top margin 40, node bottom margin 20.
    fn run(
        zone_count: u32,
        nodes: &[(u32, u32)],
        edges: &[(u32, u32)],
    ) -> (Forest, Vec<Option<Point>>, Vec<ZoneBand>) {
        let forest = Forest::from_pipeline(&test_pipeline(zone_count, nodes, edges)).unwrap();
        let depths = global_depths(&forest).unwrap();
        let levels = zone_levels(&forest, &depths);
        let geometry =
            Geometry::from_viewport(Size::new(1000.0, 1000.0), &LayoutRatios::default()).unwrap();
        let (positions, bands) = place_zones(&forest, &levels, &geometry, zone_count as usize);
        (forest, positions, bands)
    }

    fn y(forest: &Forest, positions: &[Option<Point>], id: u32) -> f32 {
        positions[forest.index_of(NodeId::new(id)).unwrap().value()]
            .unwrap()
            .y()
    }

    #[test]
    fn test_single_zone_band() {
        let (forest, positions, bands) = run(1, &[(1, 1), (2, 1)], &[(1, 2)]);

        assert_eq!(bands.len(), 1);
        assert_approx_eq!(f32, bands[0].y_start(), 10.0);
        assert_approx_eq!(f32, y(&forest, &positions, 1), 50.0);
        assert_approx_eq!(f32, y(&forest, &positions, 2), 130.0);
        assert_approx_eq!(f32, bands[0].y_end(), 130.0 + 50.0 + 20.0);
    }

    #[test]
    fn test_empty_zone_reserves_minimal_band() {
        let (_, _, bands) = run(3, &[(1, 1), (2, 3)], &[]);

        // zone 1: node at 50, band [10, 120]; zone 2 starts after padding
        assert_approx_eq!(f32, bands[0].y_end(), 120.0);
        assert_approx_eq!(f32, bands[1].y_start(), 140.0);
        assert_approx_eq!(f32, bands[1].y_end(), 140.0 + 50.0 + 20.0);
        assert_approx_eq!(f32, bands[2].y_start(), 230.0);
    }

    #[test]
    fn test_cross_zone_child_lands_in_its_own_band() {
        let (forest, positions, bands) = run(2, &[(1, 1), (2, 2)], &[(1, 2)]);

        assert_approx_eq!(f32, y(&forest, &positions, 1), bands[0].y_start() + 40.0);
        assert_approx_eq!(f32, y(&forest, &positions, 2), bands[1].y_start() + 40.0);
        assert!(bands[0].y_end() + 20.0 <= bands[1].y_start() + f32::EPSILON);
    }

    #[test]
    fn test_no_zones() {
        let (_, positions, bands) = run(0, &[], &[]);
        assert!(positions.is_empty());
        assert!(bands.is_empty());
    }

    #[test]
    fn test_roots_share_full_width() {
        let (forest, positions, _) = run(1, &[(1, 1), (2, 1)], &[]);
        let x1 = positions[forest.index_of(NodeId::new(1)).unwrap().value()]
            .unwrap()
            .x();
        let x2 = positions[forest.index_of(NodeId::new(2)).unwrap().value()]
            .unwrap()
            .x();
        // every root is laid out across [margin, width - margin]
        assert_approx_eq!(f32, x1, 500.0);
        assert_approx_eq!(f32, x2, 500.0);
    }

    #[test]
    fn test_later_zone_parent_keeps_child_in_its_own_band() {
        // 11 sits in zone 1 but hangs off 10 in zone 2
        let (forest, positions, bands) = run(2, &[(10, 2), (11, 1)], &[(10, 11)]);

        // zone 1 holds 11, so it is not the minimal empty band
        assert_approx_eq!(f32, bands[0].y_end(), 120.0);
        assert_approx_eq!(f32, y(&forest, &positions, 11), 50.0);
        assert_approx_eq!(f32, bands[1].y_start(), 140.0);
        assert_approx_eq!(f32, y(&forest, &positions, 10), 180.0);

        // 10's walk does not pull 11 back down into zone 2
        let child = positions[forest.index_of(NodeId::new(11)).unwrap().value()].unwrap();
        let parent = positions[forest.index_of(NodeId::new(10)).unwrap().value()].unwrap();
        assert_approx_eq!(f32, child.x(), 500.0);
        assert_approx_eq!(f32, parent.x(), 500.0);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall overlap resolution.
//!
//! Walls meeting at a corner or a T-junction are often drawn over each
//! other. Every pair of walls whose outlines properly overlap is resolved
//! by trimming one wall by the other:
//!
//! 1. try `A - B`, keeping it only if it is clean (see
//!    [`subtract_cleanly`]);
//! 2. otherwise try `B - A`;
//! 3. otherwise retry the pair in the next round, since trimming other
//!    pairs may have made it clean.
//!
//! Rounds repeat until nothing is pending. A round that resolves nothing
//! ends the loop, and the remaining pairs are forced: `B` is replaced by the
//! largest piece of `B - A`, or emptied when nothing is left of it.

use plangraph_geometry::{difference, largest_polygon, relate_matches, subtract_cleanly, Shape, PROPER_OVERLAP};
use serde::Serialize;

use crate::divider::{Divider, Wall};
use crate::entity::SpatialEntity;
use crate::keys::WallId;

/// What overlap resolution did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    /// Rounds run, including the one that found the loop stagnant.
    pub rounds: usize,
    /// Pairs resolved by a clean trim.
    pub trimmed: usize,
    /// Pairs resolved by force, in the order they were forced.
    pub forced: Vec<(WallId, WallId)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOutcome {
    /// The pair does not properly overlap.
    Apart,
    Trimmed,
    /// Neither difference is clean.
    Unclean,
    Forced,
}

/// Trim overlapping walls until no pair properly overlaps, except pairs
/// that had to be forced.
///
/// Only walls with a well-formed four-edge outline take part.
pub fn resolve_wall_overlaps(walls: &mut [Wall<'_>], tolerance: f64) -> OverlapReport {
    let eligible: Vec<usize> = walls
        .iter()
        .enumerate()
        .filter(|(_, wall)| wall.is_eligible())
        .map(|(i, _)| i)
        .collect();

    let mut pending: Vec<(usize, usize)> = Vec::new();
    for (n, &a) in eligible.iter().enumerate() {
        for &b in &eligible[n + 1..] {
            pending.push((a, b));
        }
    }

    let mut report = OverlapReport::default();
    loop {
        report.rounds += 1;
        let mut retry = Vec::new();
        for &(a, b) in &pending {
            match remove_overlap(walls, a, b, tolerance, false) {
                PairOutcome::Trimmed => report.trimmed += 1,
                PairOutcome::Unclean => retry.push((a, b)),
                PairOutcome::Apart | PairOutcome::Forced => {}
            }
        }
        tracing::debug!(
            round = report.rounds,
            pairs = pending.len(),
            retry = retry.len(),
            "Wall overlap round"
        );

        if retry.is_empty() {
            return report;
        }
        let stagnant = retry.len() == pending.len();
        pending = retry;
        if stagnant {
            break;
        }
    }

    for (a, b) in pending {
        match remove_overlap(walls, a, b, tolerance, true) {
            PairOutcome::Trimmed => report.trimmed += 1,
            PairOutcome::Forced => {
                tracing::warn!(wall = a, other = b, "Forced wall overlap resolution");
                report.forced.push((WallId(a), WallId(b)));
            }
            PairOutcome::Apart | PairOutcome::Unclean => {}
        }
    }
    report
}

fn remove_overlap(walls: &mut [Wall<'_>], a: usize, b: usize, tolerance: f64, force: bool) -> PairOutcome {
    if !relate_matches(walls[a].outline(), walls[b].outline(), PROPER_OVERLAP) {
        return PairOutcome::Apart;
    }
    let (Some(this), Some(that)) = (
        walls[a].outline().as_polygon().cloned(),
        walls[b].outline().as_polygon().cloned(),
    ) else {
        return PairOutcome::Apart;
    };

    if let Some(trimmed) = subtract_cleanly(&this, &that, tolerance) {
        walls[a].replace_outline(Shape::Polygon(trimmed));
        return PairOutcome::Trimmed;
    }
    if let Some(trimmed) = subtract_cleanly(&that, &this, tolerance) {
        walls[b].replace_outline(Shape::Polygon(trimmed));
        return PairOutcome::Trimmed;
    }
    if !force {
        return PairOutcome::Unclean;
    }

    let remainder = largest_polygon(difference(&that, &this).0).map_or(Shape::Empty, Shape::Polygon);
    walls[b].replace_outline(remainder);
    PairOutcome::Forced
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plangraph_core::ShapeNode;

    fn wall_element(points: &[(f64, f64)]) -> ShapeNode {
        ShapeNode::group(["Wall"], vec![ShapeNode::polygon(points.iter().copied())])
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> ShapeNode {
        wall_element(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
    }

    fn load<'a>(elements: &'a [ShapeNode]) -> Vec<Wall<'a>> {
        elements
            .iter()
            .enumerate()
            .map(|(i, e)| Wall::new(i, e).unwrap())
            .collect()
    }

    fn no_proper_overlaps(walls: &[Wall<'_>], forced: &[(WallId, WallId)]) -> bool {
        (0..walls.len()).all(|a| {
            (a + 1..walls.len()).all(|b| {
                forced.contains(&(WallId(a), WallId(b)))
                    || !relate_matches(walls[a].outline(), walls[b].outline(), PROPER_OVERLAP)
            })
        })
    }

    #[test]
    fn corner_overlap_trims_first_wall() {
        // B overlaps the right end of A in a 1x1 square, leaving A clean.
        let elements = [rect(0.0, 0.0, 10.0, 1.0), rect(9.0, -5.0, 1.0, 10.0)];
        let mut walls = load(&elements);
        let report = resolve_wall_overlaps(&mut walls, 1.0);

        assert_eq!(report.trimmed, 1);
        assert!(report.forced.is_empty());
        assert!(walls[0].is_trimmed());
        assert!(!walls[1].is_trimmed());
        assert_relative_eq!(walls[0].area(), 9.0, epsilon = 1e-9);
        assert_relative_eq!(walls[1].area(), 10.0, epsilon = 1e-9);
        assert!(no_proper_overlaps(&walls, &report.forced));
    }

    #[test]
    fn disjoint_walls_are_untouched() {
        let elements = [rect(0.0, 0.0, 10.0, 1.0), rect(0.0, 5.0, 10.0, 1.0)];
        let mut walls = load(&elements);
        let report = resolve_wall_overlaps(&mut walls, 1.0);
        assert_eq!(report, OverlapReport { rounds: 1, trimmed: 0, forced: vec![] });
        assert!(!walls[0].is_trimmed() && !walls[1].is_trimmed());
    }

    #[test]
    fn crossing_walls_are_forced() {
        // A plus sign: each difference leaves two thick arms.
        let elements = [rect(0.0, 4.0, 10.0, 2.0), rect(4.0, 0.0, 2.0, 10.0)];
        let mut walls = load(&elements);
        let report = resolve_wall_overlaps(&mut walls, 1.0);

        assert_eq!(report.rounds, 1);
        assert_eq!(report.forced, vec![(WallId(0), WallId(1))]);
        assert!(!walls[0].is_trimmed());
        assert!(walls[1].is_trimmed());
        // One 2x4 arm of B survives.
        assert_relative_eq!(walls[1].area(), 8.0, epsilon = 1e-9);
        assert!(no_proper_overlaps(&walls, &report.forced));
    }

    #[test]
    fn degenerate_walls_are_skipped() {
        let elements = [
            wall_element(&[(0.0, 0.0), (10.0, 0.0), (10.0, 1.0)]),
            rect(5.0, -5.0, 1.0, 10.0),
        ];
        let mut walls = load(&elements);
        let report = resolve_wall_overlaps(&mut walls, 1.0);
        assert_eq!(report.trimmed, 0);
        assert!(!walls[0].is_trimmed() && !walls[1].is_trimmed());
    }

    #[test]
    fn resolution_terminates_on_many_walls() {
        let elements: Vec<ShapeNode> = (0..6)
            .map(|i| {
                let offset = i as f64 * 3.0;
                if i % 2 == 0 {
                    rect(0.0, offset, 20.0, 1.0)
                } else {
                    rect(offset, -2.0, 1.0, 20.0)
                }
            })
            .collect();
        let mut walls = load(&elements);
        let report = resolve_wall_overlaps(&mut walls, 1.0);
        assert!(report.rounds >= 1);
        assert!(no_proper_overlaps(&walls, &report.forced));
    }
}

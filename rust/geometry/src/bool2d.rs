// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations for Wall Trimming
//!
//! Overlapping walls are resolved by subtracting one outline from the other.
//! The difference is computed with the i_overlay crate; the result is then
//! judged by [`subtract_cleanly`], which only accepts it when the subtraction
//! left a single piece, or a single piece plus a thin sliver.

use geo::{Coord, Distance, Euclidean, LineString, MinimumRotatedRect, MultiPolygon, Polygon};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

/// Minimum area threshold - contours smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Perform 2D boolean difference: `subject - clip`
///
/// Holes of both operands are honoured. Pieces are returned in the order
/// i_overlay produces them; degenerate contours are dropped.
pub fn difference(subject: &Polygon<f64>, clip: &Polygon<f64>) -> MultiPolygon<f64> {
    let subject_paths = polygon_to_paths(subject);
    let clip_paths = polygon_to_paths(clip);
    if subject_paths.is_empty() {
        return MultiPolygon::new(vec![]);
    }
    if clip_paths.is_empty() {
        return MultiPolygon::new(vec![subject.clone()]);
    }

    // Result is Vec<Vec<Vec<[f64; 2]>>> - Vec of shapes, each shape is Vec of contours
    let result = subject_paths.overlay(&clip_paths, OverlayRule::Difference, FillRule::EvenOdd);
    shapes_to_multipolygon(&result)
}

/// Subtract `other` from `this`, accepting only a clean result.
///
/// - One piece left: that piece.
/// - Two pieces left, one of them a sliver (its minimum rotated rectangle
///   is narrower than `tolerance`): the other piece. When both pieces are
///   equally narrow the first one is taken as the sliver.
/// - Anything else: `None`.
pub fn subtract_cleanly(this: &Polygon<f64>, other: &Polygon<f64>, tolerance: f64) -> Option<Polygon<f64>> {
    let mut pieces = difference(this, other).0;
    match pieces.len() {
        1 => pieces.pop(),
        2 => {
            let first = minimum_rotated_rectangle_dimension(&pieces[0]);
            let second = minimum_rotated_rectangle_dimension(&pieces[1]);
            let (sliver, keep) = if first <= second { (first, 1) } else { (second, 0) };
            if sliver < tolerance {
                Some(pieces.swap_remove(keep))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// The shorter side of the polygon's minimum rotated rectangle.
///
/// Zero when no rectangle can be fitted (collinear or empty input).
pub fn minimum_rotated_rectangle_dimension(polygon: &Polygon<f64>) -> f64 {
    let Some(rectangle) = polygon.minimum_rotated_rect() else {
        return 0.0;
    };
    let corners = &rectangle.exterior().0;
    if corners.len() < 3 {
        return 0.0;
    }
    let a = Euclidean.distance(geo::Point::from(corners[0]), geo::Point::from(corners[1]));
    let b = Euclidean.distance(geo::Point::from(corners[1]), geo::Point::from(corners[2]));
    a.min(b)
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert a polygon to i_overlay path format (exterior then holes, open rings)
fn polygon_to_paths(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_to_path)
        .filter(|path| path.len() >= 3)
        .collect()
}

fn ring_to_path(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    let coords = &ring.0;
    let open = match (coords.first(), coords.last()) {
        (Some(first), Some(last)) if coords.len() > 1 && first == last => &coords[..coords.len() - 1],
        _ => &coords[..],
    };
    open.iter().map(|c| [c.x, c.y]).collect()
}

/// Signed area of an open contour; positive is counter-clockwise
fn contour_signed_area(contour: &[[f64; 2]]) -> f64 {
    let n = contour.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i][0] * contour[j][1];
        area -= contour[j][0] * contour[i][1];
    }
    area * 0.5
}

fn path_to_ring(contour: &[[f64; 2]]) -> LineString<f64> {
    LineString::new(contour.iter().map(|p| Coord { x: p[0], y: p[1] }).collect())
}

/// Convert i_overlay result shapes to polygons
///
/// i_overlay returns Vec<Vec<Vec<[f64; 2]>>> where:
/// - Outer Vec: list of shapes
/// - Middle Vec: list of contours per shape (first is outer, rest are holes)
/// - Inner Vec: list of points per contour
fn shapes_to_multipolygon(shapes: &[Vec<Vec<[f64; 2]>>]) -> MultiPolygon<f64> {
    let polygons = shapes
        .iter()
        .filter_map(|shape| {
            let (outer, holes) = shape.split_first()?;
            if outer.len() < 3 || contour_signed_area(outer).abs() <= MIN_AREA_THRESHOLD {
                return None;
            }
            let holes = holes
                .iter()
                .filter(|hole| hole.len() >= 3 && contour_signed_area(hole).abs() > MIN_AREA_THRESHOLD)
                .map(|hole| path_to_ring(hole))
                .collect();
            Some(Polygon::new(path_to_ring(outer), holes))
        })
        .collect();
    MultiPolygon::new(polygons)
}

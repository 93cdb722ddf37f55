// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial predicates between outlines.
//!
//! - [`relate_matches`]: DE-9IM pattern tests
//! - [`shared_boundary`]: the line work two touching polygons have in common
//! - [`lines_are_close`] / [`has_close_edges`]: near-parallel edge proximity

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Distance, Euclidean, Line, LineString, MultiLineString, Point, Polygon, Relate};

use crate::shape::Shape;

/// Interiors cross in an area, boundaries cross in lines, and neither shape
/// contains the other: two walls drawn over each other.
pub const PROPER_OVERLAP: &str = "2121T1212";

/// Interiors share some area.
pub const INTERIOR_OVERLAP: &str = "2********";

/// Interiors are disjoint and the boundaries meet along a line.
const BOUNDARY_CONTACT: &str = "F***1****";

/// Point contacts farther than this from every shared segment make the
/// intersection a mixed collection rather than line work.
const CONTACT_EPSILON: f64 = 1e-9;

/// Test the DE-9IM relation between two shapes against `pattern`.
///
/// Empty shapes never match.
pub fn relate_matches(a: &Shape, b: &Shape, pattern: &str) -> bool {
    let (Some(a), Some(b)) = (a.to_geometry(), b.to_geometry()) else {
        return false;
    };
    a.relate(&b).matches(pattern).unwrap_or(false)
}

/// The shared boundary of two polygons whose intersection is pure line work.
///
/// Returns `None` when the interiors overlap, when the polygons only touch at
/// points, or when the intersection mixes shared segments with isolated
/// point contacts. Segments are oriented along `a`'s boundary and chained
/// where they connect.
pub fn shared_boundary(a: &Polygon<f64>, b: &Polygon<f64>) -> Option<MultiLineString<f64>> {
    if !a.relate(b).matches(BOUNDARY_CONTACT).unwrap_or(false) {
        return None;
    }

    let b_lines: Vec<Line<f64>> = boundary_lines(b).collect();
    let mut pieces: Vec<Line<f64>> = Vec::new();
    let mut contacts: Vec<Coord<f64>> = Vec::new();

    for a_line in boundary_lines(a) {
        for b_line in &b_lines {
            match line_intersection(a_line, *b_line) {
                Some(LineIntersection::Collinear { intersection }) => {
                    pieces.push(orient_along(intersection, &a_line));
                }
                Some(LineIntersection::SinglePoint { intersection, .. }) => contacts.push(intersection),
                None => {}
            }
        }
    }

    if pieces.is_empty() {
        return None;
    }
    let isolated = contacts.iter().any(|contact| {
        pieces
            .iter()
            .all(|piece| Euclidean.distance(&Point::from(*contact), piece) > CONTACT_EPSILON)
    });
    if isolated {
        return None;
    }

    Some(chain(pieces))
}

/// Whether two segments run close to each other.
///
/// Each endpoint of one segment is measured against the other segment; the
/// segments are close when at least two of those four distances are below
/// `tolerance`. Zero-length segments are never close.
pub fn lines_are_close(line1: &Line<f64>, line2: &Line<f64>, tolerance: f64) -> bool {
    if line1.start == line1.end || line2.start == line2.end {
        return false;
    }

    let checks = [
        (line2.start, line1),
        (line2.end, line1),
        (line1.start, line2),
        (line1.end, line2),
    ];
    let mut hits = 0;
    for (point, line) in checks {
        if Euclidean.distance(&Point::from(point), line) < tolerance {
            hits += 1;
            if hits == 2 {
                return true;
            }
        }
    }
    false
}

/// Whether any edge of `a` is close to any edge of `b`.
pub fn has_close_edges(a: &[Line<f64>], b: &[Line<f64>], tolerance: f64) -> bool {
    a.iter()
        .any(|line1| b.iter().any(|line2| lines_are_close(line1, line2, tolerance)))
}

fn boundary_lines(polygon: &Polygon<f64>) -> impl Iterator<Item = Line<f64>> + '_ {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .flat_map(LineString::lines)
}

fn orient_along(piece: Line<f64>, direction: &Line<f64>) -> Line<f64> {
    let along = direction.delta();
    let delta = piece.delta();
    if along.x * delta.x + along.y * delta.y < 0.0 {
        Line::new(piece.end, piece.start)
    } else {
        piece
    }
}

/// Join pieces that continue one another into linestrings.
fn chain(pieces: Vec<Line<f64>>) -> MultiLineString<f64> {
    let mut strings: Vec<Vec<Coord<f64>>> = Vec::new();
    for piece in pieces {
        match strings.last_mut() {
            Some(current) if current.last() == Some(&piece.start) => current.push(piece.end),
            _ => strings.push(vec![piece.start, piece.end]),
        }
    }

    // A shared stretch may wrap past the start of `a`'s ring.
    if strings.len() > 1 {
        let wraps = strings.last().and_then(|s| s.last()) == strings.first().and_then(|s| s.first());
        if wraps {
            if let Some(mut tail) = strings.pop() {
                tail.extend(strings[0].iter().skip(1));
                strings[0] = tail;
            }
        }
    }

    MultiLineString::new(strings.into_iter().map(LineString::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn total_length(lines: &MultiLineString<f64>) -> f64 {
        lines
            .iter()
            .flat_map(LineString::lines)
            .map(|line| line.dx().hypot(line.dy()))
            .sum()
    }

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x, y), (x + width, y), (x + width, y + height), (x, y + height)]),
            vec![],
        )
    }

    #[test]
    fn proper_overlap_pattern() {
        let a = Shape::Polygon(rect(0.0, 0.0, 10.0, 1.0));
        let crossing = Shape::Polygon(rect(8.0, -5.0, 1.0, 10.0));
        let inside = Shape::Polygon(rect(2.0, 0.25, 1.0, 0.5));
        assert!(relate_matches(&a, &crossing, PROPER_OVERLAP));
        assert!(!relate_matches(&a, &inside, PROPER_OVERLAP));
        assert!(relate_matches(&a, &inside, INTERIOR_OVERLAP));
        assert!(!relate_matches(&a, &Shape::Empty, INTERIOR_OVERLAP));
    }

    #[test]
    fn shared_edge_between_room_and_wall() {
        let room = rect(0.0, 0.0, 10.0, 10.0);
        let wall = rect(10.0, 0.0, 1.0, 10.0);
        let shared = shared_boundary(&room, &wall).expect("shared edge");
        assert_eq!(shared.0.len(), 1);
        assert_relative_eq!(total_length(&shared), 10.0);
        let line = &shared.0[0];
        let xs: Vec<f64> = line.coords().map(|c| c.x).collect();
        assert!(xs.iter().all(|&x| x == 10.0));
    }

    #[test]
    fn partial_edge_contact_is_shared() {
        let room = rect(0.0, 0.0, 10.0, 10.0);
        let wall = rect(10.0, 4.0, 1.0, 20.0);
        let shared = shared_boundary(&room, &wall).expect("shared edge");
        assert_relative_eq!(total_length(&shared), 6.0);
    }

    #[test]
    fn corner_contact_is_not_shared() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(1.0, 1.0, 1.0, 1.0);
        assert!(shared_boundary(&a, &b).is_none());
    }

    #[test]
    fn overlapping_interiors_are_not_shared() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 0.0, 2.0, 2.0);
        assert!(shared_boundary(&a, &b).is_none());
    }

    #[test]
    fn edge_plus_isolated_point_is_not_shared() {
        // An L-shaped room touching a wall along one edge and at a notch corner.
        let room = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (3.0, 2.0), (3.0, 3.0), (0.0, 3.0)]),
            vec![],
        );
        let wall = Polygon::new(
            LineString::from(vec![(4.0, 0.0), (6.0, 0.0), (6.0, 4.0), (3.0, 4.0), (3.0, 3.0), (5.0, 3.0), (5.0, 2.0), (4.0, 2.0)]),
            vec![],
        );
        assert!(shared_boundary(&room, &wall).is_none());
    }

    #[test]
    fn closeness_needs_two_hits() {
        let base = Line::new((0.0, 0.0), (10.0, 0.0));
        let parallel = Line::new((0.0, 0.5), (10.0, 0.5));
        assert!(lines_are_close(&base, &parallel, 1.0));

        // Only one endpoint comes near the base line.
        let leaning = Line::new((5.0, 0.5), (5.0, 8.0));
        assert!(!lines_are_close(&base, &leaning, 1.0));

        let far = Line::new((0.0, 2.0), (10.0, 2.0));
        assert!(!lines_are_close(&base, &far, 1.0));

        let point = Line::new((1.0, 0.0), (1.0, 0.0));
        assert!(!lines_are_close(&base, &point, 1.0));
    }

    #[test]
    fn endpoints_at_tolerance_do_not_count() {
        let base = Line::new((0.0, 0.0), (10.0, 0.0));
        let offset = Line::new((0.0, 1.0), (10.0, 1.0));
        assert!(!lines_are_close(&base, &offset, 1.0));
        assert!(lines_are_close(&base, &offset, 1.0 + 1e-9));
    }

    #[test]
    fn close_edges_between_outlines() {
        let a: Vec<Line<f64>> = rect(0.0, 0.0, 10.0, 10.0).exterior().lines().collect();
        let b: Vec<Line<f64>> = rect(10.5, 0.0, 1.0, 10.0).exterior().lines().collect();
        let c: Vec<Line<f64>> = rect(13.0, 0.0, 1.0, 10.0).exterior().lines().collect();
        assert!(has_close_edges(&a, &b, 1.0));
        assert!(!has_close_edges(&a, &c, 1.0));
    }
}

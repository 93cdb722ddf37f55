// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape reconstruction from raw point lists.
//!
//! Drawing tools regularly emit outlines whose ring crosses itself (a wall
//! corner drawn twice, a room outline that doubles back). Such a ring is not
//! a valid polygon, but the shape the author meant is one of the faces
//! enclosed by its edges. Reconstruction therefore:
//!
//! 1. accepts the ring as-is when it is already a simple polygon;
//! 2. otherwise breaks it into edges, nodes every edge at every crossing,
//!    drops duplicate segments, polygonizes the segment soup and keeps the
//!    largest face.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Coord, Line, LineString, Polygon, Validation};
use plangraph_core::Point2D;

use crate::error::{Error, Result};
use crate::polygonize::polygonize;
use crate::shape::Shape;

/// Convert parser points into `geo` coordinates.
pub fn coords_from_points(points: &[Point2D]) -> Vec<Coord<f64>> {
    points.iter().map(|p| Coord { x: p.x, y: p.y }).collect()
}

/// Build the best shape for an ordered point list.
///
/// - no points: [`Shape::Empty`]
/// - one point: [`Shape::Point`]
/// - two points: [`Shape::Line`]
/// - three or more: a polygon, repaired if the ring self-intersects, or
///   [`Shape::Empty`] if no face can be recovered.
pub fn polygon_from_points(points: &[Coord<f64>]) -> Shape {
    match points {
        [] => Shape::Empty,
        [point] => Shape::Point((*point).into()),
        [start, end] => Shape::Line(LineString::new(vec![*start, *end])),
        _ => {
            let ring = without_repeated_points(points);
            if ring.len() < 3 {
                return Shape::Empty;
            }

            let polygon = Polygon::new(LineString::new(ring), vec![]);
            if is_simple_polygon(&polygon) {
                return Shape::Polygon(polygon);
            }

            tracing::trace!(points = points.len(), "Repairing self-intersecting ring");
            let edges = ring_edges(&polygon);
            let segments = remove_duplicates(split_at_intersections(&edges));
            match largest_polygon(polygonize(&segments)) {
                Some(polygon) => Shape::Polygon(polygon),
                None => Shape::Empty,
            }
        }
    }
}

/// A ring is accepted as-is when `geo` considers it valid and it encloses
/// some area (a ring of collinear points is valid for some checkers but
/// bounds nothing).
fn is_simple_polygon(polygon: &Polygon<f64>) -> bool {
    polygon.is_valid() && polygon.unsigned_area() > 0.0
}

/// Drop consecutive repeated points, including a closing point equal to the
/// first one.
fn without_repeated_points(points: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(points.len());
    for point in points {
        if ring.last() != Some(point) {
            ring.push(*point);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Exterior ring edges of a polygon, in ring order.
pub fn ring_edges(polygon: &Polygon<f64>) -> Vec<Line<f64>> {
    polygon.exterior().lines().collect()
}

/// Split every edge at every point where it meets another edge.
///
/// Crossing points are computed once per edge pair and shared by both
/// edges, so the two halves of a crossing land on bit-identical nodes.
/// An edge that runs collinearly along another cannot be split at points
/// alone; for those the covered stretch and the uncovered remainder are
/// emitted as separate segments instead.
pub fn split_at_intersections(edges: &[Line<f64>]) -> Vec<Line<f64>> {
    let mut crossings: Vec<Vec<Coord<f64>>> = vec![Vec::new(); edges.len()];
    let mut overlaps: Vec<Vec<Line<f64>>> = vec![Vec::new(); edges.len()];

    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            match line_intersection(edges[i], edges[j]) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    crossings[i].push(intersection);
                    crossings[j].push(intersection);
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    overlaps[i].push(intersection);
                    overlaps[j].push(intersection);
                }
                None => {}
            }
        }
    }

    let mut segments = Vec::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        let pieces = split_edge(edge, &crossings[i], &overlaps[i])
            .unwrap_or_else(|_| split_by_overlay(edge, &crossings[i], &overlaps[i]));
        segments.extend(pieces);
    }
    segments
}

/// Split an edge at crossing points.
fn split_edge(edge: &Line<f64>, crossings: &[Coord<f64>], overlaps: &[Line<f64>]) -> Result<Vec<Line<f64>>> {
    if !overlaps.is_empty() {
        return Err(Error::CollinearOverlap);
    }
    pieces_between(edge, crossings.iter().copied())
}

/// Fallback for edges that overlap other edges: node the edge at crossings
/// and at both ends of every overlap, which yields the intersection with
/// the other edges and the difference from them as separate pieces.
fn split_by_overlay(edge: &Line<f64>, crossings: &[Coord<f64>], overlaps: &[Line<f64>]) -> Vec<Line<f64>> {
    let stops = crossings
        .iter()
        .copied()
        .chain(overlaps.iter().flat_map(|overlap| [overlap.start, overlap.end]));
    pieces_between(edge, stops).unwrap_or_default()
}

/// Cut `edge` at every stop that lies strictly inside it.
fn pieces_between(edge: &Line<f64>, stops: impl Iterator<Item = Coord<f64>>) -> Result<Vec<Line<f64>>> {
    let delta = edge.delta();
    let length_squared = delta.x * delta.x + delta.y * delta.y;
    if length_squared == 0.0 {
        return Err(Error::DegenerateEdge);
    }

    let mut inner: Vec<(f64, Coord<f64>)> = stops
        .filter(|stop| *stop != edge.start && *stop != edge.end)
        .filter_map(|stop| {
            let t = ((stop.x - edge.start.x) * delta.x + (stop.y - edge.start.y) * delta.y) / length_squared;
            (t > 0.0 && t < 1.0).then_some((t, stop))
        })
        .collect();
    inner.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut pieces = Vec::with_capacity(inner.len() + 1);
    let mut from = edge.start;
    for (_, stop) in inner {
        if stop != from {
            pieces.push(Line::new(from, stop));
            from = stop;
        }
    }
    if from != edge.end {
        pieces.push(Line::new(from, edge.end));
    }
    Ok(pieces)
}

/// Drop segments that are geometrically identical to an earlier one.
///
/// Equality is exact: same endpoints, in either direction.
pub fn remove_duplicates(segments: Vec<Line<f64>>) -> Vec<Line<f64>> {
    let mut unique: Vec<Line<f64>> = Vec::with_capacity(segments.len());
    for segment in segments {
        let duplicate = unique.iter().any(|kept| {
            (kept.start == segment.start && kept.end == segment.end)
                || (kept.start == segment.end && kept.end == segment.start)
        });
        if !duplicate {
            unique.push(segment);
        }
    }
    unique
}

/// The polygon with the greatest area; the first one wins ties.
pub fn largest_polygon(polygons: Vec<Polygon<f64>>) -> Option<Polygon<f64>> {
    let mut polygons = polygons.into_iter();
    let mut largest = polygons.next()?;
    let mut largest_area = largest.unsigned_area();
    for polygon in polygons {
        let area = polygon.unsigned_area();
        if area > largest_area {
            largest = polygon;
            largest_area = area;
        }
    }
    Some(largest)
}

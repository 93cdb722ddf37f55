// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The reconstructed outline of a plan object.
//!
//! Reconstruction does not always yield a polygon: a shape with one point is
//! a point, an open path is a line, and an unrepairable ring is empty.
//! [`Shape`] keeps those cases explicit so that every query below has a
//! defined answer for each of them.

use std::f64::consts::TAU;

use geo::{Area, Coord, Distance, Euclidean, Geometry, Line, LineString, Point, Polygon};

/// A reconstructed outline.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// No geometry at all.
    Empty,
    Point(Point<f64>),
    Line(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl Shape {
    /// An axis-aligned rectangle with its first corner at `(x, y)`.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Polygon(Polygon::new(
            LineString::from(vec![
                (x, y),
                (x + width, y),
                (x + width, y + height),
                (x, y + height),
            ]),
            vec![],
        ))
    }

    /// A disc sampled as a regular polygon with `segments` vertices.
    pub fn disc(center: Coord<f64>, radius: f64, segments: usize) -> Self {
        if radius <= 0.0 {
            return Shape::Point(center.into());
        }
        let segments = segments.max(4);
        let ring: Vec<Coord<f64>> = (0..segments)
            .map(|i| {
                let angle = TAU * i as f64 / segments as f64;
                Coord {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                }
            })
            .collect();
        Shape::Polygon(Polygon::new(LineString::new(ring), vec![]))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Shape::Empty)
    }

    pub fn as_polygon(&self) -> Option<&Polygon<f64>> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Area of the shape; zero for everything but polygons.
    pub fn area(&self) -> f64 {
        match self {
            Shape::Polygon(polygon) => polygon.unsigned_area(),
            _ => 0.0,
        }
    }

    /// Boundary segments in ring order.
    ///
    /// For polygons these are the exterior ring edges (edge `i` runs from
    /// vertex `i` to vertex `i + 1`), for lines the line's own segments.
    pub fn edges(&self) -> Vec<Line<f64>> {
        match self {
            Shape::Polygon(polygon) => polygon.exterior().lines().collect(),
            Shape::Line(line) => line.lines().collect(),
            Shape::Point(_) | Shape::Empty => Vec::new(),
        }
    }

    pub fn num_edges(&self) -> usize {
        match self {
            Shape::Polygon(polygon) => polygon.exterior().0.len().saturating_sub(1),
            Shape::Line(line) => line.0.len().saturating_sub(1),
            Shape::Point(_) | Shape::Empty => 0,
        }
    }

    /// The shape as a `geo` geometry, or `None` when empty.
    pub fn to_geometry(&self) -> Option<Geometry<f64>> {
        match self {
            Shape::Empty => None,
            Shape::Point(point) => Some(Geometry::Point(*point)),
            Shape::Line(line) => Some(Geometry::LineString(line.clone())),
            Shape::Polygon(polygon) => Some(Geometry::Polygon(polygon.clone())),
        }
    }

    /// Minimum euclidean distance between two shapes.
    ///
    /// Overlapping shapes are at distance zero. An empty shape is infinitely
    /// far from everything.
    pub fn distance(&self, other: &Shape) -> f64 {
        match (self, other) {
            (Shape::Empty, _) | (_, Shape::Empty) => f64::INFINITY,
            (Shape::Point(a), Shape::Point(b)) => Euclidean.distance(*a, *b),
            (Shape::Point(point), Shape::Line(line)) | (Shape::Line(line), Shape::Point(point)) => {
                Euclidean.distance(point, line)
            }
            (Shape::Point(point), Shape::Polygon(polygon))
            | (Shape::Polygon(polygon), Shape::Point(point)) => Euclidean.distance(point, polygon),
            (Shape::Line(a), Shape::Line(b)) => Euclidean.distance(a, b),
            (Shape::Line(line), Shape::Polygon(polygon))
            | (Shape::Polygon(polygon), Shape::Line(line)) => Euclidean.distance(line, polygon),
            (Shape::Polygon(a), Shape::Polygon(b)) => Euclidean.distance(a, b),
        }
    }
}

impl From<Polygon<f64>> for Shape {
    fn from(polygon: Polygon<f64>) -> Self {
        if polygon.exterior().0.is_empty() {
            Shape::Empty
        } else {
            Shape::Polygon(polygon)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Shape {
        Shape::rect(0.0, 0.0, size, size)
    }

    #[test]
    fn rect_has_four_edges_in_ring_order() {
        let shape = Shape::rect(1.0, 2.0, 3.0, 4.0);
        let edges = shape.edges();
        assert_eq!(shape.num_edges(), 4);
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], Line::new((1.0, 2.0), (4.0, 2.0)));
        assert_eq!(edges[2], Line::new((4.0, 6.0), (1.0, 6.0)));
        assert_relative_eq!(shape.area(), 12.0);
    }

    #[test]
    fn disc_area_approaches_circle() {
        let disc = Shape::disc(Coord { x: 0.0, y: 0.0 }, 1.0, 64);
        assert_eq!(disc.num_edges(), 64);
        assert_relative_eq!(disc.area(), std::f64::consts::PI, max_relative = 0.01);
    }

    #[test]
    fn zero_radius_disc_is_a_point() {
        let disc = Shape::disc(Coord { x: 2.0, y: 3.0 }, 0.0, 64);
        assert_eq!(disc, Shape::Point(Point::new(2.0, 3.0)));
    }

    #[test]
    fn degenerate_shapes_have_no_area_or_edges() {
        assert_eq!(Shape::Empty.area(), 0.0);
        assert_eq!(Shape::Empty.num_edges(), 0);
        assert_eq!(Shape::Point(Point::new(1.0, 1.0)).edges().len(), 0);
        let line = Shape::Line(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
        assert_eq!(line.num_edges(), 2);
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn distances_between_shapes() {
        let a = square(10.0);
        let b = Shape::rect(10.5, 0.0, 1.0, 10.0);
        assert_relative_eq!(a.distance(&b), 0.5);
        assert_relative_eq!(b.distance(&a), 0.5);

        let inside = Shape::Point(Point::new(5.0, 5.0));
        assert_eq!(a.distance(&inside), 0.0);

        let line = Shape::Line(LineString::from(vec![(0.0, 12.0), (10.0, 12.0)]));
        assert_relative_eq!(a.distance(&line), 2.0);

        assert!(a.distance(&Shape::Empty).is_infinite());
    }

    #[test]
    fn empty_polygon_converts_to_empty_shape() {
        let empty = Polygon::new(LineString::new(vec![]), vec![]);
        assert_eq!(Shape::from(empty), Shape::Empty);
    }
}

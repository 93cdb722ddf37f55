// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The state every plan object shares.
//!
//! A [`PlanObject`] borrows its element from the parsed document, knows
//! where its outline comes from, reconstructs that outline the first time
//! it is asked for, and keeps an adjacency table.

use std::cell::OnceCell;

use geo::{Coord, Line, LineString};
use plangraph_core::{Point2D, ShapeKind, ShapeNode};
use plangraph_geometry::{coords_from_points, polygon_from_points, Shape};

use crate::adjacency::AdjacencyList;
use crate::error::{Error, Result};

/// Where an outline is built from.
///
/// Resolved while the floor is loaded, so an element that cannot yield an
/// outline fails loading instead of failing a later query.
#[derive(Debug, Clone)]
pub enum OutlineSource<'a> {
    /// An ordered point list, repaired by shape reconstruction.
    Points(&'a [Point2D]),
    /// An axis-aligned box.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// A sampled disc.
    Circle { center: Coord<f64>, radius: f64, segments: usize },
    /// A sampled path, taken as an open line.
    Path(&'a [Point2D]),
}

impl<'a> OutlineSource<'a> {
    /// The point list of a `<polygon>`/`<polyline>` element.
    ///
    /// Rooms, walls, railings and openings are always drawn this way.
    pub fn points(element: &'a ShapeNode, entity: &'static str, index: usize) -> Result<Self> {
        element.points().map(OutlineSource::Points).ok_or(Error::MissingOutline {
            entity,
            index,
            found: element.shape.name(),
        })
    }

    /// The point list of the element's first child, where rooms, walls,
    /// railings and openings keep their outline.
    pub fn first_child_points(element: &'a ShapeNode, entity: &'static str, index: usize) -> Result<Self> {
        Self::points(element.first_child().unwrap_or(element), entity, index)
    }

    /// Any drawable leaf element, as fixtures use.
    pub fn any_shape(element: &'a ShapeNode, index: usize, circle_segments: usize) -> Result<Self> {
        match &element.shape {
            ShapeKind::Polygon { points } | ShapeKind::Polyline { points } => Ok(OutlineSource::Points(points)),
            ShapeKind::Rect { x, y, width, height } => Ok(OutlineSource::Rect {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            }),
            ShapeKind::Circle { cx, cy, rx, ry } => Ok(OutlineSource::Circle {
                center: Coord { x: *cx, y: *cy },
                radius: rx.min(*ry),
                segments: circle_segments,
            }),
            ShapeKind::Path { points } => Ok(OutlineSource::Path(points)),
            ShapeKind::Group => Err(Error::UnsupportedShape {
                index,
                found: element.shape.name(),
            }),
        }
    }

    /// Build the outline.
    pub fn reconstruct(&self) -> Shape {
        match self {
            OutlineSource::Points(points) => polygon_from_points(&coords_from_points(points)),
            OutlineSource::Rect { x, y, width, height } => Shape::rect(*x, *y, *width, *height),
            OutlineSource::Circle { center, radius, segments } => Shape::disc(*center, *radius, *segments),
            OutlineSource::Path(points) => {
                let mut coords = coords_from_points(points);
                if coords.len() >= 2 && coords[0] == coords[1] {
                    coords.remove(0);
                }
                match coords.len() {
                    0 => Shape::Empty,
                    1 => Shape::Point(coords[0].into()),
                    _ => Shape::Line(LineString::new(coords)),
                }
            }
        }
    }
}

/// Shared state of every plan object.
#[derive(Debug)]
pub struct PlanObject<'a> {
    index: usize,
    element: &'a ShapeNode,
    source: OutlineSource<'a>,
    outline: OnceCell<Shape>,
    adjacencies: AdjacencyList,
}

impl<'a> PlanObject<'a> {
    pub fn new(index: usize, element: &'a ShapeNode, source: OutlineSource<'a>) -> Self {
        Self {
            index,
            element,
            source,
            outline: OnceCell::new(),
            adjacencies: AdjacencyList::new(),
        }
    }

    /// Position in the owning collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The document element this object was built from.
    pub fn element(&self) -> &'a ShapeNode {
        self.element
    }

    /// Class tokens of the element.
    pub fn classes(&self) -> &'a [String] {
        &self.element.classes
    }

    /// Class tokens after the leading kind token.
    pub fn types(&self) -> &'a [String] {
        self.classes().get(1..).unwrap_or(&[])
    }

    /// Types joined with spaces.
    pub fn full_type(&self) -> String {
        self.types().join(" ")
    }

    /// The outline as drawn, reconstructed on first use.
    pub fn outline(&self) -> &Shape {
        self.outline.get_or_init(|| self.source.reconstruct())
    }

    pub fn adjacencies(&self) -> &AdjacencyList {
        &self.adjacencies
    }

    pub(crate) fn adjacencies_mut(&mut self) -> &mut AdjacencyList {
        &mut self.adjacencies
    }
}

/// Anything with an outline on the plan.
pub trait SpatialEntity<'a> {
    fn object(&self) -> &PlanObject<'_>;

    /// The current outline.
    fn outline(&self) -> &Shape {
        self.object().outline()
    }

    fn edges(&self) -> Vec<Line<f64>> {
        self.outline().edges()
    }

    fn num_edges(&self) -> usize {
        self.outline().num_edges()
    }

    fn index(&self) -> usize {
        self.object().index()
    }

    fn adjacencies(&self) -> &AdjacencyList {
        self.object().adjacencies()
    }

    fn area(&self) -> f64 {
        self.outline().area()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walls, railings and the openings set into walls.
//!
//! A divider is drawn as a long thin quadrilateral. Edges 0 and 2 are its
//! two faces, edges 1 and 3 its end caps. Only the faces take part in
//! closeness tests; a divider drawn with any other edge count is treated as
//! degenerate and ignored by adjacency and overlap resolution.
//!
//! Once overlap resolution has trimmed a wall, its edge order no longer
//! follows the drawing, and every edge of the trimmed outline is tested.

use geo::Line;
use plangraph_core::{ElementKind, ShapeNode};
use plangraph_geometry::Shape;

use crate::entity::{OutlineSource, PlanObject, SpatialEntity};
use crate::error::Result;
use crate::keys::{OpeningId, RailingId, RoomId, WallId};

/// Edge count of a well-formed divider outline.
const DIVIDER_EDGES: usize = 4;

/// Behaviour shared by walls and railings.
pub trait Divider<'a>: SpatialEntity<'a> {
    /// The outline as drawn, before any trimming.
    fn drawn_outline(&self) -> &Shape {
        self.object().outline()
    }

    /// Whether the drawn outline has the four edges of a divider.
    fn is_eligible(&self) -> bool {
        self.drawn_outline().num_edges() == DIVIDER_EDGES
    }

    /// Edges of the current outline tested for closeness, with their
    /// positions in its edge list.
    fn eligible_edges_with_indexes(&self) -> Vec<(usize, Line<f64>)> {
        face_edges(self.outline())
    }

    /// Edges tested for closeness; empty for degenerate dividers.
    fn eligible_edges(&self) -> Vec<Line<f64>> {
        self.eligible_edges_with_indexes().into_iter().map(|(_, edge)| edge).collect()
    }
}

fn face_edges(outline: &Shape) -> Vec<(usize, Line<f64>)> {
    let edges = outline.edges();
    if edges.len() == DIVIDER_EDGES {
        vec![(0, edges[0]), (2, edges[2])]
    } else {
        Vec::new()
    }
}

/// Whether an opening is a door or a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
        }
    }
}

impl std::fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A door or window, owned by the wall it is set into.
#[derive(Debug)]
pub struct Opening<'a> {
    object: PlanObject<'a>,
    kind: OpeningKind,
    wall: WallId,
    pub(crate) rooms: Vec<RoomId>,
}

impl<'a> Opening<'a> {
    fn new(wall: WallId, index: usize, kind: OpeningKind, element: &'a ShapeNode) -> Result<Self> {
        let outline = OutlineSource::first_child_points(element, kind.as_str(), index)?;
        Ok(Self {
            object: PlanObject::new(index, element, outline),
            kind,
            wall,
            rooms: Vec::new(),
        })
    }

    pub fn id(&self) -> OpeningId {
        OpeningId {
            wall: self.wall,
            index: self.object.index(),
        }
    }

    pub fn kind(&self) -> OpeningKind {
        self.kind
    }

    /// The wall this opening is set into.
    pub fn wall(&self) -> WallId {
        self.wall
    }

    /// Rooms this opening leads into, in the order they were found.
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }
}

impl<'a> SpatialEntity<'a> for Opening<'a> {
    fn object(&self) -> &PlanObject<'_> {
        &self.object
    }
}

/// A wall.
///
/// The one entity whose outline can change after it is first built: wall
/// overlap resolution replaces it with a trimmed polygon.
#[derive(Debug)]
pub struct Wall<'a> {
    object: PlanObject<'a>,
    openings: Vec<Opening<'a>>,
    trimmed: Option<Shape>,
}

impl<'a> Wall<'a> {
    /// Builds a wall and the doors and windows grouped under it.
    pub fn new(index: usize, element: &'a ShapeNode) -> Result<Self> {
        let outline = OutlineSource::first_child_points(element, "Wall", index)?;
        let id = WallId(index);

        let mut openings = Vec::new();
        for child in element.child_groups() {
            let kind = match child.element_kind() {
                ElementKind::Door => OpeningKind::Door,
                ElementKind::Window => OpeningKind::Window,
                _ => continue,
            };
            openings.push(Opening::new(id, openings.len(), kind, child)?);
        }

        Ok(Self {
            object: PlanObject::new(index, element, outline),
            openings,
            trimmed: None,
        })
    }

    pub fn id(&self) -> WallId {
        WallId(self.object.index())
    }

    /// Whether the wall is on the building envelope.
    pub fn is_exterior(&self) -> bool {
        self.object.element().has_class("External")
    }

    pub fn openings(&self) -> &[Opening<'a>] {
        &self.openings
    }

    pub fn opening(&self, index: usize) -> Option<&Opening<'a>> {
        self.openings.get(index)
    }

    /// Whether overlap resolution has replaced the drawn outline.
    pub fn is_trimmed(&self) -> bool {
        self.trimmed.is_some()
    }

    pub(crate) fn replace_outline(&mut self, outline: Shape) {
        self.trimmed = Some(outline);
    }

    pub(crate) fn openings_mut(&mut self) -> &mut [Opening<'a>] {
        &mut self.openings
    }

    pub(crate) fn object_mut(&mut self) -> &mut PlanObject<'a> {
        &mut self.object
    }
}

impl<'a> SpatialEntity<'a> for Wall<'a> {
    fn object(&self) -> &PlanObject<'_> {
        &self.object
    }

    fn outline(&self) -> &Shape {
        match &self.trimmed {
            Some(trimmed) => trimmed,
            None => self.object.outline(),
        }
    }
}

impl<'a> Divider<'a> for Wall<'a> {
    fn eligible_edges_with_indexes(&self) -> Vec<(usize, Line<f64>)> {
        match &self.trimmed {
            Some(trimmed) => trimmed.edges().into_iter().enumerate().collect(),
            None => face_edges(self.drawn_outline()),
        }
    }
}

/// A railing.
#[derive(Debug)]
pub struct Railing<'a> {
    object: PlanObject<'a>,
}

impl<'a> Railing<'a> {
    pub fn new(index: usize, element: &'a ShapeNode) -> Result<Self> {
        let outline = OutlineSource::first_child_points(element, "Railing", index)?;
        Ok(Self {
            object: PlanObject::new(index, element, outline),
        })
    }

    pub fn id(&self) -> RailingId {
        RailingId(self.object.index())
    }

    pub(crate) fn object_mut(&mut self) -> &mut PlanObject<'a> {
        &mut self.object
    }
}

impl<'a> SpatialEntity<'a> for Railing<'a> {
    fn object(&self) -> &PlanObject<'_> {
        &self.object
    }
}

impl<'a> Divider<'a> for Railing<'a> {}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One floor of a plan and the passes that connect it.
//!
//! Loading builds rooms, walls (with their openings), railings and fixtures
//! from the floor's `Floorplan` group, in document order. Analysis then runs
//! three passes, each relying on the previous one:
//!
//! 1. wall overlap resolution, which trims wall outlines;
//! 2. adjacency, comparing every room with every wall and railing and with
//!    every later room, and linking doors and windows to the rooms they
//!    open into;
//! 3. containment, placing each fixture in the first room it overlaps.

use geo::Line;
use plangraph_core::{ElementKind, ShapeNode};
use plangraph_geometry::{relate_matches, INTERIOR_OVERLAP};
use serde::Serialize;

use crate::adjacency::{self, AdjacencyFact, AdjacencyList};
use crate::config::FloorConfig;
use crate::divider::{Divider, Opening, OpeningKind, Railing, Wall};
use crate::entity::SpatialEntity;
use crate::error::{Error, Result};
use crate::fixture::Fixture;
use crate::keys::{EntityKey, FixtureId, OpeningId, RailingId, RoomId, WallId};
use crate::overlap::{resolve_wall_overlaps, OverlapReport};
use crate::room::Room;

/// Summary of one floor analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub overlaps: OverlapReport,
    /// Adjacency facts recorded (each counted once, not per side).
    pub adjacencies: usize,
    /// Fixtures placed in a room.
    pub placed_fixtures: usize,
}

/// One floor of a plan.
#[derive(Debug)]
pub struct Floor<'a> {
    index: usize,
    element: &'a ShapeNode,
    config: FloorConfig,
    rooms: Vec<Room<'a>>,
    walls: Vec<Wall<'a>>,
    railings: Vec<Railing<'a>>,
    fixtures: Vec<Fixture<'a>>,
}

impl<'a> Floor<'a> {
    /// Build every plan object of a `Floor` element.
    pub fn load(index: usize, element: &'a ShapeNode, config: FloorConfig) -> Result<Self> {
        let plan = element
            .children_with_class("Floorplan")
            .next()
            .ok_or(Error::MissingFloorplan)?;

        let mut floor = Self {
            index,
            element,
            config,
            rooms: Vec::new(),
            walls: Vec::new(),
            railings: Vec::new(),
            fixtures: Vec::new(),
        };
        floor.find_objects(plan)?;

        tracing::debug!(
            floor = index,
            rooms = floor.rooms.len(),
            walls = floor.walls.len(),
            railings = floor.railings.len(),
            fixtures = floor.fixtures.len(),
            "Loaded floor"
        );
        Ok(floor)
    }

    fn find_objects(&mut self, plan: &'a ShapeNode) -> Result<()> {
        for child in plan.child_groups() {
            match child.element_kind() {
                ElementKind::Space => {
                    let room = Room::new(self.rooms.len(), child)?;
                    self.rooms.push(room);
                }
                ElementKind::Wall => {
                    let wall = Wall::new(self.walls.len(), child)?;
                    self.walls.push(wall);
                }
                ElementKind::Railing => {
                    let railing = Railing::new(self.railings.len(), child)?;
                    self.railings.push(railing);
                }
                ElementKind::FixedFurniture => self.add_fixture(child)?,
                ElementKind::FixedFurnitureSet => {
                    for grandchild in child.child_groups() {
                        self.add_fixture(grandchild)?;
                    }
                }
                ElementKind::Model
                | ElementKind::Floor
                | ElementKind::Floorplan
                | ElementKind::Door
                | ElementKind::Window
                | ElementKind::Other => {}
            }
        }
        Ok(())
    }

    fn add_fixture(&mut self, element: &'a ShapeNode) -> Result<()> {
        let fixture = Fixture::new(self.fixtures.len(), element, self.config.circle_segments)?;
        self.fixtures.push(fixture);
        Ok(())
    }

    /// Position of this floor in its model.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn element(&self) -> &'a ShapeNode {
        self.element
    }

    pub fn config(&self) -> &FloorConfig {
        &self.config
    }

    pub fn rooms(&self) -> &[Room<'a>] {
        &self.rooms
    }

    pub fn walls(&self) -> &[Wall<'a>] {
        &self.walls
    }

    pub fn railings(&self) -> &[Railing<'a>] {
        &self.railings
    }

    pub fn fixtures(&self) -> &[Fixture<'a>] {
        &self.fixtures
    }

    pub fn room(&self, id: RoomId) -> Option<&Room<'a>> {
        self.rooms.get(id.index())
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall<'a>> {
        self.walls.get(id.index())
    }

    pub fn railing(&self, id: RailingId) -> Option<&Railing<'a>> {
        self.railings.get(id.index())
    }

    pub fn fixture(&self, id: FixtureId) -> Option<&Fixture<'a>> {
        self.fixtures.get(id.index())
    }

    pub fn opening(&self, id: OpeningId) -> Option<&Opening<'a>> {
        self.wall(id.wall)?.opening(id.index)
    }

    /// Every door and window, wall by wall.
    pub fn openings(&self) -> impl Iterator<Item = &Opening<'a>> + '_ {
        self.walls.iter().flat_map(|wall| wall.openings())
    }

    /// The adjacency table of a room, wall or railing.
    pub fn adjacencies(&self, key: EntityKey) -> Option<&AdjacencyList> {
        match key {
            EntityKey::Room(id) => self.room(id).map(|room| room.adjacencies()),
            EntityKey::Wall(id) => self.wall(id).map(|wall| wall.adjacencies()),
            EntityKey::Railing(id) => self.railing(id).map(|railing| railing.adjacencies()),
        }
    }

    /// Total room area plus total current wall area.
    pub fn area(&self) -> f64 {
        let rooms: f64 = self.rooms.iter().map(|room| room.area()).sum();
        let walls: f64 = self.walls.iter().map(|wall| wall.area()).sum();
        rooms + walls
    }

    /// Run overlap resolution, adjacency and containment, in that order.
    pub fn analyze(&mut self) -> AnalysisReport {
        let overlaps = self.remove_wall_overlaps();
        let adjacencies = self.find_adjacencies();
        let placed_fixtures = self.find_inside();

        tracing::info!(
            floor = self.index,
            rooms = self.rooms.len(),
            walls = self.walls.len(),
            adjacencies,
            placed_fixtures,
            forced_overlaps = overlaps.forced.len(),
            "Floor analysis complete"
        );
        AnalysisReport {
            overlaps,
            adjacencies,
            placed_fixtures,
        }
    }

    /// Trim walls so that no two properly overlap.
    pub fn remove_wall_overlaps(&mut self) -> OverlapReport {
        resolve_wall_overlaps(&mut self.walls, self.config.close_edge_tolerance)
    }

    /// Record adjacency between rooms and walls, railings and other rooms.
    ///
    /// Expects wall overlaps to be resolved already. Returns the number of
    /// facts recorded.
    pub fn find_adjacencies(&mut self) -> usize {
        let tolerance = self.config.close_edge_tolerance;
        let room_edges: Vec<Vec<Line<f64>>> = self.rooms.iter().map(|room| room.edges()).collect();
        let wall_faces: Vec<Vec<Line<f64>>> = self.walls.iter().map(|wall| wall.eligible_edges()).collect();
        let railing_faces: Vec<Vec<Line<f64>>> = self.railings.iter().map(|railing| railing.eligible_edges()).collect();

        let mut found: Vec<(EntityKey, EntityKey, AdjacencyFact)> = Vec::new();
        for (r, room) in self.rooms.iter().enumerate() {
            let key = EntityKey::Room(room.id());

            for (wall, faces) in self.walls.iter().zip(&wall_faces) {
                if !wall.is_eligible() {
                    continue;
                }
                if let Some(fact) = adjacency::compare(room.outline(), &room_edges[r], wall.outline(), faces, tolerance) {
                    found.push((key, wall.id().into(), fact));
                }
            }

            for (railing, faces) in self.railings.iter().zip(&railing_faces) {
                if !railing.is_eligible() {
                    continue;
                }
                if let Some(fact) = adjacency::compare(room.outline(), &room_edges[r], railing.outline(), faces, tolerance) {
                    found.push((key, railing.id().into(), fact));
                }
            }

            for (o, other) in self.rooms.iter().enumerate().skip(r + 1) {
                if let Some(fact) = adjacency::compare(room.outline(), &room_edges[r], other.outline(), &room_edges[o], tolerance) {
                    found.push((key, other.id().into(), fact));
                }
            }
        }

        let count = found.len();
        tracing::debug!(floor = self.index, facts = count, "Found adjacencies");
        for (a, b, fact) in found {
            self.link(a, b, fact);
        }
        count
    }

    /// Record a fact on both sides; a wall that gains a room checks its
    /// openings against that room.
    fn link(&mut self, a: EntityKey, b: EntityKey, fact: AdjacencyFact) {
        self.adjacencies_mut(a).add(b, fact.clone());
        self.adjacencies_mut(b).add(a, fact);

        if let (EntityKey::Room(room), EntityKey::Wall(wall)) | (EntityKey::Wall(wall), EntityKey::Room(room)) = (a, b) {
            self.check_openings(wall, room);
        }
    }

    fn adjacencies_mut(&mut self, key: EntityKey) -> &mut AdjacencyList {
        match key {
            EntityKey::Room(id) => self.rooms[id.index()].object_mut().adjacencies_mut(),
            EntityKey::Wall(id) => self.walls[id.index()].object_mut().adjacencies_mut(),
            EntityKey::Railing(id) => self.railings[id.index()].object_mut().adjacencies_mut(),
        }
    }

    /// Link every opening of `wall` that lies within tolerance of `room`.
    fn check_openings(&mut self, wall: WallId, room: RoomId) {
        let tolerance = self.config.close_edge_tolerance;
        let Floor { rooms, walls, .. } = self;
        let room_entity = &mut rooms[room.index()];

        for opening in walls[wall.index()].openings_mut() {
            if opening.outline().distance(room_entity.outline()) < tolerance {
                opening.rooms.push(room);
                let id = opening.id();
                match opening.kind() {
                    OpeningKind::Door => room_entity.doors.insert(id),
                    OpeningKind::Window => room_entity.windows.insert(id),
                };
            }
        }
    }

    /// Place each fixture in the first room, in floor order, whose interior
    /// it overlaps. Returns the number of fixtures placed.
    pub fn find_inside(&mut self) -> usize {
        let mut placed = 0;
        for f in 0..self.fixtures.len() {
            let fixture = &self.fixtures[f];
            let host = self
                .rooms
                .iter()
                .find(|room| relate_matches(fixture.outline(), room.outline(), INTERIOR_OVERLAP))
                .map(Room::id);

            if let Some(room) = host {
                self.fixtures[f].rooms.insert(room);
                self.rooms[room.index()].fixtures.insert(FixtureId(f));
                placed += 1;
            }
        }
        tracing::debug!(floor = self.index, placed, unplaced = self.fixtures.len() - placed, "Placed fixtures");
        placed
    }

    /// Walls adjacent to `room` that are on the building envelope.
    pub fn adjacent_exterior_walls(&self, room: RoomId) -> Vec<WallId> {
        let Some(room) = self.room(room) else {
            return Vec::new();
        };
        room.adjacent_walls()
            .into_iter()
            .filter(|&id| self.wall(id).is_some_and(Wall::is_exterior))
            .collect()
    }

    /// Rooms reachable from `room` through a door that opens into exactly
    /// two rooms.
    pub fn connected_rooms(&self, room: RoomId) -> Vec<RoomId> {
        let Some(entity) = self.room(room) else {
            return Vec::new();
        };
        entity
            .doors()
            .filter_map(|door| self.opening(door))
            .filter_map(|door| match door.rooms() {
                [first, second] if *first == room => Some(*second),
                [first, _] => Some(*first),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> ShapeNode {
        ShapeNode::polygon([(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn floor_element(plan_children: Vec<ShapeNode>) -> ShapeNode {
        ShapeNode::group(["Floor"], vec![ShapeNode::group(["Floorplan"], plan_children)])
    }

    #[test]
    fn objects_are_dispatched_by_class() {
        let element = floor_element(vec![
            ShapeNode::group(["Space", "Kitchen"], vec![square(0.0, 0.0, 4.0)]),
            ShapeNode::group(["Wall"], vec![square(4.0, 0.0, 1.0)]),
            ShapeNode::group(["Railing"], vec![square(9.0, 0.0, 1.0)]),
            ShapeNode::group(
                ["FixedFurniture", "Sink"],
                vec![ShapeNode::group(["BoundaryPolygon"], vec![square(1.0, 1.0, 1.0)])],
            ),
            ShapeNode::group(
                ["FixedFurnitureSet"],
                vec![
                    ShapeNode::group(
                        ["FixedFurniture", "Stove"],
                        vec![ShapeNode::group(["BoundaryPolygon"], vec![square(2.0, 2.0, 1.0)])],
                    ),
                    ShapeNode::group(
                        ["FixedFurniture", "Dishwasher"],
                        vec![ShapeNode::group(["BoundaryPolygon"], vec![square(3.0, 2.0, 1.0)])],
                    ),
                ],
            ),
            ShapeNode::group(["Stair"], vec![square(20.0, 0.0, 2.0)]),
            square(30.0, 30.0, 1.0),
        ]);

        let floor = Floor::load(0, &element, FloorConfig::default()).unwrap();
        assert_eq!(floor.rooms().len(), 1);
        assert_eq!(floor.walls().len(), 1);
        assert_eq!(floor.railings().len(), 1);
        assert_eq!(floor.fixtures().len(), 3);
        assert_eq!(floor.fixtures()[2].id(), FixtureId(2));
        assert_relative_eq!(floor.area(), 17.0);
    }

    #[test]
    fn missing_floorplan_fails() {
        let element = ShapeNode::group(["Floor"], vec![]);
        assert!(matches!(
            Floor::load(0, &element, FloorConfig::default()),
            Err(Error::MissingFloorplan)
        ));
    }

    #[test]
    fn construction_errors_abort_the_floor() {
        let element = floor_element(vec![ShapeNode::group(
            ["FixedFurniture", "Sink"],
            vec![square(0.0, 0.0, 1.0)],
        )]);
        assert!(matches!(
            Floor::load(0, &element, FloorConfig::default()),
            Err(Error::BoundaryNotFound(0))
        ));
    }

    #[test]
    fn rooms_compare_with_later_rooms_once() {
        let element = floor_element(vec![
            ShapeNode::group(["Space", "Bedroom"], vec![square(0.0, 0.0, 4.0)]),
            ShapeNode::group(["Space", "Bath"], vec![square(4.0, 0.0, 4.0)]),
        ]);
        let mut floor = Floor::load(0, &element, FloorConfig::default()).unwrap();
        assert_eq!(floor.find_adjacencies(), 1);

        let first = floor.room(RoomId(0)).unwrap();
        let second = floor.room(RoomId(1)).unwrap();
        assert_eq!(first.adjacent_rooms(), vec![RoomId(1)]);
        assert_eq!(second.adjacent_rooms(), vec![RoomId(0)]);
        assert_eq!(
            first.adjacencies().facts(RoomId(1).into()),
            second.adjacencies().facts(RoomId(0).into())
        );
    }

    #[test]
    fn degenerate_walls_take_no_part_in_adjacency() {
        let element = floor_element(vec![
            ShapeNode::group(["Space", "Hall"], vec![square(0.0, 0.0, 4.0)]),
            ShapeNode::group(
                ["Wall"],
                vec![ShapeNode::polygon([(4.0, 0.0), (5.0, 0.0), (5.0, 4.0), (4.5, 4.5), (4.0, 4.0)])],
            ),
        ]);
        let mut floor = Floor::load(0, &element, FloorConfig::default()).unwrap();
        assert_eq!(floor.find_adjacencies(), 0);
        assert!(floor.room(RoomId(0)).unwrap().adjacent_walls().is_empty());
    }
}

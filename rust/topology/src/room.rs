// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::hash::BuildHasherDefault;

use indexmap::IndexSet;
use plangraph_core::ShapeNode;
use rustc_hash::FxHasher;

use crate::category::RoomCategory;
use crate::entity::{OutlineSource, PlanObject, SpatialEntity};
use crate::error::Result;
use crate::keys::{FixtureId, OpeningId, RailingId, RoomId, WallId};

pub(crate) type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// A `Space` element.
///
/// Doors, windows and fixtures are back-references filled in by the floor's
/// analysis passes.
#[derive(Debug)]
pub struct Room<'a> {
    object: PlanObject<'a>,
    pub(crate) doors: FxIndexSet<OpeningId>,
    pub(crate) windows: FxIndexSet<OpeningId>,
    pub(crate) fixtures: FxIndexSet<FixtureId>,
}

impl<'a> Room<'a> {
    pub fn new(index: usize, element: &'a ShapeNode) -> Result<Self> {
        let outline = OutlineSource::first_child_points(element, "Room", index)?;
        Ok(Self {
            object: PlanObject::new(index, element, outline),
            doors: FxIndexSet::default(),
            windows: FxIndexSet::default(),
            fixtures: FxIndexSet::default(),
        })
    }

    pub fn id(&self) -> RoomId {
        RoomId(self.object.index())
    }

    /// Class tokens after `Space`.
    pub fn types(&self) -> &'a [String] {
        self.object.types()
    }

    pub fn full_type(&self) -> String {
        self.object.full_type()
    }

    pub fn category(&self) -> RoomCategory {
        RoomCategory::from_types(self.types())
    }

    pub fn is_outdoor(&self) -> bool {
        self.types().first().is_some_and(|t| t == "Outdoor")
    }

    pub fn doors(&self) -> impl Iterator<Item = OpeningId> + '_ {
        self.doors.iter().copied()
    }

    pub fn windows(&self) -> impl Iterator<Item = OpeningId> + '_ {
        self.windows.iter().copied()
    }

    pub fn fixtures(&self) -> impl Iterator<Item = FixtureId> + '_ {
        self.fixtures.iter().copied()
    }

    pub fn adjacent_walls(&self) -> Vec<WallId> {
        self.object.adjacencies().walls()
    }

    pub fn adjacent_railings(&self) -> Vec<RailingId> {
        self.object.adjacencies().railings()
    }

    pub fn adjacent_rooms(&self) -> Vec<RoomId> {
        self.object.adjacencies().rooms()
    }

    pub(crate) fn object_mut(&mut self) -> &mut PlanObject<'a> {
        &mut self.object
    }
}

impl<'a> SpatialEntity<'a> for Room<'a> {
    fn object(&self) -> &PlanObject<'_> {
        &self.object
    }
}

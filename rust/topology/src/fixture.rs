// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use plangraph_core::ShapeNode;

use crate::category::FixtureType;
use crate::entity::{OutlineSource, PlanObject, SpatialEntity};
use crate::error::{Error, Result};
use crate::keys::{FixtureId, RoomId};
use crate::room::FxIndexSet;

/// Furniture or equipment fixed to the plan.
///
/// The boundary is the first child of the fixture's first group child and
/// may be drawn as a point list, a rect, a circle or a path.
#[derive(Debug)]
pub struct Fixture<'a> {
    object: PlanObject<'a>,
    pub(crate) rooms: FxIndexSet<RoomId>,
}

impl<'a> Fixture<'a> {
    pub fn new(index: usize, element: &'a ShapeNode, circle_segments: usize) -> Result<Self> {
        let boundary = element
            .child_groups()
            .next()
            .and_then(ShapeNode::first_child)
            .ok_or(Error::BoundaryNotFound(index))?;
        let outline = OutlineSource::any_shape(boundary, index, circle_segments)?;
        Ok(Self {
            object: PlanObject::new(index, element, outline),
            rooms: FxIndexSet::default(),
        })
    }

    pub fn id(&self) -> FixtureId {
        FixtureId(self.object.index())
    }

    pub fn types(&self) -> &'a [String] {
        self.object.types()
    }

    pub fn full_type(&self) -> String {
        self.object.full_type()
    }

    pub fn fixture_type(&self) -> FixtureType {
        FixtureType::from_types(self.types())
    }

    /// The room containing this fixture, if one was found.
    pub fn room(&self) -> Option<RoomId> {
        self.rooms.first().copied()
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().copied()
    }
}

impl<'a> SpatialEntity<'a> for Fixture<'a> {
    fn object(&self) -> &PlanObject<'_> {
        &self.object
    }
}

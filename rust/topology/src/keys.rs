// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identifiers.
//!
//! Every plan object is identified by its position in the collection the
//! floor keeps it in. Back-references between entities (room to door,
//! fixture to room, opening to wall) are stored as these ids, never as
//! pointers, so the floor stays the single owner of everything.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            pub struct $name(pub usize);

            impl $name {
                /// Position in the owning collection.
                pub fn index(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

entity_id! {
    /// Id of a room (a `Space` element).
    RoomId;

    /// Id of a wall.
    WallId;

    /// Id of a railing.
    RailingId;

    /// Id of a fixture.
    FixtureId;
}

/// Id of a door or window: the owning wall plus the position in its
/// opening list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpeningId {
    pub wall: WallId,
    pub index: usize,
}

/// A key for any entity that takes part in adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKey {
    Room(RoomId),
    Wall(WallId),
    Railing(RailingId),
}

impl EntityKey {
    /// Returns the entity type of this key.
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityKey::Room(_) => EntityType::Room,
            EntityKey::Wall(_) => EntityType::Wall,
            EntityKey::Railing(_) => EntityType::Railing,
        }
    }
}

/// Discriminant for adjacency-capable entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    Room = 0,
    Wall = 1,
    Railing = 2,
}

impl EntityType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Room => "Room",
            EntityType::Wall => "Wall",
            EntityType::Railing => "Railing",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let index = match self {
            EntityKey::Room(id) => id.index(),
            EntityKey::Wall(id) => id.index(),
            EntityKey::Railing(id) => id.index(),
        };
        write!(f, "{} {}", self.entity_type(), index)
    }
}

impl From<RoomId> for EntityKey {
    fn from(id: RoomId) -> Self {
        EntityKey::Room(id)
    }
}

impl From<WallId> for EntityKey {
    fn from(id: WallId) -> Self {
        EntityKey::Wall(id)
    }
}

impl From<RailingId> for EntityKey {
    fn from(id: RailingId) -> Self {
        EntityKey::Railing(id)
    }
}

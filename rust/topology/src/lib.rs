// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PlanGraph Topology
//!
//! Connected spatial model of a vector floor plan.
//!
//! A [`Model`] is loaded from a parsed shape tree: every `Floor` becomes a
//! [`Floor`] holding its rooms, walls (with their doors and windows),
//! railings and fixtures. [`Floor::analyze`] then connects them:
//!
//! - overlapping walls are trimmed against each other,
//! - rooms are linked to the walls, railings and rooms they touch,
//! - doors and windows are linked to the rooms they open into,
//! - fixtures are placed in the room containing them.
//!
//! Entities own nothing but their own data. Every cross-reference is an id
//! into the floor's collections (see [`keys`]), so a floor is a plain tree
//! of owned values borrowing the shape tree it was built from.
//!
//! ```no_run
//! use plangraph_core::ShapeNode;
//! use plangraph_topology::{Model, SpatialEntity};
//!
//! # fn demo(document: &ShapeNode) -> plangraph_topology::Result<()> {
//! let mut model = Model::load(document)?;
//! model.analyze();
//! for floor in model.floors() {
//!     for room in floor.rooms() {
//!         println!("{} {:.1} m2, {} walls", room.category(), room.area(), room.adjacent_walls().len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod adjacency;
pub mod category;
pub mod config;
pub mod divider;
pub mod entity;
pub mod error;
pub mod fixture;
pub mod floor;
pub mod keys;
pub mod model;
pub mod overlap;
pub mod room;

pub use adjacency::{AdjacencyFact, AdjacencyList, FactList};
pub use category::{FixtureType, RoomCategory};
pub use config::FloorConfig;
pub use divider::{Divider, Opening, OpeningKind, Railing, Wall};
pub use entity::{OutlineSource, PlanObject, SpatialEntity};
pub use error::{Error, Result};
pub use fixture::Fixture;
pub use floor::{AnalysisReport, Floor};
pub use keys::{EntityKey, EntityType, FixtureId, OpeningId, RailingId, RoomId, WallId};
pub use model::Model;
pub use overlap::{resolve_wall_overlaps, OverlapReport};
pub use room::Room;

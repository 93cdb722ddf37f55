// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PlanGraph Core
//!
//! The contract between a vector floor-plan parser and the PlanGraph engine.
//!
//! A parser turns its source document into a tree of [`ShapeNode`]s: groups
//! with class labels and children, and leaf shapes with sampled geometry.
//! Everything downstream (shape reconstruction, adjacency, containment)
//! reads only this tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use plangraph_core::{ElementKind, ShapeNode};
//!
//! let room = ShapeNode::group(
//!     ["Space", "Kitchen"],
//!     vec![ShapeNode::polygon([(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)])],
//! );
//!
//! assert_eq!(room.element_kind(), ElementKind::Space);
//! assert_eq!(room.first_child().and_then(|c| c.points()).map(|p| p.len()), Some(4));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable (de)serialization of the shape tree

pub mod schema;
pub mod shape;

pub use schema::ElementKind;
pub use shape::{parse_class_list, Point2D, ShapeKind, ShapeNode};

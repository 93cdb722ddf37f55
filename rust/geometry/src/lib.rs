// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PlanGraph Geometry
//!
//! Planar geometry for floor plans: shape reconstruction from raw point
//! lists, polygon differences for wall trimming, and the spatial predicates
//! the topology layer is built on. Primitives come from `geo`; booleans
//! from `i_overlay`.

pub mod bool2d;
pub mod error;
pub mod polygonize;
pub mod reconstruct;
pub mod relations;
pub mod shape;

// Re-export geo types for convenience
pub use geo::{Coord, Line, LineString, MultiLineString, Point, Polygon};

pub use bool2d::{difference, minimum_rotated_rectangle_dimension, subtract_cleanly};
pub use error::{Error, Result};
pub use polygonize::polygonize;
pub use reconstruct::{coords_from_points, largest_polygon, polygon_from_points};
pub use relations::{
    has_close_edges, lines_are_close, relate_matches, shared_boundary, INTERIOR_OVERLAP, PROPER_OVERLAP,
};
pub use shape::Shape;

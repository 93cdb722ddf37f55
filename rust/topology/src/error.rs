// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for floor-plan loading.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort loading a floor or model.
///
/// Degenerate geometry is never an error: it is repaired or reduced to an
/// empty shape by reconstruction. Only a document whose structure cannot be
/// mapped onto plan objects fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document has no `Model` element.
    #[error("document has no Model element")]
    MissingModel,

    /// A floor has no `Floorplan` element.
    #[error("floor has no Floorplan element")]
    MissingFloorplan,

    /// A room, wall, railing or opening whose first child carries no point list.
    #[error("{entity} {index} has no point-list outline (found {found})")]
    MissingOutline {
        entity: &'static str,
        index: usize,
        found: &'static str,
    },

    /// A fixture without a group child holding its boundary shape.
    #[error("fixture {0} has no boundary group")]
    BoundaryNotFound(usize),

    /// A fixture boundary element that cannot be turned into a shape.
    #[error("fixture {index} boundary is an unsupported {found} element")]
    UnsupportedShape { index: usize, found: &'static str },

    /// A construction failure inside one floor of a model.
    #[error("floor {floor}: {source}")]
    Floor {
        floor: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the index of the floor that failed to load.
    pub fn in_floor(self, floor: usize) -> Self {
        Error::Floor {
            floor,
            source: Box::new(self),
        }
    }
}

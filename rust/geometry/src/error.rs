// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by geometry operations that have a fallback strategy.
///
/// None of these escape shape reconstruction; callers match on them to pick
/// the next strategy in the chain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("edge overlaps another edge collinearly and cannot be split at points")]
    CollinearOverlap,

    #[error("edge has zero length")]
    DegenerateEdge,
}

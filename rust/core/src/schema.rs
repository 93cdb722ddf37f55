// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor-plan element kinds
//!
//! Fast type checking using an enum instead of string comparison. The kind
//! of a group is decided by its first class token, the way floor-plan
//! exporters tag their groups (`class="Space Kitchen"`, `class="Wall External"`).

use std::fmt;

/// Element kinds that drive entity construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    // Document structure
    Model,
    Floor,
    Floorplan,

    // Spaces
    Space,

    // Dividers
    Wall,
    Railing,

    // Openings
    Door,
    Window,

    // Equipment
    FixedFurniture,
    FixedFurnitureSet,

    /// Anything else (dimensions, labels, stairs, ...).
    Other,
}

impl ElementKind {
    /// Parse a class token into an element kind.
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "Model" => Self::Model,
            "Floor" => Self::Floor,
            "Floorplan" => Self::Floorplan,
            "Space" => Self::Space,
            "Wall" => Self::Wall,
            "Railing" => Self::Railing,
            "Door" => Self::Door,
            "Window" => Self::Window,
            "FixedFurniture" => Self::FixedFurniture,
            "FixedFurnitureSet" => Self::FixedFurnitureSet,
            _ => return None,
        })
    }

    /// Classify an element from its class list; only the first token counts.
    pub fn classify<S: AsRef<str>>(classes: &[S]) -> Self {
        classes
            .first()
            .and_then(|token| Self::from_str(token.as_ref()))
            .unwrap_or(Self::Other)
    }

    /// Get the class token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Floor => "Floor",
            Self::Floorplan => "Floorplan",
            Self::Space => "Space",
            Self::Wall => "Wall",
            Self::Railing => "Railing",
            Self::Door => "Door",
            Self::Window => "Window",
            Self::FixedFurniture => "FixedFurniture",
            Self::FixedFurnitureSet => "FixedFurnitureSet",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed vocabularies for room and fixture types.
//!
//! Class tokens in plan documents are free text. Rooms are classified by
//! their first type token; fixture tokens carry decorations (`Corner`,
//! `Left`, `2`, ...) that are stripped before classification. Anything
//! outside the vocabulary becomes `Other`.

use serde::{Deserialize, Serialize};

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// Every member of the vocabulary, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Parse an exact token.
            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $(stringify!($variant) => Some($name::$variant),)*
                    _ => None,
                }
            }

            /// Returns the token for this type.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Category of a room.
    RoomCategory {
        Alcove, Attic, Basement, Bath, Bedroom, CarPort, Closet, Den, Dining,
        DraughtLobby, DressingRoom, Elevated, Entry, Garage, Hall, Kitchen,
        Library, LivingRoom, Office, Other, Outdoor, RecreationRoom, Room,
        Sauna, Storage, TechnicalRoom, Undefined, UserDefined, Utility,
    }
}

vocabulary! {
    /// Normalized type of a fixture.
    FixtureType {
        BaseCabinet, Bathtub, Chimney, Closet, CoatCloset, CoatRack, CounterTop,
        Dishwasher, ElectricalAppliance, Fan, Fireplace, GEA, Heater, Housing,
        Jacuzzi, PlaceForFireplace, Refrigerator, SaunaBench, SaunaStove,
        Shower, ShowerCab, ShowerPlatform, ShowerScreen, Sink,
        SpaceForAppliance, Stove, Toilet, TumbleDryer, Urinal, WallCabinet,
        WashingMachine, WaterTap, Other,
    }
}

impl RoomCategory {
    /// Category from a room's type tokens (the class tokens after `Space`).
    pub fn from_types<S: AsRef<str>>(types: &[S]) -> Self {
        types
            .first()
            .and_then(|first| Self::from_str(first.as_ref()))
            .unwrap_or(RoomCategory::Other)
    }
}

/// Decorations stripped from the start of a fixture token, tried in order.
const FIXTURE_PREFIXES: &[&str] = &["Corner", "Double", "Integrated", "Gas", "Wood", "High", "Round", "Side"];

/// Decorations stripped from the end of a fixture token.
const FIXTURE_SUFFIXES: &[&str] = &[
    "Corner", "High", "Left", "Low", "Mid", "Right", "Round", "RoundLeft", "RoundRight", "Small", "Triangle", "2",
];

impl FixtureType {
    /// Normalized type from a fixture's type tokens.
    ///
    /// An `ElectricalAppliance` followed by another token is classified by
    /// that second token.
    pub fn from_types<S: AsRef<str>>(types: &[S]) -> Self {
        let token = match types {
            [first, second, ..] if first.as_ref() == "ElectricalAppliance" => second.as_ref(),
            [first, ..] => first.as_ref(),
            [] => return FixtureType::Other,
        };
        Self::from_str(strip_suffix(strip_prefix(token))).unwrap_or(FixtureType::Other)
    }
}

fn strip_prefix(token: &str) -> &str {
    FIXTURE_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
        .unwrap_or(token)
}

/// Strip the suffix that starts earliest in the token, so `RoundLeft` wins
/// over `Left`.
fn strip_suffix(token: &str) -> &str {
    (0..token.len())
        .filter(|&i| token.is_char_boundary(i))
        .find(|&i| FIXTURE_SUFFIXES.contains(&&token[i..]))
        .map_or(token, |i| &token[..i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_category_from_first_type() {
        assert_eq!(RoomCategory::from_types(&["Kitchen", "Open"]), RoomCategory::Kitchen);
        assert_eq!(RoomCategory::from_types(&["Ballroom"]), RoomCategory::Other);
        assert_eq!(RoomCategory::from_types::<&str>(&[]), RoomCategory::Other);
    }

    #[test]
    fn vocabulary_round_trips_tokens() {
        for category in RoomCategory::ALL {
            assert_eq!(RoomCategory::from_str(category.as_str()), Some(*category));
        }
        for fixture in FixtureType::ALL {
            assert_eq!(FixtureType::from_str(fixture.as_str()), Some(*fixture));
        }
        assert_eq!(RoomCategory::ALL.len(), 29);
        assert_eq!(FixtureType::GEA.to_string(), "GEA");
    }

    #[test]
    fn electrical_appliance_uses_second_token() {
        assert_eq!(
            FixtureType::from_types(&["ElectricalAppliance", "Refrigerator"]),
            FixtureType::Refrigerator
        );
        assert_eq!(FixtureType::from_types(&["ElectricalAppliance"]), FixtureType::ElectricalAppliance);
    }

    #[test]
    fn decorations_are_stripped() {
        assert_eq!(FixtureType::from_types(&["CornerBathtubRound"]), FixtureType::Bathtub);
        assert_eq!(FixtureType::from_types(&["DoubleSink"]), FixtureType::Sink);
        assert_eq!(FixtureType::from_types(&["Toilet2"]), FixtureType::Toilet);
        assert_eq!(FixtureType::from_types(&["ShowerRoundLeft"]), FixtureType::Shower);
        assert_eq!(FixtureType::from_types(&["GasStove"]), FixtureType::Stove);
    }

    #[test]
    fn earliest_suffix_wins() {
        assert_eq!(strip_suffix("BathtubRoundRight"), "Bathtub");
        assert_eq!(strip_suffix("SinkLeft"), "Sink");
        assert_eq!(strip_suffix("Sink"), "Sink");
    }

    #[test]
    fn unknown_fixture_is_other() {
        assert_eq!(FixtureType::from_types(&["Piano"]), FixtureType::Other);
        assert_eq!(FixtureType::from_types::<String>(&[]), FixtureType::Other);
        // Stripping can consume the whole token.
        assert_eq!(FixtureType::from_types(&["Corner"]), FixtureType::Other);
    }
}

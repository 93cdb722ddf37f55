// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Tunables for floor analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorConfig {
    /// Gap below which shapes count as touching: used for edge closeness,
    /// opening-to-room crossing and sliver detection during wall trimming.
    pub close_edge_tolerance: f64,
    /// Vertex count used to sample circular fixture outlines
    pub circle_segments: usize,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            close_edge_tolerance: 1.0,
            circle_segments: 64,
        }
    }
}

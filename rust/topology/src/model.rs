// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use plangraph_core::ShapeNode;

use crate::config::FloorConfig;
use crate::error::{Error, Result};
use crate::floor::{AnalysisReport, Floor};

/// A whole plan document: its floors in document order.
#[derive(Debug)]
pub struct Model<'a> {
    floors: Vec<Floor<'a>>,
}

impl<'a> Model<'a> {
    /// Load the document with the default configuration.
    pub fn load(document: &'a ShapeNode) -> Result<Self> {
        Self::load_with(document, FloorConfig::default())
    }

    /// Load every `Floor` of the document's first `Model` element.
    ///
    /// Floors are built only; call [`Model::analyze`] to connect them.
    pub fn load_with(document: &'a ShapeNode, config: FloorConfig) -> Result<Self> {
        let model = document
            .children_with_class("Model")
            .next()
            .ok_or(Error::MissingModel)?;

        let floors = model
            .children_with_class("Floor")
            .enumerate()
            .map(|(index, element)| Floor::load(index, element, config).map_err(|e| e.in_floor(index)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(floors = floors.len(), "Loaded model");
        Ok(Self { floors })
    }

    pub fn floors(&self) -> &[Floor<'a>] {
        &self.floors
    }

    pub fn floors_mut(&mut self) -> &mut [Floor<'a>] {
        &mut self.floors
    }

    pub fn floor(&self, index: usize) -> Option<&Floor<'a>> {
        self.floors.get(index)
    }

    /// Analyze every floor, in order.
    pub fn analyze(&mut self) -> Vec<AnalysisReport> {
        self.floors.iter_mut().map(Floor::analyze).collect()
    }

    /// Sum of floor areas.
    pub fn area(&self) -> f64 {
        self.floors.iter().map(Floor::area).sum()
    }
}

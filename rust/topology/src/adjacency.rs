// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency tables and the pairwise comparison that fills them.
//!
//! Two outlines are adjacent when they share boundary line work, or when
//! they sit within tolerance of each other with a pair of edges running
//! close together (a drawing gap between a room and its wall). Each entity
//! keeps a table from neighbour to the facts recorded against it; every
//! fact is recorded on both sides with the same payload.

use std::hash::BuildHasherDefault;

use geo::{Line, MultiLineString};
use indexmap::IndexMap;
use plangraph_geometry::{has_close_edges, shared_boundary, Shape};
use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::keys::{EntityKey, EntityType, RailingId, RoomId, WallId};

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// One piece of evidence that two entities are adjacent.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjacencyFact {
    /// The outlines share this boundary line work.
    SharedEdge(MultiLineString<f64>),
    /// The outlines are within tolerance with at least one pair of close
    /// edges, but share no boundary.
    Close,
}

impl AdjacencyFact {
    /// The shared boundary, if any.
    pub fn geometry(&self) -> Option<&MultiLineString<f64>> {
        match self {
            AdjacencyFact::SharedEdge(lines) => Some(lines),
            AdjacencyFact::Close => None,
        }
    }

    pub fn is_shared_edge(&self) -> bool {
        matches!(self, AdjacencyFact::SharedEdge(_))
    }
}

/// Facts recorded against one neighbour; usually one.
pub type FactList = SmallVec<[AdjacencyFact; 2]>;

/// Neighbour → facts, in the order neighbours were first recorded.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    entries: FxIndexMap<EntityKey, FactList>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fact for `neighbour`; earlier facts are kept.
    pub fn add(&mut self, neighbour: EntityKey, fact: AdjacencyFact) {
        self.entries.entry(neighbour).or_default().push(fact);
    }

    /// Facts recorded against `neighbour`.
    pub fn facts(&self, neighbour: EntityKey) -> &[AdjacencyFact] {
        self.entries.get(&neighbour).map(|facts| facts.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, neighbour: EntityKey) -> bool {
        self.entries.contains_key(&neighbour)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Neighbours in first-recorded order.
    pub fn keys(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &[AdjacencyFact])> + '_ {
        self.entries.iter().map(|(key, facts)| (*key, facts.as_slice()))
    }

    /// A new table holding only the `(neighbour, fact)` pairs accepted by
    /// `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> AdjacencyList
    where
        F: FnMut(EntityKey, &AdjacencyFact) -> bool,
    {
        let mut matches = AdjacencyList::new();
        for (key, facts) in self.iter() {
            for fact in facts {
                if predicate(key, fact) {
                    matches.add(key, fact.clone());
                }
            }
        }
        matches
    }

    /// Neighbours of one entity type.
    pub fn of_type(&self, entity_type: EntityType) -> impl Iterator<Item = EntityKey> + '_ {
        self.keys().filter(move |key| key.entity_type() == entity_type)
    }

    pub fn rooms(&self) -> Vec<RoomId> {
        self.keys()
            .filter_map(|key| match key {
                EntityKey::Room(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn walls(&self) -> Vec<WallId> {
        self.keys()
            .filter_map(|key| match key {
                EntityKey::Wall(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn railings(&self) -> Vec<RailingId> {
        self.keys()
            .filter_map(|key| match key {
                EntityKey::Railing(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// Compare two outlines.
///
/// Returns a shared-edge fact when the intersection of two polygons is pure
/// line work. Otherwise returns [`AdjacencyFact::Close`] when the shapes are
/// no farther apart than `tolerance` and some pair of the given edges is
/// close. `a_edges` and `b_edges` are the edges eligible for the closeness
/// test (all edges for rooms, face edges for dividers).
pub fn compare(a: &Shape, a_edges: &[Line<f64>], b: &Shape, b_edges: &[Line<f64>], tolerance: f64) -> Option<AdjacencyFact> {
    if let (Some(pa), Some(pb)) = (a.as_polygon(), b.as_polygon()) {
        if let Some(shared) = shared_boundary(pa, pb) {
            return Some(AdjacencyFact::SharedEdge(shared));
        }
    }

    if a.distance(b) <= tolerance && has_close_edges(a_edges, b_edges, tolerance) {
        return Some(AdjacencyFact::Close);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(i: usize) -> EntityKey {
        EntityKey::Room(RoomId(i))
    }

    fn wall(i: usize) -> EntityKey {
        EntityKey::Wall(WallId(i))
    }

    #[test]
    fn facts_accumulate_per_neighbour() {
        let mut list = AdjacencyList::new();
        list.add(wall(2), AdjacencyFact::Close);
        list.add(room(0), AdjacencyFact::Close);
        list.add(wall(2), AdjacencyFact::SharedEdge(MultiLineString::new(vec![])));

        assert_eq!(list.len(), 2);
        assert_eq!(list.facts(wall(2)).len(), 2);
        assert!(list.facts(wall(7)).is_empty());
        assert_eq!(list.keys().collect::<Vec<_>>(), vec![wall(2), room(0)]);
        assert_eq!(list.walls(), vec![WallId(2)]);
        assert_eq!(list.rooms(), vec![RoomId(0)]);
        assert!(list.railings().is_empty());
    }

    #[test]
    fn filter_builds_a_new_table() {
        let mut list = AdjacencyList::new();
        list.add(wall(0), AdjacencyFact::Close);
        list.add(wall(1), AdjacencyFact::SharedEdge(MultiLineString::new(vec![])));
        list.add(room(3), AdjacencyFact::Close);

        let shared = list.filter(|_, fact| fact.is_shared_edge());
        assert_eq!(shared.keys().collect::<Vec<_>>(), vec![wall(1)]);

        let rooms = list.filter(|key, _| key.entity_type() == EntityType::Room);
        assert_eq!(rooms.len(), 1);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn compare_prefers_shared_edge() {
        let a = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let b = Shape::rect(10.0, 0.0, 1.0, 10.0);
        let fact = compare(&a, &a.edges(), &b, &b.edges(), 1.0).expect("adjacent");
        assert!(fact.is_shared_edge());
    }

    #[test]
    fn compare_detects_gap_within_tolerance() {
        let a = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let b = Shape::rect(10.5, 0.0, 1.0, 10.0);
        assert_eq!(compare(&a, &a.edges(), &b, &b.edges(), 1.0), Some(AdjacencyFact::Close));

        let far = Shape::rect(12.0, 0.0, 1.0, 10.0);
        assert_eq!(compare(&a, &a.edges(), &far, &far.edges(), 1.0), None);
    }

    #[test]
    fn distance_gate_includes_the_tolerance() {
        let a = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let near_edges = Shape::rect(10.5, 0.0, 1.0, 10.0).edges();

        let at_tolerance = Shape::rect(11.0, 0.0, 1.0, 10.0);
        assert_eq!(a.distance(&at_tolerance), 1.0);
        assert_eq!(compare(&a, &a.edges(), &at_tolerance, &near_edges, 1.0), Some(AdjacencyFact::Close));

        // The shapes' own edges are exactly one tolerance apart.
        assert_eq!(compare(&a, &a.edges(), &at_tolerance, &at_tolerance.edges(), 1.0), None);

        let beyond = Shape::rect(11.5, 0.0, 1.0, 10.0);
        assert_eq!(compare(&a, &a.edges(), &beyond, &near_edges, 1.0), None);
    }

    #[test]
    fn single_touch_point_is_not_adjacent() {
        let a = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let wedge = Shape::Polygon(geo::Polygon::new(
            geo::LineString::from(vec![(10.0, 5.0), (15.0, 0.0), (15.0, 10.0)]),
            vec![],
        ));
        assert_eq!(a.distance(&wedge), 0.0);
        assert_eq!(compare(&a, &a.edges(), &wedge, &wedge.edges(), 1.0), None);
    }
}

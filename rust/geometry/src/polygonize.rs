// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygonization of a noded segment soup.
//!
//! The segments are treated as a planar graph: every segment endpoint is a
//! node, and segments only meet at endpoints (callers node them first with
//! [`crate::reconstruct::split_at_intersections`]). Faces are traced with a
//! half-edge walk that always takes the next edge clockwise around the
//! arrival node, so bounded faces come out counter-clockwise and the outer
//! boundary of each connected component comes out clockwise.
//!
//! Dangling segments and cut edges (bridges with the same face on both sides)
//! bound no area and are dropped before tracing.

use geo::{Area, Contains, Coord, Line, LineString, Polygon};
use rustc_hash::{FxHashMap, FxHashSet};

const NO_FACE: usize = usize::MAX;

/// Build every polygon enclosed by the segments.
///
/// Polygons are returned in face discovery order. A clockwise ring that lies
/// inside a polygon of another connected component becomes a hole of the
/// smallest such polygon.
pub fn polygonize(segments: &[Line<f64>]) -> Vec<Polygon<f64>> {
    let mut graph = SegmentGraph::new(segments);
    let faces = graph.faces();
    graph.assemble(&faces)
}

/// Exact node identity. `-0.0` and `0.0` are the same node.
fn node_key(coord: Coord<f64>) -> (u64, u64) {
    ((coord.x + 0.0).to_bits(), (coord.y + 0.0).to_bits())
}

fn intern(nodes: &mut Vec<Coord<f64>>, index: &mut FxHashMap<(u64, u64), usize>, coord: Coord<f64>) -> usize {
    *index.entry(node_key(coord)).or_insert_with(|| {
        nodes.push(coord);
        nodes.len() - 1
    })
}

struct SegmentGraph {
    nodes: Vec<Coord<f64>>,
    /// Undirected edges. Half-edge `2e` runs `edges[e].0 -> edges[e].1`,
    /// half-edge `2e + 1` runs back.
    edges: Vec<(usize, usize)>,
    alive: Vec<bool>,
}

struct Faces {
    rings: Vec<Vec<usize>>,
    face_of: Vec<usize>,
}

impl SegmentGraph {
    fn new(segments: &[Line<f64>]) -> Self {
        let mut nodes = Vec::new();
        let mut index = FxHashMap::default();
        let mut seen = FxHashSet::default();
        let mut edges = Vec::with_capacity(segments.len());

        for segment in segments {
            let u = intern(&mut nodes, &mut index, segment.start);
            let v = intern(&mut nodes, &mut index, segment.end);
            if u == v {
                continue;
            }
            if seen.insert((u.min(v), u.max(v))) {
                edges.push((u, v));
            }
        }

        let alive = vec![true; edges.len()];
        Self { nodes, edges, alive }
    }

    fn origin(&self, half_edge: usize) -> usize {
        let (u, v) = self.edges[half_edge / 2];
        if half_edge % 2 == 0 {
            u
        } else {
            v
        }
    }

    fn destination(&self, half_edge: usize) -> usize {
        self.origin(half_edge ^ 1)
    }

    fn angle(&self, half_edge: usize) -> f64 {
        let from = self.nodes[self.origin(half_edge)];
        let to = self.nodes[self.destination(half_edge)];
        (to.y - from.y).atan2(to.x - from.x)
    }

    /// Repeatedly drop edges hanging off a node of degree one.
    fn prune_dangles(&mut self) {
        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (edge, &(u, v)) in self.edges.iter().enumerate() {
            if self.alive[edge] {
                incident[u].push(edge);
                incident[v].push(edge);
            }
        }
        let mut degree: Vec<usize> = incident.iter().map(Vec::len).collect();
        let mut pending: Vec<usize> = (0..self.nodes.len()).filter(|&n| degree[n] == 1).collect();

        while let Some(node) = pending.pop() {
            if degree[node] != 1 {
                continue;
            }
            let Some(&edge) = incident[node].iter().find(|&&e| self.alive[e]) else {
                continue;
            };
            self.alive[edge] = false;
            let (u, v) = self.edges[edge];
            for end in [u, v] {
                degree[end] -= 1;
                if degree[end] == 1 {
                    pending.push(end);
                }
            }
        }
    }

    fn trace(&self) -> Faces {
        let half_edges = self.edges.len() * 2;
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for half_edge in 0..half_edges {
            if self.alive[half_edge / 2] {
                outgoing[self.origin(half_edge)].push(half_edge);
            }
        }

        let mut position = vec![0usize; half_edges];
        for around in &mut outgoing {
            around.sort_by(|&a, &b| self.angle(a).total_cmp(&self.angle(b)));
            for (i, &half_edge) in around.iter().enumerate() {
                position[half_edge] = i;
            }
        }

        let next = |half_edge: usize| -> usize {
            let around = &outgoing[self.destination(half_edge)];
            let twin = position[half_edge ^ 1];
            around[(twin + around.len() - 1) % around.len()]
        };

        let mut rings = Vec::new();
        let mut face_of = vec![NO_FACE; half_edges];
        for start in 0..half_edges {
            if !self.alive[start / 2] || face_of[start] != NO_FACE {
                continue;
            }
            let face = rings.len();
            let mut ring = Vec::new();
            let mut current = start;
            loop {
                face_of[current] = face;
                ring.push(current);
                current = next(current);
                if current == start || ring.len() > half_edges {
                    break;
                }
            }
            rings.push(ring);
        }

        Faces { rings, face_of }
    }

    /// Trace faces after removing dangles and cut edges.
    fn faces(&mut self) -> Faces {
        loop {
            self.prune_dangles();
            let faces = self.trace();
            let cut_edges: Vec<usize> = (0..self.edges.len())
                .filter(|&e| self.alive[e] && faces.face_of[2 * e] == faces.face_of[2 * e + 1])
                .collect();
            if cut_edges.is_empty() {
                return faces;
            }
            for edge in cut_edges {
                self.alive[edge] = false;
            }
        }
    }

    fn components(&self) -> Vec<usize> {
        let mut parent: Vec<usize> = (0..self.nodes.len()).collect();
        fn find(parent: &mut [usize], mut node: usize) -> usize {
            while parent[node] != node {
                parent[node] = parent[parent[node]];
                node = parent[node];
            }
            node
        }
        for (edge, &(u, v)) in self.edges.iter().enumerate() {
            if self.alive[edge] {
                let (a, b) = (find(&mut parent, u), find(&mut parent, v));
                if a != b {
                    parent[a] = b;
                }
            }
        }
        (0..self.nodes.len()).map(|n| find(&mut parent, n)).collect()
    }

    fn assemble(&self, faces: &Faces) -> Vec<Polygon<f64>> {
        let component = self.components();

        let mut shells: Vec<(Polygon<f64>, usize)> = Vec::new();
        let mut holes: Vec<(Polygon<f64>, usize)> = Vec::new();
        for ring in &faces.rings {
            let coords: Vec<Coord<f64>> = ring.iter().map(|&h| self.nodes[self.origin(h)]).collect();
            let polygon = Polygon::new(LineString::new(coords), vec![]);
            let owner = component[self.origin(ring[0])];
            let signed = polygon.signed_area();
            if signed > 0.0 {
                shells.push((polygon, owner));
            } else if signed < 0.0 {
                holes.push((polygon, owner));
            }
        }

        let mut interiors: Vec<Vec<LineString<f64>>> = vec![Vec::new(); shells.len()];
        for (hole, owner) in holes {
            let host = shells
                .iter()
                .enumerate()
                .filter(|(_, (shell, shell_owner))| *shell_owner != owner && shell.contains(&hole))
                .min_by(|(_, (a, _)), (_, (b, _))| a.unsigned_area().total_cmp(&b.unsigned_area()))
                .map(|(i, _)| i);
            if let Some(host) = host {
                let (exterior, _) = hole.into_inner();
                interiors[host].push(exterior);
            }
        }

        shells
            .into_iter()
            .zip(interiors)
            .map(|((shell, _), holes)| {
                let (exterior, _) = shell.into_inner();
                Polygon::new(exterior, holes)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ring(points: &[(f64, f64)]) -> Vec<Line<f64>> {
        (0..points.len())
            .map(|i| Line::new(points[i], points[(i + 1) % points.len()]))
            .collect()
    }

    #[test]
    fn square_from_four_segments() {
        let polygons = polygonize(&ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
        assert_eq!(polygons.len(), 1);
        assert_relative_eq!(polygons[0].unsigned_area(), 1.0);
        assert!(polygons[0].signed_area() > 0.0);
    }

    #[test]
    fn shared_edge_yields_two_faces() {
        let mut segments = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        segments.push(Line::new((1.0, 0.0), (1.0, 1.0)));
        // Node the outer ring at the divider.
        let segments = crate::reconstruct::split_at_intersections(&segments);
        let polygons = polygonize(&segments);
        assert_eq!(polygons.len(), 2);
        for polygon in &polygons {
            assert_relative_eq!(polygon.unsigned_area(), 1.0);
        }
    }

    #[test]
    fn dangles_and_duplicates_are_ignored() {
        let mut segments = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        segments.push(Line::new((1.0, 1.0), (3.0, 3.0)));
        segments.push(Line::new((1.0, 0.0), (0.0, 0.0)));
        segments.push(Line::new((5.0, 5.0), (5.0, 5.0)));
        let polygons = polygonize(&segments);
        assert_eq!(polygons.len(), 1);
        assert_relative_eq!(polygons[0].unsigned_area(), 1.0);
    }

    #[test]
    fn bridge_between_faces_is_dropped() {
        let mut segments = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        segments.extend(ring(&[(3.0, 0.0), (4.0, 0.0), (4.0, 1.0), (3.0, 1.0)]));
        segments.push(Line::new((1.0, 0.0), (3.0, 0.0)));
        let polygons = polygonize(&segments);
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn nested_ring_becomes_hole() {
        let mut segments = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        segments.extend(ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]));
        let polygons = polygonize(&segments);
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].interiors().len(), 1);
        assert_relative_eq!(polygons[0].unsigned_area(), 12.0);
        assert_relative_eq!(polygons[1].unsigned_area(), 4.0);
    }

    #[test]
    fn open_path_has_no_faces() {
        let segments = vec![
            Line::new((0.0, 0.0), (1.0, 0.0)),
            Line::new((1.0, 0.0), (1.0, 1.0)),
        ];
        assert!(polygonize(&segments).is_empty());
        assert!(polygonize(&[]).is_empty());
    }
}

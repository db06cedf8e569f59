//Matrisect
//Copyright (C) 2025 The Matrisect developers
//
//This program is free software: you can redistribute it and/or modify
//it under the terms of the GNU Affero General Public License as published by
//the Free Software Foundation, either version 3 of the License, or
//(at your option) any later version.
//
//This program is distributed in the hope that it will be useful,
//but WITHOUT ANY WARRANTY; without even the implied warranty of
//MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//GNU Affero General Public License for more details.
//
//You should have received a copy of the GNU Affero General Public License
//along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! This module implements the matroid oracles. An oracle maintains a selected
//! subset of the ground set and supports exactly two operations: `try_add`,
//! which adds an element only if the selection stays independent, and
//! `remove`. There is deliberately no set-level independence check: every
//! query is incremental, so a single move during the search costs O(1) (or
//! the length of one path for the acyclicity oracle) instead of a full
//! re-verification of the selection.
//!
//! Three oracle kinds cover the supported problems:
//!     - `Partition`: at most one element per vertex of one partition side
//!     - `DegreeBound`: at most one directed edge per head (or tail) vertex
//!     - `PathForest`: the selected directed edges never close a cycle
//!
//! The kinds form a closed enum rather than a trait object. There are only
//! three of them and the dispatch sits on the hottest path of the search.

use crate::common::Error;

/// Sentinel for "vertex has no selected outgoing edge" in the successor map
const NO_SUCCESSOR: usize = usize::MAX;

/// A selected subset of the ground set, kept independent in one matroid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatroidSet {
    Partition(PartitionSet),
    DegreeBound(DegreeBoundSet),
    PathForest(PathForestSet),
}

impl MatroidSet {

    /// Adds `element` to the selection if it stays independent. Returns
    /// whether the element was accepted; on rejection the state is untouched.
    pub fn try_add(&mut self, element: usize) -> Result<bool, Error> {
        match self {
            MatroidSet::Partition(set) => set.try_add(element),
            MatroidSet::DegreeBound(set) => Ok(set.try_add(element)),
            MatroidSet::PathForest(set) => set.try_add(element),
        }
    }

    /// Removes `element` from the selection. Removing an element that is not
    /// selected is a programming error and fails loudly.
    pub fn remove(&mut self, element: usize) -> Result<(), Error> {
        match self {
            MatroidSet::Partition(set) => set.remove(element),
            MatroidSet::DegreeBound(set) => set.remove(element),
            MatroidSet::PathForest(set) => set.remove(element),
        }
    }
}

/// Partition matroid over one side of a matching instance: every element maps
/// to a vertex and at most one element per vertex may be selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionSet {
    /// Maps each element to the vertex it covers on this side
    element_to_vertex: Vec<usize>,
    vertex_used: Vec<bool>,
    /// Guards against adding an element that is already selected
    element_used: Vec<bool>,
}

impl PartitionSet {

    pub fn new(vertex_count: usize, element_to_vertex: Vec<usize>) -> Result<Self, Error> {
        if let Some(v) = element_to_vertex.iter().copied().find(|v| *v >= vertex_count) {
            return Err(Error::InvalidInput(format!(
                "vertex index {} out of bounds (vertex count {})", v, vertex_count)));
        }
        let element_count = element_to_vertex.len();
        Ok(Self {
            element_to_vertex,
            vertex_used: vec![false; vertex_count],
            element_used: vec![false; element_count],
        })
    }

    fn try_add(&mut self, element: usize) -> Result<bool, Error> {
        if self.element_used[element] {
            return Err(Error::InvalidOperation(format!(
                "element {} is already selected", element)));
        }
        let vertex = self.element_to_vertex[element];
        if self.vertex_used[vertex] {
            return Ok(false);
        }
        self.vertex_used[vertex] = true;
        self.element_used[element] = true;
        Ok(true)
    }

    fn remove(&mut self, element: usize) -> Result<(), Error> {
        if !self.element_used[element] {
            return Err(Error::InvalidOperation(format!(
                "element {} is not selected", element)));
        }
        self.vertex_used[self.element_to_vertex[element]] = false;
        self.element_used[element] = false;
        Ok(())
    }
}

/// Partition matroid keyed by the head (or tail) of a directed edge: at most
/// one selected edge may enter (or leave) every vertex. The per-element guard
/// of `PartitionSet` is not needed here because this oracle is only ever
/// driven through the aggregator, which tracks membership itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DegreeBoundSet {
    /// The head (or tail) vertex of each edge
    element_to_vertex: Vec<usize>,
    vertex_used: Vec<bool>,
}

impl DegreeBoundSet {

    pub fn new(vertex_count: usize, element_to_vertex: Vec<usize>) -> Result<Self, Error> {
        if let Some(v) = element_to_vertex.iter().copied().find(|v| *v >= vertex_count) {
            return Err(Error::InvalidInput(format!(
                "vertex index {} out of bounds (vertex count {})", v, vertex_count)));
        }
        Ok(Self {
            element_to_vertex,
            vertex_used: vec![false; vertex_count],
        })
    }

    fn try_add(&mut self, element: usize) -> bool {
        let vertex = self.element_to_vertex[element];
        if self.vertex_used[vertex] {
            return false;
        }
        self.vertex_used[vertex] = true;
        true
    }

    fn remove(&mut self, element: usize) -> Result<(), Error> {
        let vertex = self.element_to_vertex[element];
        if !self.vertex_used[vertex] {
            return Err(Error::InvalidOperation(format!(
                "edge {} cannot be selected while its vertex is unused", element)));
        }
        self.vertex_used[vertex] = false;
        Ok(())
    }
}

/// Acyclicity oracle for directed edges. The state is a successor map: if the
/// edge (a, b) is selected then `next[a] = b`. A candidate edge (a, b) is
/// accepted iff walking the successor map from b never comes back to a.
///
/// The walk terminates only because the companion degree oracles cap the in-
/// and out-degree at one, which keeps the selected edges a forest of simple
/// paths. This oracle must never be used on its own; the step counter turns
/// a cycle in the successor map into a hard error instead of a hang.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathForestSet {
    edge_tail: Vec<usize>,
    edge_head: Vec<usize>,
    next: Vec<usize>,
}

impl PathForestSet {

    pub fn new(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self, Error> {
        if let Some((a, b)) = edges.iter().copied().find(|(a, b)| *a >= vertex_count || *b >= vertex_count) {
            return Err(Error::InvalidInput(format!(
                "edge ({}, {}) out of bounds (vertex count {})", a, b, vertex_count)));
        }
        Ok(Self {
            edge_tail: edges.iter().map(|e| e.0).collect(),
            edge_head: edges.iter().map(|e| e.1).collect(),
            next: vec![NO_SUCCESSOR; vertex_count],
        })
    }

    fn try_add(&mut self, element: usize) -> Result<bool, Error> {
        let tail = self.edge_tail[element];
        let head = self.edge_head[element];
        let mut cur = head;
        let mut steps = 0;
        while self.next[cur] != NO_SUCCESSOR {
            cur = self.next[cur];
            steps += 1;
            if steps > self.next.len() {
                return Err(Error::InvalidOperation(
                    "cycle in the successor map".to_string()));
            }
        }
        if cur == tail {
            // the edge would close a cycle
            return Ok(false);
        }
        self.next[tail] = head;
        Ok(true)
    }

    fn remove(&mut self, element: usize) -> Result<(), Error> {
        let tail = self.edge_tail[element];
        if self.next[tail] != self.edge_head[element] {
            return Err(Error::InvalidOperation(format!(
                "edge {} is not selected", element)));
        }
        self.next[tail] = NO_SUCCESSOR;
        Ok(())
    }
}

#[cfg(test)]
mod test_matroid {
    use super::*;

    #[test]
    pub fn partition_accepts_one_element_per_vertex() {
        // elements 0 and 2 cover vertex 0, element 1 covers vertex 1
        let mut set = MatroidSet::Partition(PartitionSet::new(2, vec![0, 1, 0]).unwrap());
        assert!(set.try_add(0).unwrap());
        assert!(!set.try_add(2).unwrap());
        assert!(set.try_add(1).unwrap());
    }

    #[test]
    pub fn partition_rejection_leaves_state_untouched() {
        let mut set = PartitionSet::new(2, vec![0, 0, 1]).unwrap();
        assert!(set.try_add(0).unwrap());
        let before = set.clone();
        assert!(!set.try_add(1).unwrap());
        assert_eq!(before, set);
    }

    #[test]
    pub fn partition_double_add_is_an_error() {
        let mut set = PartitionSet::new(1, vec![0]).unwrap();
        assert!(set.try_add(0).unwrap());
        assert!(set.try_add(0).is_err());
    }

    #[test]
    pub fn partition_remove_frees_the_vertex() {
        let mut set = PartitionSet::new(1, vec![0, 0]).unwrap();
        assert!(set.try_add(0).unwrap());
        set.remove(0).unwrap();
        assert!(set.try_add(1).unwrap());
    }

    #[test]
    pub fn partition_remove_of_absent_is_an_error() {
        let mut set = PartitionSet::new(1, vec![0]).unwrap();
        assert!(set.remove(0).is_err());
    }

    #[test]
    pub fn partition_rejects_out_of_bounds_vertex() {
        assert!(PartitionSet::new(2, vec![0, 2]).is_err());
    }

    #[test]
    pub fn degree_bound_caps_degree_at_one() {
        // two edges leaving vertex 0, one leaving vertex 1
        let mut set = DegreeBoundSet::new(2, vec![0, 0, 1]).unwrap();
        assert!(set.try_add(0));
        assert!(!set.try_add(1));
        assert!(set.try_add(2));
        set.remove(0).unwrap();
        assert!(set.try_add(1));
    }

    #[test]
    pub fn path_forest_rejects_a_cycle() {
        let edges = vec![(0, 1), (1, 2), (2, 0)];
        let mut set = PathForestSet::new(3, &edges).unwrap();
        assert!(set.try_add(0).unwrap());
        assert!(set.try_add(1).unwrap());
        // (2, 0) closes the cycle 0 -> 1 -> 2 -> 0
        assert!(!set.try_add(2).unwrap());
    }

    #[test]
    pub fn path_forest_rejects_a_self_loop() {
        let mut set = PathForestSet::new(1, &[(0, 0)]).unwrap();
        assert!(!set.try_add(0).unwrap());
    }

    #[test]
    pub fn path_forest_accepts_disjoint_paths() {
        let edges = vec![(0, 1), (2, 3)];
        let mut set = PathForestSet::new(4, &edges).unwrap();
        assert!(set.try_add(0).unwrap());
        assert!(set.try_add(1).unwrap());
    }

    #[test]
    pub fn path_forest_remove_reopens_the_move() {
        let edges = vec![(0, 1), (1, 2), (2, 0)];
        let mut set = PathForestSet::new(3, &edges).unwrap();
        assert!(set.try_add(0).unwrap());
        assert!(set.try_add(1).unwrap());
        set.remove(0).unwrap();
        // without (0, 1) the edge (2, 0) no longer closes a cycle
        assert!(set.try_add(2).unwrap());
    }

    #[test]
    pub fn path_forest_remove_of_absent_is_an_error() {
        let mut set = PathForestSet::new(2, &[(0, 1)]).unwrap();
        assert!(set.remove(0).is_err());
    }
}

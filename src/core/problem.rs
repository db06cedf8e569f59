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

//! Data structure representing one problem instance: k matroid oracles over a
//! shared ground set of elements indexed by `0..ground_set_size`, together
//! with the membership vector of their common selection. Every algorithm in
//! the crate drives the instance through `try_add` / `remove` / `reset` and
//! never touches an individual oracle, which keeps the search code generic
//! over the problem family.
//!
//! `try_add` is atomic: the element is offered to the oracles in a fixed
//! order and the first rejection rolls back the earlier acceptances, so a
//! rejected call leaves the whole instance exactly as it found it.

use crate::common::Error;
use crate::core::bitvec::Bitvec;
use crate::core::matroid::{DegreeBoundSet, MatroidSet, PartitionSet, PathForestSet};

/// A k-matroid intersection instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    /// The matroids whose common independent sets are the feasible solutions
    matroids: Vec<MatroidSet>,
    /// member[e] iff element e is currently selected in every matroid
    member: Bitvec,
    ground_set_size: usize,
}

impl Problem {

    // --- INSTANCE CREATION --- //

    /// Creates a d-dimensional matching instance. Each element is a d-tuple
    /// of vertices, one per partition, and each partition contributes a
    /// partition matroid over its own coordinate.
    pub fn matching(arity: usize, vertex_per_partition: usize, edges: &[Vec<usize>]) -> Result<Self, Error> {
        if arity == 0 {
            return Err(Error::InvalidInput("arity must be positive".to_string()));
        }
        for edge in edges {
            if edge.len() != arity {
                return Err(Error::InvalidInput(format!(
                    "all edges must have the same rank: expected {}, got {}", arity, edge.len())));
            }
        }
        let mut matroids = Vec::with_capacity(arity);
        for p in 0..arity {
            let element_to_vertex = edges.iter().map(|edge| edge[p]).collect();
            matroids.push(MatroidSet::Partition(PartitionSet::new(
                vertex_per_partition,
                element_to_vertex,
            )?));
        }
        Ok(Self {
            matroids,
            member: Bitvec::new(edges.len()),
            ground_set_size: edges.len(),
        })
    }

    /// Creates a directed Hamiltonian path instance over the given edges. The
    /// in-degree and out-degree matroids cap both degrees at one, and the
    /// path-forest matroid rejects cycles; together they accept exactly the
    /// sets of vertex-disjoint simple directed paths.
    pub fn hamiltonian(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self, Error> {
        let matroids = vec![
            MatroidSet::DegreeBound(DegreeBoundSet::new(
                vertex_count,
                edges.iter().map(|e| e.1).collect(),
            )?),
            MatroidSet::DegreeBound(DegreeBoundSet::new(
                vertex_count,
                edges.iter().map(|e| e.0).collect(),
            )?),
            MatroidSet::PathForest(PathForestSet::new(vertex_count, edges)?),
        ];
        Ok(Self {
            matroids,
            member: Bitvec::new(edges.len()),
            ground_set_size: edges.len(),
        })
    }

    // --- INSTANCE MODIFICATION --- //

    /// Offers `element` to every matroid, in order. On the first rejection
    /// the earlier acceptances are undone and the call returns false; on full
    /// success the element joins the common selection.
    pub fn try_add(&mut self, element: usize) -> Result<bool, Error> {
        if element >= self.ground_set_size {
            return Err(Error::InvalidOperation(format!(
                "element {} out of bounds (ground set size {})", element, self.ground_set_size)));
        }
        if self.member.get(element) {
            return Err(Error::InvalidOperation(format!(
                "element {} is already in the intersection", element)));
        }
        for j in 0..self.matroids.len() {
            if !self.matroids[j].try_add(element)? {
                for i in 0..j {
                    self.matroids[i].remove(element)?;
                }
                return Ok(false);
            }
        }
        self.member.set(element);
        Ok(true)
    }

    /// Removes `element` from every matroid and from the common selection
    pub fn remove(&mut self, element: usize) -> Result<(), Error> {
        if element >= self.ground_set_size || !self.member.get(element) {
            return Err(Error::InvalidOperation(format!(
                "element {} is not in the intersection", element)));
        }
        for matroid in self.matroids.iter_mut() {
            matroid.remove(element)?;
        }
        self.member.clear(element);
        Ok(())
    }

    /// Removes every selected element, in ascending order, restoring the
    /// empty selection in every matroid
    pub fn reset(&mut self) -> Result<(), Error> {
        for element in 0..self.ground_set_size {
            if self.member.get(element) {
                self.remove(element)?;
            }
        }
        Ok(())
    }

    // --- GETTERS --- //

    pub fn ground_set_size(&self) -> usize {
        self.ground_set_size
    }

    /// The number of intersected matroids
    pub fn arity(&self) -> usize {
        self.matroids.len()
    }

    pub fn is_member(&self, element: usize) -> bool {
        self.member.get(element)
    }

    pub fn intersection_size(&self) -> usize {
        self.member.count_ones()
    }

    /// The selected elements, in ascending order
    pub fn selection(&self) -> Vec<usize> {
        self.member.iter_ones().collect()
    }
}

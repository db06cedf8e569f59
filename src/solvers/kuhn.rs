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

//! Exact maximum bipartite matching by iterated augmenting paths. The
//! intersection of two partition matroids is exactly the set of matchings of
//! a bipartite graph, and that special case is solvable in polynomial time,
//! so the engine bypasses the local search entirely and certifies ratio 1.
//!
//! The left-side visited marks are cleared once per outer pass, not once per
//! starting vertex: a vertex that failed to augment cannot succeed again in
//! the same pass, and skipping it keeps a pass linear in the graph size.

use std::time::Instant;

use crate::common::{Error, Solution};

/// Sentinel for "right-side vertex is unmatched"
const UNMATCHED: usize = usize::MAX;

pub struct KuhnMatching {
    /// For each left vertex, the (right vertex, element index) pairs of its edges
    graph: Vec<Vec<(usize, usize)>>,
    vertex_per_partition: usize,
}

impl KuhnMatching {

    /// Builds the solver from the edge list of a bipartite matching instance.
    /// Each edge is a pair (left vertex, right vertex); its position in the
    /// list is the element index reported in the solution.
    pub fn new(vertex_per_partition: usize, edges: &[Vec<usize>]) -> Result<Self, Error> {
        let mut graph = vec![Vec::new(); vertex_per_partition];
        for (element, edge) in edges.iter().enumerate() {
            if edge.len() != 2 {
                return Err(Error::InvalidInput(format!(
                    "augmenting-path matching requires rank-2 edges, got rank {}", edge.len())));
            }
            let (u, v) = (edge[0], edge[1]);
            if u >= vertex_per_partition || v >= vertex_per_partition {
                return Err(Error::InvalidInput(format!(
                    "edge ({}, {}) out of bounds (vertex count {})", u, v, vertex_per_partition)));
            }
            graph[u].push((v, element));
        }
        Ok(Self {
            graph,
            vertex_per_partition,
        })
    }

    pub fn run(&self) -> Solution {
        let start = Instant::now();
        let n = self.vertex_per_partition;
        let mut match_vertex = vec![UNMATCHED; n];
        let mut match_edge = vec![UNMATCHED; n];
        let mut is_visited = vec![false; n];
        let mut is_matched = vec![false; n];
        loop {
            let mut any = false;
            is_visited.fill(false);
            for u in 0..n {
                if !is_visited[u]
                    && !is_matched[u]
                    && augment(u, &self.graph, &mut is_visited, &mut is_matched, &mut match_vertex, &mut match_edge)
                {
                    any = true;
                }
            }
            if !any {
                break;
            }
        }
        let mut selection = Vec::new();
        for v in 0..n {
            if match_vertex[v] != UNMATCHED {
                selection.push(match_edge[v]);
            }
        }
        Solution::new(1.0, selection, start.elapsed().as_secs())
    }
}

/// Searches an augmenting path starting at the left vertex `u`, rematching
/// along the way on success
fn augment(
    u: usize,
    graph: &[Vec<(usize, usize)>],
    is_visited: &mut [bool],
    is_matched: &mut [bool],
    match_vertex: &mut [usize],
    match_edge: &mut [usize],
) -> bool {
    if is_visited[u] {
        return false;
    }
    is_visited[u] = true;
    for &(v, element) in graph[u].iter() {
        if match_vertex[v] == UNMATCHED
            || augment(match_vertex[v], graph, is_visited, is_matched, match_vertex, match_edge)
        {
            match_vertex[v] = u;
            match_edge[v] = element;
            is_matched[u] = true;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod test_kuhn {
    use super::*;

    fn matching_size(edges: Vec<Vec<usize>>, n: usize) -> usize {
        KuhnMatching::new(n, &edges).unwrap().run().size()
    }

    #[test]
    pub fn perfect_matching_on_the_diamond() {
        let edges = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
        let solution = KuhnMatching::new(2, &edges).unwrap().run();
        assert_eq!(2, solution.size());
        assert_eq!(1.0, solution.ratio());
    }

    #[test]
    pub fn augments_through_a_chain() {
        // greedy would match (0, 0) and leave vertex 1 unmatched; the
        // augmenting path rematches 0 to its second endpoint
        let edges = vec![vec![0, 0], vec![1, 0], vec![0, 1]];
        assert_eq!(2, matching_size(edges, 2));
    }

    #[test]
    pub fn odd_structure_requires_a_long_augmenting_path() {
        let edges = vec![
            vec![0, 0],
            vec![1, 0],
            vec![1, 1],
            vec![2, 1],
            vec![2, 2],
            vec![0, 2],
        ];
        assert_eq!(3, matching_size(edges, 3));
    }

    #[test]
    pub fn empty_graph_yields_the_empty_matching() {
        let solution = KuhnMatching::new(0, &[]).unwrap().run();
        assert!(solution.selection().is_empty());
        assert_eq!(1.0, solution.ratio());
    }

    #[test]
    pub fn isolated_vertices_stay_unmatched() {
        let edges = vec![vec![0, 3], vec![1, 3]];
        let solution = KuhnMatching::new(4, &edges).unwrap().run();
        assert_eq!(1, solution.size());
    }

    #[test]
    pub fn rejects_hyperedges() {
        assert!(KuhnMatching::new(2, &[vec![0, 1, 0]]).is_err());
    }
}

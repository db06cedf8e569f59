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

//! Independent feasibility checks for emitted solutions. These re-derive the
//! constraints from the instance data instead of consulting the oracles, so
//! a bug in the incremental bookkeeping cannot hide behind itself. The
//! harness validates every solution before printing it.

use crate::common::Error;

/// Checks that the selection is a set of in-bounds element indexes
fn check_selection_set(ground_set_size: usize, selection: &[usize]) -> Result<(), Error> {
    let mut sorted = selection.to_vec();
    sorted.sort_unstable();
    for (i, &element) in sorted.iter().enumerate() {
        if i > 0 && element == sorted[i - 1] {
            return Err(Error::InvalidInput(format!(
                "duplicate element {} in solution", element)));
        }
        if element >= ground_set_size {
            return Err(Error::InvalidInput(format!(
                "element {} out of bounds (ground set size {})", element, ground_set_size)));
        }
    }
    Ok(())
}

/// Validates a d-dimensional matching: every selected hyperedge must be in
/// bounds and no two selected hyperedges may share a vertex in any partition
pub fn validate_matching(
    vertex_per_partition: usize,
    edges: &[Vec<usize>],
    selection: &[usize],
) -> Result<(), Error> {
    let arity = edges.first().map_or(0, |edge| edge.len());
    for edge in edges {
        if edge.len() != arity {
            return Err(Error::InvalidInput("edges of mixed rank".to_string()));
        }
        for &v in edge {
            if v >= vertex_per_partition {
                return Err(Error::InvalidInput(format!(
                    "edge vertex {} out of bounds (vertex count {})", v, vertex_per_partition)));
            }
        }
    }
    check_selection_set(edges.len(), selection)?;
    let mut used_vertices = vec![vec![false; vertex_per_partition]; arity];
    for &element in selection {
        for (p, &v) in edges[element].iter().enumerate() {
            if used_vertices[p][v] {
                return Err(Error::InvalidInput(format!(
                    "vertex {} of partition {} is used twice", v, p)));
            }
            used_vertices[p][v] = true;
        }
    }
    Ok(())
}

/// Validates a set of vertex-disjoint simple directed paths: in-degree and
/// out-degree at most one for every vertex, and no directed cycle
pub fn validate_hamiltonian_path(
    vertex_count: usize,
    edges: &[(usize, usize)],
    selection: &[usize],
) -> Result<(), Error> {
    for &(a, b) in edges {
        if a >= vertex_count || b >= vertex_count {
            return Err(Error::InvalidInput(format!(
                "edge ({}, {}) out of bounds (vertex count {})", a, b, vertex_count)));
        }
    }
    check_selection_set(edges.len(), selection)?;
    if selection.is_empty() {
        return Ok(());
    }
    let mut incoming = vec![false; vertex_count];
    let mut outgoing: Vec<Option<usize>> = vec![None; vertex_count];
    for &element in selection {
        let (from, to) = edges[element];
        if incoming[to] {
            return Err(Error::InvalidInput(format!(
                "vertex {} has multiple incoming edges", to)));
        }
        incoming[to] = true;
        if outgoing[from].is_some() {
            return Err(Error::InvalidInput(format!(
                "vertex {} has multiple outgoing edges", from)));
        }
        outgoing[from] = Some(element);
    }
    // walk forward from every path start; a selected edge whose endpoint is
    // seen again within the same walk closes a cycle
    let mut visited = vec![0; vertex_count];
    let mut iter = 1;
    for v in 0..vertex_count {
        if visited[v] == 0 {
            let mut cur = v;
            while let Some(element) = outgoing[cur] {
                cur = edges[element].1;
                if visited[cur] != 0 {
                    if visited[cur] == iter {
                        return Err(Error::InvalidInput("cycle detected".to_string()));
                    }
                    break;
                }
                visited[cur] = iter;
            }
            iter += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_validation {
    use super::*;

    #[test]
    pub fn accepts_a_valid_matching() {
        let edges = vec![vec![0, 0], vec![1, 1]];
        assert!(validate_matching(2, &edges, &[0, 1]).is_ok());
    }

    #[test]
    pub fn rejects_a_duplicate_element() {
        let edges = vec![vec![0, 0], vec![1, 1]];
        assert!(validate_matching(2, &edges, &[0, 0]).is_err());
    }

    #[test]
    pub fn rejects_an_out_of_bounds_element() {
        let edges = vec![vec![0, 0]];
        assert!(validate_matching(2, &edges, &[3]).is_err());
    }

    #[test]
    pub fn rejects_a_shared_vertex() {
        let edges = vec![vec![0, 0, 1], vec![1, 0, 0]];
        assert!(validate_matching(2, &edges, &[0, 1]).is_err());
    }

    #[test]
    pub fn accepts_disjoint_directed_paths() {
        let edges = vec![(0, 1), (2, 3)];
        assert!(validate_hamiltonian_path(4, &edges, &[0, 1]).is_ok());
    }

    #[test]
    pub fn rejects_multiple_outgoing_edges() {
        let edges = vec![(0, 1), (0, 2)];
        assert!(validate_hamiltonian_path(3, &edges, &[0, 1]).is_err());
    }

    #[test]
    pub fn rejects_multiple_incoming_edges() {
        let edges = vec![(0, 2), (1, 2)];
        assert!(validate_hamiltonian_path(3, &edges, &[0, 1]).is_err());
    }

    #[test]
    pub fn rejects_a_directed_cycle() {
        let edges = vec![(0, 1), (1, 2), (2, 0)];
        assert!(validate_hamiltonian_path(3, &edges, &[0, 1, 2]).is_err());
    }

    #[test]
    pub fn empty_selection_is_always_feasible() {
        assert!(validate_matching(3, &[vec![0, 0]], &[]).is_ok());
        assert!(validate_hamiltonian_path(3, &[(0, 1)], &[]).is_ok());
    }
}

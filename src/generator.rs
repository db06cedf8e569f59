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

//! Seeded random instance generators for the three problem families. Every
//! generator enumerates its candidate edges in a canonical ascending order
//! and draws one uniform sample per candidate, so a given (seed, parameters)
//! pair always produces the same edge list.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

pub struct GraphGenerator {
    rng: StdRng,
}

impl GraphGenerator {

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random bipartite graph with n vertices on each side: every pair
    /// (left, right) is kept with probability p
    pub fn erdos_renyi_bipartite(&mut self, n: usize, p: f64) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if self.rng.gen::<f64>() < p {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Complete bipartite graph with n vertices on each side
    pub fn complete_bipartite(&mut self, n: usize) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..n {
                edges.push((i, j));
            }
        }
        edges
    }

    /// 3-uniform tripartite hypergraph with n vertices per partition: every
    /// triple is kept with probability p
    pub fn tripartite(&mut self, n: usize, p: f64) -> Vec<[usize; 3]> {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..n {
                for l in 0..n {
                    if self.rng.gen::<f64>() < p {
                        edges.push([i, j, l]);
                    }
                }
            }
        }
        edges
    }

    /// Random directed graph on n vertices with a planted directed path of
    /// `min_planted_path_len` edges along a random vertex permutation. Every
    /// ordered pair (i, j), i != j, is kept with probability p; the planted
    /// edges are always kept and never duplicated.
    pub fn directed_with_planted_path(
        &mut self,
        n: usize,
        p: f64,
        min_planted_path_len: usize,
    ) -> Vec<(usize, usize)> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        let mut planted = FxHashSet::default();
        let path_len = min_planted_path_len.min(n.saturating_sub(1));
        for i in 0..path_len {
            planted.insert((order[i], order[i + 1]));
        }
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                // one draw per ordered pair, even for planted edges, so the
                // sampled part does not depend on the planted path
                let keep = self.rng.gen::<f64>() < p;
                if keep || planted.contains(&(i, j)) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }
}

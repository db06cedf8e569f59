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

//! Greedy baseline: one ascending sweep over the ground set, keeping every
//! element the instance accepts. The result is maximal, which gives the
//! classical 1/k guarantee for the intersection of k matroids.

use std::time::Instant;

use crate::common::{Error, Solution};
use crate::core::problem::Problem;

pub struct Baseline<'p> {
    problem: &'p mut Problem,
}

impl<'p> Baseline<'p> {

    pub fn new(problem: &'p mut Problem) -> Self {
        Self { problem }
    }

    pub fn run(&mut self) -> Result<Solution, Error> {
        let start = Instant::now();
        let mut selection = Vec::new();
        for element in 0..self.problem.ground_set_size() {
            if self.problem.try_add(element)? {
                selection.push(element);
            }
        }
        let ratio = if self.problem.ground_set_size() == 0 {
            // nothing to select: the empty solution is optimal
            1.0
        } else {
            1.0 / self.problem.arity() as f64
        };
        Ok(Solution::new(ratio, selection, start.elapsed().as_secs()))
    }
}

#[cfg(test)]
mod test_baseline {
    use super::*;

    #[test]
    pub fn sweeps_in_ascending_order() {
        let edges = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
        let mut problem = Problem::matching(2, 2, &edges).unwrap();
        let solution = Baseline::new(&mut problem).run().unwrap();
        assert_eq!(&[0, 3], solution.selection());
        assert_eq!(0.5, solution.ratio());
    }

    #[test]
    pub fn empty_instance_is_solved_optimally() {
        let mut problem = Problem::matching(3, 0, &[]).unwrap();
        let solution = Baseline::new(&mut problem).run().unwrap();
        assert!(solution.selection().is_empty());
        assert_eq!(1.0, solution.ratio());
    }

    #[test]
    pub fn selection_matches_the_instance_membership() {
        let edges = vec![
            vec![0, 1, 2],
            vec![1, 1, 0],
            vec![2, 0, 1],
        ];
        let mut problem = Problem::matching(3, 3, &edges).unwrap();
        let solution = Baseline::new(&mut problem).run().unwrap();
        assert_eq!(solution.selection(), problem.selection().as_slice());
    }
}

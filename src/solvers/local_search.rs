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

//! This module provides the exchange local search, the main solver of the
//! crate. Starting from the empty selection, the engine looks for a
//! (t, t+1)-exchange: t selected elements whose removal allows t+1 currently
//! unselected elements in, growing the solution by one. The exchange depth is
//! deepened one step at a time; when a whole pass at depth t finds no
//! exchange, the selection is a depth-t local optimum and a closed-form
//! approximation ratio holds for it, so a checkpoint solution is emitted
//! before moving on to depth t+1.
//!
//! The search is first-improvement over the ground set in ascending index
//! order, with no scoring and no randomness, so a rerun on the same instance
//! emits the same solutions.
//!
//! Both phases of an exchange are recursive descents that speculatively
//! modify the instance and undo their own modification on every failing
//! return path. Elements removed in the first phase are frozen for the rest
//! of the attempt; without that freeze the second phase could re-add an
//! element that was just removed and report the swap as progress.
//!
//! The wall clock is probed at every recursion entry. When the budget is
//! exhausted every frame fails, unwinding through the same undo paths as an
//! ordinary dead end, so the selection stays feasible and the engine can
//! still emit the solution it had, tagged with the ratio of the last depth
//! it fully explored.

use crate::common::{approximation_ratio, Error, Solution, SolverParameters};
use crate::core::bitvec::Bitvec;
use crate::core::problem::Problem;
use crate::statistics::Statistics;

pub struct LocalSearch<'p, const S: bool> {
    problem: &'p mut Problem,
    /// Mirrors the membership vector of the instance during the search
    solution_mask: Bitvec,
    /// Elements removed by the current exchange attempt, frozen until it ends
    just_removed: Bitvec,
    /// Wall-clock budget of the run
    parameters: SolverParameters,
    /// Statistics collectors
    statistics: Statistics<S>,
    /// Latched once the budget is exhausted; every later probe is free
    time_limit_reached: bool,
    solution_size: usize,
}

impl<'p, const S: bool> LocalSearch<'p, S> {

    pub fn new(problem: &'p mut Problem, timeout: u64) -> Self {
        let ground_set_size = problem.ground_set_size();
        Self {
            problem,
            solution_mask: Bitvec::new(ground_set_size),
            just_removed: Bitvec::new(ground_set_size),
            parameters: SolverParameters::new(timeout),
            statistics: Statistics::default(),
            time_limit_reached: false,
            solution_size: 0,
        }
    }

    pub fn statistics(&self) -> &Statistics<S> {
        &self.statistics
    }

    /// Runs the search until the selection is provably optimal or the budget
    /// is exhausted, returning one checkpoint solution per explored depth
    pub fn run(&mut self) -> Result<Vec<Solution>, Error> {
        self.parameters.restart();
        self.time_limit_reached = false;
        self.solution_mask.reset();
        for element in self.problem.selection() {
            self.solution_mask.set(element);
        }
        self.solution_size = self.problem.intersection_size();
        let arity = self.problem.arity();
        let mut solutions = Vec::new();
        let mut depth = 0;
        loop {
            if self.check_time_limit() {
                eprintln!("Time limit of {} seconds reached at depth {}",
                    self.parameters.timeout(), depth);
                break;
            }
            // improve the selection as long as some exchange with a removal
            // budget of at most `depth` succeeds
            loop {
                if self.time_limit_reached {
                    break;
                }
                let mut success = false;
                self.just_removed.reset();
                for i in 0..=depth {
                    if self.time_limit_reached {
                        break;
                    }
                    self.statistics.exchange_attempt();
                    if self.exchange(0, i, i + 1)? {
                        self.statistics.exchange_applied();
                        self.solution_size += 1;
                        success = true;
                        break;
                    }
                }
                if depth == self.solution_size {
                    // no solution can be larger than the explored depth
                    break;
                }
                if !success || self.time_limit_reached {
                    break;
                }
            }
            if self.time_limit_reached {
                eprintln!("Time limit of {} seconds reached at depth {}",
                    self.parameters.timeout(), depth);
                eprintln!("Solution size: {}", self.solution_size);
                // the interrupted depth proves nothing; report the bound of
                // the last depth that was fully explored
                let ratio = if depth == 0 {
                    0.0
                } else {
                    approximation_ratio(depth - 1, arity)?
                };
                eprintln!("Approximation ratio: {}", ratio);
                self.statistics.plateau();
                solutions.push(self.checkpoint(ratio));
                break;
            }
            let ratio = if depth == self.solution_size {
                1.0
            } else {
                approximation_ratio(depth, arity)?
            };
            self.statistics.plateau();
            solutions.push(self.checkpoint(ratio));
            if depth == self.solution_size {
                break;
            }
            eprintln!("At depth {} we found a solution of size {}", depth, self.solution_size);
            depth += 1;
        }
        self.statistics.print();
        Ok(solutions)
    }

    /// Probes the wall clock, latching the result
    fn check_time_limit(&mut self) -> bool {
        if !self.time_limit_reached && self.parameters.time_limit_reached() {
            self.time_limit_reached = true;
        }
        self.time_limit_reached
    }

    /// Materialises the current selection as a checkpoint solution
    fn checkpoint(&self, ratio: f64) -> Solution {
        Solution::new(
            ratio,
            self.solution_mask.iter_ones().collect(),
            self.parameters.elapsed_secs(),
        )
    }

    /// Phase one of an exchange attempt: choose `remove_quantity` selected
    /// elements at indexes >= `idx`, remove and freeze them, then hand over
    /// to the addition phase. Every removal is undone when the recursion
    /// below it fails; the re-add must succeed because the selection it
    /// restores was feasible.
    fn exchange(&mut self, idx: usize, remove_quantity: usize, add_quantity: usize) -> Result<bool, Error> {
        if self.check_time_limit() {
            return Ok(false);
        }
        if remove_quantity == 0 {
            return self.add_elements(0, add_quantity);
        }
        if idx == self.problem.ground_set_size() {
            return Ok(false);
        }
        if self.solution_mask.get(idx) {
            self.problem.remove(idx)?;
            self.solution_mask.clear(idx);
            self.just_removed.set(idx);
            if self.exchange(idx + 1, remove_quantity - 1, add_quantity)? {
                return Ok(true);
            }
            self.just_removed.clear(idx);
            if !self.problem.try_add(idx)? {
                return Err(Error::InvalidOperation(format!(
                    "element {} could not be restored while undoing an exchange", idx)));
            }
            self.solution_mask.set(idx);
        }
        self.exchange(idx + 1, remove_quantity, add_quantity)
    }

    /// Phase two of an exchange attempt: grow the selection by
    /// `add_quantity` elements at indexes >= `idx`, skipping the frozen and
    /// the already selected ones. Every accepted element is removed again
    /// when the recursion below it fails.
    fn add_elements(&mut self, idx: usize, add_quantity: usize) -> Result<bool, Error> {
        if self.check_time_limit() {
            return Ok(false);
        }
        if add_quantity == 0 {
            return Ok(true);
        }
        if idx == self.problem.ground_set_size() {
            return Ok(false);
        }
        if self.just_removed.get(idx) || self.solution_mask.get(idx) {
            return self.add_elements(idx + 1, add_quantity);
        }
        if self.problem.try_add(idx)? {
            self.statistics.accepted_addition();
            self.solution_mask.set(idx);
            if self.add_elements(idx + 1, add_quantity - 1)? {
                return Ok(true);
            }
            self.problem.remove(idx)?;
            self.solution_mask.clear(idx);
        } else {
            self.statistics.rejected_addition();
        }
        self.add_elements(idx + 1, add_quantity)
    }
}

#[cfg(test)]
mod test_local_search {
    use super::*;
    use assert_float_eq::*;

    fn run_to_completion(problem: &mut Problem) -> Vec<Solution> {
        LocalSearch::<false>::new(problem, u64::MAX).run().unwrap()
    }

    #[test]
    pub fn escapes_the_greedy_trap() {
        // the middle edge (0, 0) blocks both endpoints: starting from {1},
        // only a (1, 2)-exchange reaches the maximum {0, 2}
        let edges = vec![vec![0, 1], vec![0, 0], vec![1, 0]];
        let mut problem = Problem::matching(2, 2, &edges).unwrap();
        // force the bad starting point
        assert!(problem.try_add(1).unwrap());
        let solutions = run_to_completion(&mut problem);
        let last = solutions.last().unwrap();
        assert_eq!(2, last.size());
        assert_eq!(&[0, 2], last.selection());
        assert_float_absolute_eq!(1.0, last.ratio(), 1e-9);
    }

    #[test]
    pub fn solves_the_diamond_to_optimality() {
        let edges = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
        let mut problem = Problem::matching(2, 2, &edges).unwrap();
        let solutions = run_to_completion(&mut problem);
        let last = solutions.last().unwrap();
        assert_eq!(2, last.size());
        assert_float_absolute_eq!(1.0, last.ratio(), 1e-9);
    }

    #[test]
    pub fn emits_one_checkpoint_per_depth() {
        let edges = vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 1, 0]];
        let mut problem = Problem::matching(3, 2, &edges).unwrap();
        let solutions = run_to_completion(&mut problem);
        // depth 0 proves 1/3, depth 1 proves 0.4, depth 2 proves optimality
        assert_eq!(3, solutions.len());
        assert_float_absolute_eq!(1.0 / 3.0, solutions[0].ratio(), 1e-9);
        assert_float_absolute_eq!(0.4, solutions[1].ratio(), 1e-9);
        assert_float_absolute_eq!(1.0, solutions[2].ratio(), 1e-9);
        for solution in solutions.iter() {
            assert_eq!(&[0, 1], solution.selection());
        }
    }

    #[test]
    pub fn sizes_never_decrease_between_checkpoints() {
        let edges = vec![
            vec![0, 1], vec![0, 0], vec![1, 0], vec![1, 2],
            vec![2, 2], vec![3, 3], vec![2, 3], vec![3, 1],
        ];
        let mut problem = Problem::matching(2, 4, &edges).unwrap();
        let solutions = run_to_completion(&mut problem);
        for pair in solutions.windows(2) {
            assert!(pair[0].size() <= pair[1].size());
        }
        assert_float_absolute_eq!(1.0, solutions.last().unwrap().ratio(), 1e-9);
    }

    #[test]
    pub fn empty_instance_terminates_immediately() {
        let mut problem = Problem::matching(2, 0, &[]).unwrap();
        let solutions = run_to_completion(&mut problem);
        assert_eq!(1, solutions.len());
        assert!(solutions[0].selection().is_empty());
        assert_float_absolute_eq!(1.0, solutions[0].ratio(), 1e-9);
    }

    #[test]
    pub fn hamiltonian_path_is_recovered() {
        let edges = vec![(0, 1), (1, 2), (2, 3)];
        let mut problem = Problem::hamiltonian(4, &edges).unwrap();
        let solutions = run_to_completion(&mut problem);
        let last = solutions.last().unwrap();
        assert_eq!(&[0, 1, 2], last.selection());
        assert_float_absolute_eq!(1.0, last.ratio(), 1e-9);
    }

    #[test]
    pub fn rerun_after_reset_is_deterministic() {
        let edges = vec![
            vec![0, 0, 1], vec![1, 1, 1], vec![0, 1, 0], vec![2, 0, 2], vec![1, 2, 0],
        ];
        let mut problem = Problem::matching(3, 3, &edges).unwrap();
        let first = run_to_completion(&mut problem);
        problem.reset().unwrap();
        let second = run_to_completion(&mut problem);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.selection(), b.selection());
            assert_float_absolute_eq!(a.ratio(), b.ratio(), 1e-12);
        }
    }

    #[test]
    pub fn exhausted_budget_reports_no_proven_bound() {
        let edges = vec![vec![0, 0], vec![1, 1]];
        let mut problem = Problem::matching(2, 2, &edges).unwrap();
        let solutions = LocalSearch::<false>::new(&mut problem, 0).run().unwrap();
        // the clock fires before depth 0 completes: nothing is proven
        assert!(solutions.iter().all(|s| s.ratio() == 0.0) || solutions.is_empty());
    }

    #[test]
    pub fn statistics_count_the_applied_exchanges() {
        let edges = vec![vec![0, 0], vec![1, 1], vec![2, 2]];
        let mut problem = Problem::matching(2, 3, &edges).unwrap();
        let mut search = LocalSearch::<true>::new(&mut problem, u64::MAX);
        let solutions = search.run().unwrap();
        // three (0, 1)-exchanges build the solution, one checkpoint per depth
        assert_eq!(3, search.statistics().exchanges_applied());
        assert_eq!(solutions.len(), search.statistics().plateaus());
    }
}

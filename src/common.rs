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

use std::time::Instant;

/// The error kinds of the crate. All of them are fatal: they either reject a
/// malformed instance at construction or expose a bug in the calling code.
/// Running out of time is not an error and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed instance data (out-of-range vertex, wrong edge rank, ...)
    InvalidInput(String),
    /// An operation that violates a precondition of the engine, such as
    /// adding an element twice or removing an absent one
    InvalidOperation(String),
    /// A guarantee that is not known for the requested number of matroids
    Unsupported(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "invalid operation: {}", msg),
            Error::Unsupported(msg) => write!(f, "unsupported: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Maps the deepest fully explored exchange depth to the approximation
/// guarantee it proves for a k-matroid intersection. At depth 0 the solution
/// is maximal and the classical greedy bound of 1/k applies; for two matroids
/// the bound of a depth-t local optimum is (t+1)/(t+2); for three matroids
/// the bound follows the local-search analysis with the exponent -0.3562
/// (literal constant from the published bound, still to be confirmed).
pub fn approximation_ratio(depth: usize, arity: usize) -> Result<f64, Error> {
    if depth == 0 {
        return Ok(1.0 / arity as f64);
    }
    if arity == 2 {
        return Ok((depth + 1) as f64 / (depth + 2) as f64);
    }
    if arity != 3 {
        return Err(Error::Unsupported(format!(
            "no approximation ratio is known for {} matroids", arity)));
    }
    Ok(2.0 / (3.0 + 2.0 * (depth as f64).powf(-0.3562)))
}

/// This structure represents one feasible solution found by an algorithm,
/// together with the approximation ratio that was proven for it at the time
/// it was emitted. It does not reference any engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Guaranteed ratio between this solution's size and the optimum, in (0, 1]
    ratio: f64,
    /// The selected elements of the ground set, as produced by the algorithm
    selection: Vec<usize>,
    /// Number of seconds, since the start of the run, at which the solution was found
    time_found: u64,
}

impl Solution {

    pub fn new(ratio: f64, selection: Vec<usize>, time_found: u64) -> Self {
        Self {
            ratio,
            selection,
            time_found,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn size(&self) -> usize {
        self.selection.len()
    }

    pub fn time_found(&self) -> u64 {
        self.time_found
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Solution of size {} with approximation ratio {:.6} found in {} seconds",
            self.size(), self.ratio, self.time_found)
    }
}

/// Parameters of a solver run
pub struct SolverParameters {
    /// Wall-clock budget for the run, in seconds
    timeout: u64,
    /// Time at which the run started
    start: Instant,
}

impl SolverParameters {

    pub fn new(timeout: u64) -> Self {
        Self {
            timeout,
            start: Instant::now(),
        }
    }

    /// Restarts the clock; called at the beginning of a run
    pub fn restart(&mut self) {
        self.start = Instant::now();
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }

    pub fn time_limit_reached(&self) -> bool {
        self.elapsed_secs() >= self.timeout
    }
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self::new(u64::MAX)
    }
}

#[cfg(test)]
mod test_common {
    use super::*;
    use assert_float_eq::*;

    #[test]
    pub fn ratio_at_depth_zero_is_the_greedy_bound() {
        assert_float_absolute_eq!(0.5, approximation_ratio(0, 2).unwrap(), 1e-9);
        assert_float_absolute_eq!(1.0 / 3.0, approximation_ratio(0, 3).unwrap(), 1e-9);
    }

    #[test]
    pub fn ratio_for_two_matroids() {
        assert_float_absolute_eq!(2.0 / 3.0, approximation_ratio(1, 2).unwrap(), 1e-9);
        assert_float_absolute_eq!(3.0 / 4.0, approximation_ratio(2, 2).unwrap(), 1e-9);
        assert_float_absolute_eq!(11.0 / 12.0, approximation_ratio(10, 2).unwrap(), 1e-9);
    }

    #[test]
    pub fn ratio_for_three_matroids() {
        // at depth 1 the power term is exactly 1
        assert_float_absolute_eq!(0.4, approximation_ratio(1, 3).unwrap(), 1e-9);
        // the bound improves with the depth and stays below 2/3
        let r2 = approximation_ratio(2, 3).unwrap();
        let r8 = approximation_ratio(8, 3).unwrap();
        assert!(0.4 < r2 && r2 < r8 && r8 < 2.0 / 3.0);
    }

    #[test]
    pub fn ratio_is_unsupported_beyond_three_matroids() {
        assert!(approximation_ratio(1, 4).is_err());
        // depth 0 short-circuits to 1/k before the arity check
        assert_float_absolute_eq!(0.25, approximation_ratio(0, 4).unwrap(), 1e-9);
    }
}

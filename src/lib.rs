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

//! Approximate maximum-cardinality intersection of k matroids. The supported
//! problem families are bipartite matching (two partition matroids),
//! d-dimensional matching (d partition matroids) and directed Hamiltonian
//! path (in-degree, out-degree and acyclicity matroids).
//!
//! An instance is a [`Problem`]: k incremental oracles behind one atomic
//! `try_add` / `remove` interface. Three algorithms run against it: the
//! greedy [`Baseline`](solvers::Baseline) with its 1/k guarantee, the
//! exchange [`LocalSearch`](solvers::LocalSearch) which deepens its exchange
//! budget under a wall-clock limit and attaches a proven ratio to every
//! plateau, and the exact [`KuhnMatching`](solvers::KuhnMatching) for the
//! bipartite case.

mod common;
pub mod core;
mod generator;
pub mod solvers;
pub mod statistics;
mod validation;

pub use crate::common::{approximation_ratio, Error, Solution, SolverParameters};
pub use crate::core::problem::Problem;
pub use crate::generator::GraphGenerator;
pub use crate::validation::{validate_hamiltonian_path, validate_matching};

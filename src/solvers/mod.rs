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

//! The three algorithms of the crate. `Baseline` greedily builds a maximal
//! selection in one sweep, `LocalSearch` improves it exchange by exchange
//! with a guarantee per explored depth, and `KuhnMatching` solves the
//! two-matroid matching case exactly. All of them are run one at a time
//! against an instance that is reset in between.

mod baseline;
mod kuhn;
mod local_search;

pub use baseline::Baseline;
pub use kuhn::KuhnMatching;
pub use local_search::LocalSearch;

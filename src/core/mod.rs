pub mod bitvec;
pub mod matroid;
pub mod problem;

//! 0/1 linear-program reduction of the ordering problem.
//!
//! One binary variable per unordered pair `i < j` ("`i` precedes `j`"), objective
//! coefficient `C[i][j] - C[j][i]`, and two transitivity rows per triple `i < j < k`.
//! Solving is delegated to a [`BinaryLpSolver`]; [`MicroLpSolver`] is the stock exact one.

mod micro_lp;
mod model;
mod reduction;

pub use micro_lp::MicroLpSolver;
pub use model::{BinaryLp, BinaryLpSolver, LinearConstraint, SolverError};
pub use reduction::{OrderingLp, PairIndex, PrecedenceMatrix};

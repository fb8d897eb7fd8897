#![forbid(unsafe_code)]

//! Two-layer bipartite crossing minimization.
//!
//! Given an `N1 x N2` incidence matrix between lower-layer nodes (rows, e.g. topics) and
//! fixed upper-layer nodes (columns, e.g. time buckets), find a left-to-right order of the
//! lower nodes with few edge crossings. Heuristics (barycenter, median, randomized split)
//! and an exact path through a 0/1 linear program share one pairwise cost matrix and one
//! crossing-count oracle.
//!
//! ```
//! use crossmin::{CrossMinimizer, MicroLpSolver, SolveEnv, Strategy};
//! use rand::SeedableRng;
//!
//! let cm = CrossMinimizer::new(&[[1, 0, 0], [1, 1, 0], [0, 1, 1]]).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let solver = MicroLpSolver;
//! let mut env = SolveEnv::new(&mut rng, &solver);
//! let best = cm.solve(Strategy::TryAll, &mut env).unwrap();
//! assert_eq!(best.crossings, cm.brute_force().unwrap().1);
//! ```

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod binary_lp;
pub mod error;
pub mod heuristics;
pub mod matrix;
mod minimizer;
pub mod oracle;
pub mod report;
pub mod strategy;

pub use binary_lp::{
    BinaryLp, BinaryLpSolver, LinearConstraint, MicroLpSolver, OrderingLp, PairIndex,
    PrecedenceMatrix, SolverError,
};
pub use error::{Error, Result};
pub use heuristics::EdgelessPolicy;
pub use matrix::{CostMatrix, Incidence, IncidenceMatrix};
pub use minimizer::{CrossMinimizer, SPLIT_ROUNDS};
pub use report::{NoopReporter, Reporter, TracingReporter, WriteReporter};
pub use strategy::{Solution, SolveEnv, SolveOptions, Strategy};

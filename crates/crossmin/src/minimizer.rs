use crate::binary_lp::{BinaryLpSolver, OrderingLp};
use crate::error::Result;
use crate::heuristics::{self, EdgelessPolicy};
use crate::matrix::{CostMatrix, Incidence, IncidenceMatrix};
use crate::oracle;
use rand::Rng;

/// Number of split runs behind [`crate::Strategy::SplitBest10`].
pub const SPLIT_ROUNDS: usize = 10;

/// A two-layer crossing minimization instance.
///
/// Holds the normalized incidence matrix and the derived pairwise cost matrix; both are
/// computed once in the constructor and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossMinimizer {
    incidence: IncidenceMatrix,
    cost: CostMatrix,
}

impl CrossMinimizer {
    /// Builds an instance from an `N1 x N2` matrix; rows are the nodes being ordered.
    pub fn new<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Incidence,
    {
        Ok(Self::from_incidence(IncidenceMatrix::from_rows(rows)?))
    }

    pub fn from_incidence(incidence: IncidenceMatrix) -> Self {
        let cost = CostMatrix::from_incidence(&incidence);
        Self { incidence, cost }
    }

    pub fn lower_count(&self) -> usize {
        self.incidence.rows()
    }

    pub fn upper_count(&self) -> usize {
        self.incidence.cols()
    }

    pub fn incidence(&self) -> &IncidenceMatrix {
        &self.incidence
    }

    pub fn cost_matrix(&self) -> &CostMatrix {
        &self.cost
    }

    pub fn cost(&self, x: usize, y: usize) -> f64 {
        self.cost.get(x, y)
    }

    pub fn cross_count(&self, order: &[usize]) -> Result<f64> {
        oracle::cross_count(&self.cost, order)
    }

    pub fn solve_barycenter(&self, edgeless: EdgelessPolicy) -> Result<Vec<usize>> {
        heuristics::barycenter(&self.incidence, edgeless)
    }

    pub fn solve_median(&self, edgeless: EdgelessPolicy) -> Result<Vec<usize>> {
        heuristics::median(&self.incidence, edgeless)
    }

    pub fn solve_split<R>(&self, rng: &mut R) -> Vec<usize>
    where
        R: Rng + ?Sized,
    {
        heuristics::split(&self.cost, rng)
    }

    pub fn solve_split_best_of<R>(&self, rounds: usize, rng: &mut R) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        heuristics::split_best_of(&self.cost, rounds, rng).map(|(order, _)| order)
    }

    pub fn solve_split10<R>(&self, rng: &mut R) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        self.solve_split_best_of(SPLIT_ROUNDS, rng)
    }

    pub fn binary_lp(&self) -> OrderingLp {
        OrderingLp::build(&self.cost)
    }

    pub fn solve_binary_lp(&self, solver: &dyn BinaryLpSolver) -> Result<Vec<usize>> {
        let precedence = self.binary_lp().solve(solver)?;
        Ok(precedence.order())
    }

    /// Exact optimum by enumeration; only for very small instances.
    pub fn brute_force(&self) -> Result<(Vec<usize>, f64)> {
        oracle::brute_force(&self.cost)
    }
}

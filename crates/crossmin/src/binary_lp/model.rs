use serde::Serialize;

const FEASIBILITY_EPS: f64 = 1e-9;

/// One row of `A x <= b`, stored sparsely.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinearConstraint {
    pub terms: Vec<(usize, f64)>,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn new(terms: Vec<(usize, f64)>, rhs: f64) -> Self {
        Self { terms, rhs }
    }

    pub fn activity(&self, x: &[f64]) -> f64 {
        self.terms.iter().map(|&(v, a)| a * x[v]).sum()
    }

    pub fn is_satisfied(&self, x: &[f64]) -> bool {
        self.activity(x) <= self.rhs + FEASIBILITY_EPS
    }
}

/// `minimize c·x subject to A x <= b, x in {0,1}^N`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BinaryLp {
    pub objective: Vec<f64>,
    pub constraints: Vec<LinearConstraint>,
}

impl BinaryLp {
    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Dense `(A, b)` for solvers that want the `M x N` matrix form.
    pub fn dense_constraints(&self) -> (Vec<Vec<f64>>, Vec<f64>) {
        let n = self.variable_count();
        let mut a = Vec::with_capacity(self.constraints.len());
        let mut b = Vec::with_capacity(self.constraints.len());
        for row in &self.constraints {
            let mut dense = vec![0.0; n];
            for &(v, coef) in &row.terms {
                dense[v] += coef;
            }
            a.push(dense);
            b.push(row.rhs);
        }
        (a, b)
    }

    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, x)| c * x).sum()
    }

    pub fn is_feasible(&self, x: &[f64]) -> bool {
        x.len() == self.variable_count() && self.constraints.iter().all(|r| r.is_satisfied(x))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("problem is infeasible")]
    Infeasible,

    #[error("{0}")]
    Other(String),
}

/// A generic 0/1 linear-program minimizer.
///
/// Returns one value per variable; values are expected to be 0 or 1.
pub trait BinaryLpSolver {
    fn minimize(&self, lp: &BinaryLp) -> Result<Vec<f64>, SolverError>;
}

impl<F> BinaryLpSolver for F
where
    F: Fn(&BinaryLp) -> Result<Vec<f64>, SolverError>,
{
    fn minimize(&self, lp: &BinaryLp) -> Result<Vec<f64>, SolverError> {
        self(lp)
    }
}

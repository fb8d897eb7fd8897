use super::{BinaryLp, BinaryLpSolver, SolverError};
use good_lp::solvers::microlp::microlp;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, variable,
};

/// Exact 0/1 minimizer backed by `good_lp` with the pure-Rust `microlp` backend.
///
/// Every variable is declared binary and every row is added as `terms <= rhs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MicroLpSolver;

impl BinaryLpSolver for MicroLpSolver {
    fn minimize(&self, lp: &BinaryLp) -> Result<Vec<f64>, SolverError> {
        let mut vars = ProblemVariables::new();
        let xs: Vec<Variable> = (0..lp.variable_count())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut objective = Expression::with_capacity(xs.len());
        for (&x, &c) in xs.iter().zip(&lp.objective) {
            objective += x * c;
        }

        let mut model = vars.minimise(objective).using(microlp);
        for row in &lp.constraints {
            let mut activity = Expression::with_capacity(row.terms.len());
            for &(v, a) in &row.terms {
                let x = xs.get(v).ok_or_else(|| {
                    SolverError::Other(format!("row references unknown variable {v}"))
                })?;
                activity += *x * a;
            }
            model.add_constraint(activity.leq(row.rhs));
        }

        let solution = model.solve().map_err(|err| {
            tracing::debug!(error = %err, "microlp solve failed");
            match err {
                ResolutionError::Infeasible => SolverError::Infeasible,
                other => SolverError::Other(other.to_string()),
            }
        })?;
        Ok(xs.iter().map(|&x| solution.value(x)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_lp::LinearConstraint;

    #[test]
    fn picks_cheapest_feasible_assignment() {
        // x0 + x1 <= 1, both attractive: only one may be set, and x1 is cheaper.
        let lp = BinaryLp {
            objective: vec![-1.0, -2.0, 3.0],
            constraints: vec![LinearConstraint::new(vec![(0, 1.0), (1, 1.0)], 1.0)],
        };
        let x = MicroLpSolver.minimize(&lp).unwrap();
        let rounded: Vec<f64> = x.iter().map(|v| v.round()).collect();
        assert_eq!(rounded, vec![0.0, 1.0, 0.0]);
        assert!(lp.is_feasible(&rounded));
    }

    #[test]
    fn reports_infeasible_problems() {
        // x0 >= 1 and x0 <= 0.
        let lp = BinaryLp {
            objective: vec![1.0],
            constraints: vec![
                LinearConstraint::new(vec![(0, -1.0)], -1.0),
                LinearConstraint::new(vec![(0, 1.0)], 0.0),
            ],
        };
        assert_eq!(MicroLpSolver.minimize(&lp), Err(SolverError::Infeasible));
    }

    #[test]
    fn rejects_rows_over_unknown_variables() {
        let lp = BinaryLp {
            objective: vec![1.0],
            constraints: vec![LinearConstraint::new(vec![(4, 1.0)], 1.0)],
        };
        assert!(matches!(MicroLpSolver.minimize(&lp), Err(SolverError::Other(_))));
    }
}

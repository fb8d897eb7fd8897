use super::{BinaryLp, BinaryLpSolver, LinearConstraint};
use crate::error::{Error, Result};
use crate::matrix::CostMatrix;

const BINARY_EPS: f64 = 1e-6;

/// Maps an unordered pair `i < j` to its variable index, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairIndex {
    n: usize,
}

impl PairIndex {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn len(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` unless `i < j < n`.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        if i >= j || j >= self.n {
            return None;
        }
        Some(i * self.n - i * (i + 1) / 2 + (j - i - 1))
    }

    fn var(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.n);
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }
}

/// The ordering problem as a [`BinaryLp`], with decode back to a precedence matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingLp {
    pairs: PairIndex,
    lp: BinaryLp,
}

impl OrderingLp {
    pub fn build(cost: &CostMatrix) -> Self {
        let n = cost.len();
        let pairs = PairIndex::new(n);

        let mut objective = vec![0.0; pairs.len()];
        for i in 0..n {
            for j in (i + 1)..n {
                objective[pairs.var(i, j)] = cost.get(i, j) - cost.get(j, i);
            }
        }

        // Two rows per triple: forbid i<j, j<k, k<i and its mirror.
        let triples = n * n.saturating_sub(1) * n.saturating_sub(2) / 6;
        let mut constraints = Vec::with_capacity(2 * triples);
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let (ij, jk, ik) = (pairs.var(i, j), pairs.var(j, k), pairs.var(i, k));
                    constraints.push(LinearConstraint::new(
                        vec![(ij, 1.0), (jk, 1.0), (ik, -1.0)],
                        1.0,
                    ));
                    constraints.push(LinearConstraint::new(
                        vec![(ij, -1.0), (jk, -1.0), (ik, 1.0)],
                        0.0,
                    ));
                }
            }
        }

        Self {
            pairs,
            lp: BinaryLp {
                objective,
                constraints,
            },
        }
    }

    pub fn lp(&self) -> &BinaryLp {
        &self.lp
    }

    pub fn pairs(&self) -> PairIndex {
        self.pairs
    }

    /// Hands the program to `solver` and decodes its answer.
    ///
    /// With fewer than two nodes there are no variables and the solver is not called.
    pub fn solve(&self, solver: &dyn BinaryLpSolver) -> Result<PrecedenceMatrix> {
        if self.pairs.is_empty() {
            return self.decode(&[]);
        }
        let answer = solver.minimize(&self.lp)?;
        self.decode(&answer)
    }

    /// Turns a 0/1 assignment into `X`, with `X[j][i] = 1 - X[i][j]` by construction.
    pub fn decode(&self, answer: &[f64]) -> Result<PrecedenceMatrix> {
        if answer.len() != self.pairs.len() {
            return Err(Error::solver_failure(format!(
                "solver returned {} values, expected {}",
                answer.len(),
                self.pairs.len()
            )));
        }
        if let Some((v, x)) = answer
            .iter()
            .enumerate()
            .find(|(_, x)| !(x.abs() <= BINARY_EPS || (*x - 1.0).abs() <= BINARY_EPS))
        {
            return Err(Error::solver_failure(format!(
                "solver returned non-binary value {x} for variable {v}"
            )));
        }

        let n = self.pairs.n;
        let mut cells = vec![0u8; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let before = u8::from(answer[self.pairs.var(i, j)] > 0.5);
                cells[i * n + j] = before;
                cells[j * n + i] = 1 - before;
            }
        }
        Ok(PrecedenceMatrix { n, cells })
    }
}

/// Decoded `X`: `X[i][j] == 1` means `i` is placed before `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceMatrix {
    n: usize,
    cells: Vec<u8>,
}

impl PrecedenceMatrix {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[i * self.n + j]
    }

    pub fn precedes(&self, i: usize, j: usize) -> bool {
        self.get(i, j) == 1
    }

    /// How many nodes `i` is placed before.
    pub fn row_sum(&self, i: usize) -> usize {
        self.cells[i * self.n..(i + 1) * self.n]
            .iter()
            .map(|&x| usize::from(x))
            .sum()
    }

    /// Nodes by descending row sum; ties keep index order.
    pub fn order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.n).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.row_sum(i)));
        order
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.n.max(1)).map(<[u8]>::to_vec).collect()
    }
}

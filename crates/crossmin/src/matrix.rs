//! Incidence normalization and the pairwise crossing-cost matrix.

use crate::error::{Error, Result};

/// Truthiness of a single incidence cell.
///
/// Numbers are edges when non-zero (so `NaN` counts as an edge, like any other non-zero
/// float).
pub trait Incidence {
    fn is_edge(&self) -> bool;
}

impl Incidence for bool {
    fn is_edge(&self) -> bool {
        *self
    }
}

macro_rules! impl_numeric_incidence {
    ($($t:ty),* $(,)?) => {
        $(
            impl Incidence for $t {
                fn is_edge(&self) -> bool {
                    *self != (0 as $t)
                }
            }
        )*
    };
}

impl_numeric_incidence!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T: Incidence + ?Sized> Incidence for &T {
    fn is_edge(&self) -> bool {
        (**self).is_edge()
    }
}

/// Normalized 0/1 copy of an `N1 x N2` incidence matrix.
///
/// Rows are lower-layer nodes (the ones being ordered), columns are upper-layer nodes in
/// their fixed left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncidenceMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl IncidenceMatrix {
    /// Builds the matrix from any rectangular container. Ragged rows are rejected.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Incidence,
    {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::invalid_argument(format!(
                    "incidence matrix is not rectangular: row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            cells.extend(row.iter().map(Incidence::is_edge));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// Column indices where lower node `i` has an edge, ascending.
    pub fn edge_columns(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(i)
            .iter()
            .enumerate()
            .filter_map(|(j, &edge)| edge.then_some(j))
    }

    pub fn degree(&self, i: usize) -> usize {
        self.row(i).iter().filter(|&&edge| edge).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|i| self.row(i).iter().map(|&e| u8::from(e)).collect())
            .collect()
    }
}

/// `C[x][y]`: crossings between the edge bundles of `x` and `y` when `x` is left of `y`.
///
/// Not symmetric; `C[x][x]` is always zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostMatrix {
    n: usize,
    values: Vec<f64>,
}

impl CostMatrix {
    pub fn from_incidence(a: &IncidenceMatrix) -> Self {
        let (n1, n2) = (a.rows(), a.cols());

        // prefix[y][j] = number of edges of `y` in columns 0..=j
        let mut prefix = vec![0.0_f64; n1 * n2];
        for y in 0..n1 {
            let mut acc = 0.0;
            for j in 0..n2 {
                if a.get(y, j) {
                    acc += 1.0;
                }
                prefix[y * n2 + j] = acc;
            }
        }

        let mut values = vec![0.0_f64; n1 * n1];
        for x in 0..n1 {
            for y in 0..n1 {
                if x == y {
                    continue;
                }
                let mut sum = 0.0;
                for j in 1..n2 {
                    if a.get(x, j) {
                        sum += prefix[y * n2 + j - 1];
                    }
                }
                values[x * n1 + y] = sum;
            }
        }

        Self { n: n1, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[x * self.n + y]
    }

    pub fn row(&self, x: usize) -> &[f64] {
        &self.values[x * self.n..(x + 1) * self.n]
    }

    /// Whether `x` should go left of `pivot`: strictly cheaper than the reverse.
    pub fn prefers_before(&self, x: usize, pivot: usize) -> bool {
        self.get(x, pivot) < self.get(pivot, x)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|x| self.row(x).to_vec()).collect()
    }
}

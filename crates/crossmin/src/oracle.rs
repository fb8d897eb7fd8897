//! Crossing-count oracle: the objective every strategy minimizes.

use crate::error::{Error, Result};
use crate::matrix::CostMatrix;

/// Checks that `order` holds each index of `0..n` exactly once.
pub fn validate_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::invalid_argument(format!(
            "bad permutation size: got {}, expected {n}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for &v in order {
        let Some(slot) = seen.get_mut(v) else {
            return Err(Error::invalid_argument(format!(
                "permutation index {v} is out of range 0..{n}"
            )));
        };
        if std::mem::replace(slot, true) {
            return Err(Error::invalid_argument(format!(
                "permutation repeats index {v}"
            )));
        }
    }
    Ok(())
}

/// Sum of `C[order[i]][order[j]]` over all position pairs `i < j`.
pub fn cross_count(cost: &CostMatrix, order: &[usize]) -> Result<f64> {
    validate_permutation(order, cost.len())?;
    Ok(cross_count_unchecked(cost, order))
}

pub(crate) fn cross_count_unchecked(cost: &CostMatrix, order: &[usize]) -> f64 {
    let mut cc = 0.0;
    for (i, &left) in order.iter().enumerate() {
        let row = cost.row(left);
        for &right in &order[i + 1..] {
            cc += row[right];
        }
    }
    cc
}

/// Exact minimum by enumerating every permutation (Heap's algorithm).
///
/// Returns the first optimal order in enumeration order.
pub fn brute_force(cost: &CostMatrix) -> Result<(Vec<usize>, f64)> {
    const MAX_NODES: usize = 9;

    let n = cost.len();
    if n > MAX_NODES {
        return Err(Error::invalid_argument(format!(
            "brute force is limited to {MAX_NODES} lower nodes, got {n}"
        )));
    }

    let mut perm: Vec<usize> = (0..n).collect();
    let mut best_order = perm.clone();
    let mut best = cross_count_unchecked(cost, &perm);

    let mut c = vec![0usize; n];
    let mut i = 1;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(c[i], i);
            }
            let cc = cross_count_unchecked(cost, &perm);
            if cc < best {
                best = cc;
                best_order.copy_from_slice(&perm);
            }
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }

    Ok((best_order, best))
}

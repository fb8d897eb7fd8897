//! Barycenter, median and randomized split orderings.
//!
//! Barycenter and median order lower nodes by the central tendency of their neighbor
//! columns. Split is a quicksort-style partition driven by the pairwise cost relation,
//! which is not transitive, so its outcome depends on the random pivots.

use crate::error::{Error, Result};
use crate::matrix::{CostMatrix, IncidenceMatrix};
use crate::oracle::cross_count_unchecked;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where a lower node without edges goes, since it has no barycenter or median.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgelessPolicy {
    /// Key is `+inf`: edgeless nodes go last, in index order.
    #[default]
    Last,
    /// Key is `-inf`: edgeless nodes go first, in index order.
    First,
    /// Fail with [`Error::DegenerateInput`].
    Reject,
}

pub fn barycenter(a: &IncidenceMatrix, policy: EdgelessPolicy) -> Result<Vec<usize>> {
    order_by_column_statistic(a, policy, column_mean)
}

pub fn median(a: &IncidenceMatrix, policy: EdgelessPolicy) -> Result<Vec<usize>> {
    order_by_column_statistic(a, policy, column_median)
}

fn order_by_column_statistic(
    a: &IncidenceMatrix,
    policy: EdgelessPolicy,
    statistic: fn(&[usize]) -> f64,
) -> Result<Vec<usize>> {
    let mut keyed: Vec<(f64, usize)> = Vec::with_capacity(a.rows());
    let mut columns: Vec<usize> = Vec::new();
    for i in 0..a.rows() {
        columns.clear();
        columns.extend(a.edge_columns(i));
        let key = if columns.is_empty() {
            match policy {
                EdgelessPolicy::Last => f64::INFINITY,
                EdgelessPolicy::First => f64::NEG_INFINITY,
                EdgelessPolicy::Reject => return Err(Error::DegenerateInput { node: i }),
            }
        } else {
            statistic(&columns)
        };
        keyed.push((key, i));
    }
    // Stable: equal keys keep index order.
    keyed.sort_by(|(ka, _), (kb, _)| ka.total_cmp(kb));
    Ok(keyed.into_iter().map(|(_, i)| i).collect())
}

fn column_mean(columns: &[usize]) -> f64 {
    columns.iter().sum::<usize>() as f64 / columns.len() as f64
}

// `columns` is ascending; even counts average the two middle values.
fn column_median(columns: &[usize]) -> f64 {
    let mid = columns.len() / 2;
    if columns.len() % 2 == 1 {
        columns[mid] as f64
    } else {
        (columns[mid - 1] + columns[mid]) as f64 / 2.0
    }
}

/// One randomized recursive partition of `0..N1`.
pub fn split<R>(cost: &CostMatrix, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let mut order: Vec<usize> = (0..cost.len()).collect();
    let mut scratch: Vec<usize> = Vec::with_capacity(order.len());
    partition(cost, &mut order, &mut scratch, rng);
    order
}

fn partition<R>(cost: &CostMatrix, range: &mut [usize], scratch: &mut Vec<usize>, rng: &mut R)
where
    R: Rng + ?Sized,
{
    if range.len() < 2 {
        return;
    }

    let pivot = range[rng.gen_range(0..range.len())];

    scratch.clear();
    scratch.extend(
        range
            .iter()
            .copied()
            .filter(|&z| z != pivot && cost.prefers_before(z, pivot)),
    );
    let mid = scratch.len();
    scratch.push(pivot);
    scratch.extend(
        range
            .iter()
            .copied()
            .filter(|&z| z != pivot && !cost.prefers_before(z, pivot)),
    );
    range.copy_from_slice(scratch);

    let (less, rest) = range.split_at_mut(mid);
    partition(cost, less, scratch, rng);
    partition(cost, &mut rest[1..], scratch, rng);
}

/// Runs [`split`] `rounds` times and keeps the first order with the lowest count.
pub fn split_best_of<R>(cost: &CostMatrix, rounds: usize, rng: &mut R) -> Result<(Vec<usize>, f64)>
where
    R: Rng + ?Sized,
{
    if rounds == 0 {
        return Err(Error::invalid_argument("split needs at least one round"));
    }

    let mut best: Option<(Vec<usize>, f64)> = None;
    for _ in 0..rounds {
        let order = split(cost, rng);
        let cc = cross_count_unchecked(cost, &order);
        if best.as_ref().is_none_or(|(_, best_cc)| cc < *best_cc) {
            best = Some((order, cc));
        }
    }
    best.ok_or_else(|| Error::invalid_argument("split produced no candidate"))
}

#![allow(dead_code)]

use drusilla_select::{Euclidean, Metric};
use float_ord::FloatOrd;
use ndarray::{Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `dimension × len` matrix of points drawn uniformly from the unit cube.
pub fn randu(dimension: usize, len: usize, seed: u64) -> Array2<f64> {
    let mut rng = Pcg64::seed_from_u64(seed);
    Array2::from_shape_fn((dimension, len), |_| rng.random::<f64>())
}

/// Exact k furthest neighbors of every query column by a full scan.
///
/// Ties are broken by the lower reference index.
pub fn exact_kfn(
    reference: ArrayView2<'_, f64>,
    queries: ArrayView2<'_, f64>,
    k: usize,
) -> (Array2<usize>, Array2<f64>) {
    let mut neighbors = Array2::zeros((k, queries.ncols()));
    let mut distances = Array2::zeros((k, queries.ncols()));
    for (query_ix, query) in queries.columns().into_iter().enumerate() {
        let mut all: Vec<(usize, f64)> = reference
            .columns()
            .into_iter()
            .enumerate()
            .map(|(ix, point)| (ix, Euclidean.distance(query, point)))
            .collect();
        all.sort_by_key(|&(ix, distance)| (core::cmp::Reverse(FloatOrd(distance)), ix));
        for (slot, &(ix, distance)) in all.iter().take(k).enumerate() {
            neighbors[[slot, query_ix]] = ix;
            distances[[slot, query_ix]] = distance;
        }
    }
    (neighbors, distances)
}

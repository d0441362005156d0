//! Selection primitives over fitness values.
//!
//! Population-level operations in [`crate::simulation::Population`] are
//! built from these index-level helpers:
//! - **Truncation**: rank by fitness, keep the best.
//! - **Fitness-proportional sampling**: roulette-wheel draws with
//!   replacement, used when the population is grown by reproduction.

use rand::Rng;

/// Indices of `fitness` ordered from fittest to least fit.
///
/// The sort is stable, so organisms with equal fitness keep their original
/// relative order.
pub fn rank_descending(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    order
}

/// Draw `n` indices with replacement, each with probability proportional to
/// its fitness.
///
/// Falls back to uniform sampling when every fitness is zero. Returns an
/// empty vector when `fitness` is empty.
pub fn sample_proportional<R: Rng + ?Sized>(fitness: &[f64], n: usize, rng: &mut R) -> Vec<usize> {
    let len = fitness.len();
    if len == 0 {
        return Vec::new();
    }

    let cumulative: Vec<f64> = fitness
        .iter()
        .scan(0.0, |acc, &f| {
            *acc += f.max(0.0);
            Some(*acc)
        })
        .collect();
    let total = cumulative[len - 1];

    if !(total > 0.0 && total.is_finite()) {
        return (0..n).map(|_| rng.random_range(0..len)).collect();
    }

    (0..n)
        .map(|_| {
            let r = rng.random_range(0.0..total);
            cumulative
                .iter()
                .position(|&c| c > r)
                .unwrap_or(len - 1)
        })
        .collect()
}

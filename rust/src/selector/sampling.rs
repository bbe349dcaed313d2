//! Quality-weighted random sampling.

use rand::Rng;

/// Draw an index with probability proportional to `weights[i]`.
///
/// Uses a prefix sum and a uniform draw in `[0, total)`, returning the first
/// index whose cumulative weight exceeds the draw. When every weight is zero
/// the draw is uniform. Returns `None` only for an empty slice.
pub fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return Some(rng.gen_range(0..weights.len()));
    }

    let draw = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight.max(0.0);
        if cumulative > draw {
            return Some(i);
        }
    }

    // Float accumulation can leave `cumulative` a hair below `draw`
    weights.iter().rposition(|w| *w > 0.0)
}

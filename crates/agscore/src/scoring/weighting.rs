//! Softmax weighting shared by the monthly-climate and soil aggregations.

/// Softmax over `scores / temperature`. Higher scores receive more weight,
/// so aggregates lean toward the worst (highest-risk) entries.
pub fn softmax_weights(scores: &[f64], temperature: f64) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let temperature = if temperature.is_finite() && temperature > 0.0 {
        temperature
    } else {
        1.0
    };
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores
        .iter()
        .map(|score| ((score - max) / temperature).exp())
        .collect();
    let total: f64 = exps.iter().sum();

    exps.into_iter().map(|value| value / total).collect()
}

/// Clamps every weight into `[floor, cap]` while keeping the sum at 1.
///
/// Searches for the common scale factor `t` with `Σ clamp(t·wᵢ, floor, cap) = 1`,
/// so unclamped entries keep their relative proportions. Bounds that cannot
/// be met fall back to a plain rescale of the input.
pub fn clamp_and_renormalize(weights: &[f64], floor: f64, cap: f64) -> Vec<f64> {
    let count = weights.len();
    if count == 0 {
        return Vec::new();
    }

    let total: f64 = weights
        .iter()
        .filter(|weight| weight.is_finite() && **weight > 0.0)
        .sum();
    let base: Vec<f64> = if total > 0.0 {
        weights
            .iter()
            .map(|weight| {
                if weight.is_finite() && *weight > 0.0 {
                    weight / total
                } else {
                    0.0
                }
            })
            .collect()
    } else {
        vec![1.0 / count as f64; count]
    };

    let clamped_sum = |scale: f64| -> f64 {
        base.iter()
            .map(|weight| (weight * scale).clamp(floor, cap))
            .sum()
    };

    let reachable_max = base
        .iter()
        .map(|weight| if *weight > 0.0 { cap } else { floor })
        .sum::<f64>();
    let feasible = floor <= cap && floor * count as f64 <= 1.0 && reachable_max >= 1.0;
    if !feasible {
        return base;
    }

    let mut low = 0.0;
    let mut high = 1.0;
    while clamped_sum(high) < 1.0 && high < 1e12 {
        high *= 2.0;
    }
    for _ in 0..200 {
        let mid = (low + high) / 2.0;
        if clamped_sum(mid) < 1.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    let mut adjusted: Vec<f64> = base
        .iter()
        .map(|weight| (weight * high).clamp(floor, cap))
        .collect();
    let sum: f64 = adjusted.iter().sum();
    if sum > 0.0 {
        for weight in &mut adjusted {
            *weight /= sum;
        }
    }
    adjusted
}

/// Weighted mean of `scores` under [`softmax_weights`].
pub fn softmax_aggregate(scores: &[f64], temperature: f64) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let weights = softmax_weights(scores, temperature);
    Some(
        scores
            .iter()
            .zip(weights)
            .map(|(score, weight)| score * weight)
            .sum(),
    )
}

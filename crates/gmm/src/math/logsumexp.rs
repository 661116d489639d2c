//! Numerically stable log-sum-exp.
//!
//! The row maximum is subtracted before exponentiating, so neither very
//! large nor very negative log-probabilities overflow or underflow to a
//! zero total.

// External dependencies
use num_traits::Float;

/// `log(sum_i exp(v_i))`.
///
/// Returns negative infinity for an empty slice or when every entry is
/// negative infinity.
pub fn log_sum_exp<T: Float>(values: &[T]) -> T {
    let max = values
        .iter()
        .copied()
        .fold(T::neg_infinity(), |acc, v| acc.max(v));
    if !max.is_finite() {
        return max;
    }
    let sum = values
        .iter()
        .fold(T::zero(), |acc, &v| acc + (v - max).exp());
    max + sum.ln()
}

/// Replace log-probabilities by normalized probabilities in place.
///
/// Returns the log-sum-exp of the original values. Entries equal to negative
/// infinity become exactly zero.
pub fn normalize_log_probs<T: Float>(values: &mut [T]) -> T {
    let lse = log_sum_exp(values);
    if !lse.is_finite() {
        // Every entry is -inf; fall back to a uniform row.
        let uniform = T::one() / T::from(values.len().max(1)).unwrap_or_else(T::one);
        values.fill(uniform);
        return lse;
    }
    for v in values.iter_mut() {
        *v = (*v - lse).exp();
    }
    lse
}

//! Output types and result structures for GMM fitting.
//!
//! ## Purpose
//!
//! This module defines the `GmmResult` struct which encapsulates all outputs
//! of a fit: the selected mixture, its log-likelihood, optional
//! responsibilities and a summary of every repetition.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Responsibilities are `Option<Vec<T>>` and only
//!   populated on request.
//! * **Layout**: Means and variances are component-major (K rows of D
//!   values); responsibilities are row-major N×K.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `weights` sums to one and every variance is at least the lower bound.
//! * `log_likelihood` equals the final log-likelihood of `best_repetition`.
//! * Every responsibility row sums to one.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::ExecutorOutput;
use crate::evaluation::diagnostics::RepetitionSummary;

// ============================================================================
// Result Structure
// ============================================================================

/// Fitted Gaussian mixture with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct GmmResult<T> {
    /// Component means, component-major (K * D).
    pub means: Vec<T>,

    /// Diagonal variances, component-major (K * D).
    pub variances: Vec<T>,

    /// Mixing weights (K).
    pub weights: Vec<T>,

    /// Data log-likelihood under the returned mixture.
    pub log_likelihood: T,

    /// Posterior responsibilities, row-major (N * K), if requested.
    pub responsibilities: Option<Vec<T>>,

    /// Number of observations (N).
    pub num_data: usize,

    /// Dimension of each observation (D).
    pub dimension: usize,

    /// Number of components (K).
    pub num_clusters: usize,

    /// Index of the repetition that produced this mixture.
    pub best_repetition: usize,

    /// Summary of every repetition, in execution order.
    pub repetitions: Vec<RepetitionSummary<T>>,
}

impl<T: Float> GmmResult<T> {
    /// Assemble a result from engine output.
    pub fn from_output(output: ExecutorOutput<T>, num_data: usize) -> Self {
        let mixture = output.mixture;
        Self {
            num_clusters: mixture.num_clusters,
            dimension: mixture.dimension,
            means: mixture.means,
            variances: mixture.variances,
            weights: mixture.weights,
            log_likelihood: output.log_likelihood,
            responsibilities: output.responsibilities,
            num_data,
            best_repetition: output.best_repetition,
            repetitions: output.repetitions,
        }
    }

    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Mean of component `k`.
    pub fn mean(&self, k: usize) -> &[T] {
        &self.means[k * self.dimension..(k + 1) * self.dimension]
    }

    /// Variances of component `k`.
    pub fn variance(&self, k: usize) -> &[T] {
        &self.variances[k * self.dimension..(k + 1) * self.dimension]
    }

    /// Responsibilities of observation `i`, if they were requested.
    pub fn responsibility_row(&self, i: usize) -> Option<&[T]> {
        self.responsibilities
            .as_ref()
            .map(|r| &r[i * self.num_clusters..(i + 1) * self.num_clusters])
    }

    /// Whether the selected repetition stopped on the tolerance test.
    pub fn converged(&self) -> bool {
        self.repetitions
            .get(self.best_repetition)
            .is_some_and(|r| r.converged())
    }

    /// EM iterations performed by the selected repetition.
    pub fn iterations(&self) -> usize {
        self.repetitions
            .get(self.best_repetition)
            .map_or(0, |r| r.iterations)
    }

    /// Index of the most responsible component for observation `i`.
    pub fn hard_assignment(&self, i: usize) -> Option<usize> {
        self.responsibility_row(i).and_then(|row| {
            row.iter()
                .enumerate()
                .fold(None, |best: Option<(usize, T)>, (k, &r)| match best {
                    Some((_, b)) if !(r > b) => best,
                    _ => Some((k, r)),
                })
                .map(|(k, _)| k)
        })
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for GmmResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points:    {}", self.num_data)?;
        writeln!(f, "  Dimension:      {}", self.dimension)?;
        writeln!(f, "  Clusters:       {}", self.num_clusters)?;
        writeln!(f, "  Log-likelihood: {}", self.log_likelihood)?;
        writeln!(
            f,
            "  Best run:       {} of {}",
            self.best_repetition + 1,
            self.repetitions.len()
        )?;
        writeln!(f)?;

        writeln!(f, "Components:")?;
        writeln!(f, "{:>4} {:>10}  {:<}", "K", "Weight", "Mean / Variance")?;
        writeln!(f, "{:-<60}", "")?;

        // Show at most the first 8 dimensions per component
        let shown = self.dimension.min(8);
        for k in 0..self.num_clusters {
            write!(f, "{:>4} {:>10.6} ", k, self.weights[k])?;
            for m in &self.mean(k)[..shown] {
                write!(f, " {:>10.4}", m)?;
            }
            if shown < self.dimension {
                write!(f, " ...")?;
            }
            writeln!(f)?;
            write!(f, "{:>16}", "")?;
            for v in &self.variance(k)[..shown] {
                write!(f, " {:>10.4}", v)?;
            }
            writeln!(f)?;
        }

        if self.repetitions.len() > 1 {
            writeln!(f)?;
            writeln!(f, "Repetitions:")?;
            writeln!(
                f,
                "{:>4}  {:>16}  {:>6}  {:<15}  {:>4}",
                "Run", "Log-likelihood", "Iters", "Status", "Rsd"
            )?;
            for rep in &self.repetitions {
                writeln!(f, "{}", rep)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::convergence::ConvergenceStatus;

    fn sample() -> GmmResult<f64> {
        GmmResult {
            means: vec![0.0, 0.0, 10.0, 10.0],
            variances: vec![1.0, 1.0, 2.0, 2.0],
            weights: vec![0.5, 0.5],
            log_likelihood: -12.0,
            responsibilities: Some(vec![0.9, 0.1, 0.2, 0.8]),
            num_data: 2,
            dimension: 2,
            num_clusters: 2,
            best_repetition: 0,
            repetitions: vec![RepetitionSummary {
                repetition: 0,
                log_likelihood: -12.0,
                iterations: 3,
                status: ConvergenceStatus::Converged,
                trace: vec![-20.0, -13.0, -12.1, -12.0],
                reseeded: 0,
            }],
        }
    }

    #[test]
    fn test_accessors() {
        let r = sample();
        assert_eq!(r.mean(1), &[10.0, 10.0]);
        assert_eq!(r.variance(1), &[2.0, 2.0]);
        assert_eq!(r.responsibility_row(1), Some(&[0.2, 0.8][..]));
        assert_eq!(r.hard_assignment(0), Some(0));
        assert_eq!(r.hard_assignment(1), Some(1));
        assert!(r.converged());
        assert_eq!(r.iterations(), 3);
    }

    #[test]
    fn test_display_mentions_components() {
        let text = format!("{}", sample());
        assert!(text.contains("Clusters:       2"));
        assert!(text.contains("Components:"));
    }
}

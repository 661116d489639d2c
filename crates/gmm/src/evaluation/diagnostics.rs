//! Per-repetition diagnostics.
//!
//! ## Purpose
//!
//! This module records how each EM repetition went: where it ended, how
//! many iterations it took, why it stopped and how often empty components
//! had to be reseeded.
//!
//! ## Invariants
//!
//! * `trace.len() == iterations + 1`.
//! * `log_likelihood` equals the last entry of `trace`.
//!
//! ## Non-goals
//!
//! * No model-selection criteria are computed here.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::evaluation::convergence::{is_monotone, ConvergenceStatus};

/// Outcome of one EM repetition.
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionSummary<T> {
    /// Zero-based repetition index.
    pub repetition: usize,

    /// Final data log-likelihood.
    pub log_likelihood: T,

    /// M-steps performed.
    pub iterations: usize,

    /// Why the repetition stopped.
    pub status: ConvergenceStatus,

    /// Log-likelihood after every E-step.
    pub trace: Vec<T>,

    /// Empty components reseeded over all M-steps.
    pub reseeded: usize,
}

impl<T: Float> RepetitionSummary<T> {
    /// Whether the repetition stopped on the tolerance test.
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }

    /// Log-likelihood gained from the initial mixture.
    pub fn improvement(&self) -> T {
        match self.trace.first() {
            Some(&first) => self.log_likelihood - first,
            None => T::zero(),
        }
    }

    /// Whether the trace is non-decreasing up to `slack`.
    pub fn is_monotone(&self, slack: T) -> bool {
        is_monotone(&self.trace, slack)
    }
}

impl<T: Float + Display> Display for RepetitionSummary<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{:>4}  {:>16.6}  {:>6}  {:<15}  {:>4}",
            self.repetition, self.log_likelihood, self.iterations, self.status, self.reseeded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_and_flags() {
        let s = RepetitionSummary {
            repetition: 0,
            log_likelihood: -10.0_f64,
            iterations: 2,
            status: ConvergenceStatus::Converged,
            trace: vec![-30.0, -12.0, -10.0],
            reseeded: 0,
        };
        assert_eq!(s.improvement(), 20.0);
        assert!(s.converged());
        assert!(s.is_monotone(0.0));
    }
}

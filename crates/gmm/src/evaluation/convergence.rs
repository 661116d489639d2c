//! Convergence monitoring for the EM loop.
//!
//! ## Purpose
//!
//! This module decides when an EM repetition stops, and records the
//! log-likelihood trace it went through.
//!
//! ## Design notes
//!
//! * **Observation order**: the monitor is consulted after every E-step,
//!   before the M-step. Stopping therefore always leaves the mixture that the
//!   last observed log-likelihood was evaluated on.
//! * **Iteration cap first**: the cap on M-steps is checked before the
//!   relative-change test, so a cap of zero returns the initial mixture.
//!
//! ## Key concepts
//!
//! ```text
//! converged  <=>  |LL_t - LL_{t-1}| <= tolerance * |LL_t|
//! ```
//!
//! ## Invariants
//!
//! * `iterations()` counts completed M-steps and never exceeds the cap.
//! * The trace holds one entry per E-step.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Convergence Status
// ============================================================================

/// State of an EM repetition after the latest E-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvergenceStatus {
    /// Keep iterating.
    #[default]
    Running,

    /// Relative log-likelihood change fell below the tolerance.
    Converged,

    /// The iteration cap was reached.
    MaxIterationsReached,
}

impl ConvergenceStatus {
    /// Whether the loop should stop.
    #[inline]
    pub fn is_stopped(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl Display for ConvergenceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Converged => write!(f, "converged"),
            Self::MaxIterationsReached => write!(f, "max iterations"),
        }
    }
}

// ============================================================================
// Convergence Monitor
// ============================================================================

/// Tracks the log-likelihood of one repetition and decides when it stops.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor<T> {
    max_iterations: usize,
    tolerance: T,
    trace: Vec<T>,
    status: ConvergenceStatus,
}

impl<T: Float> ConvergenceMonitor<T> {
    /// Create a monitor with an iteration cap and relative tolerance.
    pub fn new(max_iterations: usize, tolerance: T) -> Self {
        Self {
            max_iterations,
            tolerance,
            trace: Vec::with_capacity(max_iterations.min(1024) + 1),
            status: ConvergenceStatus::Running,
        }
    }

    /// Record the log-likelihood of the latest E-step.
    pub fn observe(&mut self, log_likelihood: T) -> ConvergenceStatus {
        let previous = self.trace.last().copied();
        self.trace.push(log_likelihood);

        self.status = if self.iterations() >= self.max_iterations {
            ConvergenceStatus::MaxIterationsReached
        } else {
            match previous {
                Some(prev)
                    if (log_likelihood - prev).abs()
                        <= self.tolerance * log_likelihood.abs() =>
                {
                    ConvergenceStatus::Converged
                }
                _ => ConvergenceStatus::Running,
            }
        };
        self.status
    }

    /// M-steps completed so far.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// Status after the latest observation.
    #[inline]
    pub fn status(&self) -> ConvergenceStatus {
        self.status
    }

    /// Log-likelihood after every E-step.
    #[inline]
    pub fn trace(&self) -> &[T] {
        &self.trace
    }

    /// Latest observed log-likelihood.
    pub fn last(&self) -> Option<T> {
        self.trace.last().copied()
    }

    /// Consume the monitor, returning its trace.
    pub fn into_trace(self) -> Vec<T> {
        self.trace
    }
}

/// Whether a trace never decreases by more than `slack` relative to its
/// magnitude.
pub fn is_monotone<T: Float>(trace: &[T], slack: T) -> bool {
    trace.windows(2).all(|w| {
        let scale = w[0].abs().max(T::one());
        w[1] >= w[0] - slack * scale
    })
}

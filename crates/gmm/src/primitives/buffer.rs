//! Data views and working memory for EM training.
//!
//! ## Purpose
//!
//! This module provides the read-only view over the observation matrix and
//! the reusable workspaces that the E-step and M-step write into. Buffers
//! are allocated once per fit and recycled across iterations and
//! repetitions, so the EM loop itself never allocates.
//!
//! ## Design notes
//!
//! * **Row-major observations**: observation `i` is the contiguous slice
//!   `data[i * D..(i + 1) * D]`.
//! * **Row-partitioned posteriors**: the N×K responsibility matrix is stored
//!   row-major so that parallel workers can own disjoint row ranges.
//! * **Lazy Expansion**: slots are resized on demand and never shrunk.
//!
//! ## Key concepts
//!
//! * **DataMatrix**: Immutable N×D view over the caller's data.
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **SufficientStats**: Per-component responsibility mass, weighted sums,
//!   weighted means and the weighted scatter about those means, produced by
//!   the M-step accumulation.
//! * **EmBuffer**: Posteriors, per-observation log-likelihoods and sufficient
//!   statistics for one fit.
//!
//! ## Invariants
//!
//! * `DataMatrix::data.len() == num_data * dimension`.
//! * After `EmBuffer::prepare(n, k, d)` every slot has its final length.
//!
//! ## Non-goals
//!
//! * Thread-local automatic caching (buffers are passed explicitly).
//! * Strided or non-contiguous data layouts.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};
use num_traits::{Float, Zero};

// ============================================================================
// DataMatrix - Observation View
// ============================================================================

/// Immutable row-major view over N observations of dimension D.
#[derive(Debug, Clone, Copy)]
pub struct DataMatrix<'a, T> {
    /// Flat observation storage (N * D).
    pub data: &'a [T],

    /// Number of observations (N).
    pub num_data: usize,

    /// Dimension of each observation (D).
    pub dimension: usize,
}

impl<'a, T: Float> DataMatrix<'a, T> {
    /// Wrap a flat buffer; the caller guarantees `data.len() == n * d`.
    #[inline]
    pub fn new(data: &'a [T], dimension: usize) -> Self {
        let num_data = if dimension == 0 {
            0
        } else {
            data.len() / dimension
        };
        Self {
            data,
            num_data,
            dimension,
        }
    }

    /// Observation `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [T] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over observations in order.
    #[inline]
    pub fn rows(&self) -> core::slice::ChunksExact<'a, T> {
        self.data.chunks_exact(self.dimension)
    }

    /// Per-dimension mean and (population) variance over all observations.
    pub fn column_moments(&self) -> (Vec<T>, Vec<T>) {
        let d = self.dimension;
        let mut mean = Vec::with_capacity(d);
        mean.assign(d, T::zero());
        let mut var = Vec::with_capacity(d);
        var.assign(d, T::zero());

        if self.num_data == 0 {
            return (mean, var);
        }

        let n = T::from(self.num_data).unwrap_or_else(T::one);
        for row in self.rows() {
            for (m, &x) in mean.iter_mut().zip(row) {
                *m = *m + x;
            }
        }
        for m in mean.iter_mut() {
            *m = *m / n;
        }
        for row in self.rows() {
            for ((v, &m), &x) in var.iter_mut().zip(mean.iter()).zip(row) {
                let diff = x - m;
                *v = *v + diff * diff;
            }
        }
        for v in var.iter_mut() {
            *v = *v / n;
        }
        (mean, var)
    }
}

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Get a mutable reference to the underlying vector.
    #[inline]
    pub fn as_vec_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Helper trait to simplify resizing and filling vectors.
pub trait VecExt<T> {
    /// Resize the vector to `n` and fill with `val`.
    fn assign(&mut self, n: usize, val: T);
}

impl<T: Clone> VecExt<T> for Vec<T> {
    fn assign(&mut self, n: usize, val: T) {
        if self.len() != n {
            self.clear();
            self.resize(n, val);
        } else {
            self.fill(val);
        }
    }
}

// ============================================================================
// SufficientStats - M-step Accumulators
// ============================================================================

/// Responsibility-weighted moments per component.
#[derive(Debug, Clone)]
pub struct SufficientStats<T> {
    /// Responsibility mass per component (K).
    pub mass: Slot<T>,

    /// Weighted sums of offsets from the first observation, component-major
    /// (K * D).
    pub sum: Slot<T>,

    /// Weighted means, component-major (K * D). Zero for components without
    /// mass.
    pub mean: Slot<T>,

    /// Weighted squared deviations about `mean`, component-major (K * D).
    pub scatter: Slot<T>,
}

impl<T> Default for SufficientStats<T> {
    fn default() -> Self {
        Self {
            mass: Slot::default(),
            sum: Slot::default(),
            mean: Slot::default(),
            scatter: Slot::default(),
        }
    }
}

impl<T: Clone + Zero> SufficientStats<T> {
    /// Zero all accumulators for K components of dimension D.
    pub fn reset(&mut self, num_clusters: usize, dimension: usize) {
        self.mass.as_vec_mut().assign(num_clusters, T::zero());
        self.sum
            .as_vec_mut()
            .assign(num_clusters * dimension, T::zero());
        self.mean
            .as_vec_mut()
            .assign(num_clusters * dimension, T::zero());
        self.scatter
            .as_vec_mut()
            .assign(num_clusters * dimension, T::zero());
    }
}

// ============================================================================
// EmBuffer - Working Memory for the EM Executor
// ============================================================================

/// Working memory for one fit.
#[derive(Debug, Clone)]
pub struct EmBuffer<T> {
    /// Responsibilities, row-major (N * K).
    pub posteriors: Slot<T>,

    /// Log-likelihood of each observation under the current mixture (N).
    pub log_likelihoods: Slot<T>,

    /// M-step accumulators.
    pub stats: SufficientStats<T>,
}

impl<T> Default for EmBuffer<T> {
    fn default() -> Self {
        Self {
            posteriors: Slot::default(),
            log_likelihoods: Slot::default(),
            stats: SufficientStats::default(),
        }
    }
}

impl<T: Clone + Zero> EmBuffer<T> {
    /// Create a buffer pre-allocated for `n` observations and `k` components.
    pub fn with_capacity(n: usize, k: usize) -> Self {
        Self {
            posteriors: Slot::new(n * k),
            log_likelihoods: Slot::new(n),
            stats: SufficientStats::default(),
        }
    }

    /// Size every slot for N observations, K components and dimension D.
    pub fn prepare(&mut self, n: usize, k: usize, d: usize) {
        self.posteriors.as_vec_mut().assign(n * k, T::zero());
        self.log_likelihoods.as_vec_mut().assign(n, T::zero());
        self.stats.reset(k, d);
    }
}

//! High-level API for Gaussian mixture fitting with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point of `fastGmm`. It reuses
//! the `gmm` builder unchanged and adds a `Batch` marker that selects the
//! parallel batch builder.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `gmm` builder pattern.
//! * **Parallel-First**: Defaults to parallel execution unless the caller
//!   chose a threading mode.
//! * **Feature-Gated**: The rayon passes are only installed with the `cpu`
//!   feature.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`GmmBuilder`] via `Gmm::new()`.
//! 2. Chain configuration methods (`.num_clusters()`, `.seed()`, etc.).
//! 3. Select an adapter via `.adapter(Batch)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Import base marker types for delegation
use gmm::internals::api::Batch as BaseBatch;

// Internal dependencies
use crate::adapters::batch::ParallelBatchGmmBuilder;

// Publicly re-exported types
pub use crate::adapters::dynamic::DynamicGmm;
pub use gmm::internals::adapters::dynamic::DynamicGmmResult;
pub use gmm::internals::algorithms::initialization::Initialization;
pub use gmm::internals::api::{GmmAdapter, GmmBuilder};
pub use gmm::internals::engine::output::GmmResult;
pub use gmm::internals::evaluation::convergence::ConvergenceStatus;
pub use gmm::internals::evaluation::diagnostics::RepetitionSummary;
pub use gmm::internals::primitives::dtype::{DataType, NumericArray, NumericVec};
pub use gmm::internals::primitives::errors::GmmError;
pub use gmm::internals::primitives::threading::Multithreading;

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> GmmAdapter<T> for Batch {
    type Output = ParallelBatchGmmBuilder<T>;

    fn convert(builder: GmmBuilder<T>) -> Self::Output {
        // Determine threading mode: user choice OR default to parallel for fastGmm Batch
        let mode = builder.multithreading.unwrap_or(Multithreading::Parallel);

        // Delegate to base implementation to create base builder
        let mut base = <BaseBatch as GmmAdapter<T>>::convert(builder);
        base = base.multithreading(mode);

        // Wrap with extension fields
        ParallelBatchGmmBuilder { base }
    }
}

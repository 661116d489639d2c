//! # Fast GMM (Parallel Gaussian Mixture Models)
//!
//! Multi-threaded extension of the [`gmm`] crate. The configuration surface,
//! validation rules and EM semantics are those of `gmm`; this crate adds
//! rayon-based E-step and M-step passes and accepts `ndarray` inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastGmm::prelude::*;
//!
//! let data = vec![
//!     0.0, 0.0,
//!     0.1, -0.1,
//!     10.0, 10.0,
//!     10.1, 9.9,
//! ];
//!
//! let result = Gmm::new()
//!     .num_clusters(2)
//!     .adapter(Batch)         // Parallel by default
//!     .build()?
//!     .fit(&data, 2)?;
//!
//! assert_eq!(result.num_clusters, 2);
//! # Result::<(), GmmError>::Ok(())
//! ```
//!
//! ### ndarray Input
//!
//! Two-dimensional arrays in standard (row-major) layout are accepted
//! directly; their column count must match the dimension.
//!
//! ```rust
//! use fastGmm::prelude::*;
//! use ndarray::array;
//!
//! let data: ndarray::Array2<f64> = array![[0.0, 0.1], [0.2, 0.0], [5.0, 5.1], [5.2, 4.9]];
//!
//! let result = Gmm::new()
//!     .num_clusters(2)
//!     .multithreading(Serial)
//!     .adapter(Batch)
//!     .build()?
//!     .fit(&data, 2)?;
//!
//! assert!(result.log_likelihood.is_finite());
//! # Result::<(), GmmError>::Ok(())
//! ```
//!
//! ## Features
//!
//! * `cpu` (default): parallel passes on the rayon global thread pool.
//!   Without it every fit runs the serial passes of `gmm`.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel E-step and M-step passes.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for GMM fitting.
mod api;

// Input data handling.
mod input;

// Standard fastGmm prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, ConvergenceStatus, DataType, DynamicGmm, DynamicGmmResult,
        GmmBuilder as Gmm, GmmError, GmmResult, Initialization,
        Initialization::{Custom, Random, RandomPoints},
        Multithreading,
        Multithreading::{Parallel, Serial},
        NumericArray, NumericVec, RepetitionSummary,
    };
    pub use crate::input::GmmInput;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}

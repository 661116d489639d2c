//! # gmm — Diagonal Gaussian Mixture Models for Rust
//!
//! Fits Gaussian Mixture Models with diagonal covariances to dense numeric
//! data by Expectation-Maximization, with randomized or caller-supplied
//! initialization and multiple restarts.
//!
//! ## What is a GMM?
//!
//! A Gaussian Mixture Model explains a set of D-dimensional observations as
//! draws from K weighted Gaussian components. Each component has a mean, a
//! per-dimension variance and a mixing weight. EM alternates between
//! computing, for every observation, the posterior probability of each
//! component (the *responsibilities*) and re-estimating the parameters from
//! those responsibilities, until the data log-likelihood stops improving.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use gmm::prelude::*;
//!
//! // Four 2-D observations, row-major
//! let data = vec![
//!     0.0, 0.0,
//!     0.1, -0.1,
//!     10.0, 10.0,
//!     10.1, 9.9,
//! ];
//!
//! // Build the model
//! let model = Gmm::new()
//!     .num_clusters(2)        // Two components
//!     .max_iterations(100)    // Cap on EM iterations
//!     .adapter(Batch)
//!     .build()?;
//!
//! // Fit the model to the data
//! let result = model.fit(&data, 2)?;
//! println!("{}", result);
//! # Result::<(), GmmError>::Ok(())
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use gmm::prelude::*;
//!
//! let data = vec![0.0, 0.2, 0.1, 4.9, 5.0, 5.2, 5.1, 0.3];
//!
//! let model = Gmm::new()
//!     .num_clusters(2)
//!     .max_iterations(200)            // Cap on EM iterations
//!     .num_repetitions(3)             // Keep the best of three restarts
//!     .initialization(RandomPoints)   // Random observations as means
//!     .multithreading(Serial)         // Single-threaded execution
//!     .sigma_lower_bound(1e-4)        // Variance floor
//!     .tolerance(1e-6)                // Relative log-likelihood tolerance
//!     .seed(42)                       // Reproducible initialization
//!     .verbosity(1)                   // Log configuration and repetitions
//!     .return_responsibilities()      // Include the N×K posterior matrix
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&data, 1)?;
//! assert_eq!(result.repetitions.len(), 3);
//! assert!(result.responsibility_row(0).is_some());
//! # Result::<(), GmmError>::Ok(())
//! ```
//!
//! ### Custom Initialization
//!
//! Supplying initial means, variances and weights switches the
//! initialization to `Custom`. All three arrays are required; means and
//! variances are component-major (K rows of D values).
//!
//! ```rust
//! use gmm::prelude::*;
//!
//! let data: Vec<f64> = vec![-1.0, -0.9, -1.1, 1.0, 0.9, 1.1];
//!
//! let result = Gmm::new()
//!     .num_clusters(2)
//!     .init_means(vec![-1.0, 1.0])
//!     .init_sigmas(vec![0.01, 0.01])
//!     .init_weights(vec![0.5, 0.5])
//!     .adapter(Batch)
//!     .build()?
//!     .fit(&data, 1)?;
//!
//! assert!((result.mean(0)[0] + 1.0).abs() < 1e-6);
//! # Result::<(), GmmError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! The `fit` method returns a `Result<GmmResult<T>, GmmError>`. Every error
//! is detected before EM starts:
//!
//! ```rust
//! use gmm::prelude::*;
//!
//! let data = vec![1.0, 2.0, 3.0];
//! let model = Gmm::new().num_clusters(4).adapter(Batch).build()?;
//!
//! match model.fit(&data, 1) {
//!     Ok(result) => println!("log-likelihood: {}", result.log_likelihood),
//!     Err(e) => eprintln!("Fitting failed: {}", e),
//! }
//! # Result::<(), GmmError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments. Disable default features to
//! remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! gmm = { version = "0.3", default-features = false }
//! ```
//!
//! ## References
//!
//! - Dempster, A. P., Laird, N. M., Rubin, D. B. (1977). "Maximum Likelihood
//!   from Incomplete Data via the EM Algorithm"
//! - Arthur, D., Vassilvitskii, S. (2007). "k-means++: The Advantages of
//!   Careful Seeding"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - seeding, E-step and M-step.
mod algorithms;

// Layer 4: Evaluation - convergence and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for GMM fitting.
mod api;

// Standard GMM prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, ConvergenceStatus, DataType, DynamicGmm, DynamicGmmResult,
        GmmBuilder as Gmm, GmmError, GmmResult, Initialization, Initialization::Custom,
        Initialization::Random, Initialization::RandomPoints, Multithreading,
        Multithreading::Parallel, Multithreading::Serial, NumericArray, NumericVec,
        RepetitionSummary,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

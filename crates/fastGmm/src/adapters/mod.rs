//! Layer 6: Adapters
//!
//! This layer provides the user-facing batch adapter that chooses between
//! the serial passes of `gmm` and the parallel passes of this crate, and a
//! run-time precision adapter built on it.

// Unified batch adapter for GMM fitting.
pub mod batch;

// Run-time precision adapter.
pub mod dynamic;

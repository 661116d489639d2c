//! Layer 5: Engine
//!
//! This layer provides the parallel passes for Gaussian mixture fitting.
//! They are installed into the `gmm` execution engine, which keeps the EM
//! loop itself.

// Parallel execution engine using CPU threads
pub mod executor;

//! Layer 3: Algorithms
//!
//! This layer implements the core steps of expectation maximization for a
//! diagonal Gaussian mixture: seeding, the E-step and the M-step. It
//! contains the estimation logic but is orchestrated by the engine layer.

// K-means++ seeding and Lloyd partitioning.
pub mod kmeans;

// Initial mixture construction.
pub mod initialization;

// Posterior responsibilities and data log-likelihood.
pub mod expectation;

// Parameter re-estimation and empty-component handling.
pub mod maximization;

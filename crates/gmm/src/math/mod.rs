//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the EM
//! engine:
//! - Diagonal Gaussian log-densities and their per-component constants
//! - Numerically stable log-sum-exp normalization
//!
//! These are reusable building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Diagonal Gaussian log-densities.
pub mod gaussian;

/// Log-sum-exp normalization.
pub mod logsumexp;

//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer judges the progress and outcome of EM repetitions:
//! - Stopping decisions and log-likelihood traces
//! - Per-repetition summaries used to select the best run
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Convergence monitoring.
pub mod convergence;

/// Per-repetition diagnostics.
pub mod diagnostics;

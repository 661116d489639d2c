//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing APIs that adapt the engine layer for
//! different calling contexts:
//!
//! - **Batch**: Statically typed, in-memory fitting
//! - **Dynamic**: Precision chosen at run time from tagged buffers
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch adapter for GMM fitting.
pub mod batch;

/// Run-time precision adapter.
pub mod dynamic;

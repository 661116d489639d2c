//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates fitting by coordinating between primitives
//! (buffers, mixtures) and algorithms (initialization, E-step, M-step).
//! It provides the restart controller, the EM loop and the hooks through
//! which extension crates inject parallel passes.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Unified execution engine for GMM fitting.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for GMM operations.
pub mod output;

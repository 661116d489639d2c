//! Error types for GMM operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can be reported while
//! configuring or fitting a Gaussian Mixture Model: malformed parameters,
//! shape mismatches, incomplete custom initialization, non-finite data and
//! precision mismatches at the dynamic boundary.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder misuse is recorded and reported by `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Invariants
//!
//! * Every error is raised before any EM computation begins.
//! * The EM loop itself never produces an error; numerical degeneracies are
//!   absorbed by clamping and reseeding.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retry strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::dtype::DataType;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for GMM operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GmmError {
    /// The observation set is empty.
    EmptyInput,

    /// Malformed or out-of-range configuration (e.g., K > N, unknown mode string).
    InvalidArgument(String),

    /// Shape mismatch between data and custom-initialization arrays.
    InvalidDimension {
        /// Which array is malformed.
        what: &'static str,
        /// Expected number of elements.
        expected: usize,
        /// Number of elements provided.
        got: usize,
    },

    /// Custom initialization was selected without all three parameter arrays.
    InvalidInitialization(String),

    /// Data contains NaN or infinite values.
    NonFiniteInput(String),

    /// A custom-initialization array uses a different precision than the data.
    InconsistentDataType {
        /// Which array has the wrong precision.
        what: &'static str,
        /// Precision of the data.
        expected: DataType,
        /// Precision of the offending array.
        got: DataType,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for GmmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input data is empty"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::InvalidDimension {
                what,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Invalid dimension: {what} has {got} elements, expected {expected}"
                )
            }
            Self::InvalidInitialization(msg) => write!(f, "Invalid initialization: {msg}"),
            Self::NonFiniteInput(s) => write!(f, "Data contains NaNs or Infs: {s}"),
            Self::InconsistentDataType {
                what,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Inconsistent data type: {what} is {got}, data is {expected}"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for GmmError {}

//! Execution mode selection for extension crates.
//!
//! ## Purpose
//!
//! This module defines the [`Multithreading`] enum. The core `gmm` crate
//! always executes its passes serially; extension crates (like `fastGmm`)
//! read this setting and inject parallel E-step and M-step passes into the
//! engine when `Parallel` is selected.
//!
//! ## Invariants
//!
//! * The default mode is `Serial` in the core crate.
//! * Both modes perform the same mathematics; only the order of
//!   floating-point summation may differ.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use core::str::FromStr;

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// Internal dependencies
use crate::primitives::errors::GmmError;

/// Threading mode for the E-step and the M-step accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Multithreading {
    /// Single-threaded execution in observation order.
    #[default]
    Serial,

    /// Work partitioned across a worker pool (requires an extension crate
    /// that installs the parallel passes).
    Parallel,
}

impl Display for Multithreading {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for Multithreading {
    type Err = GmmError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("serial") {
            Ok(Self::Serial)
        } else if s.eq_ignore_ascii_case("parallel") {
            Ok(Self::Parallel)
        } else {
            Err(GmmError::InvalidArgument(format!(
                "invalid value {s} for multithreading"
            )))
        }
    }
}

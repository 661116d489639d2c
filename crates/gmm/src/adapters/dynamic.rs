//! Run-time precision adapter.
//!
//! ## Purpose
//!
//! This module serves hosts that only learn the precision of their buffers
//! at run time (bindings, file loaders). Data arrives as a [`NumericArray`],
//! custom initialization arrays as [`NumericVec`], and the fit is dispatched
//! to the statically typed batch adapter of the matching precision.
//!
//! ## Design notes
//!
//! * **Single check point**: every custom array is compared against the data
//!   precision before any conversion; a mismatch is an
//!   `InconsistentDataType` error.
//! * **Scalars in f64**: the variance bound and tolerance are stored in
//!   double precision and narrowed to the data precision on dispatch.
//!
//! ## Invariants
//!
//! * The result precision always equals the data precision.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::initialization::Initialization;
use crate::api::{Batch, GmmBuilder};
use crate::engine::output::GmmResult;
use crate::engine::validator::Validator;
use crate::primitives::dtype::{DataType, NumericArray, NumericKind, NumericVec};
use crate::primitives::errors::GmmError;
use crate::primitives::threading::Multithreading;

// ============================================================================
// Dynamic Result
// ============================================================================

/// Fit result tagged with the precision it was computed in.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicGmmResult {
    /// Single-precision result.
    F32(GmmResult<f32>),
    /// Double-precision result.
    F64(GmmResult<f64>),
}

impl DynamicGmmResult {
    /// Precision of the result.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::F32(_) => DataType::F32,
            Self::F64(_) => DataType::F64,
        }
    }

    /// Log-likelihood widened to double precision.
    pub fn log_likelihood(&self) -> f64 {
        match self {
            Self::F32(r) => f64::from(r.log_likelihood),
            Self::F64(r) => r.log_likelihood,
        }
    }

    /// Number of components.
    pub fn num_clusters(&self) -> usize {
        match self {
            Self::F32(r) => r.num_clusters,
            Self::F64(r) => r.num_clusters,
        }
    }
}

// ============================================================================
// Dynamic Builder
// ============================================================================

/// Builder whose custom arrays carry their precision at run time.
#[derive(Debug, Clone, Default)]
pub struct DynamicGmm {
    num_clusters: Option<usize>,
    max_iterations: Option<usize>,
    num_repetitions: Option<usize>,
    initialization: Option<Initialization>,
    multithreading: Option<Multithreading>,
    sigma_lower_bound: Option<f64>,
    tolerance: Option<f64>,
    kmeans_iterations: Option<usize>,
    seed: Option<u64>,
    init_means: Option<NumericVec>,
    init_sigmas: Option<NumericVec>,
    init_weights: Option<NumericVec>,
    verbosity: Option<usize>,
    return_responsibilities: bool,
    duplicate_param: Option<&'static str>,
}

macro_rules! dynamic_setter {
    ($(#[$doc:meta])* $name:ident: $ty:ty) => {
        $(#[$doc])*
        pub fn $name(mut self, value: $ty) -> Self {
            if self.$name.is_some() {
                self.duplicate_param = Some(stringify!($name));
            }
            self.$name = Some(value);
            self
        }
    };
}

impl DynamicGmm {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    dynamic_setter!(/// Set the number of mixture components.
        num_clusters: usize);
    dynamic_setter!(/// Set the cap on EM iterations per repetition.
        max_iterations: usize);
    dynamic_setter!(/// Set the number of independent repetitions.
        num_repetitions: usize);
    dynamic_setter!(/// Set the initialization mode.
        initialization: Initialization);
    dynamic_setter!(/// Set the threading mode.
        multithreading: Multithreading);
    dynamic_setter!(/// Set the variance lower bound.
        sigma_lower_bound: f64);
    dynamic_setter!(/// Set the relative log-likelihood tolerance.
        tolerance: f64);
    dynamic_setter!(/// Set the Lloyd iterations of the clustering-based initializer.
        kmeans_iterations: usize);
    dynamic_setter!(/// Set the seed for randomized initialization.
        seed: u64);
    dynamic_setter!(/// Supply initial means (K * D).
        init_means: NumericVec);
    dynamic_setter!(/// Supply initial variances (K * D).
        init_sigmas: NumericVec);
    dynamic_setter!(/// Supply initial weights (K).
        init_weights: NumericVec);
    dynamic_setter!(/// Set diagnostic verbosity.
        verbosity: usize);

    /// Include the N×K responsibility matrix in the result.
    pub fn return_responsibilities(mut self) -> Self {
        if self.return_responsibilities {
            self.duplicate_param = Some("return_responsibilities");
        }
        self.return_responsibilities = true;
        self
    }

    /// Fit a mixture to row-major data of the given dimension.
    ///
    /// The passes of this crate are serial; `Multithreading::Parallel` only
    /// takes effect through an extension crate that installs parallel passes.
    pub fn fit(&self, data: NumericArray<'_>, dimension: usize) -> Result<DynamicGmmResult, GmmError> {
        match data {
            NumericArray::F32(values) => {
                let model = self.typed_builder::<f32>()?.adapter(Batch).build()?;
                Ok(DynamicGmmResult::F32(model.fit(values, dimension)?))
            }
            NumericArray::F64(values) => {
                let model = self.typed_builder::<f64>()?.adapter(Batch).build()?;
                Ok(DynamicGmmResult::F64(model.fit(values, dimension)?))
            }
        }
    }

    /// Statically typed builder for precision `T`.
    ///
    /// Fails on duplicate setters and on custom arrays whose precision is
    /// not `T`.
    #[doc(hidden)]
    pub fn typed_builder<T: Float + NumericKind>(&self) -> Result<GmmBuilder<T>, GmmError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        let mut builder = GmmBuilder::<T>::new();
        builder.num_clusters = self.num_clusters;
        builder.max_iterations = self.max_iterations;
        builder.num_repetitions = self.num_repetitions;
        builder.initialization = self.initialization;
        builder.multithreading = self.multithreading;
        builder.sigma_lower_bound = self.sigma_lower_bound.map(narrow);
        builder.tolerance = self.tolerance.map(narrow);
        builder.kmeans_iterations = self.kmeans_iterations;
        builder.seed = self.seed;
        builder.init_means = custom_array("init_means", self.init_means.as_ref())?;
        builder.init_sigmas = custom_array("init_sigmas", self.init_sigmas.as_ref())?;
        builder.init_weights = custom_array("init_weights", self.init_weights.as_ref())?;
        builder.verbosity = self.verbosity;
        builder.return_responsibilities = Some(self.return_responsibilities);
        Ok(builder)
    }
}

/// Convert an f64 scalar to `T`; unrepresentable values become NaN and are
/// rejected by validation.
fn narrow<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Check a tagged custom array against precision `T` and copy it out.
fn custom_array<T: Float + NumericKind>(
    what: &'static str,
    values: Option<&NumericVec>,
) -> Result<Option<Vec<T>>, GmmError> {
    let Some(values) = values else {
        return Ok(None);
    };
    Validator::validate_data_type(what, T::DATA_TYPE, values.data_type())?;
    Ok(T::view(values).map(<[T]>::to_vec))
}

//! Input validation for GMM configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for GMM configuration
//! parameters, input data and custom initialization arrays. Everything is
//! checked before any EM computation begins.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not provide automatic correction of invalid inputs.
//! * This module does not resolve initialization precedence.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::initialization::CustomParameters;
use crate::engine::executor::MAX_ITERATIONS_LIMIT;
use crate::primitives::dtype::DataType;
use crate::primitives::errors::GmmError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for GMM configuration and input data.
///
/// Provides static methods for validating GMM parameters and input data.
/// All methods fail fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a row-major data buffer; returns the number of observations.
    pub fn validate_data<T: Float>(data: &[T], dimension: usize) -> Result<usize, GmmError> {
        // Check 1: Non-empty
        if data.is_empty() {
            return Err(GmmError::EmptyInput);
        }

        // Check 2: Shape
        if dimension == 0 {
            return Err(GmmError::InvalidDimension {
                what: "dimension",
                expected: 1,
                got: 0,
            });
        }
        if data.len() % dimension != 0 {
            return Err(GmmError::InvalidDimension {
                what: "data",
                expected: data.len().div_ceil(dimension) * dimension,
                got: data.len(),
            });
        }

        // Check 3: All values finite
        if let Some((i, v)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GmmError::NonFiniteInput(format!(
                "data[{}]={}",
                i,
                v.to_f64().unwrap_or(f64::NAN)
            )));
        }

        Ok(data.len() / dimension)
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the number of components against the number of observations.
    pub fn validate_num_clusters(num_clusters: usize, num_data: usize) -> Result<(), GmmError> {
        if num_clusters == 0 || num_clusters > num_data {
            return Err(GmmError::InvalidArgument(format!(
                "num_clusters must be in [1, {num_data}], got {num_clusters}"
            )));
        }
        Ok(())
    }

    /// Validate the number of repetitions.
    pub fn validate_repetitions(num_repetitions: usize) -> Result<(), GmmError> {
        if num_repetitions == 0 {
            return Err(GmmError::InvalidArgument(
                "num_repetitions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Validate the cap on EM iterations.
    ///
    /// # Notes
    ///
    /// * 0 iterations returns the initial mixture.
    pub fn validate_max_iterations(max_iterations: usize) -> Result<(), GmmError> {
        if max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(GmmError::InvalidArgument(format!(
                "max_iterations must be at most {MAX_ITERATIONS_LIMIT}, got {max_iterations}"
            )));
        }
        Ok(())
    }

    /// Validate the variance lower bound.
    pub fn validate_sigma_lower_bound<T: Float>(bound: T) -> Result<(), GmmError> {
        Self::validate_positive(bound, "sigma_lower_bound")
    }

    /// Validate the relative log-likelihood tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), GmmError> {
        Self::validate_positive(tol, "tolerance")
    }

    fn validate_positive<T: Float>(val: T, name: &str) -> Result<(), GmmError> {
        if !val.is_finite() || val <= T::zero() {
            return Err(GmmError::InvalidArgument(format!(
                "{} must be positive and finite, got {}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Custom Initialization Validation
    // ========================================================================

    /// Validate caller-supplied initial parameters.
    pub fn validate_custom<T: Float>(
        params: &CustomParameters<T>,
        num_clusters: usize,
        dimension: usize,
    ) -> Result<(), GmmError> {
        let checks: [(&'static str, &[T], usize); 3] = [
            ("init_means", params.means.as_slice(), num_clusters * dimension),
            ("init_sigmas", params.sigmas.as_slice(), num_clusters * dimension),
            ("init_weights", params.weights.as_slice(), num_clusters),
        ];

        for &(what, values, expected) in &checks {
            if values.len() != expected {
                return Err(GmmError::InvalidDimension {
                    what,
                    expected,
                    got: values.len(),
                });
            }
        }

        for &(what, values, _) in &checks {
            let positive = what != "init_means";
            if let Some((i, v)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || (positive && **v <= T::zero()))
            {
                let requirement = if positive { "positive and finite" } else { "finite" };
                return Err(GmmError::InvalidArgument(format!(
                    "{}[{}]={} must be {}",
                    what,
                    i,
                    v.to_f64().unwrap_or(f64::NAN),
                    requirement
                )));
            }
        }

        Ok(())
    }

    /// Validate that a custom array uses the same precision as the data.
    pub fn validate_data_type(
        what: &'static str,
        data: DataType,
        array: DataType,
    ) -> Result<(), GmmError> {
        if data != array {
            return Err(GmmError::InconsistentDataType {
                what,
                expected: data,
                got: array,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), GmmError> {
        if let Some(param) = duplicate_param {
            return Err(GmmError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_shape_and_values() {
        assert_eq!(Validator::validate_data::<f64>(&[], 2), Err(GmmError::EmptyInput));
        assert!(matches!(
            Validator::validate_data(&[1.0, 2.0, 3.0], 2),
            Err(GmmError::InvalidDimension { what: "data", expected: 4, got: 3 })
        ));
        assert!(matches!(
            Validator::validate_data(&[1.0, f64::NAN], 1),
            Err(GmmError::NonFiniteInput(_))
        ));
        assert_eq!(Validator::validate_data(&[1.0, 2.0, 3.0, 4.0], 2), Ok(2));
    }

    #[test]
    fn test_num_clusters_bounds() {
        assert!(Validator::validate_num_clusters(0, 4).is_err());
        assert!(Validator::validate_num_clusters(5, 4).is_err());
        assert!(Validator::validate_num_clusters(4, 4).is_ok());
    }

    #[test]
    fn test_custom_parameters() {
        let ok = CustomParameters {
            means: vec![0.0, 1.0],
            sigmas: vec![1.0, 1.0],
            weights: vec![0.5, 0.5],
        };
        assert!(Validator::validate_custom(&ok, 2, 1).is_ok());

        let short = CustomParameters {
            weights: vec![1.0],
            ..ok.clone()
        };
        assert!(matches!(
            Validator::validate_custom(&short, 2, 1),
            Err(GmmError::InvalidDimension { what: "init_weights", expected: 2, got: 1 })
        ));

        let negative_sigma = CustomParameters {
            sigmas: vec![1.0, -1.0],
            ..ok.clone()
        };
        assert!(matches!(
            Validator::validate_custom(&negative_sigma, 2, 1),
            Err(GmmError::InvalidArgument(_))
        ));

        let negative_mean = CustomParameters {
            means: vec![-3.0, 1.0],
            ..ok
        };
        assert!(Validator::validate_custom(&negative_mean, 2, 1).is_ok());
    }

    #[test]
    fn test_scalars() {
        assert!(Validator::validate_tolerance(0.0_f64).is_err());
        assert!(Validator::validate_sigma_lower_bound(f32::INFINITY).is_err());
        assert!(Validator::validate_max_iterations(100_001).is_err());
        assert!(Validator::validate_repetitions(0).is_err());
    }
}

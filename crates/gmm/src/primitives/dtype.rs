//! Numeric kinds supported by the fitting engine.
//!
//! ## Purpose
//!
//! The engine is generic over `Float`, but hosts that only learn the
//! precision of their buffers at run time need a tagged representation.
//! This module provides the [`DataType`] tag, the [`NumericKind`] trait that
//! links `f32`/`f64` to their tag, and the borrowed/owned tagged arrays used
//! by the dynamic adapter.
//!
//! ## Invariants
//!
//! * Exactly two numeric kinds exist: single and double precision.
//! * A tagged array always reports the tag of the variant it holds.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};

/// Precision of a numeric buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    F64,
}

impl DataType {
    /// Size in bytes of one element.
    pub fn size(self) -> usize {
        match self {
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::F32 => write!(f, "float"),
            Self::F64 => write!(f, "double"),
        }
    }
}

/// Links a concrete float type to its [`DataType`] tag.
pub trait NumericKind: Sized {
    /// Tag for this type.
    const DATA_TYPE: DataType;

    /// Borrow the values of a tagged buffer if it holds this precision.
    fn view(values: &NumericVec) -> Option<&[Self]>;
}

impl NumericKind for f32 {
    const DATA_TYPE: DataType = DataType::F32;

    fn view(values: &NumericVec) -> Option<&[Self]> {
        match values {
            NumericVec::F32(v) => Some(v.as_slice()),
            NumericVec::F64(_) => None,
        }
    }
}

impl NumericKind for f64 {
    const DATA_TYPE: DataType = DataType::F64;

    fn view(values: &NumericVec) -> Option<&[Self]> {
        match values {
            NumericVec::F64(v) => Some(v.as_slice()),
            NumericVec::F32(_) => None,
        }
    }
}

/// Borrowed buffer whose precision is known only at run time.
#[derive(Debug, Clone, Copy)]
pub enum NumericArray<'a> {
    /// Single-precision data.
    F32(&'a [f32]),
    /// Double-precision data.
    F64(&'a [f64]),
}

impl NumericArray<'_> {
    /// Precision tag of the held buffer.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::F32(_) => DataType::F32,
            Self::F64(_) => DataType::F64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned buffer whose precision is known only at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericVec {
    /// Single-precision values.
    F32(Vec<f32>),
    /// Double-precision values.
    F64(Vec<f64>),
}

impl NumericVec {
    /// Precision tag of the held buffer.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::F32(_) => DataType::F32,
            Self::F64(_) => DataType::F64,
        }
    }
}

impl From<Vec<f32>> for NumericVec {
    fn from(v: Vec<f32>) -> Self {
        Self::F32(v)
    }
}

impl From<Vec<f64>> for NumericVec {
    fn from(v: Vec<f64>) -> Self {
        Self::F64(v)
    }
}

impl<'a> From<&'a [f32]> for NumericArray<'a> {
    fn from(v: &'a [f32]) -> Self {
        Self::F32(v)
    }
}

impl<'a> From<&'a [f64]> for NumericArray<'a> {
    fn from(v: &'a [f64]) -> Self {
        Self::F64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_matches_precision() {
        let single = NumericVec::from(vec![1.0_f32, 2.0]);
        assert_eq!(f32::view(&single), Some(&[1.0_f32, 2.0][..]));
        assert_eq!(f64::view(&single), None);
        assert_eq!(single.data_type(), DataType::F32);
    }

    #[test]
    fn test_array_tags() {
        let data = [0.5_f64; 3];
        let arr = NumericArray::from(&data[..]);
        assert_eq!(arr.data_type(), DataType::F64);
        assert_eq!(arr.len(), 3);
        assert_eq!(DataType::F64.size(), 8);
        assert_eq!(format!("{}", DataType::F32), "float");
    }
}

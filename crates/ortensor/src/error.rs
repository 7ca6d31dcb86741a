//! Error types raised while building or reshaping tensors.

use thiserror::Error;

use crate::tensor::{BufferKind, TensorType};

/// Coarse classification of a [`TensorError`].
///
/// Callers use this to tell "wrong kind of value" from "wrong value" without matching
/// on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument kind, unknown tag, or buffer-kind mismatch.
    Type,
    /// A shape entry is out of range.
    Range,
    /// Shape and data disagree on the element count.
    Size,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    #[error("a string tensor's data must be a string array")]
    StringDataNotArray,
    #[error("unknown tensor type: {0}")]
    UnknownType(String),
    #[error("a {dtype} tensor's data must be type of {expected}")]
    BufferKindMismatch {
        dtype: TensorType,
        expected: BufferKind,
    },
    #[error("tensor type cannot be inferred from an empty array")]
    EmptyInference,
    #[error("invalid element type of data array: {0}")]
    InvalidElementType(String),
    #[error("unsupported type for tensor data: {0}")]
    UnsupportedData(String),
    #[error("a tensor's dims must be a number array")]
    DimsNotArray,
    #[error("dims[{index}] must be an integer, actual value: {value}")]
    DimNotInteger { index: usize, value: String },
    #[error("dims[{index}] must be a non-negative integer, actual value: {value}")]
    NegativeDim { index: usize, value: i64 },
    #[error("tensor's size({size}) does not match data length({len})")]
    SizeMismatch { size: usize, len: usize },
    #[error("tensor size overflows at dims[{index}]")]
    ShapeOverflow { index: usize },
}

impl TensorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TensorError::StringDataNotArray
            | TensorError::UnknownType(_)
            | TensorError::BufferKindMismatch { .. }
            | TensorError::EmptyInference
            | TensorError::InvalidElementType(_)
            | TensorError::UnsupportedData(_)
            | TensorError::DimsNotArray
            | TensorError::DimNotInteger { .. } => ErrorKind::Type,
            TensorError::NegativeDim { .. } => ErrorKind::Range,
            TensorError::SizeMismatch { .. } | TensorError::ShapeOverflow { .. } => {
                ErrorKind::Size
            }
        }
    }
}

/// Result alias used throughout the crate.
pub type TensorResult<T> = Result<T, TensorError>;

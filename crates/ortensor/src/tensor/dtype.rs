//! Enumerates the element types a tensor can carry across the inference boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TensorError;

/// Element type tag shared between host tensors and inference engine bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorType {
    /// 32-bit IEEE-754 float.
    Float32,
    /// 8-bit unsigned integer.
    Uint8,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Boolean stored as one unsigned byte per element (0 or 1).
    Bool,
    /// 64-bit IEEE-754 float.
    Float64,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// Variable-length UTF-8 strings.
    String,
}

impl TensorType {
    /// Every tag in declaration order.
    pub const ALL: [TensorType; 12] = [
        TensorType::Float32,
        TensorType::Uint8,
        TensorType::Int8,
        TensorType::Uint16,
        TensorType::Int16,
        TensorType::Int32,
        TensorType::Int64,
        TensorType::Bool,
        TensorType::Float64,
        TensorType::Uint32,
        TensorType::Uint64,
        TensorType::String,
    ];

    /// Returns the textual tag accepted by [`TensorType::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            TensorType::Float32 => "float32",
            TensorType::Uint8 => "uint8",
            TensorType::Int8 => "int8",
            TensorType::Uint16 => "uint16",
            TensorType::Int16 => "int16",
            TensorType::Int32 => "int32",
            TensorType::Int64 => "int64",
            TensorType::Bool => "bool",
            TensorType::Float64 => "float64",
            TensorType::Uint32 => "uint32",
            TensorType::Uint64 => "uint64",
            TensorType::String => "string",
        }
    }

    /// Returns the number of bytes per element, or `None` for strings.
    pub fn element_size(self) -> Option<usize> {
        match self {
            TensorType::Uint8 | TensorType::Int8 | TensorType::Bool => Some(1),
            TensorType::Uint16 | TensorType::Int16 => Some(2),
            TensorType::Float32 | TensorType::Int32 | TensorType::Uint32 => Some(4),
            TensorType::Int64 | TensorType::Float64 | TensorType::Uint64 => Some(8),
            TensorType::String => None,
        }
    }

    /// Returns `true` for every tag backed by a numeric buffer (including `bool`).
    pub fn is_numeric(self) -> bool {
        !matches!(self, TensorType::String)
    }
}

impl FromStr for TensorType {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TensorType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| TensorError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for TensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

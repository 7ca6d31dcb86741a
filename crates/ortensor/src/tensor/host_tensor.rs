//! Immutable host tensor handed to inference engines as an input binding.

use tracing::{debug, trace};

use super::data::{BufferKind, TensorData, TensorInput};
use super::dtype::TensorType;
use super::shape::{self, DimLike};
use crate::error::{TensorError, TensorResult};

/// Validated tensor value pairing a buffer with its element tag and shape.
///
/// Every field is fixed at construction. `size` always equals `data.len()`, and
/// [`Tensor::reshape`] produces a new value over the same buffer instead of copying it.
#[derive(Debug, Clone)]
pub struct Tensor {
    dtype: TensorType,
    data: TensorData,
    dims: Vec<usize>,
    size: usize,
}

impl Tensor {
    /// Builds a one-dimensional tensor of an explicit element type.
    ///
    /// Plain numbers and booleans are converted into the buffer kind of `dtype`; a
    /// [`TensorData`] of exactly that kind is adopted as-is.
    pub fn from_typed_data(dtype: TensorType, data: impl Into<TensorInput>) -> TensorResult<Self> {
        let data = normalize_typed(dtype, data.into())?;
        Self::assemble::<usize>(dtype, data, None)
    }

    /// Like [`Tensor::from_typed_data`] with an explicit shape.
    pub fn from_typed_data_with_dims<D: DimLike>(
        dtype: TensorType,
        data: impl Into<TensorInput>,
        dims: &[D],
    ) -> TensorResult<Self> {
        let data = normalize_typed(dtype, data.into())?;
        Self::assemble(dtype, data, Some(dims))
    }

    /// Builds a one-dimensional tensor whose element type is inferred from `data`.
    ///
    /// Booleans infer `bool`, strings infer `string`, typed buffers infer the tag of
    /// their buffer kind. Plain number sequences carry no type and are rejected.
    pub fn from_untyped_data(data: impl Into<TensorInput>) -> TensorResult<Self> {
        let (dtype, data) = infer_untyped(data.into())?;
        Self::assemble::<usize>(dtype, data, None)
    }

    /// Like [`Tensor::from_untyped_data`] with an explicit shape.
    pub fn from_untyped_data_with_dims<D: DimLike>(
        data: impl Into<TensorInput>,
        dims: &[D],
    ) -> TensorResult<Self> {
        let (dtype, data) = infer_untyped(data.into())?;
        Self::assemble(dtype, data, Some(dims))
    }

    /// Returns a tensor over the same buffer with a different shape.
    ///
    /// `dims` goes through the same validation as a fresh construction.
    pub fn reshape<D: DimLike>(&self, dims: &[D]) -> TensorResult<Self> {
        let reshaped = Self::assemble(self.dtype, self.data.clone(), Some(dims))?;
        debug!(from = ?self.dims, to = ?reshaped.dims, "reshaped tensor");
        Ok(reshaped)
    }

    /// Shared tail of every constructor: resolve the shape and freeze the value.
    pub(crate) fn assemble<D: DimLike>(
        dtype: TensorType,
        data: TensorData,
        dims: Option<&[D]>,
    ) -> TensorResult<Self> {
        let dims = shape::resolve_dims(data.len(), dims)?;
        let size = data.len();
        debug!(dtype = %dtype, dims = ?dims, size, "constructed tensor");
        Ok(Tensor {
            dtype,
            data,
            dims,
            size,
        })
    }

    /// Element type tag.
    pub fn dtype(&self) -> TensorType {
        self.dtype
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total element count, the product of `dims`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Reports whether the tensor has no axes.
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// Payload size in bytes; `None` for string tensors.
    pub fn byte_len(&self) -> Option<usize> {
        self.dtype
            .element_size()
            .map(|element_size| element_size * self.size)
    }

    /// Splits the tensor into its tag, buffer and shape.
    pub fn into_parts(self) -> (TensorType, TensorData, Vec<usize>) {
        (self.dtype, self.data, self.dims)
    }
}

/// Normalizes data for an explicit element type.
///
/// String tensors only check that the input is a sequence; elements of numeric or
/// boolean sequences are rendered as text rather than rejected. Element-level checks
/// are left to the consuming engine.
pub(crate) fn normalize_typed(dtype: TensorType, input: TensorInput) -> TensorResult<TensorData> {
    let Some(kind) = BufferKind::for_type(dtype) else {
        return match input {
            TensorInput::Strings(values) => Ok(TensorData::from(values)),
            TensorInput::Data(data @ TensorData::String(_)) => Ok(data),
            TensorInput::Numbers(values) => Ok(TensorData::from(
                values.iter().map(f64::to_string).collect::<Vec<_>>(),
            )),
            TensorInput::Integers(values) => Ok(TensorData::from(
                values.iter().map(i128::to_string).collect::<Vec<_>>(),
            )),
            TensorInput::Bools(values) => Ok(TensorData::from(
                values.iter().map(bool::to_string).collect::<Vec<_>>(),
            )),
            TensorInput::Data(_) => Err(TensorError::StringDataNotArray),
        };
    };

    match input {
        TensorInput::Numbers(values) => {
            trace!(dtype = %dtype, len = values.len(), "converting number array");
            Ok(kind.convert_numbers(&values))
        }
        TensorInput::Integers(values) => {
            trace!(dtype = %dtype, len = values.len(), "converting integer array");
            Ok(kind.convert_integers(&values))
        }
        TensorInput::Bools(values) => {
            trace!(dtype = %dtype, len = values.len(), "converting boolean array");
            Ok(kind.convert_bools(&values))
        }
        TensorInput::Data(data) if data.kind() == Some(kind) => {
            trace!(dtype = %dtype, len = data.len(), "adopting buffer");
            Ok(data)
        }
        other => {
            trace!(dtype = %dtype, input = %other.describe(), "rejected tensor data");
            Err(TensorError::BufferKindMismatch {
                dtype,
                expected: kind,
            })
        }
    }
}

fn infer_untyped(input: TensorInput) -> TensorResult<(TensorType, TensorData)> {
    match input {
        TensorInput::Numbers(values) if values.is_empty() => Err(TensorError::EmptyInference),
        TensorInput::Integers(values) if values.is_empty() => Err(TensorError::EmptyInference),
        TensorInput::Numbers(_) | TensorInput::Integers(_) => {
            Err(TensorError::InvalidElementType("number".to_string()))
        }
        TensorInput::Bools(values) if values.is_empty() => Err(TensorError::EmptyInference),
        TensorInput::Bools(values) => {
            Ok((TensorType::Bool, BufferKind::Uint8.convert_bools(&values)))
        }
        TensorInput::Strings(values) if values.is_empty() => Err(TensorError::EmptyInference),
        TensorInput::Strings(values) => Ok((TensorType::String, TensorData::from(values))),
        TensorInput::Data(data) => match data.kind() {
            Some(kind) => Ok((kind.tensor_type(), data)),
            None if data.is_empty() => Err(TensorError::EmptyInference),
            None => Ok((TensorType::String, data)),
        },
    }
}

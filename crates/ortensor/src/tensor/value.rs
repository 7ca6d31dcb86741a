//! Builds tensors from loosely typed JSON values.
//!
//! Used by front ends that receive tensor descriptions as untyped documents (the CLI,
//! request payloads). The rules match the typed constructors; the extra failure modes
//! here are the ones a static type would otherwise rule out, such as dims that are not
//! an array or data that is not a sequence at all.

use serde_json::Value;

use super::data::{BufferKind, TensorData, TensorInput};
use super::dtype::TensorType;
use super::host_tensor::{normalize_typed, Tensor};
use crate::error::{TensorError, TensorResult};

impl Tensor {
    /// Builds a tensor from a textual tag, a JSON data array and optional JSON dims.
    ///
    /// `dims` of `None` or `null` means "one axis covering the data".
    pub fn from_typed_value(tag: &str, data: &Value, dims: Option<&Value>) -> TensorResult<Self> {
        let dtype: TensorType = tag.parse()?;
        let data = match BufferKind::for_type(dtype) {
            None => strings_from_value(data)?,
            Some(kind) => {
                let input = numbers_from_value(data).ok_or(TensorError::BufferKindMismatch {
                    dtype,
                    expected: kind,
                })?;
                normalize_typed(dtype, input)?
            }
        };
        Self::assemble(dtype, data, dims_from_value(dims)?)
    }

    /// Builds a tensor from a JSON data array, inferring its element type from the
    /// first element.
    pub fn from_untyped_value(data: &Value, dims: Option<&Value>) -> TensorResult<Self> {
        let Value::Array(items) = data else {
            return Err(TensorError::UnsupportedData(json_kind(data).to_string()));
        };
        let Some(first) = items.first() else {
            return Err(TensorError::EmptyInference);
        };
        let (dtype, data) = match first {
            Value::String(_) => (TensorType::String, strings_from_value(data)?),
            Value::Bool(_) => {
                let numbers: Vec<f64> = items.iter().map(coerce_number).collect();
                (TensorType::Bool, BufferKind::Uint8.convert_numbers(&numbers))
            }
            other => return Err(TensorError::InvalidElementType(json_kind(other).to_string())),
        };
        Self::assemble(dtype, data, dims_from_value(dims)?)
    }
}

fn dims_from_value(dims: Option<&Value>) -> TensorResult<Option<&[Value]>> {
    match dims {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.as_slice())),
        Some(_) => Err(TensorError::DimsNotArray),
    }
}

/// Only array-ness is checked; non-string elements keep their JSON text.
fn strings_from_value(data: &Value) -> TensorResult<TensorData> {
    let Value::Array(items) = data else {
        return Err(TensorError::StringDataNotArray);
    };
    let strings: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Ok(TensorData::from(strings))
}

/// Arrays of integers and booleans stay exact; one fractional element turns the whole
/// array into floats.
fn numbers_from_value(data: &Value) -> Option<TensorInput> {
    let Value::Array(items) = data else {
        return None;
    };
    let integers: Option<Vec<i128>> = items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from)),
            Value::Bool(b) => Some(i128::from(*b)),
            _ => None,
        })
        .collect();
    if let Some(integers) = integers {
        return Some(TensorInput::Integers(integers));
    }
    items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        })
        .collect::<Option<Vec<f64>>>()
        .map(TensorInput::Numbers)
}

// Numeric coercion of mixed elements: null and blank strings are 0, numeric strings
// parse, everything else is NaN (stored as 0 by integer buffers).
fn coerce_number(item: &Value) -> f64 {
    match item {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

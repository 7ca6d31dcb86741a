//! Loads JSON tensor descriptions and renders summaries of the resulting tensors.

use std::fmt::{self, Display};

use anyhow::{Context, Result};
use ortensor::{BufferKind, Tensor, TensorData, TensorType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// On-disk description of a tensor: `{"type"?: tag, "data": [...], "dims"?: [...]}`.
///
/// Without `type` the element type is inferred from `data`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TensorDescription {
    #[serde(rename = "type", default)]
    pub dtype: Option<String>,
    pub data: Value,
    #[serde(default)]
    pub dims: Option<Value>,
}

impl TensorDescription {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse tensor description")
    }

    pub fn build(&self) -> Result<Tensor> {
        let tensor = match &self.dtype {
            Some(tag) => Tensor::from_typed_value(tag, &self.data, self.dims.as_ref()),
            None => Tensor::from_untyped_value(&self.data, self.dims.as_ref()),
        };
        tensor.context("invalid tensor description")
    }
}

/// Parses a `--reshape` argument such as `2,3` or `-1,4`. An empty string is a scalar.
pub fn parse_dims_arg(arg: &str) -> Result<Vec<i64>> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(Vec::new());
    }
    arg.split(',')
        .enumerate()
        .map(|(index, part)| {
            part.trim()
                .parse::<i64>()
                .with_context(|| format!("dims[{index}] is not an integer: '{}'", part.trim()))
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct TensorSummary {
    #[serde(rename = "type")]
    pub dtype: TensorType,
    pub dims: Vec<usize>,
    pub size: usize,
    pub byte_len: Option<usize>,
    pub preview: Vec<String>,
}

impl TensorSummary {
    pub fn new(tensor: &Tensor, preview_len: usize) -> Self {
        TensorSummary {
            dtype: tensor.dtype(),
            dims: tensor.dims().to_vec(),
            size: tensor.size(),
            byte_len: tensor.byte_len(),
            preview: preview(tensor.data(), preview_len),
        }
    }
}

impl Display for TensorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type:  {}", self.dtype)?;
        writeln!(f, "dims:  {:?}", self.dims)?;
        writeln!(f, "size:  {}", self.size)?;
        if let Some(bytes) = self.byte_len {
            writeln!(f, "bytes: {bytes}")?;
        }
        let ellipsis = if self.preview.len() < self.size { ", ..." } else { "" };
        writeln!(f, "data:  [{}{}]", self.preview.join(", "), ellipsis)
    }
}

fn head<T: Display>(values: &[T], limit: usize) -> Vec<String> {
    values.iter().take(limit).map(ToString::to_string).collect()
}

/// Formats up to `limit` leading elements of `data`.
pub fn preview(data: &TensorData, limit: usize) -> Vec<String> {
    match data {
        TensorData::Float32(b) => head(&b[..], limit),
        TensorData::Uint8(b) => head(&b[..], limit),
        TensorData::Int8(b) => head(&b[..], limit),
        TensorData::Uint16(b) => head(&b[..], limit),
        TensorData::Int16(b) => head(&b[..], limit),
        TensorData::Int32(b) => head(&b[..], limit),
        TensorData::BigInt64(b) => head(&b[..], limit),
        TensorData::Float64(b) => head(&b[..], limit),
        TensorData::Uint32(b) => head(&b[..], limit),
        TensorData::BigUint64(b) => head(&b[..], limit),
        TensorData::String(b) => b.iter().take(limit).map(|s| format!("{s:?}")).collect(),
    }
}

/// One row of the `types` listing.
#[derive(Debug, Serialize)]
pub struct TypeRow {
    #[serde(rename = "type")]
    pub dtype: TensorType,
    pub buffer: Option<String>,
    pub element_size: Option<usize>,
}

pub fn type_table() -> Vec<TypeRow> {
    TensorType::ALL
        .into_iter()
        .map(|dtype| TypeRow {
            dtype,
            buffer: BufferKind::for_type(dtype).map(|kind| kind.to_string()),
            element_size: dtype.element_size(),
        })
        .collect()
}

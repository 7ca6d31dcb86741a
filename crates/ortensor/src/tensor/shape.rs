//! Shape validation and element-count bookkeeping.

use std::fmt;

use serde_json::Value;

use crate::error::{TensorError, TensorResult};

/// Largest integer a 64-bit float represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// A candidate shape entry that has not been validated yet.
///
/// Implementors report the entry as an integer only when it is exactly representable
/// as one; everything else is rejected by [`calculate_size`].
pub trait DimLike: fmt::Display {
    fn as_safe_integer(&self) -> Option<i64>;
}

fn safe_integer_from_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn safe_integer_from_i128(value: i128) -> Option<i64> {
    if value.unsigned_abs() <= MAX_SAFE_INTEGER as u128 {
        Some(value as i64)
    } else {
        None
    }
}

macro_rules! impl_dim_like_int {
    ($($ty:ty),*) => {
        $(
            impl DimLike for $ty {
                fn as_safe_integer(&self) -> Option<i64> {
                    safe_integer_from_i128(*self as i128)
                }
            }
        )*
    };
}

impl_dim_like_int!(i32, i64, isize, u32, u64, usize);

impl DimLike for f64 {
    fn as_safe_integer(&self) -> Option<i64> {
        safe_integer_from_f64(*self)
    }
}

impl DimLike for Value {
    fn as_safe_integer(&self) -> Option<i64> {
        match self {
            Value::Number(number) => {
                if let Some(v) = number.as_i64() {
                    safe_integer_from_i128(v as i128)
                } else if let Some(v) = number.as_u64() {
                    safe_integer_from_i128(v as i128)
                } else {
                    number.as_f64().and_then(safe_integer_from_f64)
                }
            }
            _ => None,
        }
    }
}

/// Computes the element count implied by `dims`.
///
/// Entries are checked left to right and the first offending one is reported: a
/// non-integer entry is a type error, a negative one a range error. Overflow of the
/// running product is only reported once every entry has passed, and not at all when
/// some extent is zero. An empty shape describes a scalar and yields 1.
pub fn calculate_size<D: DimLike>(dims: &[D]) -> TensorResult<usize> {
    validate_dims(dims).map(|(_, size)| size)
}

/// Validates `dims` and returns them as extents together with their product.
pub(crate) fn validate_dims<D: DimLike>(dims: &[D]) -> TensorResult<(Vec<usize>, usize)> {
    let mut extents = Vec::with_capacity(dims.len());
    let mut size = 1usize;
    let mut overflow_at = None;
    for (index, dim) in dims.iter().enumerate() {
        let value = dim
            .as_safe_integer()
            .ok_or_else(|| TensorError::DimNotInteger {
                index,
                value: dim.to_string(),
            })?;
        if value < 0 {
            return Err(TensorError::NegativeDim { index, value });
        }
        let extent = match usize::try_from(value) {
            Ok(extent) => extent,
            Err(_) => {
                overflow_at.get_or_insert(index);
                usize::MAX
            }
        };
        match size.checked_mul(extent) {
            Some(product) => size = product,
            None => {
                overflow_at.get_or_insert(index);
            }
        }
        extents.push(extent);
    }
    if extents.contains(&0) {
        return Ok((extents, 0));
    }
    if let Some(index) = overflow_at {
        return Err(TensorError::ShapeOverflow { index });
    }
    Ok((extents, size))
}

/// Resolves the final shape for a buffer of `len` elements.
///
/// Missing dims default to a single axis covering the whole buffer.
pub(crate) fn resolve_dims<D: DimLike>(len: usize, dims: Option<&[D]>) -> TensorResult<Vec<usize>> {
    let Some(dims) = dims else {
        return Ok(vec![len]);
    };
    let (extents, size) = validate_dims(dims)?;
    if size != len {
        return Err(TensorError::SizeMismatch { size, len });
    }
    Ok(extents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_dims_must_be_integral() {
        assert_eq!(2.0f64.as_safe_integer(), Some(2));
        assert_eq!(2.5f64.as_safe_integer(), None);
        assert_eq!(f64::NAN.as_safe_integer(), None);
        assert_eq!(f64::INFINITY.as_safe_integer(), None);
    }

    #[test]
    fn integers_beyond_safe_range_are_rejected() {
        assert_eq!(MAX_SAFE_INTEGER.as_safe_integer(), Some(MAX_SAFE_INTEGER));
        assert_eq!((MAX_SAFE_INTEGER + 1).as_safe_integer(), None);
        assert_eq!((-MAX_SAFE_INTEGER).as_safe_integer(), Some(-MAX_SAFE_INTEGER));
        assert_eq!(u64::MAX.as_safe_integer(), None);
    }

    #[test]
    fn json_dims_accept_only_numbers() {
        assert_eq!(serde_json::json!(3).as_safe_integer(), Some(3));
        assert_eq!(serde_json::json!(3.0).as_safe_integer(), Some(3));
        assert_eq!(serde_json::json!("3").as_safe_integer(), None);
        assert_eq!(serde_json::json!(null).as_safe_integer(), None);
        assert_eq!(serde_json::json!(true).as_safe_integer(), None);
    }

    #[test]
    fn resolve_dims_defaults_to_one_axis() {
        let dims = resolve_dims::<i64>(5, None).expect("default dims");
        assert_eq!(dims, vec![5]);
    }
}

//! Buffer kinds and the shared element storage behind every tensor.

use std::fmt;
use std::sync::Arc;

use super::dtype::TensorType;

/// Concrete homogeneous storage used for numeric tensor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Float32,
    Uint8,
    Int8,
    Uint16,
    Int16,
    Int32,
    BigInt64,
    Float64,
    Uint32,
    BigUint64,
}

impl BufferKind {
    /// Every buffer kind in declaration order.
    pub const ALL: [BufferKind; 10] = [
        BufferKind::Float32,
        BufferKind::Uint8,
        BufferKind::Int8,
        BufferKind::Uint16,
        BufferKind::Int16,
        BufferKind::Int32,
        BufferKind::BigInt64,
        BufferKind::Float64,
        BufferKind::Uint32,
        BufferKind::BigUint64,
    ];

    /// Maps a tag to the buffer kind that stores it. `string` has no numeric buffer.
    pub fn for_type(dtype: TensorType) -> Option<BufferKind> {
        match dtype {
            TensorType::Float32 => Some(BufferKind::Float32),
            TensorType::Uint8 | TensorType::Bool => Some(BufferKind::Uint8),
            TensorType::Int8 => Some(BufferKind::Int8),
            TensorType::Uint16 => Some(BufferKind::Uint16),
            TensorType::Int16 => Some(BufferKind::Int16),
            TensorType::Int32 => Some(BufferKind::Int32),
            TensorType::Int64 => Some(BufferKind::BigInt64),
            TensorType::Float64 => Some(BufferKind::Float64),
            TensorType::Uint32 => Some(BufferKind::Uint32),
            TensorType::Uint64 => Some(BufferKind::BigUint64),
            TensorType::String => None,
        }
    }

    /// Tag inferred for a buffer of this kind when the caller supplies no tag.
    ///
    /// `Uint8` maps to `uint8`, never `bool`.
    pub fn tensor_type(self) -> TensorType {
        match self {
            BufferKind::Float32 => TensorType::Float32,
            BufferKind::Uint8 => TensorType::Uint8,
            BufferKind::Int8 => TensorType::Int8,
            BufferKind::Uint16 => TensorType::Uint16,
            BufferKind::Int16 => TensorType::Int16,
            BufferKind::Int32 => TensorType::Int32,
            BufferKind::BigInt64 => TensorType::Int64,
            BufferKind::Float64 => TensorType::Float64,
            BufferKind::Uint32 => TensorType::Uint32,
            BufferKind::BigUint64 => TensorType::Uint64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BufferKind::Float32 => "f32 buffer",
            BufferKind::Uint8 => "u8 buffer",
            BufferKind::Int8 => "i8 buffer",
            BufferKind::Uint16 => "u16 buffer",
            BufferKind::Int16 => "i16 buffer",
            BufferKind::Int32 => "i32 buffer",
            BufferKind::BigInt64 => "i64 buffer",
            BufferKind::Float64 => "f64 buffer",
            BufferKind::Uint32 => "u32 buffer",
            BufferKind::BigUint64 => "u64 buffer",
        }
    }

    /// Converts plain numbers element-wise into a buffer of this kind.
    ///
    /// Uses `as` casts: out-of-range values saturate, fractions truncate toward zero and
    /// `NaN` becomes zero for integer kinds.
    pub fn convert_numbers(self, values: &[f64]) -> TensorData {
        match self {
            BufferKind::Float32 => collect_numbers::<f32>(values),
            BufferKind::Uint8 => collect_numbers::<u8>(values),
            BufferKind::Int8 => collect_numbers::<i8>(values),
            BufferKind::Uint16 => collect_numbers::<u16>(values),
            BufferKind::Int16 => collect_numbers::<i16>(values),
            BufferKind::Int32 => collect_numbers::<i32>(values),
            BufferKind::BigInt64 => collect_numbers::<i64>(values),
            BufferKind::Float64 => collect_numbers::<f64>(values),
            BufferKind::Uint32 => collect_numbers::<u32>(values),
            BufferKind::BigUint64 => collect_numbers::<u64>(values),
        }
    }

    /// Converts integers element-wise without a detour through `f64`.
    ///
    /// Integer kinds saturate at their bounds; float kinds round to nearest. Values that
    /// fit an `i64` or `u64` arrive unchanged in the 64-bit kinds.
    pub fn convert_integers(self, values: &[i128]) -> TensorData {
        match self {
            BufferKind::Float32 => collect_integers::<f32>(values),
            BufferKind::Uint8 => collect_integers::<u8>(values),
            BufferKind::Int8 => collect_integers::<i8>(values),
            BufferKind::Uint16 => collect_integers::<u16>(values),
            BufferKind::Int16 => collect_integers::<i16>(values),
            BufferKind::Int32 => collect_integers::<i32>(values),
            BufferKind::BigInt64 => collect_integers::<i64>(values),
            BufferKind::Float64 => collect_integers::<f64>(values),
            BufferKind::Uint32 => collect_integers::<u32>(values),
            BufferKind::BigUint64 => collect_integers::<u64>(values),
        }
    }

    /// Converts booleans element-wise (`true` ⇒ 1, `false` ⇒ 0).
    pub fn convert_bools(self, values: &[bool]) -> TensorData {
        let numbers: Vec<f64> = values.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        self.convert_numbers(&numbers)
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust scalar types that back a numeric [`BufferKind`].
pub trait Element: Copy + Send + Sync + 'static {
    /// The buffer kind storing this scalar.
    const KIND: BufferKind;

    /// Converts a plain number into this scalar with `as` semantics.
    fn from_f64(value: f64) -> Self;

    /// Converts an integer into this scalar, saturating for integer kinds.
    fn from_i128(value: i128) -> Self;

    /// Wraps a shared buffer into [`TensorData`].
    fn wrap(buffer: Arc<[Self]>) -> TensorData;

    /// Borrows the shared buffer when `data` holds this scalar type.
    fn unwrap(data: &TensorData) -> Option<&Arc<[Self]>>;
}

macro_rules! impl_element {
    (@impl $rust_type:ty, $kind:ident, $from_int:expr) => {
        impl Element for $rust_type {
            const KIND: BufferKind = BufferKind::$kind;

            fn from_f64(value: f64) -> Self {
                value as $rust_type
            }

            fn from_i128(value: i128) -> Self {
                let convert: fn(i128) -> $rust_type = $from_int;
                convert(value)
            }

            fn wrap(buffer: Arc<[Self]>) -> TensorData {
                TensorData::$kind(buffer)
            }

            fn unwrap(data: &TensorData) -> Option<&Arc<[Self]>> {
                match data {
                    TensorData::$kind(buffer) => Some(buffer),
                    _ => None,
                }
            }
        }

        impl From<Vec<$rust_type>> for TensorData {
            fn from(values: Vec<$rust_type>) -> Self {
                TensorData::$kind(Arc::from(values))
            }
        }

        impl From<Arc<[$rust_type]>> for TensorData {
            fn from(buffer: Arc<[$rust_type]>) -> Self {
                TensorData::$kind(buffer)
            }
        }
    };
    ($rust_type:ty, $kind:ident, float) => {
        impl_element!(@impl $rust_type, $kind, |value: i128| value as $rust_type);
    };
    ($rust_type:ty, $kind:ident, int) => {
        impl_element!(@impl $rust_type, $kind, |value: i128| {
            value.clamp(<$rust_type>::MIN as i128, <$rust_type>::MAX as i128) as $rust_type
        });
    };
}

impl_element!(f32, Float32, float);
impl_element!(u8, Uint8, int);
impl_element!(i8, Int8, int);
impl_element!(u16, Uint16, int);
impl_element!(i16, Int16, int);
impl_element!(i32, Int32, int);
impl_element!(i64, BigInt64, int);
impl_element!(f64, Float64, float);
impl_element!(u32, Uint32, int);
impl_element!(u64, BigUint64, int);

fn collect_numbers<T: Element>(values: &[f64]) -> TensorData {
    let converted: Vec<T> = values.iter().map(|&v| T::from_f64(v)).collect();
    T::wrap(Arc::from(converted))
}

fn collect_integers<T: Element>(values: &[i128]) -> TensorData {
    let converted: Vec<T> = values.iter().map(|&v| T::from_i128(v)).collect();
    T::wrap(Arc::from(converted))
}

/// Element storage of a tensor.
///
/// Every variant holds an `Arc`, so cloning shares the allocation instead of copying it.
/// Nothing in this crate mutates a buffer once it is wrapped.
#[derive(Debug, Clone)]
pub enum TensorData {
    Float32(Arc<[f32]>),
    Uint8(Arc<[u8]>),
    Int8(Arc<[i8]>),
    Uint16(Arc<[u16]>),
    Int16(Arc<[i16]>),
    Int32(Arc<[i32]>),
    BigInt64(Arc<[i64]>),
    Float64(Arc<[f64]>),
    Uint32(Arc<[u32]>),
    BigUint64(Arc<[u64]>),
    String(Arc<[String]>),
}

impl TensorData {
    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            TensorData::Float32(b) => b.len(),
            TensorData::Uint8(b) => b.len(),
            TensorData::Int8(b) => b.len(),
            TensorData::Uint16(b) => b.len(),
            TensorData::Int16(b) => b.len(),
            TensorData::Int32(b) => b.len(),
            TensorData::BigInt64(b) => b.len(),
            TensorData::Float64(b) => b.len(),
            TensorData::Uint32(b) => b.len(),
            TensorData::BigUint64(b) => b.len(),
            TensorData::String(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric buffer kind, or `None` for string storage.
    pub fn kind(&self) -> Option<BufferKind> {
        match self {
            TensorData::Float32(_) => Some(BufferKind::Float32),
            TensorData::Uint8(_) => Some(BufferKind::Uint8),
            TensorData::Int8(_) => Some(BufferKind::Int8),
            TensorData::Uint16(_) => Some(BufferKind::Uint16),
            TensorData::Int16(_) => Some(BufferKind::Int16),
            TensorData::Int32(_) => Some(BufferKind::Int32),
            TensorData::BigInt64(_) => Some(BufferKind::BigInt64),
            TensorData::Float64(_) => Some(BufferKind::Float64),
            TensorData::Uint32(_) => Some(BufferKind::Uint32),
            TensorData::BigUint64(_) => Some(BufferKind::BigUint64),
            TensorData::String(_) => None,
        }
    }

    /// Borrows the elements as `T` when the buffer kind matches.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::unwrap(self).map(|buffer| buffer.as_ref())
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            TensorData::String(b) => Some(b),
            _ => None,
        }
    }

    /// Returns `true` when both values point at the same allocation.
    pub fn ptr_eq(&self, other: &TensorData) -> bool {
        match (self, other) {
            (TensorData::Float32(a), TensorData::Float32(b)) => Arc::ptr_eq(a, b),
            (TensorData::Uint8(a), TensorData::Uint8(b)) => Arc::ptr_eq(a, b),
            (TensorData::Int8(a), TensorData::Int8(b)) => Arc::ptr_eq(a, b),
            (TensorData::Uint16(a), TensorData::Uint16(b)) => Arc::ptr_eq(a, b),
            (TensorData::Int16(a), TensorData::Int16(b)) => Arc::ptr_eq(a, b),
            (TensorData::Int32(a), TensorData::Int32(b)) => Arc::ptr_eq(a, b),
            (TensorData::BigInt64(a), TensorData::BigInt64(b)) => Arc::ptr_eq(a, b),
            (TensorData::Float64(a), TensorData::Float64(b)) => Arc::ptr_eq(a, b),
            (TensorData::Uint32(a), TensorData::Uint32(b)) => Arc::ptr_eq(a, b),
            (TensorData::BigUint64(a), TensorData::BigUint64(b)) => Arc::ptr_eq(a, b),
            (TensorData::String(a), TensorData::String(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Vec<String>> for TensorData {
    fn from(values: Vec<String>) -> Self {
        TensorData::String(Arc::from(values))
    }
}

impl From<Arc<[String]>> for TensorData {
    fn from(values: Arc<[String]>) -> Self {
        TensorData::String(values)
    }
}

/// Caller-supplied data before it is normalized into [`TensorData`].
///
/// `Numbers`, `Integers`, `Bools` and `Strings` are plain sequences that may be
/// converted; `Data` is an already-typed buffer that is adopted without copying.
/// `Integers` keeps values beyond `2^53` exact on their way into 64-bit buffers.
#[derive(Debug, Clone)]
pub enum TensorInput {
    Numbers(Vec<f64>),
    Integers(Vec<i128>),
    Bools(Vec<bool>),
    Strings(Vec<String>),
    Data(TensorData),
}

impl TensorInput {
    /// Short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TensorInput::Numbers(_) | TensorInput::Integers(_) => "number array".to_string(),
            TensorInput::Bools(_) => "boolean array".to_string(),
            TensorInput::Strings(_) => "string array".to_string(),
            TensorInput::Data(data) => match data.kind() {
                Some(kind) => kind.to_string(),
                None => "string array".to_string(),
            },
        }
    }
}

impl From<Vec<f64>> for TensorInput {
    fn from(values: Vec<f64>) -> Self {
        TensorInput::Numbers(values)
    }
}

impl From<Vec<i64>> for TensorInput {
    fn from(values: Vec<i64>) -> Self {
        TensorInput::Integers(values.into_iter().map(i128::from).collect())
    }
}

impl From<Vec<u64>> for TensorInput {
    fn from(values: Vec<u64>) -> Self {
        TensorInput::Integers(values.into_iter().map(i128::from).collect())
    }
}

impl From<Vec<bool>> for TensorInput {
    fn from(values: Vec<bool>) -> Self {
        TensorInput::Bools(values)
    }
}

impl From<Vec<String>> for TensorInput {
    fn from(values: Vec<String>) -> Self {
        TensorInput::Strings(values)
    }
}

impl From<Vec<&str>> for TensorInput {
    fn from(values: Vec<&str>) -> Self {
        TensorInput::Strings(values.into_iter().map(str::to_string).collect())
    }
}

impl From<TensorData> for TensorInput {
    fn from(data: TensorData) -> Self {
        TensorInput::Data(data)
    }
}

//! Host tensor value and the types it is built from.
//!
//! The tensor module defines the element tags, the shared buffers that back them, shape
//! validation, and the immutable [`Tensor`] value itself. Construction lives in two
//! families: typed Rust inputs ([`TensorInput`]) and loosely typed JSON values.

mod data;
pub mod dtype;
mod host_tensor;
pub mod shape;
mod value;

pub use data::{BufferKind, Element, TensorData, TensorInput};
pub use dtype::TensorType;
pub use host_tensor::Tensor;
pub use shape::{calculate_size, DimLike};

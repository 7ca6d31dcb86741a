//! Validated tensor values for passing inputs to an inference engine.

pub mod env;
pub mod error;
pub mod tensor;

pub use error::{ErrorKind, TensorError, TensorResult};
pub use tensor::{
    calculate_size, BufferKind, DimLike, Element, Tensor, TensorData, TensorInput, TensorType,
};

#![allow(clippy::useless_conversion)]

use ortensor::TensorType;
use pyo3::prelude::*;

mod logging;
mod tensor;

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    logging::init();

    // Core types
    m.add_class::<tensor::PyTensor>()?;
    m.add("TYPES", TensorType::ALL.map(TensorType::name).to_vec())?;

    // Error classes beyond the builtin TypeError
    m.add(
        "TensorRangeError",
        m.py().get_type_bound::<tensor::TensorRangeError>(),
    )?;
    m.add(
        "TensorSizeError",
        m.py().get_type_bound::<tensor::TensorSizeError>(),
    )?;

    Ok(())
}

use std::fmt;
use std::sync::Arc;

use numpy::{PyArray1, PyArrayDyn, PyArrayMethods, PyUntypedArray};
use ortensor::{
    BufferKind, DimLike, Element as TensorElement, ErrorKind, Tensor, TensorData, TensorError,
    TensorInput, TensorResult, TensorType,
};
use pyo3::create_exception;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyList, PyLong, PyString, PyTuple};

create_exception!(ortensor, TensorRangeError, PyValueError);
create_exception!(ortensor, TensorSizeError, PyValueError);

fn to_py_err(err: TensorError) -> PyErr {
    match err.kind() {
        ErrorKind::Type => PyTypeError::new_err(err.to_string()),
        ErrorKind::Range => TensorRangeError::new_err(err.to_string()),
        ErrorKind::Size => TensorSizeError::new_err(err.to_string()),
    }
}

/// Python-side data argument after classification.
enum PyData {
    Input(TensorInput),
    /// A sequence whose first element has no tensor mapping. Elements are kept as their
    /// `str()` rendering for string tensors.
    Opaque {
        type_name: String,
        rendered: Vec<String>,
    },
    /// Neither a sequence nor an ndarray of a supported dtype.
    Unsupported(String),
}

fn type_name(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    obj.get_type().getattr("__name__")?.extract::<String>()
}

fn render(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    if obj.is_instance_of::<PyString>() {
        obj.extract::<String>()
    } else {
        obj.str()?.extract::<String>()
    }
}

fn sequence_items<'py>(obj: &Bound<'py, PyAny>) -> Option<Vec<Bound<'py, PyAny>>> {
    if let Ok(list) = obj.downcast::<PyList>() {
        Some(list.iter().collect())
    } else if let Ok(tuple) = obj.downcast::<PyTuple>() {
        Some(tuple.iter().collect())
    } else {
        None
    }
}

fn copy_array<T>(obj: &Bound<'_, PyAny>) -> PyResult<TensorData>
where
    T: TensorElement + numpy::Element,
{
    let array = obj.downcast::<PyArrayDyn<T>>()?;
    let values: Vec<T> = array.readonly().as_array().iter().copied().collect();
    Ok(<T as TensorElement>::wrap(Arc::from(values)))
}

/// Classifies `obj` into the typed-buffer or plain-sequence role.
///
/// NumPy arrays play the typed-buffer role and are copied into a shared buffer; lists
/// and tuples are plain sequences typed by their first element.
fn classify(obj: &Bound<'_, PyAny>) -> PyResult<PyData> {
    if obj.downcast::<PyUntypedArray>().is_ok() {
        let dtype = obj.getattr("dtype")?.str()?.extract::<String>()?;
        let data = match dtype.as_str() {
            "float32" => copy_array::<f32>(obj)?,
            "uint8" => copy_array::<u8>(obj)?,
            "int8" => copy_array::<i8>(obj)?,
            "uint16" => copy_array::<u16>(obj)?,
            "int16" => copy_array::<i16>(obj)?,
            "int32" => copy_array::<i32>(obj)?,
            "int64" => copy_array::<i64>(obj)?,
            "float64" => copy_array::<f64>(obj)?,
            "uint32" => copy_array::<u32>(obj)?,
            "uint64" => copy_array::<u64>(obj)?,
            "bool" => {
                let array = obj.downcast::<PyArrayDyn<bool>>()?;
                let values: Vec<bool> = array.readonly().as_array().iter().copied().collect();
                return Ok(PyData::Input(TensorInput::Bools(values)));
            }
            other => return Ok(PyData::Unsupported(format!("numpy.ndarray[{other}]"))),
        };
        return Ok(PyData::Input(TensorInput::Data(data)));
    }

    let Some(items) = sequence_items(obj) else {
        return Ok(PyData::Unsupported(type_name(obj)?));
    };
    let Some(first) = items.first() else {
        return Ok(PyData::Input(TensorInput::Numbers(Vec::new())));
    };

    if first.is_instance_of::<PyString>() {
        let strings = items.iter().map(render).collect::<PyResult<Vec<_>>>()?;
        Ok(PyData::Input(TensorInput::Strings(strings)))
    } else if first.is_instance_of::<PyBool>() {
        let bools = items
            .iter()
            .map(|item| item.is_truthy())
            .collect::<PyResult<Vec<_>>>()?;
        Ok(PyData::Input(TensorInput::Bools(bools)))
    } else if first.is_instance_of::<PyLong>() || first.is_instance_of::<PyFloat>() {
        // all-int lists stay exact for 64-bit tensors
        if let Ok(integers) = items
            .iter()
            .map(|item| item.extract::<i128>())
            .collect::<PyResult<Vec<_>>>()
        {
            return Ok(PyData::Input(TensorInput::Integers(integers)));
        }
        let numbers = items
            .iter()
            .map(|item| item.extract::<f64>())
            .collect::<PyResult<Vec<_>>>()?;
        Ok(PyData::Input(TensorInput::Numbers(numbers)))
    } else {
        Ok(PyData::Opaque {
            type_name: type_name(first)?,
            rendered: items.iter().map(render).collect::<PyResult<Vec<_>>>()?,
        })
    }
}

/// A shape entry as received from Python, before validation.
enum PyDim {
    Int(i64),
    Float(f64),
    Other(String),
}

impl fmt::Display for PyDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PyDim::Int(value) => write!(f, "{value}"),
            PyDim::Float(value) => write!(f, "{value}"),
            PyDim::Other(repr) => f.write_str(repr),
        }
    }
}

impl DimLike for PyDim {
    fn as_safe_integer(&self) -> Option<i64> {
        match self {
            PyDim::Int(value) => value.as_safe_integer(),
            PyDim::Float(value) => value.as_safe_integer(),
            PyDim::Other(_) => None,
        }
    }
}

fn extract_dims(dims: Option<&Bound<'_, PyAny>>) -> PyResult<Option<Vec<PyDim>>> {
    let Some(dims) = dims else {
        return Ok(None);
    };
    if dims.is_none() {
        return Ok(None);
    }
    let Some(items) = sequence_items(dims) else {
        return Err(to_py_err(TensorError::DimsNotArray));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in &items {
        // bool is an int subclass but never a valid extent
        let dim = if item.is_instance_of::<PyBool>() {
            PyDim::Other(item.repr()?.extract::<String>()?)
        } else if item.is_instance_of::<PyLong>() {
            match item.extract::<i64>() {
                Ok(value) => PyDim::Int(value),
                Err(_) => PyDim::Other(item.repr()?.extract::<String>()?),
            }
        } else if item.is_instance_of::<PyFloat>() {
            PyDim::Float(item.extract::<f64>()?)
        } else {
            PyDim::Other(item.repr()?.extract::<String>()?)
        };
        out.push(dim);
    }
    Ok(Some(out))
}

fn typed(dtype: TensorType, input: TensorInput, dims: Option<&[PyDim]>) -> TensorResult<Tensor> {
    match dims {
        Some(dims) => Tensor::from_typed_data_with_dims(dtype, input, dims),
        None => Tensor::from_typed_data(dtype, input),
    }
}

fn untyped(input: TensorInput, dims: Option<&[PyDim]>) -> TensorResult<Tensor> {
    match dims {
        Some(dims) => Tensor::from_untyped_data_with_dims(input, dims),
        None => Tensor::from_untyped_data(input),
    }
}

fn to_numpy<'py, T>(py: Python<'py>, values: &[T], dims: &[usize]) -> PyResult<Bound<'py, PyAny>>
where
    T: numpy::Element + Copy,
{
    Ok(PyArray1::from_slice_bound(py, values).reshape(dims)?.into_any())
}

/// Python-exposed tensor value.
#[pyclass(name = "Tensor", module = "ortensor", frozen)]
pub struct PyTensor {
    inner: Tensor,
}

#[pymethods]
impl PyTensor {
    /// Build a tensor of an explicit element type (`"float32"`, `"bool"`, `"string"`, ...).
    #[staticmethod]
    #[pyo3(signature = (dtype, data, dims=None))]
    fn from_typed(
        dtype: &str,
        data: &Bound<'_, PyAny>,
        dims: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        let dtype: TensorType = dtype.parse().map_err(to_py_err)?;
        let input = match classify(data)? {
            PyData::Input(input) => input,
            PyData::Opaque { rendered, .. } if dtype == TensorType::String => {
                TensorInput::Strings(rendered)
            }
            PyData::Unsupported(_) if dtype == TensorType::String => {
                return Err(to_py_err(TensorError::StringDataNotArray));
            }
            PyData::Opaque { .. } | PyData::Unsupported(_) => {
                let expected = BufferKind::for_type(dtype)
                    .ok_or_else(|| to_py_err(TensorError::StringDataNotArray))?;
                return Err(to_py_err(TensorError::BufferKindMismatch { dtype, expected }));
            }
        };
        let dims = extract_dims(dims)?;
        let inner = typed(dtype, input, dims.as_deref()).map_err(to_py_err)?;
        Ok(PyTensor { inner })
    }

    /// Build a tensor whose element type is inferred from `data`.
    #[staticmethod]
    #[pyo3(signature = (data, dims=None))]
    fn from_data(data: &Bound<'_, PyAny>, dims: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let input = match classify(data)? {
            PyData::Input(input) => input,
            PyData::Opaque { type_name, .. } => {
                return Err(to_py_err(TensorError::InvalidElementType(type_name)));
            }
            PyData::Unsupported(name) => {
                return Err(to_py_err(TensorError::UnsupportedData(name)));
            }
        };
        let dims = extract_dims(dims)?;
        let inner = untyped(input, dims.as_deref()).map_err(to_py_err)?;
        Ok(PyTensor { inner })
    }

    /// Return a tensor over the same buffer with a new shape.
    fn reshape(&self, dims: &Bound<'_, PyAny>) -> PyResult<Self> {
        let Some(dims) = extract_dims(Some(dims))? else {
            return Err(to_py_err(TensorError::DimsNotArray));
        };
        let inner = self.inner.reshape(dims.as_slice()).map_err(to_py_err)?;
        Ok(PyTensor { inner })
    }

    #[getter]
    fn r#type(&self) -> &'static str {
        self.inner.dtype().name()
    }

    #[getter]
    fn dims(&self) -> Vec<usize> {
        self.inner.dims().to_vec()
    }

    #[getter]
    fn size(&self) -> usize {
        self.inner.size()
    }

    #[getter]
    fn rank(&self) -> usize {
        self.inner.rank()
    }

    /// Copy of the data: a NumPy array shaped by `dims`, or a list of `str`.
    #[getter]
    fn data<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let dims = self.inner.dims();
        match self.inner.data() {
            TensorData::Float32(b) => to_numpy(py, &b[..], dims),
            TensorData::Uint8(b) => to_numpy(py, &b[..], dims),
            TensorData::Int8(b) => to_numpy(py, &b[..], dims),
            TensorData::Uint16(b) => to_numpy(py, &b[..], dims),
            TensorData::Int16(b) => to_numpy(py, &b[..], dims),
            TensorData::Int32(b) => to_numpy(py, &b[..], dims),
            TensorData::BigInt64(b) => to_numpy(py, &b[..], dims),
            TensorData::Float64(b) => to_numpy(py, &b[..], dims),
            TensorData::Uint32(b) => to_numpy(py, &b[..], dims),
            TensorData::BigUint64(b) => to_numpy(py, &b[..], dims),
            TensorData::String(b) => Ok(PyList::new_bound(py, b.iter()).into_any()),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Tensor(type={}, dims={:?}, size={})",
            self.inner.dtype(),
            self.inner.dims(),
            self.inner.size()
        )
    }
}

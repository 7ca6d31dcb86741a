use ortensor::{ErrorKind, Tensor, TensorError, TensorType};

fn matrix() -> Tensor {
    Tensor::from_typed_data_with_dims(
        TensorType::Float32,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        &[2, 3],
    )
    .expect("2x3 tensor")
}

#[test]
fn reshape_shares_the_buffer() {
    let tensor = matrix();
    let reshaped = tensor.reshape(&[3, 2]).expect("3x2 view");
    assert!(reshaped.data().ptr_eq(tensor.data()));
    assert_eq!(reshaped.dims(), &[3, 2]);
    assert_eq!(reshaped.size(), 6);
    assert_eq!(reshaped.dtype(), TensorType::Float32);
}

#[test]
fn reshape_leaves_original_untouched() {
    let tensor = matrix();
    let _flat = tensor.reshape(&[6]).expect("flat view");
    assert_eq!(tensor.dims(), &[2, 3]);
}

#[test]
fn reshape_to_own_dims_round_trips() {
    let tensor = matrix();
    let same = tensor.reshape(tensor.dims()).expect("identity reshape");
    assert_eq!(same.dtype(), tensor.dtype());
    assert_eq!(same.dims(), tensor.dims());
    assert_eq!(same.size(), tensor.size());
    assert!(same.data().ptr_eq(tensor.data()));
}

#[test]
fn reshape_validates_like_construction() {
    let tensor = matrix();
    let err = tensor.reshape(&[4, 2]).expect_err("8 != 6");
    assert_eq!(err, TensorError::SizeMismatch { size: 8, len: 6 });

    let err = tensor.reshape(&[-6]).expect_err("negative");
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn reshape_string_tensor_keeps_strings() {
    let tensor = Tensor::from_untyped_data(vec!["a", "b", "c", "d"]).expect("string tensor");
    let square = tensor.reshape(&[2, 2]).expect("2x2 view");
    assert_eq!(square.dtype(), TensorType::String);
    assert!(square.data().ptr_eq(tensor.data()));
}

#[test]
fn reshape_to_scalar_requires_one_element() {
    let single = Tensor::from_typed_data(TensorType::Int64, vec![9.0]).expect("one element");
    let scalar = single.reshape::<usize>(&[]).expect("scalar view");
    assert!(scalar.is_scalar());

    let err = matrix().reshape::<usize>(&[]).expect_err("6 elements are not a scalar");
    assert_eq!(err, TensorError::SizeMismatch { size: 1, len: 6 });
}

#[path = "../src/inspect.rs"]
mod inspect;

use inspect::{parse_dims_arg, preview, type_table, TensorDescription, TensorSummary};
use ortensor::TensorType;

#[test]
fn typed_description_builds_tensor() {
    let description = TensorDescription::parse(
        r#"{"type": "int32", "data": [1, 2, 3, 4, 5, 6], "dims": [2, 3]}"#,
    )
    .expect("valid json");
    let tensor = description.build().expect("valid tensor");
    assert_eq!(tensor.dtype(), TensorType::Int32);
    assert_eq!(tensor.dims(), &[2, 3]);
}

#[test]
fn untyped_description_infers_type() {
    let description =
        TensorDescription::parse(r#"{"data": ["a", "b"]}"#).expect("valid json");
    let tensor = description.build().expect("valid tensor");
    assert_eq!(tensor.dtype(), TensorType::String);
    assert_eq!(tensor.dims(), &[2]);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = TensorDescription::parse(r#"{"data": [true], "shape": [1]}"#)
        .expect_err("shape is not a recognised field");
    assert!(err.to_string().contains("failed to parse tensor description"));
}

#[test]
fn invalid_tensor_keeps_root_cause() {
    let description =
        TensorDescription::parse(r#"{"type": "float32", "data": [1, 2, 3], "dims": [2, 2]}"#)
            .expect("valid json");
    let err = description.build().expect_err("size mismatch");
    assert_eq!(err.to_string(), "invalid tensor description");
    let root = err.root_cause().to_string();
    assert_eq!(root, "tensor's size(4) does not match data length(3)");
}

#[test]
fn parse_dims_arg_handles_scalars_and_negatives() {
    assert_eq!(parse_dims_arg("3, 2").expect("dims"), vec![3, 2]);
    assert_eq!(parse_dims_arg("").expect("scalar"), Vec::<i64>::new());
    assert_eq!(parse_dims_arg("-1,4").expect("negative"), vec![-1, 4]);
    let err = parse_dims_arg("2,x").expect_err("not a number");
    assert!(err.to_string().contains("dims[1]"));
}

#[test]
fn summary_truncates_preview() {
    let description =
        TensorDescription::parse(r#"{"type": "uint8", "data": [1, 2, 3, 4, 5]}"#)
            .expect("valid json");
    let tensor = description.build().expect("valid tensor");
    let summary = TensorSummary::new(&tensor, 2);
    assert_eq!(summary.preview, vec!["1", "2"]);
    assert_eq!(summary.byte_len, Some(5));
    let text = summary.to_string();
    assert!(text.contains("data:  [1, 2, ...]"));
    assert!(text.contains("type:  uint8"));
}

#[test]
fn summary_serializes_type_tag() {
    let description = TensorDescription::parse(r#"{"data": [false, true]}"#).expect("valid json");
    let tensor = description.build().expect("valid tensor");
    let json = serde_json::to_value(TensorSummary::new(&tensor, 8)).expect("serialize");
    assert_eq!(json["type"], "bool");
    assert_eq!(json["dims"], serde_json::json!([2]));
    assert_eq!(json["preview"], serde_json::json!(["0", "1"]));
}

#[test]
fn string_preview_is_quoted() {
    let description = TensorDescription::parse(r#"{"data": ["hi"]}"#).expect("valid json");
    let tensor = description.build().expect("valid tensor");
    assert_eq!(preview(tensor.data(), 4), vec!["\"hi\""]);
}

#[test]
fn type_table_lists_every_tag() {
    let rows = type_table();
    assert_eq!(rows.len(), TensorType::ALL.len());
    let bool_row = rows
        .iter()
        .find(|row| row.dtype == TensorType::Bool)
        .expect("bool row");
    assert_eq!(bool_row.buffer.as_deref(), Some("u8 buffer"));
    let string_row = rows
        .iter()
        .find(|row| row.dtype == TensorType::String)
        .expect("string row");
    assert_eq!(string_row.buffer, None);
    assert_eq!(string_row.element_size, None);
}

#[test]
fn summary_display_omits_bytes_for_strings() {
    let description =
        TensorDescription::parse(r#"{"data": ["a", "b"], "dims": [2, 1]}"#).expect("valid json");
    let tensor = description.build().expect("valid tensor");
    let text = TensorSummary::new(&tensor, 8).to_string();
    assert_eq!(
        text,
        "type:  string\ndims:  [2, 1]\nsize:  2\ndata:  [\"a\", \"b\"]\n"
    );
}

#[test]
fn int64_description_keeps_large_values() {
    let description =
        TensorDescription::parse(r#"{"type": "int64", "data": [9007199254740993]}"#)
            .expect("valid json");
    let tensor = description.build().expect("valid tensor");
    let summary = TensorSummary::new(&tensor, 1);
    assert_eq!(summary.preview, vec!["9007199254740993"]);
}

use ortensor::{BufferKind, ErrorKind, TensorType};

#[test]
fn buffer_tables_are_inverse() {
    for dtype in TensorType::ALL {
        let Some(kind) = BufferKind::for_type(dtype) else {
            assert_eq!(dtype, TensorType::String);
            continue;
        };
        assert_eq!(BufferKind::for_type(kind.tensor_type()), Some(kind));
        if dtype == TensorType::Bool {
            assert_eq!(kind.tensor_type(), TensorType::Uint8);
        } else {
            assert_eq!(kind.tensor_type(), dtype);
        }
    }
    for kind in BufferKind::ALL {
        assert_eq!(BufferKind::for_type(kind.tensor_type()), Some(kind));
    }
}

#[test]
fn tags_round_trip_through_display() {
    for dtype in TensorType::ALL {
        let parsed: TensorType = dtype.to_string().parse().expect("known tag");
        assert_eq!(parsed, dtype);
    }
}

#[test]
fn unknown_tag_is_a_type_error() {
    let err = "float16".parse::<TensorType>().expect_err("unsupported tag");
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(err.to_string(), "unknown tensor type: float16");
    assert!("Float32".parse::<TensorType>().is_err());
}

#[test]
fn element_sizes_match_buffer_widths() {
    assert_eq!(TensorType::Bool.element_size(), Some(1));
    assert_eq!(TensorType::Int16.element_size(), Some(2));
    assert_eq!(TensorType::Float32.element_size(), Some(4));
    assert_eq!(TensorType::Uint64.element_size(), Some(8));
    assert_eq!(TensorType::String.element_size(), None);
    assert!(!TensorType::String.is_numeric());
    assert!(TensorType::Bool.is_numeric());
}

#[test]
fn tags_serialize_as_lowercase_names() {
    let json = serde_json::to_string(&TensorType::Uint32).expect("serialize");
    assert_eq!(json, "\"uint32\"");
    let parsed: TensorType = serde_json::from_str("\"bool\"").expect("deserialize");
    assert_eq!(parsed, TensorType::Bool);
}

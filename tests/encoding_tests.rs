//! Formatting tests for the two wire notations: escaping dialects, numeric
//! spellings, byte encodings, and the reserved JSON wrapper fields.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use detyped::{model, to_json_string, to_native_string, Value, ValueKind};
use num_bigint::BigInt;

#[test]
fn test_native_string_escaping_is_minimal() {
    let value = Value::String("say \"hi\"\\now\n\ttab".to_string());
    // Only backslash and quote are escaped; control characters pass through.
    assert_eq!(
        to_native_string(&value).unwrap(),
        "\"say \\\"hi\\\"\\\\now\n\ttab\""
    );
}

#[test]
fn test_json_string_escaping_dialect() {
    let value = Value::String("say \"hi\"\\now\n\ttab\u{0007}".to_string());
    let text = to_json_string(&value).unwrap();
    assert_eq!(text, r#""say \"hi\"\\now\n\ttab\u0007""#);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.as_str(), Some("say \"hi\"\\now\n\ttab\u{0007}"));
}

#[test]
fn test_json_leaves_high_codepoints_unescaped() {
    let value = Value::String("héllo \u{1F980}".to_string());
    assert_eq!(to_json_string(&value).unwrap(), "\"héllo \u{1F980}\"");
}

#[test]
fn test_integer_suffix_rules() {
    assert_eq!(to_native_string(&Value::Int(i32::MAX)).unwrap(), "2147483647L");
    assert_eq!(to_native_string(&Value::Int(i32::MIN)).unwrap(), "-2147483648L");
    assert_eq!(
        to_native_string(&Value::Long(i64::MIN)).unwrap(),
        "-9223372036854775808L"
    );
    assert_eq!(to_json_string(&Value::Int(i32::MAX)).unwrap(), "2147483647");
    assert_eq!(
        to_json_string(&Value::Long(i64::MIN)).unwrap(),
        "-9223372036854775808"
    );
}

#[test]
fn test_double_formatting() {
    assert_eq!(to_native_string(&Value::Double(1.5)).unwrap(), "1.5");
    assert_eq!(to_json_string(&Value::Double(1.5)).unwrap(), "1.5");
    assert_eq!(to_json_string(&Value::Double(-0.25)).unwrap(), "-0.25");
    // Integral doubles keep a trailing .0 so they stay floating-point on
    // the way back in.
    assert_eq!(to_json_string(&Value::Double(3.0)).unwrap(), "3.0");
    assert_eq!(to_native_string(&Value::Double(3.0)).unwrap(), "3.0");
}

#[test]
fn test_big_integer_rendering() {
    let big = BigInt::from_str("123456789012345678901234567890").unwrap();
    let value = Value::BigInteger(big);
    assert_eq!(
        to_native_string(&value).unwrap(),
        "big integer 123456789012345678901234567890"
    );
    assert_eq!(
        to_json_string(&value).unwrap(),
        "123456789012345678901234567890"
    );
}

#[test]
fn test_big_decimal_rendering() {
    let value = Value::BigDecimal(BigDecimal::from_str("3.14159265358979323846").unwrap());
    assert_eq!(
        to_native_string(&value).unwrap(),
        "big decimal 3.14159265358979323846"
    );
    assert_eq!(to_json_string(&value).unwrap(), "3.14159265358979323846");
}

#[test]
fn test_bytes_hex_is_zero_padded_lowercase() {
    let value = Value::Bytes(vec![0x00, 0x0a, 0xde, 0xff]);
    assert_eq!(
        to_native_string(&value).unwrap(),
        "bytes{0x00,0x0a,0xde,0xff}"
    );
}

#[test]
fn test_bytes_base64_vectors() {
    let cases: &[(&[u8], &str)] = &[
        (b"", ""),
        (&[0x00], "AA=="),
        (&[0x01, 0x02], "AQI="),
        (b"hello world", "aGVsbG8gd29ybGQ="),
    ];
    for (input, encoded) in cases {
        let text = to_json_string(&Value::Bytes(input.to_vec())).unwrap();
        assert_eq!(text, format!(r#"{{"BYTES_VALUE":"{encoded}"}}"#));
    }
}

#[test]
fn test_type_tag_wire_names() {
    let kinds = [
        (ValueKind::Undefined, "UNDEFINED"),
        (ValueKind::Boolean, "BOOLEAN"),
        (ValueKind::Int, "INT"),
        (ValueKind::Long, "LONG"),
        (ValueKind::Double, "DOUBLE"),
        (ValueKind::BigInteger, "BIG_INTEGER"),
        (ValueKind::BigDecimal, "BIG_DECIMAL"),
        (ValueKind::Bytes, "BYTES"),
        (ValueKind::Expression, "EXPRESSION"),
        (ValueKind::String, "STRING"),
        (ValueKind::Type, "TYPE"),
        (ValueKind::List, "LIST"),
        (ValueKind::Object, "OBJECT"),
        (ValueKind::Property, "PROPERTY"),
    ];
    for (kind, name) in kinds {
        assert_eq!(to_native_string(&Value::Type(kind)).unwrap(), name);
        assert_eq!(
            to_json_string(&Value::Type(kind)).unwrap(),
            format!(r#"{{"TYPE_MODEL_VALUE":"{name}"}}"#)
        );
    }
}

#[test]
fn test_undefined_mapping() {
    assert_eq!(to_native_string(&Value::Undefined).unwrap(), "undefined");
    assert_eq!(to_json_string(&Value::Undefined).unwrap(), "null");
}

#[test]
fn test_expression_with_default() {
    let value = Value::Expression("${env.bind.address:127.0.0.1}".to_string());
    assert_eq!(
        to_native_string(&value).unwrap(),
        r#"expression "${env.bind.address:127.0.0.1}""#
    );
}

#[test]
fn test_kitchen_sink_document_parses_as_json() {
    let value = model!({
        "undefined": undefined,
        "flag": true,
        "port": 9990,
        "uptime": 123456789012345i64,
        "ratio": 0.75,
        "motd": "hello\nworld",
        "blob": (Value::Bytes(vec![1, 2, 3])),
        "expr": (Value::Expression("${x:y}".to_string())),
        "kind": (Value::Type(ValueKind::Object)),
        "nested": { "list": [1, "two", false] }
    });
    let text = to_json_string(&value).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["port"], serde_json::json!(9990));
    assert_eq!(parsed["undefined"], serde_json::Value::Null);
    assert_eq!(parsed["blob"]["BYTES_VALUE"], serde_json::json!("AQID"));
    assert_eq!(parsed["expr"]["EXPRESSION_VALUE"], serde_json::json!("${x:y}"));
    assert_eq!(parsed["kind"]["TYPE_MODEL_VALUE"], serde_json::json!("OBJECT"));
    assert_eq!(parsed["nested"]["list"][1], serde_json::json!("two"));
}

#[test]
fn test_object_field_order_is_insertion_order() {
    let value = model!({ "z": 1, "a": 2, "m": 3 });
    assert_eq!(
        to_native_string(&value).unwrap(),
        r#"{"z"=>1L,"a"=>2L,"m"=>3L}"#
    );
}

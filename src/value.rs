//! The detyped model tree.
//!
//! This module provides [`Value`], a dynamically-typed tree representation
//! analogous to JSON but with the extended scalar set the wire notations
//! carry: byte blobs, unresolved expressions, type tags, arbitrary-precision
//! numbers, and an explicit undefined marker distinct from a missing field.
//!
//! ## Core Types
//!
//! - [`Value`]: any model value
//! - [`ValueKind`]: the tag naming a value's kind; also a first-class scalar
//!   (`Value::Type`) so documents can talk about kinds
//! - [`ValueMap`](crate::ValueMap): the insertion-ordered object map
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use detyped::{model, Value};
//!
//! let null = Value::Undefined;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = model!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.kind() == detyped::ValueKind::Object);
//! # let _ = (null, boolean, number, text);
//! ```
//!
//! ### Encoding
//!
//! [`Value::encode`] walks the tree depth-first pre-order and drives a
//! [`ModelWriter`](crate::ModelWriter) push call per node; the convenience
//! functions [`to_native_string`](crate::to_native_string) and
//! [`to_json_string`](crate::to_json_string) wrap it for in-memory output.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::json::{BYTES_VALUE, EXPRESSION_VALUE, TYPE_MODEL_VALUE};
use crate::{ModelWriter, Result, TokenSink, ValueMap};

/// Names one of the model's scalar or structural kinds.
///
/// The `as_str` spellings are the wire names used by the native notation's
/// bare type tags and by the JSON notation's `TYPE_MODEL_VALUE` wrapper.
///
/// # Examples
///
/// ```rust
/// use detyped::ValueKind;
///
/// assert_eq!(ValueKind::BigInteger.as_str(), "BIG_INTEGER");
/// assert_eq!(ValueKind::Int.to_string(), "INT");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Boolean,
    Int,
    Long,
    Double,
    BigInteger,
    BigDecimal,
    Bytes,
    Expression,
    String,
    Type,
    List,
    Object,
    Property,
}

impl ValueKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Undefined => "UNDEFINED",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Int => "INT",
            ValueKind::Long => "LONG",
            ValueKind::Double => "DOUBLE",
            ValueKind::BigInteger => "BIG_INTEGER",
            ValueKind::BigDecimal => "BIG_DECIMAL",
            ValueKind::Bytes => "BYTES",
            ValueKind::Expression => "EXPRESSION",
            ValueKind::String => "STRING",
            ValueKind::Type => "TYPE",
            ValueKind::List => "LIST",
            ValueKind::Object => "OBJECT",
            ValueKind::Property => "PROPERTY",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed model value.
///
/// # Examples
///
/// ```rust
/// use detyped::{Value, ValueKind};
///
/// let num = Value::Int(42);
/// let text = Value::String("hello".to_string());
///
/// assert_eq!(num.kind(), ValueKind::Int);
/// assert!(text.is_defined());
/// assert_eq!(text.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// The explicit undefined marker, distinct from a missing field.
    #[default]
    Undefined,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    Bytes(Vec<u8>),
    /// An unresolved `${key[:default]}` placeholder, opaque to the encoder.
    Expression(String),
    String(String),
    /// A type tag naming one of the model kinds.
    Type(ValueKind),
    List(Vec<Value>),
    Object(ValueMap),
    /// A single ordered key/value pair written as its own node.
    Property(String, Box<Value>),
}

impl Value {
    /// Returns the kind tag for this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Double(_) => ValueKind::Double,
            Value::BigInteger(_) => ValueKind::BigInteger,
            Value::BigDecimal(_) => ValueKind::BigDecimal,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Expression(_) => ValueKind::Expression,
            Value::String(_) => ValueKind::String,
            Value::Type(_) => ValueKind::Type,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
            Value::Property(..) => ValueKind::Property,
        }
    }

    /// Returns `true` unless this is the undefined marker.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Undefined)
    }

    /// Returns the string slice if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integral value widened to `i64`, for both integer kinds.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` for the plain numeric kinds.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the byte slice if this is a bytes value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the list slice if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object map if this is an object value.
    #[must_use]
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Encodes this tree through `writer`, depth-first pre-order, one push
    /// call per node.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O failures and argument rejections (non-finite
    /// doubles in the JSON notation). Grammar errors cannot arise from a
    /// tree walk; the walk only produces well-formed call sequences.
    pub fn encode<S: TokenSink>(&self, writer: &mut ModelWriter<S>) -> Result<()> {
        match self {
            Value::Undefined => writer.write_undefined()?,
            Value::Boolean(v) => writer.write_boolean(*v)?,
            Value::Int(v) => writer.write_int(*v)?,
            Value::Long(v) => writer.write_long(*v)?,
            Value::Double(v) => writer.write_double(*v)?,
            Value::BigInteger(v) => writer.write_big_integer(v)?,
            Value::BigDecimal(v) => writer.write_big_decimal(v)?,
            Value::Bytes(v) => writer.write_bytes(v)?,
            Value::Expression(v) => writer.write_expression(v)?,
            Value::String(v) => writer.write_string(v)?,
            Value::Type(v) => writer.write_type(*v)?,
            Value::List(items) => {
                writer.write_list_start()?;
                for item in items {
                    item.encode(writer)?;
                }
                writer.write_list_end()?
            }
            Value::Object(map) => {
                writer.write_object_start()?;
                for (key, value) in map.iter() {
                    writer.write_string(key)?;
                    value.encode(writer)?;
                }
                writer.write_object_end()?
            }
            Value::Property(key, value) => {
                writer.write_property_start()?;
                writer.write_string(key)?;
                value.encode(writer)?;
                writer.write_property_end()?
            }
        };
        Ok(())
    }
}

/// Displays the native notation of the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::to_native_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInteger(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::BigDecimal(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Object(v)
    }
}

impl From<ValueKind> for Value {
    fn from(v: ValueKind) -> Self {
        Value::Type(v)
    }
}

/// Serializes to the same shape as the JSON notation: wrapper objects for
/// the extended scalars, `null` for undefined. Big numbers serialize as
/// strings because serde has no arbitrary-precision number type.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use base64::{engine::general_purpose, Engine as _};

        match self {
            Value::Undefined => serializer.serialize_unit(),
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::BigInteger(v) => serializer.collect_str(v),
            Value::BigDecimal(v) => serializer.collect_str(v),
            Value::Bytes(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(BYTES_VALUE, &general_purpose::STANDARD.encode(v))?;
                map.end()
            }
            Value::Expression(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(EXPRESSION_VALUE, v)?;
                map.end()
            }
            Value::String(v) => serializer.serialize_str(v),
            Value::Type(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TYPE_MODEL_VALUE, v.as_str())?;
                map.end()
            }
            Value::List(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map.iter()),
            Value::Property(key, value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, value.as_ref())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{to_json_string, to_native_string};

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Undefined.kind(), ValueKind::Undefined);
        assert_eq!(Value::Bytes(vec![]).kind(), ValueKind::Bytes);
        assert_eq!(
            Value::Property("p".to_string(), Box::new(Value::Int(1))).kind(),
            ValueKind::Property
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Long(7).as_i64(), Some(7));
        assert_eq!(Value::Double(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(!Value::Undefined.is_defined());
    }

    #[test]
    fn test_encode_walks_depth_first() {
        let mut map = ValueMap::new();
        map.insert("items".to_string(), Value::List(vec![
            Value::Int(1),
            Value::Property("p".to_string(), Box::new(Value::Boolean(true))),
        ]));
        let value = Value::Object(map);
        assert_eq!(
            to_native_string(&value).unwrap(),
            r#"{"items"=>[1L,("p"=>true)]}"#
        );
        assert_eq!(
            to_json_string(&value).unwrap(),
            r#"{"items":[1,{"p":true}]}"#
        );
    }

    #[test]
    fn test_display_is_native_notation() {
        assert_eq!(Value::Int(5).to_string(), "5L");
    }

    #[test]
    fn test_serde_shape_matches_json_notation() {
        let value = Value::List(vec![
            Value::Expression("${a:b}".to_string()),
            Value::Bytes(vec![1, 2]),
            Value::Type(ValueKind::Int),
            Value::Undefined,
        ]);
        let through_serde: serde_json::Value =
            serde_json::to_value(&value).unwrap();
        let through_sink: serde_json::Value =
            serde_json::from_str(&to_json_string(&value).unwrap()).unwrap();
        assert_eq!(through_serde, through_sink);
    }
}

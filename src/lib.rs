//! # detyped
//!
//! A streaming push encoder for detyped model trees: dynamically-typed
//! values (objects, ordered lists, key/value properties, and an extended
//! scalar set including byte blobs, unresolved expressions, and explicit
//! type tags) rendered into two textual wire notations.
//!
//! ## Key Features
//!
//! - **Push API**: callers drive a [`ModelWriter`] with one call per node,
//!   depth-first; no intermediate representation is required
//! - **Validated grammar**: a stack automaton ([`GrammarAnalyzer`]) rejects
//!   ill-formed call sequences before any text is emitted, and poisons the
//!   writer fail-closed on the first violation
//! - **Two notations, one grammar**: the native model notation and a
//!   JSON-compatible notation share the validation core and differ only in
//!   their [`TokenSink`] implementation
//! - **Unbounded nesting**: the automaton's stack is an explicit `Vec`, so
//!   deep documents carry no call-stack risk
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Build a tree with the [`model!`] macro and render it:
//!
//! ```rust
//! use detyped::{model, to_json_string, to_native_string};
//!
//! let value = model!({
//!     "name": "test",
//!     "port": 9990
//! });
//!
//! assert_eq!(to_native_string(&value).unwrap(), r#"{"name"=>"test","port"=>9990L}"#);
//! assert_eq!(to_json_string(&value).unwrap(), r#"{"name":"test","port":9990}"#);
//! ```
//!
//! Or push tokens directly, streaming to any [`std::io::Write`]:
//!
//! ```rust
//! use detyped::json_writer;
//!
//! let mut out = Vec::new();
//! let mut writer = json_writer(&mut out);
//! writer
//!     .write_object_start()?
//!     .write_string("active")?
//!     .write_boolean(true)?
//!     .write_object_end()?;
//! writer.flush()?;
//! drop(writer);
//! assert_eq!(out, br#"{"active":true}"#);
//! # Ok::<(), detyped::Error>(())
//! ```
//!
//! ## The two notations
//!
//! The native notation spells objects `{"key"=>value}`, properties
//! `("key"=>value)`, integers with a trailing `L`, byte blobs as
//! `bytes{0x01,0x02}`, and expressions as `expression "${key:default}"`.
//! The JSON notation is strict JSON; scalars JSON cannot carry are wrapped
//! in single-field discriminator objects (`EXPRESSION_VALUE`, `BYTES_VALUE`,
//! `TYPE_MODEL_VALUE`) whose field names are a wire-compatibility contract.
//! See the [`native`] and [`json`] module docs for the full rules.
//!
//! ## Lifecycle and concurrency
//!
//! One writer encodes exactly one document: create it, drive it to
//! completion on one thread, then drop it (or [`ModelWriter::flush`] first
//! when streaming). A writer that has reported a grammar error is poisoned
//! and must be discarded; partially emitted output is not a valid document.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API
//! - Proper error propagation with `Result` types

pub mod error;
pub mod grammar;
pub mod json;
pub mod macros;
pub mod map;
pub mod native;
pub mod sink;
pub mod value;
pub mod writer;

pub use error::{Error, Result};
pub use grammar::GrammarAnalyzer;
pub use json::JsonSink;
pub use map::ValueMap;
pub use native::NativeSink;
pub use sink::TokenSink;
pub use value::{Value, ValueKind};
pub use writer::ModelWriter;

use std::io;

/// Creates a [`ModelWriter`] rendering the native notation into `out`.
///
/// # Examples
///
/// ```rust
/// use detyped::native_writer;
///
/// let mut out = Vec::new();
/// let mut writer = native_writer(&mut out);
/// writer.write_int(42).unwrap();
/// drop(writer);
/// assert_eq!(out, b"42L");
/// ```
pub fn native_writer<W: io::Write>(out: W) -> ModelWriter<NativeSink<W>> {
    ModelWriter::new(NativeSink::new(out))
}

/// Creates a [`ModelWriter`] rendering the JSON notation into `out`.
///
/// # Examples
///
/// ```rust
/// use detyped::json_writer;
///
/// let mut out = Vec::new();
/// let mut writer = json_writer(&mut out);
/// writer.write_int(42).unwrap();
/// drop(writer);
/// assert_eq!(out, b"42");
/// ```
pub fn json_writer<W: io::Write>(out: W) -> ModelWriter<JsonSink<W>> {
    ModelWriter::new(JsonSink::new(out))
}

/// Encodes a value tree to a native notation string.
///
/// # Examples
///
/// ```rust
/// use detyped::{to_native_string, Value};
///
/// let text = to_native_string(&Value::Bytes(vec![0x01, 0x02])).unwrap();
/// assert_eq!(text, "bytes{0x01,0x02}");
/// ```
///
/// # Errors
///
/// Returns an error if the tree contains a value the notation rejects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_native_string(value: &Value) -> Result<String> {
    let mut writer = native_writer(Vec::new());
    value.encode(&mut writer)?;
    let buf = writer.into_sink().into_inner();
    String::from_utf8(buf).map_err(Error::custom)
}

/// Encodes a value tree to a JSON notation string.
///
/// # Examples
///
/// ```rust
/// use detyped::{to_json_string, Value};
///
/// let text = to_json_string(&Value::Expression("${foo:bar}".to_string())).unwrap();
/// assert_eq!(text, r#"{"EXPRESSION_VALUE":"${foo:bar}"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the tree contains a value the notation rejects
/// (non-finite doubles).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json_string(value: &Value) -> Result<String> {
    let mut writer = json_writer(Vec::new());
    value.encode(&mut writer)?;
    let buf = writer.into_sink().into_inner();
    String::from_utf8(buf).map_err(Error::custom)
}

/// Encodes a value tree in the native notation to an I/O stream.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to `out` fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_native_writer<W: io::Write>(out: W, value: &Value) -> Result<()> {
    let mut writer = native_writer(out);
    value.encode(&mut writer)?;
    writer.flush()
}

/// Encodes a value tree in the JSON notation to an I/O stream.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to `out` fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json_writer<W: io::Write>(out: W, value: &Value) -> Result<()> {
    let mut writer = json_writer(out);
    value.encode(&mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object() {
        let value = model!({});
        assert_eq!(to_native_string(&value).unwrap(), "{}");
        assert_eq!(to_json_string(&value).unwrap(), "{}");
    }

    #[test]
    fn test_simple_object() {
        let value = model!({ "name": "test", "port": 9990 });
        assert_eq!(
            to_native_string(&value).unwrap(),
            r#"{"name"=>"test","port"=>9990L}"#
        );
        assert_eq!(
            to_json_string(&value).unwrap(),
            r#"{"name":"test","port":9990}"#
        );
    }

    #[test]
    fn test_expression_at_root() {
        let value = Value::Expression("${foo:bar}".to_string());
        assert_eq!(
            to_native_string(&value).unwrap(),
            r#"expression "${foo:bar}""#
        );
        assert_eq!(
            to_json_string(&value).unwrap(),
            r#"{"EXPRESSION_VALUE":"${foo:bar}"}"#
        );
    }

    #[test]
    fn test_bytes_at_root() {
        let value = Value::Bytes(vec![0x01, 0x02]);
        assert_eq!(to_native_string(&value).unwrap(), "bytes{0x01,0x02}");
        assert_eq!(to_json_string(&value).unwrap(), r#"{"BYTES_VALUE":"AQI="}"#);
    }

    #[test]
    fn test_to_writer_streams() {
        let mut out = Vec::new();
        to_json_writer(&mut out, &model!([1, 2])).unwrap();
        assert_eq!(out, b"[1,2]");
    }
}

//! The JSON model notation.
//!
//! Renders a detyped model document as strict JSON. Objects and properties
//! both map to JSON objects (a property becomes a single-entry object).
//! Scalar kinds plain JSON cannot carry are wrapped in a one-field
//! discriminator object whose field name is a wire-compatibility contract:
//!
//! | Kind | Rendering |
//! |------|-----------|
//! | expression | `{"EXPRESSION_VALUE":"${foo:bar}"}` |
//! | bytes | `{"BYTES_VALUE":"AQI="}` (standard base64, no line breaks) |
//! | type | `{"TYPE_MODEL_VALUE":"INT"}` |
//! | undefined | `null` |
//!
//! Integral numbers render as plain JSON numbers with no suffix; big
//! integers and big decimals render as plain number tokens; doubles use
//! Rust's round-trippable decimal form. Non-finite doubles have no JSON
//! spelling and are rejected before the grammar state advances.
//!
//! ## Examples
//!
//! ```rust
//! use detyped::{model, to_json_string};
//!
//! let value = model!({ "name": "test", "port": 9990 });
//! assert_eq!(to_json_string(&value).unwrap(), r#"{"name":"test","port":9990}"#);
//! ```

use std::io::{self, Write};

use base64::{engine::general_purpose, Engine as _};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{Error, Result, TokenSink, ValueKind};

/// Reserved field name wrapping expression scalars. Wire contract; never
/// change the spelling or case.
pub const EXPRESSION_VALUE: &str = "EXPRESSION_VALUE";
/// Reserved field name wrapping byte sequences. Wire contract.
pub const BYTES_VALUE: &str = "BYTES_VALUE";
/// Reserved field name wrapping type tags. Wire contract.
pub const TYPE_MODEL_VALUE: &str = "TYPE_MODEL_VALUE";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A [`TokenSink`] rendering the JSON notation into any [`io::Write`].
///
/// Create one directly for streaming output, or go through
/// [`to_json_string`](crate::to_json_string) /
/// [`json_writer`](crate::json_writer) for the common cases.
#[derive(Debug)]
pub struct JsonSink<W: io::Write> {
    out: W,
}

impl<W: io::Write> JsonSink<W> {
    /// Creates a sink writing the JSON notation to `out`.
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }

    /// Consumes the sink, returning the backing writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes `s` double-quoted with the JSON escape dialect: `\"`, `\\`,
    /// the short control escapes, and `\u00xx` for the remaining control
    /// characters below U+0020. Runs of ordinary bytes go out as single
    /// slices.
    fn write_quoted(&mut self, s: &str) -> Result<()> {
        self.out.write_all(b"\"")?;
        let bytes = s.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escape: Option<&[u8]> = match b {
                b'"' => Some(b"\\\""),
                b'\\' => Some(b"\\\\"),
                0x08 => Some(b"\\b"),
                0x0c => Some(b"\\f"),
                b'\n' => Some(b"\\n"),
                b'\r' => Some(b"\\r"),
                b'\t' => Some(b"\\t"),
                _ => None,
            };
            if let Some(esc) = escape {
                self.out.write_all(&bytes[start..i])?;
                self.out.write_all(esc)?;
                start = i + 1;
            } else if b < 0x20 {
                self.out.write_all(&bytes[start..i])?;
                let unit = [
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX_DIGITS[(b >> 4) as usize],
                    HEX_DIGITS[(b & 0x0f) as usize],
                ];
                self.out.write_all(&unit)?;
                start = i + 1;
            }
        }
        self.out.write_all(&bytes[start..])?;
        self.out.write_all(b"\"")?;
        Ok(())
    }

    /// Writes a `{"<name>":"<payload>"}` discriminator object.
    fn write_wrapped(&mut self, name: &str, payload: &str) -> Result<()> {
        self.out.write_all(b"{\"")?;
        self.out.write_all(name.as_bytes())?;
        self.out.write_all(b"\":")?;
        self.write_quoted(payload)?;
        self.out.write_all(b"}")?;
        Ok(())
    }
}

impl<W: io::Write> TokenSink for JsonSink<W> {
    fn emit_object_start(&mut self) -> Result<()> {
        self.out.write_all(b"{")?;
        Ok(())
    }

    fn emit_object_end(&mut self) -> Result<()> {
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn emit_list_start(&mut self) -> Result<()> {
        self.out.write_all(b"[")?;
        Ok(())
    }

    fn emit_list_end(&mut self) -> Result<()> {
        self.out.write_all(b"]")?;
        Ok(())
    }

    fn emit_property_start(&mut self) -> Result<()> {
        // A property is a single-entry JSON object.
        self.out.write_all(b"{")?;
        Ok(())
    }

    fn emit_property_end(&mut self) -> Result<()> {
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn emit_comma(&mut self) -> Result<()> {
        self.out.write_all(b",")?;
        Ok(())
    }

    fn emit_separator(&mut self) -> Result<()> {
        self.out.write_all(b":")?;
        Ok(())
    }

    fn emit_string(&mut self, value: &str) -> Result<()> {
        self.write_quoted(value)
    }

    fn emit_boolean(&mut self, value: bool) -> Result<()> {
        self.out
            .write_all(if value { b"true" } else { b"false" })?;
        Ok(())
    }

    fn emit_int(&mut self, value: i32) -> Result<()> {
        write!(self.out, "{value}")?;
        Ok(())
    }

    fn emit_long(&mut self, value: i64) -> Result<()> {
        write!(self.out, "{value}")?;
        Ok(())
    }

    fn emit_double(&mut self, value: f64) -> Result<()> {
        // Non-finite values never get here; check_double ran first.
        self.out
            .write_all(crate::native::format_double(value).as_bytes())?;
        Ok(())
    }

    fn emit_big_integer(&mut self, value: &BigInt) -> Result<()> {
        write!(self.out, "{value}")?;
        Ok(())
    }

    fn emit_big_decimal(&mut self, value: &BigDecimal) -> Result<()> {
        write!(self.out, "{value}")?;
        Ok(())
    }

    fn emit_bytes(&mut self, value: &[u8]) -> Result<()> {
        let encoded = general_purpose::STANDARD.encode(value);
        self.write_wrapped(BYTES_VALUE, &encoded)
    }

    fn emit_expression(&mut self, value: &str) -> Result<()> {
        self.write_wrapped(EXPRESSION_VALUE, value)
    }

    fn emit_type(&mut self, value: ValueKind) -> Result<()> {
        self.write_wrapped(TYPE_MODEL_VALUE, value.as_str())
    }

    fn emit_undefined(&mut self) -> Result<()> {
        self.out.write_all(b"null")?;
        Ok(())
    }

    fn check_double(&self, value: f64) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Error::NonFiniteNumber(value))
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

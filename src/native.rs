//! The native model notation.
//!
//! Renders the detyped model's own textual form: `{ }` objects with `=>`
//! between keys and values, `[ ]` lists, `( )` property groups, bare
//! `true`/`false`/`undefined` keywords, and dedicated spellings for the
//! extended scalar kinds:
//!
//! | Kind | Rendering |
//! |------|-----------|
//! | int / long | `9990L` (trailing `L` on both widths) |
//! | big integer | `big integer 123` |
//! | big decimal | `big decimal 1.5` |
//! | bytes | `bytes{0x01,0x02}` |
//! | expression | `expression "${foo:bar}"` |
//! | type | bare upper-case name, e.g. `INT` |
//!
//! Strings are double-quoted with a deliberately minimal escape set: only
//! backslash and double quote. Unescaped runs are copied as whole slices for
//! throughput.
//!
//! ## Examples
//!
//! ```rust
//! use detyped::{model, to_native_string};
//!
//! let value = model!({ "name": "test", "port": 9990 });
//! assert_eq!(to_native_string(&value).unwrap(), r#"{"name"=>"test","port"=>9990L}"#);
//! ```

use std::io::{self, Write};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{Result, TokenSink, ValueKind};

/// A [`TokenSink`] rendering the native model notation into any
/// [`io::Write`].
///
/// Create one directly for streaming output, or go through
/// [`to_native_string`](crate::to_native_string) /
/// [`native_writer`](crate::native_writer) for the common cases.
#[derive(Debug)]
pub struct NativeSink<W: io::Write> {
    out: W,
}

impl<W: io::Write> NativeSink<W> {
    /// Creates a sink writing the native notation to `out`.
    pub fn new(out: W) -> Self {
        NativeSink { out }
    }

    /// Consumes the sink, returning the backing writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes `s` double-quoted, escaping only `\` and `"`. Runs of
    /// ordinary characters go out as single slices.
    fn write_quoted(&mut self, s: &str) -> Result<()> {
        self.out.write_all(b"\"")?;
        let bytes = s.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'"' || b == b'\\' {
                self.out.write_all(&bytes[start..i])?;
                self.out.write_all(&[b'\\', b])?;
                start = i + 1;
            }
        }
        self.out.write_all(&bytes[start..])?;
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

/// Formats a double for both notations. Finite values use Rust's shortest
/// round-trippable decimal form, except that integral doubles keep a
/// trailing `.0` so the token stays distinguishable from an integer.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl<W: io::Write> TokenSink for NativeSink<W> {
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
        self.out.write_all(b"(")?;
        Ok(())
    }

    fn emit_property_end(&mut self) -> Result<()> {
        self.out.write_all(b")")?;
        Ok(())
    }

    fn emit_comma(&mut self) -> Result<()> {
        self.out.write_all(b",")?;
        Ok(())
    }

    fn emit_separator(&mut self) -> Result<()> {
        self.out.write_all(b"=>")?;
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
        // Both integer widths carry the L suffix so the notation has a
        // single integral literal syntax.
        write!(self.out, "{value}L")?;
        Ok(())
    }

    fn emit_long(&mut self, value: i64) -> Result<()> {
        write!(self.out, "{value}L")?;
        Ok(())
    }

    fn emit_double(&mut self, value: f64) -> Result<()> {
        self.out.write_all(format_double(value).as_bytes())?;
        Ok(())
    }

    fn emit_big_integer(&mut self, value: &BigInt) -> Result<()> {
        write!(self.out, "big integer {value}")?;
        Ok(())
    }

    fn emit_big_decimal(&mut self, value: &BigDecimal) -> Result<()> {
        write!(self.out, "big decimal {value}")?;
        Ok(())
    }

    fn emit_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.out.write_all(b"bytes{")?;
        for (i, b) in value.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b",")?;
            }
            write!(self.out, "0x{b:02x}")?;
        }
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn emit_expression(&mut self, value: &str) -> Result<()> {
        self.out.write_all(b"expression ")?;
        self.write_quoted(value)
    }

    fn emit_type(&mut self, value: ValueKind) -> Result<()> {
        self.out.write_all(value.as_str().as_bytes())?;
        Ok(())
    }

    fn emit_undefined(&mut self) -> Result<()> {
        self.out.write_all(b"undefined")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

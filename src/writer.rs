//! The push-based model writer.
//!
//! [`ModelWriter`] couples exactly one [`GrammarAnalyzer`] with exactly one
//! [`TokenSink`] and exposes the public write API. One writer encodes one
//! document, driven synchronously from start to finish on one thread, then
//! discarded.
//!
//! Every write call first runs all grammar transitions (including any comma
//! or key/value separator the analyzer demands) and only then emits text.
//! A rejected call therefore emits nothing, and the writer is permanently
//! poisoned: after the first error, every later call fails as well.
//!
//! ## Examples
//!
//! ```rust
//! use detyped::native_writer;
//!
//! let mut out = Vec::new();
//! let mut writer = native_writer(&mut out);
//! writer
//!     .write_object_start()?
//!     .write_string("name")?
//!     .write_string("test")?
//!     .write_string("port")?
//!     .write_int(9990)?
//!     .write_object_end()?;
//! drop(writer);
//! assert_eq!(out, br#"{"name"=>"test","port"=>9990L}"#);
//! # Ok::<(), detyped::Error>(())
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{GrammarAnalyzer, Result, TokenSink, ValueKind};

/// The public push API over one grammar analyzer and one token sink.
///
/// Methods return `Result<&mut Self>` so well-formed documents can be
/// written fluently with `?` between calls.
#[derive(Debug)]
pub struct ModelWriter<S> {
    analyzer: GrammarAnalyzer,
    sink: S,
}

impl<S: TokenSink> ModelWriter<S> {
    /// Creates a writer for one document over `sink`.
    pub fn new(sink: S) -> Self {
        ModelWriter {
            analyzer: GrammarAnalyzer::new(),
            sink,
        }
    }

    /// Returns `true` once the root value has closed or the writer is
    /// poisoned. A finished writer accepts no further writes.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.analyzer.is_finished()
    }

    /// Flushes the backing sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Consumes the writer, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Opens an object.
    pub fn write_object_start(&mut self) -> Result<&mut Self> {
        self.write_token(GrammarAnalyzer::put_object_start, TokenSink::emit_object_start)
    }

    /// Closes the innermost object.
    pub fn write_object_end(&mut self) -> Result<&mut Self> {
        self.analyzer.put_object_end()?;
        self.sink.emit_object_end()?;
        Ok(self)
    }

    /// Opens a list.
    pub fn write_list_start(&mut self) -> Result<&mut Self> {
        self.write_token(GrammarAnalyzer::put_list_start, TokenSink::emit_list_start)
    }

    /// Closes the innermost list.
    pub fn write_list_end(&mut self) -> Result<&mut Self> {
        self.analyzer.put_list_end()?;
        self.sink.emit_list_end()?;
        Ok(self)
    }

    /// Opens a property: a single key/value pair written as its own node.
    pub fn write_property_start(&mut self) -> Result<&mut Self> {
        self.write_token(
            GrammarAnalyzer::put_property_start,
            TokenSink::emit_property_start,
        )
    }

    /// Closes the innermost property.
    pub fn write_property_end(&mut self) -> Result<&mut Self> {
        self.analyzer.put_property_end()?;
        self.sink.emit_property_end()?;
        Ok(self)
    }

    /// Writes a string. Inside an object or a fresh property this is a key;
    /// in value position it is a string value.
    pub fn write_string(&mut self, value: &str) -> Result<&mut Self> {
        self.write_token(GrammarAnalyzer::put_string, |sink| sink.emit_string(value))
    }

    /// Writes a boolean value.
    pub fn write_boolean(&mut self, value: bool) -> Result<&mut Self> {
        self.write_scalar("a boolean", |sink| sink.emit_boolean(value))
    }

    /// Writes a 32-bit integer value.
    pub fn write_int(&mut self, value: i32) -> Result<&mut Self> {
        self.write_scalar("a number", |sink| sink.emit_int(value))
    }

    /// Writes a 64-bit integer value.
    pub fn write_long(&mut self, value: i64) -> Result<&mut Self> {
        self.write_scalar("a number", |sink| sink.emit_long(value))
    }

    /// Writes a double value.
    ///
    /// # Errors
    ///
    /// If the active notation cannot represent `value` (non-finite doubles
    /// in JSON), the call fails before any grammar transition: the writer
    /// stays usable and nothing is emitted.
    pub fn write_double(&mut self, value: f64) -> Result<&mut Self> {
        self.sink.check_double(value)?;
        self.write_scalar("a number", |sink| sink.emit_double(value))
    }

    /// Writes an arbitrary-precision integer value.
    pub fn write_big_integer(&mut self, value: &BigInt) -> Result<&mut Self> {
        self.write_scalar("a number", |sink| sink.emit_big_integer(value))
    }

    /// Writes an arbitrary-precision decimal value.
    pub fn write_big_decimal(&mut self, value: &BigDecimal) -> Result<&mut Self> {
        self.write_scalar("a number", |sink| sink.emit_big_decimal(value))
    }

    /// Writes a raw byte sequence value.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<&mut Self> {
        self.write_scalar("bytes", |sink| sink.emit_bytes(value))
    }

    /// Writes an unresolved `${key[:default]}` expression value. The text is
    /// opaque to the encoder; no substitution happens here.
    pub fn write_expression(&mut self, value: &str) -> Result<&mut Self> {
        self.write_scalar("an expression", |sink| sink.emit_expression(value))
    }

    /// Writes a type tag value naming one of the model kinds.
    pub fn write_type(&mut self, value: ValueKind) -> Result<&mut Self> {
        self.write_scalar("a type", |sink| sink.emit_type(value))
    }

    /// Writes the explicit undefined marker, distinct from an absent field.
    pub fn write_undefined(&mut self) -> Result<&mut Self> {
        self.write_scalar("undefined", |sink| sink.emit_undefined())
    }

    fn write_scalar(
        &mut self,
        token: &'static str,
        render: impl FnOnce(&mut S) -> Result<()>,
    ) -> Result<&mut Self> {
        self.write_token(|analyzer| analyzer.put_scalar(token), render)
    }

    /// Shared emission order for every non-closing token: run all grammar
    /// transitions first, emit text only after they all succeeded.
    fn write_token(
        &mut self,
        put: impl FnOnce(&mut GrammarAnalyzer) -> Result<()>,
        render: impl FnOnce(&mut S) -> Result<()>,
    ) -> Result<&mut Self> {
        let comma = self.analyzer.is_comma_expected();
        let separator = self.analyzer.is_separator_expected();
        if comma {
            self.analyzer.put_comma()?;
        }
        if separator {
            self.analyzer.put_separator()?;
        }
        put(&mut self.analyzer)?;
        if comma {
            self.sink.emit_comma()?;
        }
        if separator {
            self.sink.emit_separator()?;
        }
        render(&mut self.sink)?;
        Ok(self)
    }
}

//! The token sink seam between grammar validation and wire formatting.
//!
//! [`TokenSink`] receives structural and scalar events that the
//! [`GrammarAnalyzer`](crate::GrammarAnalyzer) has already validated and
//! appends formatted text to its output. Everything notation-specific lives
//! behind this trait: escaping dialects, numeric formatting, byte encoding,
//! and the spelling of punctuation. The two shipped implementations are
//! [`NativeSink`](crate::NativeSink) and [`JsonSink`](crate::JsonSink).

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{Result, ValueKind};

/// Consumes validated encoding events and renders one wire notation.
///
/// Implementations only format; they never validate structure. A sink fed a
/// nonsensical event sequence will happily produce nonsensical text, which is
/// why sinks are always driven through a
/// [`ModelWriter`](crate::ModelWriter).
pub trait TokenSink {
    fn emit_object_start(&mut self) -> Result<()>;
    fn emit_object_end(&mut self) -> Result<()>;
    fn emit_list_start(&mut self) -> Result<()>;
    fn emit_list_end(&mut self) -> Result<()>;
    fn emit_property_start(&mut self) -> Result<()>;
    fn emit_property_end(&mut self) -> Result<()>;
    fn emit_comma(&mut self) -> Result<()>;

    /// The separator between a key and its value (`=>` native, `:` JSON).
    fn emit_separator(&mut self) -> Result<()>;

    fn emit_string(&mut self, value: &str) -> Result<()>;
    fn emit_boolean(&mut self, value: bool) -> Result<()>;
    fn emit_int(&mut self, value: i32) -> Result<()>;
    fn emit_long(&mut self, value: i64) -> Result<()>;
    fn emit_double(&mut self, value: f64) -> Result<()>;
    fn emit_big_integer(&mut self, value: &BigInt) -> Result<()>;
    fn emit_big_decimal(&mut self, value: &BigDecimal) -> Result<()>;
    fn emit_bytes(&mut self, value: &[u8]) -> Result<()>;
    fn emit_expression(&mut self, value: &str) -> Result<()>;
    fn emit_type(&mut self, value: ValueKind) -> Result<()>;
    fn emit_undefined(&mut self) -> Result<()>;

    /// Pre-validates a double before any grammar transition happens.
    ///
    /// Notations that cannot represent the value reject it here, so a bad
    /// argument fails fast with no partial side effects.
    fn check_double(&self, _value: f64) -> Result<()> {
        Ok(())
    }

    /// Flushes the backing stream. A no-op for in-memory buffers.
    fn flush(&mut self) -> Result<()>;
}

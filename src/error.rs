//! Error types for detyped model encoding.
//!
//! ## Error Categories
//!
//! - **Grammar errors**: the requested write is illegal in the current
//!   structural context (closing an unopened container, a second root value,
//!   a value where a key is expected). The first grammar error permanently
//!   poisons the writer that raised it.
//! - **Invalid arguments**: payloads a notation cannot carry, rejected before
//!   any state mutation (currently only non-finite doubles in the JSON
//!   notation).
//! - **I/O errors**: failures of the backing [`std::io::Write`] sink,
//!   propagated unchanged. Encoding is a deterministic transformation, so
//!   this layer never retries.
//!
//! ## Examples
//!
//! ```rust
//! use detyped::{native_writer, Error};
//!
//! let mut out = Vec::new();
//! let mut writer = native_writer(&mut out);
//! writer.write_list_start().unwrap();
//! let err = writer.write_object_end().unwrap_err();
//! assert!(matches!(err, Error::Grammar { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a detyped
/// model document.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested write violates the document grammar. The writer that
    /// raised this is poisoned and must be discarded.
    #[error("grammar error: unexpected {found}, expected {expected}")]
    Grammar {
        found: &'static str,
        expected: String,
    },

    /// A non-finite double was passed to a notation that cannot represent it.
    #[error("cannot encode non-finite double `{0}` in this notation")]
    NonFiniteNumber(f64),

    /// IO error from the backing sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a grammar error from the offending token and a description of
    /// what was legal instead.
    ///
    /// The description is diagnostic text for humans, not part of the wire
    /// contract.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use detyped::Error;
    ///
    /// let err = Error::grammar("'}'", "a value or ']'".to_string());
    /// assert!(err.to_string().contains("unexpected '}'"));
    /// ```
    pub fn grammar(found: &'static str, expected: String) -> Self {
        Error::Grammar { found, expected }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use detyped::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

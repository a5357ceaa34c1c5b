//! Grammar analysis for the detyped model document grammar.
//!
//! This module provides [`GrammarAnalyzer`], a stack automaton that validates
//! the sequence of structural write calls made against a
//! [`ModelWriter`](crate::ModelWriter). The analyzer decides whether the next
//! requested token is legal in the current nesting context and tells the
//! writer when a comma or key/value separator must precede it.
//!
//! One analyzer validates both wire notations: the notation-specific spelling
//! of tokens (`=>` vs `:`, `(` vs `{`) lives entirely in the
//! [`TokenSink`](crate::TokenSink) implementations.
//!
//! ## Document grammar
//!
//! A document is exactly one value. A value is an object, a list, a property,
//! or a scalar. Objects hold zero or more key/value pairs, properties hold
//! exactly one, lists hold zero or more values. Commas separate siblings; a
//! separator sits between every key and its value.
//!
//! ## Poisoning
//!
//! The first rejected call marks the analyzer finished, permanently: every
//! subsequent call fails as well, even if it would have been legal in
//! isolation. Callers must discard the document being encoded; partial output
//! is not a valid document.

use crate::{Error, Result};

/// One open structural context on the analyzer's stack.
///
/// `Key` is a key that has been written and is awaiting its separator;
/// `Arrow` sits on top of `Key` once the separator is in and a value is due.
/// Both are popped together when that value completes.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Frame {
    Object,
    List,
    Property { complete: bool },
    Key,
    Arrow,
}

/// A stack automaton tracking the structural state of one document.
///
/// The stack grows on `*_start` calls and on key completion, and shrinks on
/// `*_end` calls and value completion. Nesting depth is unbounded; no
/// recursion is involved, so deeply nested documents carry no call-stack
/// risk.
///
/// # Examples
///
/// ```rust
/// use detyped::GrammarAnalyzer;
///
/// let mut analyzer = GrammarAnalyzer::new();
/// analyzer.put_object_start().unwrap();
/// analyzer.put_string().unwrap(); // a key
/// assert!(analyzer.is_separator_expected());
/// analyzer.put_separator().unwrap();
/// analyzer.put_scalar("a number").unwrap();
/// analyzer.put_object_end().unwrap();
/// assert!(analyzer.is_finished());
/// ```
#[derive(Debug, Default)]
pub struct GrammarAnalyzer {
    stack: Vec<Frame>,
    finished: bool,
    comma_pending: bool,
    comma_seen: bool,
}

impl GrammarAnalyzer {
    /// Creates an analyzer for a fresh document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the single root value has been fully closed, or
    /// once any call has been rejected. Terminal and permanent either way.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` if a comma must be written before the next sibling
    /// token.
    ///
    /// Commas are required between siblings and forbidden before the first
    /// sibling, after the last, and everywhere else.
    #[must_use]
    pub fn is_comma_expected(&self) -> bool {
        self.comma_pending && !self.finished
    }

    /// Returns `true` if the key/value separator must be written next, i.e.
    /// a key has just completed.
    #[must_use]
    pub fn is_separator_expected(&self) -> bool {
        !self.finished && matches!(self.stack.last(), Some(Frame::Key))
    }

    /// Accepts a comma between siblings.
    ///
    /// # Errors
    ///
    /// Rejected unless [`is_comma_expected`](Self::is_comma_expected) is
    /// `true`; rejection poisons the analyzer.
    pub fn put_comma(&mut self) -> Result<()> {
        if self.finished || !self.comma_pending {
            return Err(self.reject("','"));
        }
        self.comma_pending = false;
        self.comma_seen = true;
        Ok(())
    }

    /// Accepts the key/value separator after a key.
    ///
    /// # Errors
    ///
    /// Rejected unless a key has just been written; rejection poisons the
    /// analyzer.
    pub fn put_separator(&mut self) -> Result<()> {
        if self.finished || !matches!(self.stack.last(), Some(Frame::Key)) {
            return Err(self.reject("a key/value separator"));
        }
        self.stack.push(Frame::Arrow);
        Ok(())
    }

    /// Accepts the opening of an object.
    pub fn put_object_start(&mut self) -> Result<()> {
        self.put_start(Frame::Object, "'{'")
    }

    /// Accepts the closing of the innermost object.
    pub fn put_object_end(&mut self) -> Result<()> {
        self.put_end(&Frame::Object, "'}'")
    }

    /// Accepts the opening of a list.
    pub fn put_list_start(&mut self) -> Result<()> {
        self.put_start(Frame::List, "'['")
    }

    /// Accepts the closing of the innermost list.
    pub fn put_list_end(&mut self) -> Result<()> {
        self.put_end(&Frame::List, "']'")
    }

    /// Accepts the opening of a property.
    pub fn put_property_start(&mut self) -> Result<()> {
        self.put_start(Frame::Property { complete: false }, "'('")
    }

    /// Accepts the closing of the innermost property.
    ///
    /// # Errors
    ///
    /// Rejected unless the property already holds its single key/value pair;
    /// an empty property is not a document.
    pub fn put_property_end(&mut self) -> Result<()> {
        self.put_end(&Frame::Property { complete: true }, "')'")
    }

    /// Accepts a string token.
    ///
    /// Inside an object or a fresh property a string is a key; in value
    /// position it is a string value. The surrounding context disambiguates.
    pub fn put_string(&mut self) -> Result<()> {
        if self.finished || self.comma_pending {
            return Err(self.reject("a string"));
        }
        match self.stack.last() {
            None | Some(Frame::List) | Some(Frame::Arrow) => self.value_done(),
            Some(Frame::Object) | Some(Frame::Property { complete: false }) => {
                self.stack.push(Frame::Key);
            }
            Some(Frame::Property { complete: true }) | Some(Frame::Key) => {
                return Err(self.reject("a string"))
            }
        }
        self.comma_seen = false;
        Ok(())
    }

    /// Accepts any non-string scalar token (boolean, number, bytes,
    /// expression, type, undefined). `token` names the token for
    /// diagnostics only.
    ///
    /// A scalar at depth zero immediately finishes the document.
    pub fn put_scalar(&mut self, token: &'static str) -> Result<()> {
        if self.finished || self.comma_pending {
            return Err(self.reject(token));
        }
        match self.stack.last() {
            None | Some(Frame::List) | Some(Frame::Arrow) => {
                self.value_done();
                self.comma_seen = false;
                Ok(())
            }
            _ => Err(self.reject(token)),
        }
    }

    fn put_start(&mut self, frame: Frame, token: &'static str) -> Result<()> {
        if self.finished || self.comma_pending {
            return Err(self.reject(token));
        }
        match self.stack.last() {
            None | Some(Frame::List) | Some(Frame::Arrow) => {
                self.stack.push(frame);
                self.comma_seen = false;
                Ok(())
            }
            _ => Err(self.reject(token)),
        }
    }

    fn put_end(&mut self, frame: &Frame, token: &'static str) -> Result<()> {
        if self.finished || self.comma_seen || self.stack.last() != Some(frame) {
            return Err(self.reject(token));
        }
        self.stack.pop();
        self.comma_pending = false;
        self.value_done();
        Ok(())
    }

    /// A value just completed: unwind a pending key/separator pair and update
    /// the enclosing context.
    fn value_done(&mut self) {
        if matches!(self.stack.last(), Some(Frame::Arrow)) {
            self.stack.pop();
            self.stack.pop(); // the Key beneath
        }
        match self.stack.last_mut() {
            None => self.finished = true,
            Some(Frame::Property { complete }) => *complete = true,
            Some(_) => self.comma_pending = true,
        }
    }

    /// Poisons the analyzer and builds the diagnostic. The expectation text
    /// is computed before the state is marked finished so it describes what
    /// was legal at the moment of the violation.
    fn reject(&mut self, found: &'static str) -> Error {
        let expected = self.expected();
        self.finished = true;
        Error::grammar(found, expected)
    }

    fn expected(&self) -> String {
        let expected = if self.finished {
            "end of document"
        } else {
            match self.stack.last() {
                None => "a value",
                Some(Frame::Object) if self.comma_pending => "',' or '}'",
                Some(Frame::Object) if self.comma_seen => "a property name",
                Some(Frame::Object) => "a property name or '}'",
                Some(Frame::List) if self.comma_pending => "',' or ']'",
                Some(Frame::List) if self.comma_seen => "a value",
                Some(Frame::List) => "a value or ']'",
                Some(Frame::Property { complete: false }) => "a property name",
                Some(Frame::Property { complete: true }) => "')'",
                Some(Frame::Key) => "a key/value separator",
                Some(Frame::Arrow) => "a value",
            }
        };
        expected.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_finishes() {
        let mut a = GrammarAnalyzer::new();
        a.put_object_start().unwrap();
        a.put_object_end().unwrap();
        assert!(a.is_finished());
    }

    #[test]
    fn test_root_scalar_finishes() {
        let mut a = GrammarAnalyzer::new();
        a.put_scalar("a boolean").unwrap();
        assert!(a.is_finished());
    }

    #[test]
    fn test_second_root_rejected() {
        let mut a = GrammarAnalyzer::new();
        a.put_scalar("a number").unwrap();
        let err = a.put_scalar("a number").unwrap_err();
        assert!(err.to_string().contains("end of document"));
    }

    #[test]
    fn test_key_requires_separator_before_value() {
        let mut a = GrammarAnalyzer::new();
        a.put_object_start().unwrap();
        a.put_string().unwrap();
        assert!(a.is_separator_expected());
        // A value before the separator is illegal.
        assert!(a.put_scalar("a number").is_err());
    }

    #[test]
    fn test_object_pair_then_comma_then_pair() {
        let mut a = GrammarAnalyzer::new();
        a.put_object_start().unwrap();
        a.put_string().unwrap();
        a.put_separator().unwrap();
        a.put_string().unwrap(); // string value
        assert!(a.is_comma_expected());
        a.put_comma().unwrap();
        a.put_string().unwrap();
        a.put_separator().unwrap();
        a.put_scalar("a number").unwrap();
        a.put_object_end().unwrap();
        assert!(a.is_finished());
    }

    #[test]
    fn test_value_after_separator_cannot_be_key() {
        let mut a = GrammarAnalyzer::new();
        a.put_object_start().unwrap();
        a.put_string().unwrap();
        a.put_separator().unwrap();
        // Ending the object in value position is illegal.
        assert!(a.put_object_end().is_err());
    }

    #[test]
    fn test_mismatched_close_poisons() {
        let mut a = GrammarAnalyzer::new();
        a.put_list_start().unwrap();
        assert!(a.put_object_end().is_err());
        // Poisoned: the otherwise-legal close now fails too.
        assert!(a.put_list_end().is_err());
        assert!(a.is_finished());
    }

    #[test]
    fn test_comma_forbidden_before_first_element() {
        let mut a = GrammarAnalyzer::new();
        a.put_list_start().unwrap();
        assert!(!a.is_comma_expected());
        assert!(a.put_comma().is_err());
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let mut a = GrammarAnalyzer::new();
        a.put_list_start().unwrap();
        a.put_scalar("a number").unwrap();
        a.put_comma().unwrap();
        assert!(a.put_list_end().is_err());
    }

    #[test]
    fn test_missing_comma_between_siblings_rejected() {
        let mut a = GrammarAnalyzer::new();
        a.put_list_start().unwrap();
        a.put_scalar("a number").unwrap();
        let err = a.put_scalar("a number").unwrap_err();
        assert!(err.to_string().contains("','"));
    }

    #[test]
    fn test_property_holds_exactly_one_pair() {
        let mut a = GrammarAnalyzer::new();
        a.put_property_start().unwrap();
        a.put_string().unwrap();
        a.put_separator().unwrap();
        a.put_scalar("a number").unwrap();
        // Second key in the same property is illegal.
        assert!(a.put_string().is_err());
    }

    #[test]
    fn test_empty_property_rejected() {
        let mut a = GrammarAnalyzer::new();
        a.put_property_start().unwrap();
        let err = a.put_property_end().unwrap_err();
        assert!(err.to_string().contains("a property name"));
    }

    #[test]
    fn test_scalar_cannot_be_object_key() {
        let mut a = GrammarAnalyzer::new();
        a.put_object_start().unwrap();
        let err = a.put_scalar("a boolean").unwrap_err();
        assert!(err.to_string().contains("a property name"));
    }

    #[test]
    fn test_nested_containers_unwind_to_enclosing_frame() {
        let mut a = GrammarAnalyzer::new();
        a.put_object_start().unwrap();
        a.put_string().unwrap();
        a.put_separator().unwrap();
        a.put_list_start().unwrap();
        a.put_object_start().unwrap();
        a.put_object_end().unwrap();
        assert!(a.is_comma_expected());
        a.put_comma().unwrap();
        a.put_scalar("a number").unwrap();
        a.put_list_end().unwrap();
        // The list was the pair's value; a sibling pair is now possible.
        assert!(a.is_comma_expected());
        a.put_object_end().unwrap();
        assert!(a.is_finished());
    }

    #[test]
    fn test_deep_nesting_grows_stack() {
        let mut a = GrammarAnalyzer::new();
        for _ in 0..10_000 {
            a.put_list_start().unwrap();
        }
        for _ in 0..10_000 {
            a.put_list_end().unwrap();
        }
        assert!(a.is_finished());
    }
}

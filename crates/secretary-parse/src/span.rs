//! Match results that remember where in the input they came from.
//!
//! Extractors never mutate the text they scan. They return a [`Found`] and
//! callers derive the residual text from its byte span when they need it.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<T> {
  pub value: T,
  /// Byte range of the matched phrase in the scanned text.
  pub span:  Range<usize>,
}

impl<T> Found<T> {
  pub fn new(value: T, span: Range<usize>) -> Self { Self { value, span } }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Found<U> {
    Found { value: f(self.value), span: self.span }
  }

  /// `text` with the matched phrase cut out, edge punctuation trimmed and
  /// whitespace collapsed.
  pub fn residual(&self, text: &str) -> String {
    let head = text[..self.span.start].trim_end();
    let tail = text[self.span.end..].trim_start();
    let mut out = String::with_capacity(text.len());
    out.push_str(head);
    if !tail.starts_with([',', '.', ';']) {
      out.push(' ');
    }
    out.push_str(tail);
    collapse_whitespace(trim_edges(&out))
  }
}

/// Join runs of whitespace into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim spaces and the punctuation that phrase removal tends to leave behind.
pub fn trim_edges(s: &str) -> &str {
  s.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '-'))
}

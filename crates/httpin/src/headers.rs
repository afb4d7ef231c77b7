//! Case-insensitive header table with line-by-line ingestion.
//!
//! Header names are normalized to lowercase at insertion time. A name that
//! appears more than once keeps a single entry whose value is the
//! comma-joined list of every occurrence, in arrival order.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::ParseError;

/// Header field table.
///
/// Built incrementally by [`ingest`](Headers::ingest), one `name:value` line
/// per call, until the empty line that terminates the header block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(lowercase_header_key(name).as_ref())
            .map(String::as_str)
    }

    /// Check whether a header exists (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(lowercase_header_key(name).as_ref())
    }

    /// Append a header value.
    ///
    /// The name is normalized to lowercase. If the name is already present
    /// the value is joined onto the existing entry with `", "`.
    pub fn append(&mut self, name: &str, value: &str) {
        let key = lowercase_header_key(name);
        match self.inner.get_mut(key.as_ref()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.inner.insert(key.into_owned(), value.to_string());
            }
        }
    }

    /// Iterate over all headers as (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no header has been ingested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Consume at most one header line from `buffer`.
    ///
    /// Returns `(bytes_consumed, done)`:
    ///
    /// - no CRLF in `buffer` yet: `(0, false)` — the caller must supply more
    ///   bytes; this is a suspension point, not an error;
    /// - CRLF at offset 0: `(2, true)` — the empty line ending the header
    ///   block;
    /// - otherwise the bytes before the CRLF are one `name:value` line,
    ///   which is validated and merged into the table, and
    ///   `bytes_consumed` is the line length plus the CRLF.
    pub fn ingest(&mut self, buffer: &[u8]) -> Result<(usize, bool), ParseError> {
        let line_end = match buffer.windows(2).position(|w| w == b"\r\n") {
            Some(pos) => pos,
            None => return Ok((0, false)),
        };
        if line_end == 0 {
            return Ok((2, true));
        }

        let line = &buffer[..line_end];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(ParseError::MalformedHeaderLine)?;

        let name_bytes = &line[..colon];
        // "Host : x" smuggles whitespace into the field name; the colon must
        // directly follow the name.
        if name_bytes.last().is_some_and(u8::is_ascii_whitespace) {
            return Err(ParseError::InvalidHeaderName(
                String::from_utf8_lossy(name_bytes).into_owned(),
            ));
        }

        let name = String::from_utf8_lossy(name_bytes)
            .trim()
            .to_ascii_lowercase();
        if name.is_empty() || !name.bytes().all(is_token_char) {
            return Err(ParseError::InvalidHeaderName(name));
        }

        let value = String::from_utf8_lossy(&line[colon + 1..]);
        self.append(&name, value.trim());

        Ok((line_end + 2, false))
    }
}

/// Returns true for the characters allowed in a header name.
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Lowercase a header name for lookup, borrowing when already lowercase.
fn lowercase_header_key(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

//! Body accumulation against a declared Content-Length.

use crate::error::ParseError;
use crate::headers::Headers;

/// Collects body bytes and tracks progress toward the declared length.
///
/// Body bytes are opaque, so every byte handed to [`push`](Self::push) is
/// consumed in full; the only bookkeeping is the running total against
/// `Content-Length`. Without a declared length the body is empty and the
/// accumulator completes on its first step without consuming anything.
#[derive(Debug, Default)]
pub struct BodyAccumulator {
    expected: Option<usize>,
    read: usize,
    bytes: Vec<u8>,
}

impl BodyAccumulator {
    /// Create an accumulator expecting `expected` body bytes, or none.
    #[must_use]
    pub fn new(expected: Option<usize>) -> Self {
        Self {
            expected,
            read: 0,
            bytes: Vec::new(),
        }
    }

    /// Create an accumulator from a completed header block.
    ///
    /// Fails with [`ParseError::MalformedContentLength`] when the header is
    /// present but does not parse as a non-negative integer.
    pub fn from_headers(headers: &Headers) -> Result<Self, ParseError> {
        let expected = match headers.get("content-length") {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ParseError::MalformedContentLength)?,
            ),
            None => None,
        };
        Ok(Self::new(expected))
    }

    /// Feed body bytes. Returns `(bytes_consumed, complete)`.
    ///
    /// With a declared length the entire input is appended and counted:
    /// overshooting it is [`ParseError::ContentLengthExceeded`], matching it
    /// completes the body, and anything less asks for more data. Without a
    /// declared length nothing is consumed and the body completes empty.
    pub fn push(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(expected) = self.expected else {
            return Ok((0, true));
        };

        self.bytes.extend_from_slice(data);
        self.read += data.len();
        if self.read > expected {
            return Err(ParseError::ContentLengthExceeded);
        }
        Ok((data.len(), self.read == expected))
    }

    /// The accumulated body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_accumulates_until_expected() {
        let mut body = BodyAccumulator::new(Some(5));

        let (consumed, complete) = body.push(b"hel").unwrap();
        assert_eq!(consumed, 3);
        assert!(!complete);

        let (consumed, complete) = body.push(b"lo").unwrap();
        assert_eq!(consumed, 2);
        assert!(complete);
        assert_eq!(body.bytes(), b"hello");
    }

    #[test]
    fn push_rejects_overshoot() {
        let mut body = BodyAccumulator::new(Some(5));
        let err = body.push(b"hellox").unwrap_err();

        assert!(matches!(err, ParseError::ContentLengthExceeded));
    }

    #[test]
    fn push_completes_immediately_without_declared_length() {
        let mut body = BodyAccumulator::new(None);
        let (consumed, complete) = body.push(b"left in the stream").unwrap();

        assert_eq!(consumed, 0);
        assert!(complete);
        assert!(body.bytes().is_empty());
    }

    #[test]
    fn zero_length_body_completes_on_empty_input() {
        let mut body = BodyAccumulator::new(Some(0));
        let (consumed, complete) = body.push(b"").unwrap();

        assert_eq!(consumed, 0);
        assert!(complete);
    }

    #[test]
    fn from_headers_reads_content_length() {
        let mut headers = Headers::new();
        headers.ingest(b"Content-Length: 12\r\n").unwrap();

        let body = BodyAccumulator::from_headers(&headers).unwrap();
        assert_eq!(body.expected, Some(12));
    }

    #[test]
    fn from_headers_rejects_non_numeric_length() {
        let mut headers = Headers::new();
        headers.ingest(b"Content-Length: twelve\r\n").unwrap();

        let err = BodyAccumulator::from_headers(&headers).unwrap_err();
        assert!(matches!(err, ParseError::MalformedContentLength));
    }

    #[test]
    fn from_headers_rejects_negative_length() {
        let mut headers = Headers::new();
        headers.ingest(b"Content-Length: -5\r\n").unwrap();

        let err = BodyAccumulator::from_headers(&headers).unwrap_err();
        assert!(matches!(err, ParseError::MalformedContentLength));
    }
}

//! Parse error types.

use std::fmt;
use std::io;

/// Error raised while parsing a request from a byte stream.
///
/// Every variant is terminal: the parse is abandoned on the first error and
/// the connection-level caller decides whether to answer or close. Framing
/// errors are not self-correcting mid-stream, so nothing is retried here.
#[derive(Debug)]
pub enum ParseError {
    /// Request line does not split into exactly three space-separated fields.
    MalformedRequestLine,
    /// Method is not one of GET, POST, PUT, DELETE.
    UnsupportedMethod(String),
    /// HTTP version is not "1.1".
    UnsupportedVersion,
    /// Header line has no colon separator.
    MalformedHeaderLine,
    /// Header name has trailing whitespace before the colon or contains
    /// characters outside letters, digits and hyphen.
    InvalidHeaderName(String),
    /// Content-Length value is not a valid non-negative integer.
    MalformedContentLength,
    /// Accumulated body bytes exceed the declared Content-Length.
    ContentLengthExceeded,
    /// Stream reached end-of-file before the request was fully parsed.
    UnexpectedEndOfStream,
    /// The underlying stream read failed for a reason unrelated to parsing.
    StreamRead(io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRequestLine => write!(f, "malformed request line"),
            Self::UnsupportedMethod(method) => write!(f, "unsupported method: {method}"),
            Self::UnsupportedVersion => write!(f, "unsupported HTTP version"),
            Self::MalformedHeaderLine => write!(f, "malformed header line: missing ':'"),
            Self::InvalidHeaderName(name) => write!(f, "invalid header name: {name:?}"),
            Self::MalformedContentLength => write!(f, "malformed Content-Length"),
            Self::ContentLengthExceeded => write!(f, "body exceeds declared Content-Length"),
            Self::UnexpectedEndOfStream => write!(f, "stream ended before request was complete"),
            Self::StreamRead(err) => write!(f, "stream read failed: {err}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StreamRead(err) => Some(err),
            _ => None,
        }
    }
}

//! Request aggregate and the incremental parsing state machine.
//!
//! A [`Request`] starts empty and is driven forward by feeding it byte
//! slices via [`advance`](Request::advance). Each call consumes as much of
//! the input as the current state allows and reports the consumed count, so
//! the caller can keep the unconsumed remainder buffered for the next read.
//! Chunk boundaries never change the outcome: a request fed one byte at a
//! time parses identically to one fed whole.

use std::fmt;

use serde::Serialize;

use crate::body::BodyAccumulator;
use crate::error::ParseError;
use crate::headers::Headers;

/// HTTP method.
///
/// Only the four methods the parser accepts are represented; any other
/// token on the request line is rejected during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET method.
    Get,
    /// POST method.
    Post,
    /// PUT method.
    Put,
    /// DELETE method.
    Delete,
}

impl Method {
    /// Parse a method from bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"GET" => Some(Self::Get),
            b"POST" => Some(Self::Post),
            b"PUT" => Some(Self::Put),
            b"DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Return the canonical uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed first line of a request: `METHOD TARGET HTTP/VERSION`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLine {
    /// Request method.
    pub method: Method,
    /// Request target, kept opaque: no decoding or validation.
    pub target: String,
    /// HTTP version number. Always "1.1"; anything else is rejected.
    pub http_version: String,
}

impl RequestLine {
    /// Try to parse a request line from the front of `buffer`.
    ///
    /// Returns `Ok(None)` while no CRLF is in sight (needs more data).
    /// On success the consumed count includes the CRLF.
    pub fn parse(buffer: &[u8]) -> Result<Option<(Self, usize)>, ParseError> {
        let line_end = match buffer.windows(2).position(|w| w == b"\r\n") {
            Some(pos) => pos,
            None => return Ok(None),
        };
        let line = String::from_utf8_lossy(&buffer[..line_end]);

        let mut fields = line.split(' ');
        let (Some(method), Some(target), Some(version), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::MalformedRequestLine);
        };

        let method = method.trim();
        let method = Method::from_bytes(method.as_bytes())
            .ok_or_else(|| ParseError::UnsupportedMethod(method.to_string()))?;

        let version_number = match version.split_once('/') {
            Some((_, number)) => number,
            None => return Err(ParseError::UnsupportedVersion),
        };
        if version_number != "1.1" {
            return Err(ParseError::UnsupportedVersion);
        }

        Ok(Some((
            Self {
                method,
                target: target.to_string(),
                http_version: version_number.to_string(),
            },
            line_end + 2,
        )))
    }
}

/// Parsing progress of a [`Request`].
///
/// States only ever move forward; there are no backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// Waiting for the request line.
    #[default]
    Init,
    /// Consuming header lines.
    Headers,
    /// Consuming body bytes.
    Body,
    /// Fully parsed; nothing further is consumed.
    Done,
}

/// An HTTP request being assembled from a byte stream.
///
/// Owns its request line, header table and body exclusively. Mutated only
/// through [`advance`](Self::advance); once the state reaches
/// [`ParseState::Done`] the request is complete and read-only.
#[derive(Debug, Default)]
pub struct Request {
    request_line: Option<RequestLine>,
    headers: Headers,
    body: BodyAccumulator,
    state: ParseState,
}

impl Request {
    /// Create an empty request in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parsing state.
    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Returns true once the request is fully parsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == ParseState::Done
    }

    /// The parsed request line, present after the initial state completes.
    #[must_use]
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// The header table.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The raw body bytes accumulated so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        self.body.bytes()
    }

    /// Feed a buffer of stream bytes to the state machine.
    ///
    /// Steps single states in a loop until the request is done, a step
    /// fails, or a step consumes nothing (more input is needed). Returns
    /// the total number of bytes consumed from `buffer`; the caller must
    /// carry the unconsumed remainder over to the next call. Partially
    /// formed tokens are never consumed: a request line or header line is
    /// taken only once its CRLF has arrived.
    pub fn advance(&mut self, buffer: &[u8]) -> Result<usize, ParseError> {
        let mut total = 0;
        while self.state != ParseState::Done {
            let consumed = self.step(&buffer[total..])?;
            if consumed == 0 {
                break;
            }
            total += consumed;
        }
        Ok(total)
    }

    /// Run exactly one state's parser over `buffer`.
    fn step(&mut self, buffer: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Init => match RequestLine::parse(buffer)? {
                None => Ok(0),
                Some((request_line, consumed)) => {
                    self.request_line = Some(request_line);
                    self.state = ParseState::Headers;
                    Ok(consumed)
                }
            },
            ParseState::Headers => {
                let (consumed, done) = self.headers.ingest(buffer)?;
                if done {
                    self.body = BodyAccumulator::from_headers(&self.headers)?;
                    self.state = ParseState::Body;
                }
                Ok(consumed)
            }
            ParseState::Body => {
                let (consumed, complete) = self.body.push(buffer)?;
                if complete {
                    self.state = ParseState::Done;
                }
                Ok(consumed)
            }
            ParseState::Done => Ok(0),
        }
    }
}

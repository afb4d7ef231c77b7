//! Incremental HTTP/1.1 request parsing from raw byte streams.
//!
//! This crate parses a request (request line, headers, body) from a stream
//! that may deliver data in arbitrarily small chunks, without buffering the
//! whole message up front. The parser is a forward-only state machine fed
//! from a growable compacting buffer; chunk boundaries never affect the
//! parsed result.
//!
//! Scope is deliberately narrow: methods are limited to GET, POST, PUT and
//! DELETE, only version 1.1 is accepted, and there is no chunked
//! transfer-encoding, pipelining or TLS. Bodies are framed by
//! Content-Length alone.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use httpin::Request;
//!
//! let stream = Cursor::new(&b"GET /coffee HTTP/1.1\r\nHost: localhost\r\n\r\n"[..]);
//! let request = Request::from_reader(stream).unwrap();
//!
//! assert!(request.is_complete());
//! assert_eq!(request.request_line().unwrap().target, "/coffee");
//! assert_eq!(request.headers().get("host"), Some("localhost"));
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]

pub mod body;
pub mod buffer;
pub mod error;
pub mod headers;
mod reader;
pub mod request;

pub use buffer::ReadBuffer;
pub use error::ParseError;
pub use headers::Headers;
pub use request::{Method, ParseState, Request, RequestLine};

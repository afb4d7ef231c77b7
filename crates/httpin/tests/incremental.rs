//! End-to-end feed-loop tests over fragmented streams.

use std::io::{self, Read};

use httpin::{Method, ParseError, Request};
use proptest::prelude::*;

/// Serves `data` in the given chunk sizes, then whatever remains at once.
struct ChunkedReader {
    data: Vec<u8>,
    chunks: Vec<usize>,
    pos: usize,
    next_chunk: usize,
}

impl ChunkedReader {
    fn new(data: &[u8], chunks: Vec<usize>) -> Self {
        Self {
            data: data.to_vec(),
            chunks,
            pos: 0,
            next_chunk: 0,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() {
            return Ok(0);
        }
        let chunk = self
            .chunks
            .get(self.next_chunk)
            .copied()
            .unwrap_or(usize::MAX)
            .max(1);
        self.next_chunk += 1;
        let n = chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn coffee_request_byte_at_a_time() {
    let raw = b"GET /coffee HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let reader = ChunkedReader::new(raw, vec![1; raw.len()]);
    let request = Request::from_reader(reader).unwrap();

    let line = request.request_line().unwrap();
    assert_eq!(line.method, Method::Get);
    assert_eq!(line.target, "/coffee");
    assert_eq!(line.http_version, "1.1");
    assert_eq!(request.headers().get("host"), Some("localhost"));
    assert!(request.body().is_empty());
    assert!(request.is_complete());
}

#[test]
fn repeated_headers_collapse_into_one_entry() {
    let raw = b"GET / HTTP/1.1\r\nSet-Cookie: a\r\nSet-Cookie: b\r\n\r\n";
    let request = Request::from_reader(io::Cursor::new(&raw[..])).unwrap();

    assert_eq!(request.headers().get("set-cookie"), Some("a, b"));
}

#[test]
fn body_read_to_exact_content_length() {
    let raw = b"GET /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
    let request = Request::from_reader(io::Cursor::new(&raw[..])).unwrap();

    assert!(request.is_complete());
    assert_eq!(request.body(), b"hello");
}

#[test]
fn body_longer_than_content_length_fails() {
    let raw = b"GET /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhellox";
    let err = Request::from_reader(io::Cursor::new(&raw[..])).unwrap_err();

    assert!(matches!(err, ParseError::ContentLengthExceeded));
}

#[test]
fn unsupported_method_fails() {
    let raw = b"PATCH / HTTP/1.1\r\n\r\n";
    let err = Request::from_reader(io::Cursor::new(&raw[..])).unwrap_err();

    assert!(matches!(err, ParseError::UnsupportedMethod(m) if m == "PATCH"));
}

#[test]
fn unsupported_version_fails() {
    let raw = b"GET / HTTP/1.0\r\n\r\n";
    let err = Request::from_reader(io::Cursor::new(&raw[..])).unwrap_err();

    assert!(matches!(err, ParseError::UnsupportedVersion));
}

#[test]
fn header_name_with_space_fails() {
    let raw = b"GET / HTTP/1.1\r\nBad Name: x\r\n\r\n";
    let err = Request::from_reader(io::Cursor::new(&raw[..])).unwrap_err();

    assert!(matches!(err, ParseError::InvalidHeaderName(_)));
}

#[test]
fn header_line_without_colon_fails() {
    let raw = b"GET / HTTP/1.1\r\nNoColonHere\r\n\r\n";
    let err = Request::from_reader(io::Cursor::new(&raw[..])).unwrap_err();

    assert!(matches!(err, ParseError::MalformedHeaderLine));
}

#[test]
fn stream_ending_mid_headers_fails() {
    let raw = b"GET / HTTP/1.1\r\n";
    let err = Request::from_reader(io::Cursor::new(&raw[..])).unwrap_err();

    assert!(matches!(err, ParseError::UnexpectedEndOfStream));
}

proptest! {
    /// Chunk boundaries must not affect the parsed request.
    #[test]
    fn chunking_does_not_affect_output(
        chunks in proptest::collection::vec(1usize..8, 0..80),
        capacity in 1usize..64,
    ) {
        let raw = b"POST /submit HTTP/1.1\r\nHost: localhost\r\nX-Tag: alpha\r\nX-Tag: beta\r\nContent-Length: 11\r\n\r\nhello world";

        let reference = Request::from_reader(io::Cursor::new(&raw[..])).unwrap();
        let fragmented = Request::from_reader_with_capacity(
            ChunkedReader::new(raw, chunks),
            capacity,
        ).unwrap();

        prop_assert_eq!(fragmented.request_line(), reference.request_line());
        prop_assert_eq!(fragmented.body(), reference.body());
        prop_assert_eq!(
            fragmented.headers().get("host"),
            reference.headers().get("host")
        );
        prop_assert_eq!(
            fragmented.headers().get("x-tag"),
            reference.headers().get("x-tag")
        );
        prop_assert_eq!(fragmented.headers().len(), reference.headers().len());
    }
}

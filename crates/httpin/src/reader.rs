//! Blocking feed loop: drive the state machine from a `std::io::Read`.

use std::io::{self, Read};

use tracing::trace;

use crate::buffer::{ReadBuffer, DEFAULT_BUFFER_CAPACITY};
use crate::error::ParseError;
use crate::request::{ParseState, Request};

impl Request {
    /// Read and parse one request from a blocking byte stream.
    ///
    /// Reads are fed to the parser in arrival order; whatever a read
    /// delivers beyond the parser's current appetite stays buffered for the
    /// next round. End-of-stream before the request is complete is
    /// [`ParseError::UnexpectedEndOfStream`]; any other read failure is
    /// surfaced unchanged as [`ParseError::StreamRead`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::from_reader_with_capacity(reader, DEFAULT_BUFFER_CAPACITY)
    }

    /// Like [`from_reader`](Self::from_reader) with an explicit initial
    /// buffer capacity. The buffer doubles whenever it fills up before the
    /// parser can make progress, so a deliberately tiny capacity still
    /// parses arbitrarily large requests.
    pub fn from_reader_with_capacity<R: Read>(
        mut reader: R,
        capacity: usize,
    ) -> Result<Self, ParseError> {
        let mut request = Request::new();
        let mut buffer = ReadBuffer::with_capacity(capacity);

        while request.state() != ParseState::Done {
            if buffer.is_full() {
                buffer.grow();
                trace!(capacity = buffer.capacity(), "read buffer grown");
            }

            let read = match reader.read(buffer.spare_mut()) {
                Ok(0) => return Err(ParseError::UnexpectedEndOfStream),
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ParseError::StreamRead(err)),
            };
            buffer.commit(read);

            let consumed = request.advance(buffer.filled())?;
            buffer.consume(consumed);
            trace!(read, consumed, state = ?request.state(), "feed step");
        }

        Ok(request)
    }
}

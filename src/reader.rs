use std::io;
use std::ops::Deref;

use crate::req::{Request, State};
use crate::{Error, Result};

const BUFFER_SIZE: usize = 4096;

/// Settings for [`read_request_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    buffer_size: usize,
    max_body_size: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            buffer_size: BUFFER_SIZE,
            max_body_size: None,
        }
    }

    /// Capacity of the working buffer. The request-line and every header
    /// line must fit in it, CRLF included.
    ///
    /// Defaults to 4096. Clamped to at least 1.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Largest accepted content-length. Defaults to no limit.
    pub fn max_body_size(mut self, limit: u64) -> Self {
        self.max_body_size = Some(limit);
        self
    }

    pub fn get_buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn get_max_body_size(&self) -> Option<u64> {
        self.max_body_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

/// Read one request from `reader` using the default [`Config`].
pub fn read_request(reader: impl io::Read) -> Result<Request> {
    read_request_with(reader, &Config::default())
}

/// Read one request from `reader`.
///
/// Returns once the request is complete. Input after the end of the request
/// is read into the buffer but discarded.
pub fn read_request_with(reader: impl io::Read, config: &Config) -> Result<Request> {
    let mut request = Request::new();
    if let Some(limit) = config.max_body_size {
        request = request.with_max_body_size(limit);
    }

    let mut input = InputBuffer::new(reader, config.buffer_size);

    loop {
        let amount = input.fill_more()?;

        let used = request.feed(&input)?;
        input.consume(used);

        if request.is_done() {
            if !input.is_empty() {
                debug!("Discard {} bytes after request", input.len());
            }
            return Ok(request);
        }

        if input.is_ended() {
            if request.state() == State::Body {
                return Err(Error::TruncatedBody {
                    expected: request.content_length(),
                    received: request.body_received(),
                });
            }
            return Err(Error::UnexpectedEndOfInput);
        }

        // Buffer full and nothing consumed. The current line can never complete.
        if amount == 0 && used == 0 && !input.is_empty() {
            return Err(Error::NoProgress);
        }
    }
}

/// Fixed capacity buffer in front of an `io::Read`.
///
/// Bytes are appended at the tail by [`fill_more`][Self::fill_more] and
/// removed from the front by [`consume`][Self::consume], which moves the
/// remainder down to offset 0.
pub(crate) struct InputBuffer<T> {
    inner: Option<T>,
    buffer: Vec<u8>,
    len: usize,
}

impl<T: io::Read> InputBuffer<T> {
    pub fn new(inner: T, capacity: usize) -> Self {
        InputBuffer {
            inner: Some(inner),
            buffer: vec![0; capacity],
            len: 0,
        }
    }

    /// Read once into the free tail of the buffer.
    ///
    /// Returns the number of bytes read. `0` means either the buffer is
    /// full or the reader ended, see [`is_ended`][Self::is_ended].
    pub fn fill_more(&mut self) -> io::Result<usize> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(0);
        };

        let (_, unused) = self.buffer.split_at_mut(self.len);

        // A read into an empty slice would look like end of input.
        if unused.is_empty() {
            return Ok(0);
        }

        let amount = loop {
            match inner.read(unused) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if amount == 0 {
            trace!("Input ended");
            // Free readers as soon as possible.
            self.inner = None;
        }
        self.len += amount;

        trace!("Fill {} ({}/{})", amount, self.len, self.buffer.len());

        Ok(amount)
    }

    pub fn is_ended(&self) -> bool {
        self.inner.is_none()
    }

    pub fn consume(&mut self, amount: usize) {
        assert!(amount <= self.len, "consume more than buffer len");
        self.buffer.copy_within(amount..self.len, 0);
        self.len -= amount;
    }
}

impl<T> Deref for InputBuffer<T> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.buffer[..self.len]
    }
}

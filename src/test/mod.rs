use std::io;

use crate::{Error, Request};


/// Requests that parse to completion.
pub(crate) const GOOD: &[&[u8]] = &[
    b"GET / HTTP/1.1\r\n\r\n",
    b"GET /coffee HTTP/1.1\r\n\
        Host: localhost:42069\r\n\
        User-Agent: curl/7.81.0\r\n\
        Accept: */*\r\n\
        \r\n",
    b"POST /submit HTTP/1.1\r\n\
        Host: localhost:42069\r\n\
        Content-Type: application/json\r\n\
        Content-Length: 22\r\n\
        \r\n\
        {\"flavor\":\"dark mode\"}",
    b"PATCH /items/7 HTTP/1.1\r\n\
        Set-Person: lane-loves-go\r\n\
        Set-Person: prime-loves-zig\r\n\
        Set-Person: tj-loves-ocaml\r\n\
        Content-Length: 3\r\n\
        \r\n\
        \r\n\r",
    b"OPTIONS * HTTP/1.1\r\nMax-Forwards:   10   \r\n\r\n",
];

/// Requests that fail somewhere along the way.
pub(crate) const BAD: &[&[u8]] = &[
    b"GET /coffee HTTP/2.0\r\nHost: x\r\n\r\n",
    b"/coffee HTTP/1.1\r\n\r\n",
    b"GET / HTTP/1.1\r\nH\xc2\xa9st: x\r\n\r\n",
    b"GET / HTTP/1.1\r\nHost : x\r\n\r\n",
    b"GET / HTTP/1.1\r\nHost x\r\n\r\n",
    b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n0\r\n\r\n",
];

/// Feed all of `input` in one call.
pub(crate) fn feed_once(input: &[u8]) -> (Request, Option<Error>) {
    feed_in_chunks(input, input.len().max(1))
}

/// Feed `input` in pieces of `chunk` bytes, keeping unconsumed bytes in a
/// buffer that is compacted after every call.
pub(crate) fn feed_in_chunks(input: &[u8], chunk: usize) -> (Request, Option<Error>) {
    let mut request = Request::new();
    let mut buf = Vec::new();

    for part in input.chunks(chunk) {
        buf.extend_from_slice(part);

        match request.feed(&buf) {
            Ok(n) => {
                buf.drain(..n);
            }
            Err(e) => return (request, Some(e)),
        }
    }

    (request, None)
}

pub(crate) fn assert_same(a: &(Request, Option<Error>), b: &(Request, Option<Error>)) {
    let (ra, ea) = a;
    let (rb, eb) = b;

    assert_eq!(ra.state(), rb.state());
    assert_eq!(
        ea.as_ref().map(|e| e.to_string()),
        eb.as_ref().map(|e| e.to_string())
    );

    // A failed request has no meaningful contents.
    if ea.is_none() {
        assert_eq!(ra.request_line(), rb.request_line());
        assert_eq!(ra.headers(), rb.headers());
        assert_eq!(ra.body(), rb.body());
    }
}

/// Hands out at most `chunk` bytes per read.
pub(crate) struct ChunkedReader<'a> {
    input: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    pub fn new(input: &'a [u8], chunk: usize) -> Self {
        ChunkedReader { input, chunk }
    }
}

impl io::Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.input.len());
        buf[..n].copy_from_slice(&self.input[..n]);
        self.input = &self.input[n..];
        Ok(n)
    }
}

/// Reads `input`, then fails with `kind` instead of ending.
pub(crate) struct FailingReader<'a> {
    input: &'a [u8],
    kind: io::ErrorKind,
}

impl<'a> FailingReader<'a> {
    pub fn new(input: &'a [u8], kind: io::ErrorKind) -> Self {
        FailingReader { input, kind }
    }
}

impl io::Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.input.is_empty() {
            return Err(io::Error::new(self.kind, "scripted failure"));
        }
        io::Read::read(&mut self.input, buf)
    }
}

/// Interrupts every other read.
pub(crate) struct InterruptingReader<'a> {
    input: &'a [u8],
    interrupt: bool,
}

impl<'a> InterruptingReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        InterruptingReader {
            input,
            interrupt: true,
        }
    }
}

impl io::Read for InterruptingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if !self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        let n = buf.len().min(3).min(self.input.len());
        buf[..n].copy_from_slice(&self.input[..n]);
        self.input = &self.input[n..];
        Ok(n)
    }
}

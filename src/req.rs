use std::fmt;

use crate::header::HeaderTable;
use crate::parser::parse_request_line;
use crate::util::{compare_lowercase_ascii, LengthChecker};
use crate::{Error, Result};

/// Method, target and version of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    pub(crate) method: String,
    pub(crate) target: String,
    pub(crate) version: String,
}

impl RequestLine {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target exactly as sent. Not decoded.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Always `1.1` for a parsed line.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Where a [`Request`] is in its parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for the request-line.
    Init,
    /// Reading header field lines.
    Headers,
    /// Reading a content-length delimited body.
    Body,
    /// Finished. Consumes no further input.
    Done,
    /// Failed. Every further call errors.
    Error,
}

/// An HTTP/1.1 request parsed incrementally.
///
/// ```
/// use h1feed::{Request, State};
///
/// let mut request = Request::new();
///
/// // Incomplete input is left unconsumed.
/// assert_eq!(request.feed(b"POST /submit HT").unwrap(), 0);
/// assert_eq!(request.state(), State::Init);
///
/// let input = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhel";
/// assert_eq!(request.feed(input).unwrap(), input.len());
/// assert_eq!(request.state(), State::Body);
///
/// assert_eq!(request.feed(b"lo").unwrap(), 2);
/// assert!(request.is_done());
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.header("content-length"), Some("5"));
/// assert_eq!(request.body(), b"hello");
/// ```
#[derive(Clone)]
pub struct Request {
    line: RequestLine,
    headers: HeaderTable,
    body: Vec<u8>,
    state: State,
    recv_checker: Option<LengthChecker>,
    max_body_size: Option<u64>,
}

impl Request {
    pub fn new() -> Self {
        Request {
            line: RequestLine::default(),
            headers: HeaderTable::new(),
            body: Vec::new(),
            state: State::Init,
            recv_checker: None,
            max_body_size: None,
        }
    }

    /// Reject requests declaring a content-length above `limit`.
    pub fn with_max_body_size(mut self, limit: u64) -> Self {
        self.max_body_size = Some(limit);
        self
    }

    /// Consume as much of `input` as the request can use.
    ///
    /// Returns the number of bytes consumed from the front of `input`. The
    /// caller must drop those bytes and present the rest, plus any new input,
    /// on the next call. A single call can move all the way from
    /// [`State::Init`] to [`State::Done`].
    ///
    /// Any error moves the request to [`State::Error`], after which every call
    /// fails with [`Error::ParserAlreadyFailed`].
    pub fn feed(&mut self, input: &[u8]) -> Result<usize> {
        let mut input_used = 0;

        loop {
            let src = &input[input_used..];

            let more = match self.state {
                State::Init => self.read_line(src, &mut input_used),
                State::Headers => self.read_headers(src, &mut input_used),
                State::Body => self.read_body(src, &mut input_used),
                State::Done => Ok(false),
                State::Error => return Err(Error::ParserAlreadyFailed),
            };

            match more {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    debug!("Request failed in {:?}: {}", self.state, e);
                    self.state = State::Error;
                    return Err(e);
                }
            }
        }

        Ok(input_used)
    }

    fn read_line(&mut self, src: &[u8], input_used: &mut usize) -> Result<bool> {
        let Some((line, n)) = parse_request_line(src)? else {
            return Ok(false);
        };

        trace!("Request line: {} {} HTTP/{}", line.method, line.target, line.version);

        self.line = line;
        *input_used += n;
        self.transition(State::Headers);

        Ok(true)
    }

    fn read_headers(&mut self, src: &[u8], input_used: &mut usize) -> Result<bool> {
        let (n, complete) = self.headers.parse(src)?;
        *input_used += n;

        if !complete {
            return Ok(false);
        }

        self.check_transfer_encoding()?;

        let length = self.content_length();

        if let Some(limit) = self.max_body_size {
            if length > limit {
                return Err(Error::BodyTooLarge { limit, length });
            }
        }

        if length > 0 {
            self.recv_checker = Some(LengthChecker::new(length));
            self.transition(State::Body);
        } else {
            self.transition(State::Done);
        }

        Ok(true)
    }

    fn read_body(&mut self, src: &[u8], input_used: &mut usize) -> Result<bool> {
        let checker = match &mut self.recv_checker {
            Some(c) if c.expected() > 0 => c,
            _ => return Err(Error::BodyWithoutLength),
        };

        let to_read = checker.take(src.len());

        self.body.extend_from_slice(&src[..to_read]);
        checker.append(to_read);
        *input_used += to_read;

        trace!("Read body: {} ({:?})", to_read, checker);

        if checker.complete() {
            self.transition(State::Done);
            return Ok(true);
        }

        Ok(to_read > 0)
    }

    fn check_transfer_encoding(&self) -> Result<()> {
        let Some(value) = self.headers.get("transfer-encoding") else {
            return Ok(());
        };

        let identity = value
            .split(',')
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .all(|v| compare_lowercase_ascii(v, "identity"));

        if !identity {
            debug!("Reject transfer-encoding: {}", value);
            return Err(Error::UnsupportedTransferEncoding(value.to_string()));
        }

        Ok(())
    }

    fn transition(&mut self, next: State) {
        trace!("State {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    pub fn is_failed(&self) -> bool {
        self.state == State::Error
    }

    /// Body length declared by the `Content-Length` header.
    ///
    /// Missing or non-numeric values count as `0`.
    pub fn content_length(&self) -> u64 {
        let Some(value) = self.headers.get("content-length") else {
            return 0;
        };

        match value.parse() {
            Ok(v) => v,
            Err(_) => {
                debug!("Ignore non-numeric content-length: {}", value);
                0
            }
        }
    }

    /// Number of body bytes received so far.
    pub fn body_received(&self) -> u64 {
        self.recv_checker.map(|c| c.handled()).unwrap_or(0)
    }

    /// The request-line. Empty until the request leaves [`State::Init`].
    pub fn request_line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> &str {
        self.line.method()
    }

    pub fn target(&self) -> &str {
        self.line.target()
    }

    pub fn version(&self) -> &str {
        self.line.version()
    }

    pub fn headers(&self) -> &HeaderTable {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    #[cfg(feature = "http_crate")]
    pub(crate) fn into_parts(self) -> (RequestLine, HeaderTable, Vec<u8>) {
        (self.line, self.headers, self.body)
    }
}

impl Default for Request {
    fn default() -> Self {
        Request::new()
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("state", &self.state)
            .field("line", &self.line)
            .field("headers", &self.headers)
            .field("body", &String::from_utf8_lossy(&self.body))
            .finish()
    }
}

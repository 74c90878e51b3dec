use std::io;

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Errors produced while reading a request.
///
/// Every variant is terminal for the [`Request`][crate::Request] that
/// produced it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed request-line")]
    MalformedRequestLine,

    #[error("malformed field line")]
    MalformedHeaderLine,

    #[error("malformed field name")]
    MalformedHeaderName,

    #[error("unsupported transfer-encoding: {0}")]
    UnsupportedTransferEncoding(String),

    /// Reached the body state without a usable content-length.
    ///
    /// This is a bug in the state machine, not in the input.
    #[error("body state entered without content-length")]
    BodyWithoutLength,

    #[error("content-length {length} exceeds body limit {limit}")]
    BodyTooLarge { limit: u64, length: u64 },

    #[error("request in error state")]
    ParserAlreadyFailed,

    #[error("unexpected end of input while parsing request")]
    UnexpectedEndOfInput,

    #[error("unexpected end of input: expected {expected} bytes in body, got {received}")]
    TruncatedBody { expected: u64, received: u64 },

    #[error("parser stuck: buffer full but no progress made")]
    NoProgress,

    #[error("unable to read from reader: {0}")]
    Read(#[from] io::Error),

    #[cfg(feature = "http_crate")]
    #[error("http: {0}")]
    Http(#[from] http::Error),
}

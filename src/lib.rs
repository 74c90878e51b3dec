//! Incremental HTTP/1.1 request parser.
//!
//! A [`Request`] is fed bytes as they arrive and consumes whatever prefix it
//! can use: the request-line, complete header lines, and body bytes up to the
//! `Content-Length`. Partial lines are left for the caller to present again
//! together with more input.
//!
//! [`read_request`] drives that loop over any `io::Read` using a fixed-size,
//! compacting buffer.
//!
//! ```
//! use h1feed::read_request;
//!
//! let input = b"POST /coffee HTTP/1.1\r\n\
//!     Host: localhost:42069\r\n\
//!     Content-Length: 4\r\n\
//!     \r\n\
//!     brew";
//!
//! let request = read_request(&input[..]).unwrap();
//!
//! assert_eq!(request.method(), "POST");
//! assert_eq!(request.target(), "/coffee");
//! assert_eq!(request.version(), "1.1");
//! assert_eq!(request.header("HOST"), Some("localhost:42069"));
//! assert_eq!(request.body(), b"brew");
//! ```
//!
//! Bodies are only framed by `Content-Length`. A request without it has no
//! body, and a non-identity `Transfer-Encoding` is rejected.

#[macro_use]
extern crate log;

mod util;

mod error;
pub use error::Error;
pub(crate) use error::Result;

mod header;
pub use header::{HeaderIter, HeaderTable};

mod parser;

mod req;
pub use req::{Request, RequestLine, State};

mod reader;
pub use reader::{read_request, read_request_with, Config};

#[cfg(feature = "http_crate")]
mod ext;

#[cfg(test)]
mod test;

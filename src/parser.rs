use std::str;

use crate::req::RequestLine;
use crate::util::{find_crlf, is_token, CRLF};
use crate::{Error, Result};

/// Parse `method SP request-target SP HTTP/1.1 CRLF`.
///
/// `Ok(None)` means no full line is available yet.
pub(crate) fn parse_request_line(src: &[u8]) -> Result<Option<(RequestLine, usize)>> {
    let Some(i) = find_crlf(src) else {
        return Ok(None);
    };

    let line = str::from_utf8(&src[..i]).map_err(|_| Error::MalformedRequestLine)?;

    let mut parts = line.split(' ');

    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::MalformedRequestLine);
    };

    if !is_token(method.as_bytes()) || target.is_empty() {
        return Err(Error::MalformedRequestLine);
    }

    let version = match version.split_once('/') {
        Some(("HTTP", v @ "1.1")) => v,
        _ => return Err(Error::MalformedRequestLine),
    };

    let line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    };

    Ok(Some((line, i + CRLF.len())))
}

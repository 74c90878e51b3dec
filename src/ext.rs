use http::Version;

use crate::{Error, Request};

impl TryFrom<Request> for http::Request<Vec<u8>> {
    type Error = Error;

    fn try_from(value: Request) -> Result<Self, Self::Error> {
        if !value.is_done() {
            return Err(Error::UnexpectedEndOfInput);
        }

        let (line, headers, body) = value.into_parts();

        let mut builder = http::Request::builder()
            .method(line.method())
            .uri(line.target())
            .version(Version::HTTP_11);

        // Folded values stay folded. http::HeaderMap keeps them as one entry.
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        Ok(builder.body(body)?)
    }
}

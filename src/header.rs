use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;
use std::str;

use crate::util::{find_crlf, is_token, trim_whitespace, CRLF};
use crate::{Error, Result};

/// Header fields of a request, keyed by lower-cased field name.
///
/// Repeated field names fold into one value joined by `,`, so
/// `Host: a` followed by `Host: b` reads back as `a,b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    fields: HashMap<String, String>,
}

impl HeaderTable {
    pub fn new() -> Self {
        HeaderTable::default()
    }

    /// Parse as many complete field lines from `input` as possible.
    ///
    /// Returns the number of bytes consumed and whether the blank line ending
    /// the header block was found. A trailing partial line is never consumed,
    /// so the caller drops the consumed prefix and calls again once more input
    /// has arrived.
    ///
    /// On error nothing parsed during this call is kept.
    pub fn parse(&mut self, input: &[u8]) -> Result<(usize, bool)> {
        let mut input_used = 0;
        let mut parsed = Vec::new();

        let complete = loop {
            let src = &input[input_used..];

            let Some(i) = find_crlf(src) else {
                break false;
            };

            if i == 0 {
                input_used += CRLF.len();
                break true;
            }

            parsed.push(parse_field_line(&src[..i])?);
            input_used += i + CRLF.len();
        };

        for (name, value) in parsed {
            self.set(name, value);
        }

        Ok((input_used, complete))
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Case-insensitive insert. A name already present gets `value` appended
    /// after a comma.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.entry(name.to_ascii_lowercase()) {
            Entry::Occupied(mut e) => {
                let v = e.get_mut();
                v.push(',');
                v.push_str(value);
            }
            Entry::Vacant(e) => {
                e.insert(value.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in no particular order. Names are lower case.
    pub fn iter(&self) -> HeaderIter<'_> {
        HeaderIter(self.fields.iter())
    }
}

pub struct HeaderIter<'a>(hash_map::Iter<'a, String, String>);

impl<'a> Iterator for HeaderIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a HeaderTable {
    type Item = (&'a str, &'a str);
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split `name: value` (without the CRLF).
fn parse_field_line(line: &[u8]) -> Result<(&str, &str)> {
    let colon = line
        .iter()
        .position(|c| *c == b':')
        .ok_or(Error::MalformedHeaderLine)?;

    let name = &line[..colon];
    let value = trim_whitespace(&line[colon + 1..]);

    // RFC 9112 5.1: no whitespace between field name and colon.
    if matches!(name.last(), Some(b' ' | b'\t')) {
        return Err(Error::MalformedHeaderLine);
    }

    if !is_token(name) {
        return Err(Error::MalformedHeaderName);
    }

    let name = str::from_utf8(name).map_err(|_| Error::MalformedHeaderName)?;
    let value = str::from_utf8(value).map_err(|_| Error::MalformedHeaderLine)?;

    Ok((name, value))
}

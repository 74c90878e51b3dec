use std::fmt;

pub(crate) const CRLF: &[u8] = b"\r\n";

/// Position of the first `\r\n` in `b`.
pub(crate) fn find_crlf(b: &[u8]) -> Option<usize> {
    b.windows(CRLF.len()).position(|w| w == CRLF)
}

/// tchar as defined in RFC 9110 5.6.2.
pub(crate) fn is_tchar(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// token = 1*tchar
pub(crate) fn is_token(b: &[u8]) -> bool {
    !b.is_empty() && b.iter().all(|c| is_tchar(*c))
}

pub(crate) fn trim_whitespace(mut b: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = b {
        if !first.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    while let [rest @ .., last] = b {
        if !last.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    b
}

pub(crate) fn compare_lowercase_ascii(a: &str, lowercased: &str) -> bool {
    if a.len() != lowercased.len() {
        return false;
    }

    for (a, b) in a.chars().zip(lowercased.chars()) {
        if !a.is_ascii() {
            return false;
        }
        let norm = a.to_ascii_lowercase();
        if norm != b {
            return false;
        }
    }

    true
}

/// Tracks how much of a content-length delimited body has arrived.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct LengthChecker {
    handled: u64,
    expected: u64,
}

impl LengthChecker {
    pub fn new(expected: u64) -> Self {
        LengthChecker {
            handled: 0,
            expected,
        }
    }

    /// How many of the `available` bytes belong to the body.
    pub fn take(&self, available: usize) -> usize {
        let left = self.left().min(usize::MAX as u64) as usize;
        left.min(available)
    }

    pub fn append(&mut self, amount: usize) {
        self.handled += amount as u64;
        debug_assert!(self.handled <= self.expected);
    }

    pub fn left(&self) -> u64 {
        self.expected - self.handled
    }

    pub fn handled(&self) -> u64 {
        self.handled
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    pub fn complete(&self) -> bool {
        self.handled == self.expected
    }
}

impl fmt::Debug for LengthChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LengthChecker")
            .field("handled", &self.handled)
            .field("expected", &self.expected)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_find_crlf() {
        assert_eq!(find_crlf(b""), None);
        assert_eq!(find_crlf(b"\r"), None);
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b" \r"), None);
        assert_eq!(find_crlf(b" \r\n"), Some(1));
        // A lone \r earlier in the line does not hide the delimiter.
        assert_eq!(find_crlf(b"a\rb\r\n"), Some(3));
    }

    #[test]
    fn token_bytes() {
        for c in [b'a', b'z', b'A', b'Z', b'0', b'9', b'!', b'~', b'`', b'|'] {
            assert!(is_tchar(c), "{}", c as char);
        }
        for c in [b' ', b'\t', b':', b'(', b'"', b'/', b'@', 0x7f, 0xc2] {
            assert!(!is_tchar(c), "{:#x}", c);
        }
        assert!(is_token(b"Content-Length"));
        assert!(!is_token(b""));
        assert!(!is_token(b"Bad Name"));
    }

    #[test]
    fn trim() {
        assert_eq!(trim_whitespace(b"  barbar \t "), b"barbar");
        assert_eq!(trim_whitespace(b"a  b"), b"a  b");
        assert_eq!(trim_whitespace(b"   "), b"");
        assert_eq!(trim_whitespace(b""), b"");
    }

    #[test]
    fn lowercase_compare() {
        assert!(compare_lowercase_ascii("Chunked", "chunked"));
        assert!(compare_lowercase_ascii("IDENTITY", "identity"));
        assert!(!compare_lowercase_ascii("gzip", "chunked"));
        assert!(!compare_lowercase_ascii("chunke", "chunked"));
    }

    #[test]
    fn length_checker() {
        let mut c = LengthChecker::new(5);
        assert_eq!(c.take(3), 3);
        c.append(3);
        assert!(!c.complete());
        assert_eq!(c.left(), 2);
        assert_eq!(c.take(10), 2);
        c.append(2);
        assert!(c.complete());
        assert_eq!(c.handled(), 5);
        assert_eq!(c.take(10), 0);
    }
}

#![no_main]

use std::io;

use h1feed::{read_request_with, Config, Request};
use libfuzzer_sys::fuzz_target;

struct Chunks<'a>(&'a [u8], usize);

impl io::Read for Chunks<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.1.min(buf.len()).min(self.0.len());
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];
        Ok(n)
    }
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the read size for the buffered loop.
    let Some((chunk, data)) = data.split_first() else {
        return;
    };
    let chunk = (*chunk as usize).max(1);

    let mut once = Request::new();
    let once_res = once.feed(data);

    let mut bytewise = Request::new();
    let mut buf = Vec::new();
    let mut bytewise_res = Ok(0);
    for b in data {
        buf.push(*b);
        bytewise_res = bytewise.feed(&buf);
        match &bytewise_res {
            Ok(n) => {
                buf.drain(..*n);
            }
            Err(_) => break,
        }
    }

    assert_eq!(once.state(), bytewise.state());
    assert_eq!(once_res.is_err(), bytewise_res.is_err());

    if once.is_done() {
        assert_eq!(once.request_line(), bytewise.request_line());
        assert_eq!(once.headers(), bytewise.headers());
        assert_eq!(once.body(), bytewise.body());
    }

    // The buffered loop must agree with a single feed whenever the input
    // fits the buffer.
    let config = Config::new().buffer_size(64);
    let looped = read_request_with(Chunks(data, chunk), &config);
    if data.len() <= 64 {
        match looped {
            Ok(r) => {
                assert!(once.is_done());
                assert_eq!(r.request_line(), once.request_line());
                assert_eq!(r.body(), once.body());
            }
            Err(_) => assert!(!once.is_done()),
        }
    }
});

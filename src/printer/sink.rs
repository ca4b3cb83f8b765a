//! Buffered output sink
//!
//! Collects printed bytes in a pooled buffer and hands them to the caller's
//! writer in chunks. The first write error is kept and every later write
//! becomes a no-op, so the traversal can run to completion regardless.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::printer::types::{FLUSH_THRESHOLD, MAX_POOLED_BUFFERS, MAX_POOLED_CAPACITY};

lazy_static::lazy_static! {
    /// Idle output buffers shared by concurrent prints
    static ref BUFFER_POOL: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());
}

fn checkout_buffer() -> Vec<u8> {
    let reused = BUFFER_POOL.lock().ok().and_then(|mut pool| pool.pop());
    match reused {
        Some(mut buf) => {
            buf.clear();
            buf
        }
        None => Vec::with_capacity(FLUSH_THRESHOLD),
    }
}

fn return_buffer(mut buf: Vec<u8>) {
    if buf.capacity() > MAX_POOLED_CAPACITY {
        return;
    }
    buf.clear();
    if let Ok(mut pool) = BUFFER_POOL.lock() {
        if pool.len() < MAX_POOLED_BUFFERS {
            pool.push(buf);
        }
    }
}

pub(crate) struct Sink<'w> {
    buf: Vec<u8>,
    /// None for scratch sinks that only measure
    inner: Option<&'w mut dyn Write>,
    err: Option<io::Error>,
}

impl<'w> Sink<'w> {
    /// Sink writing through to `inner`, backed by a pooled buffer.
    pub fn pooled(inner: &'w mut dyn Write) -> Self {
        Self {
            buf: checkout_buffer(),
            inner: Some(inner),
            err: None,
        }
    }

    /// In-memory sink whose contents are read back by the caller.
    pub fn scratch() -> Sink<'static> {
        Sink {
            buf: Vec::new(),
            inner: None,
            err: None,
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn write_byte(&mut self, b: u8) {
        self.write_bytes(&[b]);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.err.is_some() {
            return;
        }
        self.buf.extend_from_slice(bytes);
        if self.inner.is_some() && self.buf.len() >= FLUSH_THRESHOLD {
            self.flush_buffer();
        }
    }

    fn flush_buffer(&mut self) {
        if let Some(inner) = self.inner.as_mut() {
            if self.err.is_none() && !self.buf.is_empty() {
                if let Err(e) = inner.write_all(&self.buf) {
                    log::warn!("printer sink write failed: {}", e);
                    self.err = Some(e);
                }
            }
            self.buf.clear();
        }
    }

    /// Bytes held by a scratch sink.
    pub fn contents(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.buf
    }

    /// Flush everything to the inner writer and release the buffer.
    pub fn finish(mut self) -> io::Result<()> {
        self.flush_buffer();
        if self.err.is_none() {
            if let Some(inner) = self.inner.as_mut() {
                if let Err(e) = inner.flush() {
                    log::warn!("printer sink flush failed: {}", e);
                    self.err = Some(e);
                }
            }
        }
        let Sink { buf, inner, err } = self;
        if inner.is_some() {
            return_buffer(buf);
        }
        match err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter {
        attempts: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_scratch_sink_keeps_bytes() {
        let mut sink = Sink::scratch();
        sink.write_str("echo");
        sink.write_byte(b' ');
        sink.write_str("hi");
        assert_eq!(sink.contents(), b"echo hi");
    }

    #[test]
    fn test_pooled_sink_writes_through() {
        let mut out: Vec<u8> = Vec::new();
        let mut sink = Sink::pooled(&mut out);
        for _ in 0..FLUSH_THRESHOLD {
            sink.write_byte(b'x');
        }
        sink.write_str("tail");
        sink.finish().unwrap();
        assert_eq!(out.len(), FLUSH_THRESHOLD + 4);
        assert!(out.ends_with(b"xtail"));
    }

    #[test]
    fn test_first_error_is_kept_and_later_writes_skipped() {
        let mut w = FailingWriter { attempts: 0 };
        {
            let mut sink = Sink::pooled(&mut w);
            for _ in 0..(FLUSH_THRESHOLD * 3) {
                sink.write_byte(b'x');
            }
            let err = sink.finish().unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        }
        assert_eq!(w.attempts, 1);
    }

    #[test]
    fn test_reused_buffer_starts_empty() {
        let mut first: Vec<u8> = Vec::new();
        let mut sink = Sink::pooled(&mut first);
        sink.write_str("leftover");
        sink.finish().unwrap();

        let mut second: Vec<u8> = Vec::new();
        let sink = Sink::pooled(&mut second);
        assert!(sink.contents().is_empty());
        sink.finish().unwrap();
        assert!(second.is_empty());
    }
}

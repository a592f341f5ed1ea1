//! Physical line splitting.
use std::io::BufRead;

/// Forward-only iterator over the lines of a byte stream.
///
/// Lines are yielded as raw bytes, without their `\n` terminator, and without a trailing `\r` if any.
/// No UTF-8 validation is done here.
///
/// The iterator ends after the first read error.
pub struct LineScanner<R> {
    inner: R,
    done: bool,
    nb_lines: u64,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            done: false,
            nb_lines: 0,
        }
    }

    /// Number of lines yielded so far.
    pub fn nb_lines(&self) -> u64 {
        self.nb_lines
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = Vec::with_capacity(256);
        match self.inner.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                self.nb_lines += 1;
                Some(Ok(buf))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

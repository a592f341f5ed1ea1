//! Statement assembly.
//!
//! A statement spans one or more lines, and ends at the first non-empty line whose last character is a period.
use log::debug;

/// `true` if `line` ends a statement.
#[inline]
pub fn is_boundary(line: &[u8]) -> bool {
    line.last() == Some(&b'.')
}

/// Iterator over statements, built on an iterator over lines.
///
/// Each yielded statement holds its lines as raw bytes, each one followed by `\n`.
/// The internal buffer is emptied on every boundary.
///
/// Content after the last boundary (a statement without its final period) is dropped when input ends.
/// A line read error is yielded once, and ends the iteration.
pub struct Statements<I> {
    lines: I,
    buffer: Vec<u8>,
    nb_lines: u64,
    nb_statements: u64,
    dropped_bytes: u64,
    done: bool,
}

impl<I> Statements<I>
where
    I: Iterator<Item = std::io::Result<Vec<u8>>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            buffer: Vec::new(),
            nb_lines: 0,
            nb_statements: 0,
            dropped_bytes: 0,
            done: false,
        }
    }

    /// Number of lines read so far.
    pub fn nb_lines(&self) -> u64 {
        self.nb_lines
    }

    /// Number of statements yielded so far.
    pub fn nb_statements(&self) -> u64 {
        self.nb_statements
    }

    /// Size of the dropped unterminated statement, if any.
    pub fn dropped_bytes(&self) -> u64 {
        self.dropped_bytes
    }

    fn drop_partial(&mut self) {
        if !self.buffer.is_empty() {
            debug!(
                "dropping unterminated statement ({} bytes)",
                self.buffer.len()
            );
            self.dropped_bytes += self.buffer.len() as u64;
            self.buffer.clear();
        }
    }
}

impl<I> Iterator for Statements<I>
where
    I: Iterator<Item = std::io::Result<Vec<u8>>>,
{
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.nb_lines += 1;
                    self.buffer.extend_from_slice(&line);
                    self.buffer.push(b'\n');

                    if is_boundary(&line) {
                        self.nb_statements += 1;
                        return Some(Ok(std::mem::take(&mut self.buffer)));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    self.drop_partial();
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    self.drop_partial();
                    return None;
                }
            }
        }
    }
}

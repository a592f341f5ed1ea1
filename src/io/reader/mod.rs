/*! Input reading utilities

[Source] opens the dump (stdin, gzip, bzip2 or raw file) and [LineScanner] cuts it into physical lines.
!*/
mod lines;
mod source;

pub use lines::LineScanner;
pub use source::Source;

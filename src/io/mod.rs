/*!
# IO utilities

Reading of (possibly compressed) dumps as a stream of lines, and writing of accepted statements into rotating gzip shards.
!*/
pub mod reader;
pub mod writer;

pub use reader::{LineScanner, Source};
pub use writer::ShardWriter;

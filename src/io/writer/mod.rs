/*!
# Rotating shard writing

[ShardWriter] holds a single gzip stream at a time and rotates to a new file every `chunk_size` statements.
Each produced file is an independent gzip stream.
!*/
mod shard;

pub use shard::ShardWriter;

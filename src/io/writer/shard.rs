//! Rotating gzip shard writer.
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Error;

type Encoder = GzEncoder<BufWriter<File>>;

/// Rotating shard writer.
///
/// Holds a statement (not byte) limit: every `chunk_size` written statements, the current shard is finalized
/// and the following write lands into `output_<index+1>.gz`.
///
/// The first shard is opened on creation. Following ones are opened by the first write after a rotation,
/// so that no trailing empty shard is left when the statement count is a multiple of `chunk_size`.
///
/// The per-shard counter is reset to 0 on each rotation.
///
/// Write and close errors ([Error::ShardWrite], [Error::ShardFinalize]) are returned but leave the writer
/// usable: a shard that failed to close is given up, and the next write goes to the following index.
/// Only failing to create a shard file is fatal.
pub struct ShardWriter {
    dst: PathBuf,
    chunk_size: u64,
    compression: Compression,
    current: Option<Encoder>,
    index: u64,
    count: u64,
    nb_shards: u64,
    total: u64,
}

impl ShardWriter {
    /// Create a new [ShardWriter] writing in `dst` (that must exist), and open shard 0.
    ///
    /// Failing to create the first shard is an error.
    pub fn new(dst: &Path, chunk_size: u64, compression: Compression) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be at least 1".to_string()));
        }
        let mut sw = Self {
            dst: dst.to_path_buf(),
            chunk_size,
            compression,
            current: None,
            index: 0,
            count: 0,
            nb_shards: 0,
            total: 0,
        };
        sw.open()?;
        Ok(sw)
    }

    /// Path of shard `index` in `dst`.
    pub fn shard_path(dst: &Path, index: u64) -> PathBuf {
        dst.join(format!("output_{}.gz", index))
    }

    fn open(&mut self) -> Result<(), Error> {
        let path = Self::shard_path(&self.dst, self.index);
        info!("creating {:?}", path);
        let file = File::create(&path).map_err(|source| Error::ShardOpen {
            index: self.index,
            source,
        })?;
        self.current = Some(GzEncoder::new(BufWriter::new(file), self.compression));
        self.nb_shards += 1;
        Ok(())
    }

    /// Write the gzip trailer, flush and close the current shard, if any.
    ///
    /// The shard is released even if closing fails.
    fn finalize(&mut self) -> Result<(), Error> {
        if let Some(encoder) = self.current.take() {
            let index = self.index;
            let to_error = |source| Error::ShardFinalize { index, source };
            let mut inner = encoder.finish().map_err(to_error)?;
            inner.flush().map_err(to_error)?;
            debug!("closed shard {} ({} statements)", index, self.count);
        }
        Ok(())
    }

    /// Write a statement into the current shard.
    ///
    /// A failed write is returned as [Error::ShardWrite] and is recoverable: the statement
    /// still counts towards rotation and the writer stays usable.
    /// If the write fills the shard and closing it fails, [Error::ShardFinalize] is returned.
    /// Errors when opening shards are not recoverable.
    pub fn write(&mut self, statement: &[u8]) -> Result<(), Error> {
        if self.current.is_none() {
            self.open()?;
        }

        let index = self.index;
        let written = match &mut self.current {
            Some(encoder) => encoder
                .write_all(statement)
                .map_err(|source| Error::ShardWrite { index, source }),
            None => Err(Error::Custom(format!("no open shard for chunk {}", index))),
        };

        self.count += 1;
        self.total += 1;

        if self.count % self.chunk_size == 0 {
            let rotated = self.rotate();
            return match (written, rotated) {
                (Err(e), Err(closing)) => {
                    warn!("{}", closing);
                    Err(e)
                }
                (written, rotated) => written.and(rotated),
            };
        }

        written
    }

    /// Close the current shard, and make the next write open the following one.
    ///
    /// The index moves forward even if closing fails, so a broken shard is never reopened.
    fn rotate(&mut self) -> Result<(), Error> {
        debug!(
            "shard {} reached {} statements, rotating",
            self.index, self.count
        );
        let closed = self.finalize();
        self.index += 1;
        self.count = 0;
        closed
    }

    /// Finalize the open shard (even if empty) and return the number of created shards.
    ///
    /// Calling it again is a no-op.
    pub fn finish(&mut self) -> Result<u64, Error> {
        self.finalize()?;
        Ok(self.nb_shards)
    }

    /// Number of shard files created so far.
    pub fn nb_shards(&self) -> u64 {
        self.nb_shards
    }

    /// Index of the shard the next statement goes to.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Number of statements in the current shard.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of statements written since creation.
    pub fn total(&self) -> u64 {
        self.total
    }
}

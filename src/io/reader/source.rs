//! Dump source selection.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use log::{debug, info};

use crate::error::Error;

/// Where the dump comes from.
///
/// Stdin is assumed to be already decompressed.
/// Files are decompressed according to their (case insensitive) extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    Gzip,
    Bzip2,
    Raw,
}

impl Compression {
    fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("gz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            _ => Compression::Raw,
        }
    }
}

impl Source {
    /// [Source::Stdin] if `path` is `None`, [Source::File] otherwise.
    pub fn from_path(path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => Source::File(p.clone()),
            None => Source::Stdin,
        }
    }

    /// Open the source as a buffered byte stream.
    ///
    /// Fails if the file does not exist or can't be read.
    /// A gzip file with a broken header is reported here too; other decoding errors
    /// surface later, while reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>, Error> {
        match self {
            Source::Stdin => {
                info!("reading from stdin");
                Ok(Box::new(BufReader::new(std::io::stdin())))
            }
            Source::File(path) => {
                let file = File::open(path).map_err(|e| Error::Source(path.clone(), e))?;
                let compression = Compression::from_path(path);
                info!("reading {:?} ({:?})", path, compression);

                let reader: Box<dyn BufRead> = match compression {
                    Compression::Gzip => {
                        let mut gz = BufReader::new(MultiGzDecoder::new(BufReader::new(file)));
                        // fill the buffer to catch invalid headers before processing starts
                        gz.fill_buf().map_err(|e| Error::Source(path.clone(), e))?;
                        Box::new(gz)
                    }
                    Compression::Bzip2 => {
                        Box::new(BufReader::new(MultiBzDecoder::new(BufReader::new(file))))
                    }
                    Compression::Raw => Box::new(BufReader::new(file)),
                };
                debug!("opened {:?}", path);
                Ok(reader)
            }
        }
    }
}

//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Input could not be opened or its compression header is invalid.
    Source(PathBuf, std::io::Error),
    OutputDir(PathBuf, std::io::Error),
    ShardOpen {
        index: u64,
        source: std::io::Error,
    },
    ShardWrite {
        index: u64,
        source: std::io::Error,
    },
    ShardFinalize {
        index: u64,
        source: std::io::Error,
    },
    /// Statement content could not be decoded as triples.
    Decode(String),
    Config(String),
    Custom(String),
}

impl Error {
    /// Per-item failures: the run logs them and goes on with the next statement.
    ///
    /// Shard output is buffered, so a failing disk usually shows up when a shard is closed:
    /// closing errors are write errors too.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ShardWrite { .. } | Error::ShardFinalize { .. } | Error::Decode(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Source(path, e) => write!(f, "error opening input {:?}: {}", path, e),
            Error::OutputDir(path, e) => {
                write!(f, "failed to create output directory {:?}: {}", path, e)
            }
            Error::ShardOpen { index, source } => {
                write!(f, "error creating output file for chunk {}: {}", index, source)
            }
            Error::ShardWrite { index, source } => {
                write!(f, "error writing block to chunk {}: {}", index, source)
            }
            Error::ShardFinalize { index, source } => {
                write!(f, "error closing chunk {}: {}", index, source)
            }
            Error::Decode(msg) => write!(f, "error decoding statement: {}", msg),
            Error::Config(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) | Error::Source(_, e) | Error::OutputDir(_, e) => Some(e),
            Error::ShardOpen { source, .. }
            | Error::ShardWrite { source, .. }
            | Error::ShardFinalize { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

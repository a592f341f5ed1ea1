//! Run configuration.
//!
//! A [PipelineConfig] is built once (usually from [crate::cli::Processor]) and is read-only afterwards.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use flate2::Compression;
use log::{debug, warn};
use oxilangtag::LanguageTag;

use crate::error::Error;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_OUTPUT: &str = "output";
pub const DEFAULT_CHUNK_SIZE: u64 = 3_000_000;

/// Statement filtering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Trailing `@tag .` regex, keeps untagged statements.
    Tag,
    /// Turtle decoding, label predicates only, deduplicated.
    Triples,
    /// Regex rewrite of label/description entries inside a block.
    Labels,
}

impl FilterKind {
    pub const VARIANTS: [&'static str; 3] = ["tag", "triples", "labels"];
}

impl Default for FilterKind {
    fn default() -> Self {
        FilterKind::Tag
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" => Ok(FilterKind::Tag),
            "triples" => Ok(FilterKind::Triples),
            "labels" => Ok(FilterKind::Labels),
            other => Err(Error::Config(format!(
                "unknown filter {:?}, expected one of {:?}",
                other,
                Self::VARIANTS
            ))),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Tag => "tag",
            FilterKind::Triples => "triples",
            FilterKind::Labels => "labels",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    language: String,
    dst: PathBuf,
    chunk_size: u64,
    filter: FilterKind,
    compression: Compression,
}

impl PipelineConfig {
    /// Create and validate a configuration.
    ///
    /// `chunk_size` is the number of accepted statements per shard and must be > 0.
    /// The language is compared byte for byte later on. A tag that is not valid BCP 47 is kept but warned about.
    pub fn new(language: &str, dst: PathBuf, chunk_size: u64) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be at least 1".to_string()));
        }
        if language.is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        if let Err(e) = LanguageTag::parse(language) {
            warn!(
                "language {:?} is not a well-formed language tag ({}), matching it verbatim",
                language, e
            );
        }

        let config = Self {
            language: language.to_string(),
            dst,
            chunk_size,
            filter: FilterKind::default(),
            compression: Compression::default(),
        };
        debug!("pipeline config: {:?}", config);
        Ok(config)
    }

    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    /// Set gzip level (0-9).
    pub fn with_level(mut self, level: u32) -> Result<Self, Error> {
        if level > 9 {
            return Err(Error::Config(format!(
                "compression level {} is out of range 0-9",
                level
            )));
        }
        self.compression = Compression::new(level);
        Ok(self)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn dst(&self) -> &PathBuf {
        &self.dst
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            dst: PathBuf::from(DEFAULT_OUTPUT),
            chunk_size: DEFAULT_CHUNK_SIZE,
            filter: FilterKind::default(),
            compression: Compression::default(),
        }
    }
}

impl TryFrom<&crate::cli::Processor> for PipelineConfig {
    type Error = Error;

    fn try_from(opt: &crate::cli::Processor) -> Result<Self, Self::Error> {
        PipelineConfig::new(&opt.language, opt.output.clone(), opt.chunk_size)?
            .with_filter(opt.filter)
            .with_level(opt.level)
    }
}

//! Language filtering and sharding pipeline.
//!
//! # Processing
//! 1. The source is opened (and decompressed if needed) and split into lines.
//! 1. Lines are assembled into statements (see [crate::processing::Statements]).
//! 1. Each statement goes through the configured [StatementFilter].
//! 1. Accepted output is written into gzip shards of `chunk_size` statements each.
//!
//! Everything happens sequentially, in input order.
//! Only setup errors (input, output directory, shard creation) stop the run:
//! write errors (including failing to close a shard) and decode errors are logged and counted in [RunStats].
use std::fmt;
use std::io::BufRead;

use log::{debug, error, info};

use crate::config::PipelineConfig;
use crate::error::Error;
use crate::filtering::{self, StatementFilter};
use crate::io::{LineScanner, ShardWriter, Source};
use crate::pipelines::pipeline::Pipeline;
use crate::processing::Statements;

/// Counters of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub lines: u64,
    pub statements: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub decode_errors: u64,
    pub write_errors: u64,
    pub read_errors: u64,
    pub dropped_bytes: u64,
    pub shards: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} statements ({} accepted, {} rejected, {} decode errors), {} write errors, {} read errors, {} bytes dropped, {} shards",
            self.lines,
            self.statements,
            self.accepted,
            self.rejected,
            self.decode_errors,
            self.write_errors,
            self.read_errors,
            self.dropped_bytes,
            self.shards
        )
    }
}

pub struct LangFilter {
    config: PipelineConfig,
    source: Source,
}

impl LangFilter {
    pub fn new(config: PipelineConfig, source: Source) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn prepare_dst(&self) -> Result<(), Error> {
        let dst = self.config.dst();
        std::fs::create_dir_all(dst).map_err(|e| Error::OutputDir(dst.clone(), e))?;
        debug!("output directory {:?} ready", dst);
        Ok(())
    }

    /// Process `reader` with the configured filter.
    ///
    /// The destination directory has to exist.
    pub fn process<R: BufRead>(&self, reader: R) -> Result<RunStats, Error> {
        let filter = filtering::from_kind(self.config.filter(), self.config.language());
        self.process_with(reader, filter)
    }

    /// Process `reader` with a custom filter.
    pub fn process_with<R, F>(&self, reader: R, mut filter: F) -> Result<RunStats, Error>
    where
        R: BufRead,
        F: StatementFilter,
    {
        let mut shards = ShardWriter::new(
            self.config.dst(),
            self.config.chunk_size(),
            self.config.compression(),
        )?;
        let mut statements = Statements::new(LineScanner::new(reader));
        let mut stats = RunStats::default();

        for statement in statements.by_ref() {
            let statement = match statement {
                Ok(s) => s,
                Err(e) => {
                    error!("Error reading input: {}", e);
                    stats.read_errors += 1;
                    break;
                }
            };

            match filter.apply(&statement) {
                Ok(Some(out)) => {
                    stats.accepted += 1;
                    match shards.write(&out) {
                        Ok(()) => (),
                        Err(e) if e.is_recoverable() => {
                            error!("{}", e);
                            stats.write_errors += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(None) => stats.rejected += 1,
                Err(e) if e.is_recoverable() => {
                    error!("{} (statement {})", e, statements_seen(&stats));
                    stats.decode_errors += 1;
                }
                Err(e) => return Err(e),
            }
        }

        stats.lines = statements.nb_lines();
        stats.statements = statements.nb_statements();
        stats.dropped_bytes = statements.dropped_bytes();
        stats.shards = match shards.finish() {
            Ok(nb_shards) => nb_shards,
            Err(e) if e.is_recoverable() => {
                error!("{}", e);
                stats.write_errors += 1;
                shards.nb_shards()
            }
            Err(e) => return Err(e),
        };

        Ok(stats)
    }
}

/// 1-based position of the statement being processed.
fn statements_seen(stats: &RunStats) -> u64 {
    stats.accepted + stats.rejected + stats.decode_errors + 1
}

impl Pipeline<RunStats> for LangFilter {
    /// Create the destination directory, open the source and process it.
    fn run(&self) -> Result<RunStats, Error> {
        info!(
            "filtering {:?} on language {:?} into {:?} ({} statements per chunk, {} filter)",
            self.source,
            self.config.language(),
            self.config.dst(),
            self.config.chunk_size(),
            self.config.filter()
        );
        self.prepare_dst()?;
        let reader = self.source.open()?;
        let stats = self.process(reader)?;
        info!("Processing completed: {}", stats);
        Ok(stats)
    }
}

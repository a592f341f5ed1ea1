//! # wikidata-processor
//!
//! Filters a (possibly compressed) Turtle/N-Triples dump by language,
//! and splits the result into gzip shards of a fixed number of statements.
//!
//! ## Getting started
//!
//! ```sh
//! # keep english statements of a dump, 1M statements per shard
//! wikidata-processor -l en -s 1000000 -o out latest-all.ttl.gz
//!
//! # read from stdin
//! zcat latest-all.ttl.gz | wikidata-processor -l fr --
//! ```
//!
//! Logging is controlled by `RUST_LOG` (e.g. `RUST_LOG=info`).

use structopt::StructOpt;
use wikidata_processor::{
    cli,
    config::PipelineConfig,
    error::Error,
    io::Source,
    pipelines::{LangFilter, Pipeline},
};

#[macro_use]
extern crate log;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Processor::from_args();
    debug!("cli args\n{:#?}", opt);

    let input = opt.checked_input(std::env::args_os())?;
    if let Some(input) = input {
        if !input.exists() {
            return Err(Error::Custom(format!(
                "input file does not exist: {}",
                input.display()
            )));
        }
    }

    let config = PipelineConfig::try_from(&opt)?;
    let source = Source::from_path(input);

    let p = LangFilter::new(config, source);
    if let Err(e) = p.run() {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

//! Command line arguments and parameters management/parsing.
use std::ffi::OsStr;
use std::path::PathBuf;

use structopt::StructOpt;

use crate::config::FilterKind;
use crate::error::Error;

/// Filter a Turtle/N-Triples dump by language and split it into gzip shards.
///
/// ```sh
/// wikidata-processor 0.1.0
/// Wikidata RDF processor
///
/// USAGE:
///     wikidata-processor [OPTIONS] [input]
///
/// FLAGS:
///     -h, --help       Prints help information
///     -V, --version    Prints version information
///
/// OPTIONS:
///     -s, --chunksize <chunk-size>    Select chunk size for splits [default: 3000000]
///     -f, --filter <filter>           Filtering strategy [default: tag]  [possible values: tag, triples, labels]
///     -l, --language <language>       Select which language should be filtered [default: en]
///         --level <level>             gzip compression level of the output shards [default: 6]
///     -o, --output <output>           Select output directory [default: output]
///
/// ARGS:
///     <input>    input file (.gz, .bz2 or raw), or -- (or -) to read from stdin
/// ```
#[derive(Debug, StructOpt)]
#[structopt(name = "wikidata-processor", about = "Wikidata RDF processor")]
pub struct Processor {
    #[structopt(
        short = "l",
        long = "language",
        help = "Select which language should be filtered",
        default_value = "en"
    )]
    pub language: String,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        help = "Select output directory",
        default_value = "output"
    )]
    pub output: PathBuf,
    #[structopt(
        short = "s",
        long = "chunksize",
        help = "Select chunk size for splits",
        default_value = "3000000"
    )]
    pub chunk_size: u64,
    #[structopt(
        short = "f",
        long = "filter",
        help = "Filtering strategy",
        default_value = "tag",
        possible_values = &FilterKind::VARIANTS
    )]
    pub filter: FilterKind,
    #[structopt(
        long = "level",
        help = "gzip compression level of the output shards",
        default_value = "6"
    )]
    pub level: u32,
    #[structopt(
        parse(from_os_str),
        help = "input file (.gz, .bz2 or raw), or -- (or -) to read from stdin"
    )]
    pub input: Option<PathBuf>,
}

impl Processor {
    /// Input file path, or `None` when reading from stdin.
    pub fn input_file(&self) -> Option<&PathBuf> {
        self.input
            .as_ref()
            .filter(|p| p.as_os_str() != "--" && p.as_os_str() != "-")
    }

    /// Check that an input has been given, and return it (see [Processor::input_file]).
    ///
    /// A bare `--` is eaten by the argument parser, so the raw command line `args` is looked at
    /// to tell it apart from a missing input.
    pub fn checked_input<I, S>(&self, args: I) -> Result<Option<&PathBuf>, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        if self.input.is_some() || args.into_iter().skip(1).any(|a| a.as_ref() == "--") {
            Ok(self.input_file())
        } else {
            Err(Error::Config(
                "no input provided; use '--' to read from stdin or provide an input file"
                    .to_string(),
            ))
        }
    }
}

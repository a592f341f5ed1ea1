//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait, implemented by [LangFilter].
pub mod langfilter;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use langfilter::{LangFilter, RunStats};
pub use pipeline::Pipeline;

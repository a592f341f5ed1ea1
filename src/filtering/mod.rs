/*! Filtering utilities

Filters operate on complete statements, as yielded by [crate::processing::Statements].

Every strategy implements [filter::StatementFilter]:
- [TrailingTag] keeps statements whose trailing `@tag .` matches the target language, or that have none,
- [TripleFilter] decodes statements as Turtle and keeps label-like triples in the target language,
- [LabelRewrite] removes label-like entries in other languages from multi-line blocks.

[TrailingTag] also implements the simpler [filter::Filter], as its decision is a pure boolean.
! */
mod filter;
mod labels;
mod tag;
mod triples;

pub use filter::Filter;
pub use filter::StatementFilter;
pub use labels::LabelRewrite;
pub use tag::TrailingTag;
pub use triples::{TripleFilter, LABEL_PREDICATES};

use crate::config::FilterKind;

/// Build the strategy matching `kind`, targeting `language`.
pub fn from_kind(kind: FilterKind, language: &str) -> Box<dyn StatementFilter> {
    match kind {
        FilterKind::Tag => Box::new(TrailingTag::new(language)),
        FilterKind::Triples => Box::new(TripleFilter::new(language)),
        FilterKind::Labels => Box::new(LabelRewrite::new(language)),
    }
}

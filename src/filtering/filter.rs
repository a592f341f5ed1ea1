//! Filtering traits.
use std::borrow::Cow;

use crate::error::Error;

/// immutable, pure filter (2 successive equal inputs -> 2 equal outputs)
pub trait Filter<T> {
    fn detect(&self, item: T) -> bool;
}

/// Statement-level filtering strategy.
///
/// Gets a complete statement (raw bytes of its lines and their terminators) and returns what has to be written:
/// - `Ok(None)` if the statement is rejected,
/// - `Ok(Some(_))` with either the statement itself or a rewritten version of it.
///
/// Statements are not guaranteed to be valid UTF-8: strategies that need text report invalid input
/// as [Error::Decode].
///
/// Strategies take `&mut self` since some of them learn from the stream (see [super::TripleFilter]).
pub trait StatementFilter {
    fn apply<'a>(&mut self, statement: &'a [u8]) -> Result<Option<Cow<'a, [u8]>>, Error>;
}

impl<F: StatementFilter + ?Sized> StatementFilter for Box<F> {
    fn apply<'a>(&mut self, statement: &'a [u8]) -> Result<Option<Cow<'a, [u8]>>, Error> {
        (**self).apply(statement)
    }
}

/// View a statement as text, for strategies working on `str`.
pub(crate) fn as_text(statement: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(statement).map_err(|e| Error::Decode(format!("invalid UTF-8: {}", e)))
}

//! Trailing language tag filtering.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::bytes::Regex;

use super::filter::{Filter, StatementFilter};
use crate::error::Error;

lazy_static! {
    /// `@tag .` at the very end of the statement.
    static ref TRAILING_TAG: Regex = Regex::new(r"@([^ ]+) \.$").unwrap();
}

/// Keeps statements whose trailing language tag is the target one.
///
/// Statements without a trailing tag (IRIs, typed literals, prefix declarations...) are kept too.
/// Tag comparison is exact: `en` does not match `en-gb` nor `EN`.
///
/// Matching is done on raw bytes, so accepted statements are written back untouched.
///
/// The tag starts at the first `@` of the last space-free run before ` .`. A literal holding an `@`
/// with no space after it (`"mail@example.org"@en .`) yields `example.org"@en`, which never equals
/// the target language, so such statements are dropped.
#[derive(Debug, Clone)]
pub struct TrailingTag {
    language: String,
}

impl TrailingTag {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Get the trailing tag of a statement, if there's one.
    ///
    /// The final line terminators of the statement are ignored.
    pub fn tag(statement: &[u8]) -> Option<&[u8]> {
        let end = statement
            .iter()
            .rposition(|b| *b != b'\n' && *b != b'\r')
            .map_or(0, |i| i + 1);
        TRAILING_TAG
            .captures(&statement[..end])
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_bytes())
    }
}

impl Filter<&[u8]> for TrailingTag {
    fn detect(&self, statement: &[u8]) -> bool {
        match Self::tag(statement) {
            None => true,
            Some(tag) => tag == self.language.as_bytes(),
        }
    }
}

impl StatementFilter for TrailingTag {
    fn apply<'a>(&mut self, statement: &'a [u8]) -> Result<Option<Cow<'a, [u8]>>, Error> {
        if self.detect(statement) {
            Ok(Some(Cow::Borrowed(statement)))
        } else {
            Ok(None)
        }
    }
}

//! Label rewriting.
//!
//! Works on multi-line Turtle blocks such as
//!
//! ```text
//! wd:Q31 a wikibase:Item ;
//!     rdfs:label "Belgium"@en ;
//!     rdfs:label "Belgique"@fr ;
//!     schema:description "country in western Europe"@en ;
//!     schema:description "pays d'Europe de l'Ouest"@fr ;
//!     skos:altLabel "BE"@en .
//! ```
//!
//! and removes the label/description/alternate label entries that are in another language.
//! This is a textual rewrite: no syntax guarantee is given on the output, and only the first value
//! of a comma-separated object list is looked at.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::filter::{as_text, StatementFilter};
use crate::error::Error;

lazy_static! {
    static ref LABEL: Regex =
        Regex::new(r#"(rdfs:label|skos:prefLabel|schema:name)\s+"[^"]+"@(\w+)\s*;"#).unwrap();
    static ref DESCRIPTION: Regex =
        Regex::new(r#"schema:description\s+"[^"]+"@(\w+)(?:\s*,\s*|\s*;)"#).unwrap();
    static ref ALT_LABEL: Regex =
        Regex::new(r#"skos:altLabel\s+"[^"]+"@(\w+)(?:\s*,\s*|\s*\.)"#).unwrap();
}

#[derive(Debug, Clone)]
pub struct LabelRewrite {
    language: String,
}

impl LabelRewrite {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Remove matches of `re` whose tag (capture group `group`) is not the target language.
    fn strip<'a>(&self, re: &Regex, group: usize, text: Cow<'a, str>) -> Cow<'a, str> {
        let replaced = match re.replace_all(&text, |caps: &Captures| {
            if caps[group] == *self.language {
                caps[0].to_string()
            } else {
                String::new()
            }
        }) {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        };
        match replaced {
            Some(s) => Cow::Owned(s),
            None => text,
        }
    }

    pub fn rewrite(&self, statement: &str) -> String {
        let text = Cow::Borrowed(statement);
        let text = self.strip(&LABEL, 2, text);
        let text = self.strip(&DESCRIPTION, 1, text);
        let text = self.strip(&ALT_LABEL, 1, text);

        text.trim().replace("\n\n", "\n")
    }
}

impl StatementFilter for LabelRewrite {
    fn apply<'a>(&mut self, statement: &'a [u8]) -> Result<Option<Cow<'a, [u8]>>, Error> {
        let mut rewritten = self.rewrite(as_text(statement)?);
        if rewritten.is_empty() {
            return Ok(None);
        }
        rewritten.push('\n');
        Ok(Some(Cow::Owned(rewritten.into_bytes())))
    }
}

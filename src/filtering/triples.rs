//! Structural (Turtle decoding) filtering.
//!
//! Stricter than [super::TrailingTag]: statements are decoded into triples, and only label-like triples
//! whose literal object is tagged with the target language are kept.
//! Output is N-Triples, one line per unique triple.
use std::borrow::Cow;
use std::collections::HashSet;

use lazy_static::lazy_static;
use log::{debug, warn};
use oxrdf::{Term, Triple};
use oxttl::TurtleParser;
use regex::Regex;

use super::filter::{as_text, StatementFilter};
use crate::error::Error;

/// Predicates whose triples are kept: label, preferred label, name, description and alternate label.
pub const LABEL_PREDICATES: [&str; 5] = [
    "http://www.w3.org/2000/01/rdf-schema#label",
    "http://www.w3.org/2004/02/skos/core#prefLabel",
    "http://schema.org/name",
    "http://schema.org/description",
    "http://www.w3.org/2004/02/skos/core#altLabel",
];

lazy_static! {
    /// `@prefix p: <iri> .` and `PREFIX p: <iri>` directives.
    static ref PREFIX_DIRECTIVE: Regex =
        Regex::new(r"^\s*(?:@prefix|(?i:prefix))\s+([A-Za-z][\w.-]*)?:\s*<([^>]*)>\s*\.?\s*$")
            .unwrap();
}

pub struct TripleFilter {
    language: String,
    parser: TurtleParser,
    nb_prefixes: usize,
}

impl TripleFilter {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            parser: TurtleParser::new(),
            nb_prefixes: 0,
        }
    }

    /// Preload a prefix, usually one that is declared in the dump header.
    pub fn with_prefix(mut self, name: &str, iri: &str) -> Result<Self, Error> {
        self.add_prefix(name, iri)?;
        Ok(self)
    }

    fn add_prefix(&mut self, name: &str, iri: &str) -> Result<(), Error> {
        self.parser = self
            .parser
            .clone()
            .with_prefix(name, iri)
            .map_err(|e| Error::Decode(format!("invalid prefix {}: <{}>: {}", name, iri, e)))?;
        self.nb_prefixes += 1;
        debug!("registered prefix {}: <{}>", name, iri);
        Ok(())
    }

    /// Register prefix directives found in the statement so that following statements can use them.
    fn learn_prefixes(&mut self, statement: &str) {
        for line in statement.lines() {
            if let Some(caps) = PREFIX_DIRECTIVE.captures(line) {
                let name = caps.get(1).map_or("", |m| m.as_str());
                let iri = caps.get(2).map_or("", |m| m.as_str());
                if let Err(e) = self.add_prefix(name, iri) {
                    warn!("ignoring prefix directive: {}", e);
                }
            }
        }
    }

    /// Number of registered prefixes.
    pub fn nb_prefixes(&self) -> usize {
        self.nb_prefixes
    }

    fn keep(&self, triple: &Triple) -> bool {
        if !LABEL_PREDICATES.contains(&triple.predicate.as_str()) {
            return false;
        }
        match &triple.object {
            Term::Literal(literal) => literal.language() == Some(self.language.as_str()),
            _ => false,
        }
    }

    /// Decode a statement and return the unique kept triples, in order of first appearance.
    ///
    /// Running out of triples ends the decoding, any syntax error fails the whole statement.
    pub fn decode(&mut self, statement: &str) -> Result<Vec<Triple>, Error> {
        self.learn_prefixes(statement);

        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for triple in self.parser.clone().for_reader(statement.as_bytes()) {
            let triple = triple.map_err(|e| Error::Decode(e.to_string()))?;
            if self.keep(&triple) && seen.insert(triple.clone()) {
                kept.push(triple);
            }
        }
        Ok(kept)
    }
}

/// Render a triple as an N-Triples line.
pub fn render(triple: &Triple) -> String {
    format!(
        "{} {} {} .\n",
        triple.subject, triple.predicate, triple.object
    )
}

impl StatementFilter for TripleFilter {
    fn apply<'a>(&mut self, statement: &'a [u8]) -> Result<Option<Cow<'a, [u8]>>, Error> {
        let triples = self.decode(as_text(statement)?)?;
        if triples.is_empty() {
            return Ok(None);
        }
        let out: String = triples.iter().map(render).collect();
        Ok(Some(Cow::Owned(out.into_bytes())))
    }
}

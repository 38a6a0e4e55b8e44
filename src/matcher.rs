//! Multi-pattern concept matcher
//!
//! Every surface form of the concept table is compiled into a single
//! Aho-Corasick automaton. Matching is exact and case-sensitive; word
//! boundaries are checked later by the validator.

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use tracing::warn;

use crate::concepts::ConceptTable;
use crate::error::{Result, TexIndexError};

/// A surface form found in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptMatch<'a> {
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the last matched byte
    pub end: usize,
    /// Matched surface form
    pub text: &'a str,
    /// Concept the surface form belongs to
    pub concept: &'a str,
}

/// Automaton over all surface forms
pub struct ConceptMatcher {
    automaton: AhoCorasick,
    /// (surface form, concept) per automaton pattern id
    patterns: Vec<(String, String)>,
}

impl ConceptMatcher {
    /// Build the automaton from a concept table.
    ///
    /// Surface forms are unique keys: when a form appears on several rows,
    /// the concept of the last row wins. Empty forms are dropped.
    pub fn from_table(table: &ConceptTable) -> Result<Self> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut patterns: Vec<(String, String)> = Vec::new();

        for entry in table.iter() {
            if entry.surface.is_empty() {
                warn!(concept = %entry.concept, "Dropping concept row with empty match");
                continue;
            }
            match slots.get(entry.surface.as_str()) {
                Some(&idx) => patterns[idx].1 = entry.concept.clone(),
                None => {
                    slots.insert(entry.surface.as_str(), patterns.len());
                    patterns.push((entry.surface.clone(), entry.concept.clone()));
                }
            }
        }

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .build(patterns.iter().map(|(surface, _)| surface.as_str()))
            .map_err(|e| TexIndexError::Matcher {
                message: e.to_string(),
            })?;

        Ok(Self {
            automaton,
            patterns,
        })
    }

    /// Number of distinct surface forms
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Non-overlapping matches in `line`, left to right, longest first at
    /// each starting position.
    pub fn find_iter<'a>(&'a self, line: &str) -> Vec<ConceptMatch<'a>> {
        self.automaton
            .find_iter(line)
            .map(|m| {
                let (surface, concept) = &self.patterns[m.pattern().as_usize()];
                ConceptMatch {
                    start: m.start(),
                    end: m.end(),
                    text: surface.as_str(),
                    concept: concept.as_str(),
                }
            })
            .collect()
    }
}

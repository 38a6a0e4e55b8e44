//! Interactive concept curation
//!
//! Before the concept table is written, a curator may keep, drop, rename or
//! re-alias every ranked candidate.

use std::collections::HashSet;

use console::style;
use dialoguer::Input;

use crate::concepts::{ConceptEntry, ConceptTable};
use crate::error::{Result, TexIndexError};

use super::rank::Candidate;

/// Decision on one candidate
#[derive(Debug, Clone, PartialEq)]
pub enum CurationAction {
    /// Write the candidate with its current matches
    Keep,
    /// Skip this candidate and keep every following one without asking
    KeepAll,
    /// Drop the candidate
    Delete,
    /// Change the index entry, then ask again
    Rename(String),
    /// Replace the surface forms, then ask again
    EditMatches(Vec<String>),
}

/// Source of curation decisions
pub trait Curator {
    fn decide(
        &mut self,
        position: usize,
        total: usize,
        concept: &str,
        matches: &[String],
    ) -> Result<CurationAction>;
}

/// Build the concept table from ranked candidates.
///
/// Without a curator every candidate becomes one row whose match equals the
/// concept. A concept that was already kept is not written again. After
/// `KeepAll` the remaining candidates are written without asking.
pub fn curate(candidates: &[Candidate], mut curator: Option<&mut dyn Curator>) -> Result<ConceptTable> {
    let mut prompting = curator.is_some();
    let mut entries = Vec::new();
    let mut added: HashSet<String> = HashSet::new();
    let total = candidates.len();

    for (position, candidate) in candidates.iter().enumerate() {
        if added.contains(&candidate.keyword) {
            continue;
        }

        let mut concept = candidate.keyword.clone();
        let mut matches = vec![concept.clone()];

        let active = match curator.as_deref_mut() {
            Some(active) if prompting => active,
            _ => {
                push_rows(&mut entries, &concept, &matches, candidate.weight);
                continue;
            }
        };

        loop {
            match active.decide(position, total, &concept, &matches)? {
                CurationAction::Keep => {
                    if added.insert(concept.clone()) {
                        push_rows(&mut entries, &concept, &matches, candidate.weight);
                    }
                    break;
                }
                CurationAction::KeepAll => {
                    prompting = false;
                    break;
                }
                CurationAction::Delete => break,
                CurationAction::Rename(name) => concept = name,
                CurationAction::EditMatches(list) => matches = list,
            }
        }
    }

    Ok(ConceptTable::new(entries))
}

fn push_rows(entries: &mut Vec<ConceptEntry>, concept: &str, matches: &[String], weight: f64) {
    for surface in matches {
        entries.push(ConceptEntry::new(concept, surface.as_str(), weight));
    }
}

/// Split a comma-separated match list, dropping empty items
pub fn parse_matches(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prompts on the terminal
#[derive(Debug, Default)]
pub struct TerminalCurator;

impl TerminalCurator {
    fn ask(prompt: &str, allow_empty: bool) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .map_err(|e| TexIndexError::Prompt {
                message: e.to_string(),
            })
    }
}

impl Curator for TerminalCurator {
    fn decide(
        &mut self,
        position: usize,
        total: usize,
        concept: &str,
        matches: &[String],
    ) -> Result<CurationAction> {
        loop {
            eprintln!(
                "\n[{:4}/{}] {} -> {}",
                position,
                total,
                matches.join(","),
                style(concept).bold()
            );
            let answer = Self::ask(
                "[k/enter=KEEP, a=KEEP ALL FOLLOWING, d=DELETE, e=RENAME INDEX ENTRY, w=EDIT MATCHES]",
                true,
            )?;

            match answer.trim() {
                "" | "k" => return Ok(CurationAction::Keep),
                "a" => return Ok(CurationAction::KeepAll),
                "d" => return Ok(CurationAction::Delete),
                "e" => {
                    let name = Self::ask("index entry rename", false)?;
                    return Ok(CurationAction::Rename(name.trim().to_string()));
                }
                "w" => {
                    let raw = Self::ask("edit matches (comma-separated)", false)?;
                    return Ok(CurationAction::EditMatches(parse_matches(&raw)));
                }
                _ => continue,
            }
        }
    }
}

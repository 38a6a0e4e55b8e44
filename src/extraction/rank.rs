//! Keyphrase ranking
//!
//! Two built-in rankers:
//! - `Rake`: Rapid Automatic Keyword Extraction. Candidate phrases are the
//!   runs of words between stopwords and punctuation; each word scores
//!   degree/frequency and a phrase scores the sum of its words.
//! - `EntityCounter`: runs of capitalized words, ranked by occurrence count.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\[\]\n.!?,;:\t\-"()'\u{2019}\u{2013}]"#).unwrap());
static WORD_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_+\-/]").unwrap());
static ENTITY_SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+|\n\n").unwrap());
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\p{Lu}[\w'-]*(?:[ \t]+\p{Lu}[\w'-]*)*").unwrap());

/// English stopwords used by RAKE unless a stoplist file is given
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now",
];

/// Selectable ranking method
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum RankMethod {
    /// Rapid Automatic Keyword Extraction
    #[default]
    Rake,
    /// Capitalized word runs counted by frequency
    Entities,
}

/// A ranked keyphrase
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub keyword: String,
    pub weight: f64,
}

impl Candidate {
    pub fn new(keyword: impl Into<String>, weight: f64) -> Self {
        Self {
            keyword: keyword.into(),
            weight,
        }
    }
}

/// Limits applied while ranking
#[derive(Debug, Clone, Default)]
pub struct RankRequest {
    /// Maximum number of candidates to consider
    pub number: usize,
    /// Keywords never returned
    pub exclude: HashSet<String>,
    /// Minimum keyword length in characters; only entity mentions are
    /// filtered by it
    pub min_length: usize,
}

impl RankRequest {
    fn admits(&self, keyword: &str) -> bool {
        !keyword.is_empty() && !self.exclude.contains(keyword)
    }

    fn is_long_enough(&self, keyword: &str) -> bool {
        keyword.chars().count() >= self.min_length
    }
}

/// A keyphrase ranking strategy
pub trait Ranker {
    fn rank(&self, text: &str, request: &RankRequest) -> Vec<Candidate>;
}

/// RAKE keyword extraction
#[derive(Debug, Clone)]
pub struct Rake {
    stopwords: HashSet<String>,
    min_characters: usize,
    max_words: usize,
    min_frequency: usize,
}

impl Default for Rake {
    fn default() -> Self {
        Self::new(ENGLISH_STOPWORDS.iter().map(|s| s.to_string()).collect())
    }
}

impl Rake {
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self {
            stopwords,
            min_characters: 2,
            max_words: 4,
            min_frequency: 3,
        }
    }

    /// Load stopwords from a file with one word per line; `#` starts a comment
    pub fn from_stoplist(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let stopwords = raw
            .lines()
            .map(|l| l.split('#').next().unwrap_or("").trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Ok(Self::new(stopwords))
    }

    pub fn with_limits(mut self, min_characters: usize, max_words: usize, min_frequency: usize) -> Self {
        self.min_characters = min_characters;
        self.max_words = max_words;
        self.min_frequency = min_frequency;
        self
    }

    /// Candidate phrases in order of appearance, repeats included
    fn candidate_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();

        for sentence in SENTENCE_SPLIT_RE.split(text) {
            let mut current: Vec<&str> = Vec::new();
            for word in sentence.split_whitespace() {
                if self.stopwords.contains(&word.to_lowercase()) {
                    push_phrase(&mut phrases, &mut current);
                } else {
                    current.push(word);
                }
            }
            push_phrase(&mut phrases, &mut current);
        }

        phrases.retain(|p| self.is_acceptable(p));
        phrases
    }

    fn is_acceptable(&self, phrase: &str) -> bool {
        if phrase.chars().count() < self.min_characters {
            return false;
        }
        if phrase.split_whitespace().count() > self.max_words {
            return false;
        }
        let digits = phrase.chars().filter(|c| c.is_ascii_digit()).count();
        let alpha = phrase.chars().filter(|c| c.is_alphabetic()).count();
        alpha > 0 && digits <= alpha
    }

    /// All scored phrases, best first
    pub fn score(&self, text: &str) -> Vec<Candidate> {
        let phrases = self.candidate_phrases(text);

        let mut phrase_counts: HashMap<&str, usize> = HashMap::new();
        for phrase in &phrases {
            *phrase_counts.entry(phrase.as_str()).or_insert(0) += 1;
        }
        let phrases: Vec<&str> = phrases
            .iter()
            .map(String::as_str)
            .filter(|p| phrase_counts[p] >= self.min_frequency)
            .collect();

        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for &phrase in &phrases {
            let words = separate_words(phrase);
            let extra = words.len().saturating_sub(1) as f64;
            for word in words {
                *frequency.entry(word).or_insert(0.0) += 1.0;
                *degree.entry(word).or_insert(0.0) += extra;
            }
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for phrase in phrases {
            if !seen.insert(phrase) {
                continue;
            }
            let weight: f64 = separate_words(phrase)
                .into_iter()
                .map(|w| (degree[w] + frequency[w]) / frequency[w])
                .sum();
            candidates.push(Candidate::new(phrase, weight));
        }

        candidates.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        candidates
    }
}

fn push_phrase(phrases: &mut Vec<String>, current: &mut Vec<&str>) {
    if !current.is_empty() {
        phrases.push(current.join(" ").to_lowercase());
        current.clear();
    }
}

fn separate_words(phrase: &str) -> Vec<&str> {
    WORD_SPLIT_RE
        .split(phrase)
        .map(str::trim)
        .filter(|w| !w.is_empty() && w.parse::<f64>().is_err())
        .collect()
}

impl Ranker for Rake {
    /// Keeps phrases scoring above 1 among the first `number` scored
    fn rank(&self, text: &str, request: &RankRequest) -> Vec<Candidate> {
        self.score(text)
            .into_iter()
            .take(request.number)
            .filter(|c| c.weight > 1.0 && request.admits(&c.keyword))
            .collect()
    }
}

/// Counts runs of capitalized words
#[derive(Debug, Clone, Default)]
pub struct EntityCounter;

impl EntityCounter {
    /// Entity mentions in order of appearance, repeats included
    pub fn mentions(text: &str) -> Vec<String> {
        ENTITY_SENTENCE_RE
            .split(text)
            .flat_map(|sentence| {
                ENTITY_RE
                    .find_iter(sentence)
                    .map(|m| m.as_str().trim_end_matches(['\'', '-']).to_string())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Ranker for EntityCounter {
    fn rank(&self, text: &str, request: &RankRequest) -> Vec<Candidate> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for mention in Self::mentions(text) {
            if !request.admits(&mention) || !request.is_long_enough(&mention) {
                continue;
            }
            let count = counts.entry(mention.clone()).or_insert(0);
            if *count == 0 {
                order.push(mention);
            }
            *count += 1;
        }

        // Stable sort keeps first appearance order among ties
        let mut ranked: Vec<Candidate> = order
            .into_iter()
            .map(|m| {
                let weight = counts[&m] as f64;
                Candidate::new(m, weight)
            })
            .collect();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        ranked.truncate(request.number);
        ranked
    }
}

/// Build the ranker for a method
pub fn ranker_for(method: RankMethod, stoplist: Option<&Path>) -> Result<Box<dyn Ranker>> {
    Ok(match method {
        RankMethod::Rake => match stoplist {
            Some(path) => Box::new(Rake::from_stoplist(path)?),
            None => Box::new(Rake::default()),
        },
        RankMethod::Entities => Box::new(EntityCounter),
    })
}

//! Configuration file support
//!
//! Both tools read defaults from an optional TOML file. Command-line flags
//! are applied on top of whatever the file provides.
//!
//! ```toml
//! [indexer]
//! distance_window = 150
//! stopwords = ["model", "node"]
//! allowed_environments = ["sloppypar", "itemize"]
//!
//! [extractor]
//! from_section = "Introduction"
//! number = 100
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TexIndexError};

/// Lines that must separate two annotations of the same concept
pub const DEFAULT_DISTANCE_WINDOW: usize = 200;

/// Number of concepts shown in the annotation distribution report
pub const DEFAULT_TOP_N: usize = 50;

/// Environment whose content is always eligible for indexing
pub const DEFAULT_ALLOWED_ENVIRONMENT: &str = "sloppypar";

/// Overly generic concepts skipped by the stopword throttle
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "entity",
    "information",
    "document",
    "model",
    "hypergraph-of-entity",
    "node",
    "entity-oriented search",
    "hypergraph",
    "ranking",
    "term",
];

/// Top-level config file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indexer: IndexerConfig,
    pub extractor: ExtractorConfig,
}

impl Config {
    /// Load a config file, or return defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Err(TexIndexError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw).map_err(|message| TexIndexError::Config {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse config from TOML text
    pub fn from_toml(raw: &str) -> std::result::Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }
}

/// Settings for the concept indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Minimum line distance between two annotations of one concept
    pub distance_window: usize,
    /// Concepts never annotated when the stopword throttle is active
    pub stopwords: BTreeSet<String>,
    /// Environments exempt from nesting tracking
    pub allowed_environments: Vec<String>,
    /// Rows shown in the distribution report
    pub top_n: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            distance_window: DEFAULT_DISTANCE_WINDOW,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            allowed_environments: vec![DEFAULT_ALLOWED_ENVIRONMENT.to_string()],
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Settings for the concept extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Exact title of the first section to read
    pub from_section: String,
    /// Exact title of the first section to ignore
    pub to_section: String,
    /// Number of concepts to extract
    pub number: usize,
    /// Keywords never emitted
    pub exclude: Vec<String>,
    /// Minimum number of characters of a keyword
    pub min_length: usize,
    /// External LaTeX to plain text converter
    pub detex_command: String,
    /// Environments the converter drops entirely
    pub detex_excluded_environments: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            from_section: "Introduction".to_string(),
            to_section: "Appendix".to_string(),
            number: 200,
            exclude: ["Figure", "Table", "Figures", "Tables", "Section", "Sections"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_length: 0,
            detex_command: "detex".to_string(),
            detex_excluded_environments: [
                "table",
                "figure",
                "equation",
                "minipage",
                "multicols",
                "lstlisting",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

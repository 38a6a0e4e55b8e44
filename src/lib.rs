//! texindex: back-of-book index markers for LaTeX manuscripts
//!
//! Two stages share a concept table (`concept,match,weight` CSV):
//!
//! - **Extraction** converts the manuscript to plain text, ranks candidate
//!   keyphrases and optionally lets a human curate them.
//! - **Indexing** copies the manuscript and inserts `\index{concept}` after
//!   chosen occurrences of every surface form, skipping text inside LaTeX
//!   environments, command arguments and command names.
//!
//! # Example
//!
//! ```ignore
//! use texindex::{run_indexer, Config, IndexOptions, ThrottleMethod};
//!
//! let options = IndexOptions {
//!     input: "thesis/main.tex".into(),
//!     concepts: "concepts.csv".into(),
//!     output: "indexed".into(),
//!     exclude: vec!["cover.tex".into()],
//!     allowed_environments: vec![],
//!     methods: vec![ThrottleMethod::Distance],
//!     config: Config::default().indexer,
//! };
//! let report = run_indexer(&options)?;
//! println!("{}", report.stats.render_text(50));
//! ```

pub mod annotate;
pub mod cli;
pub mod concepts;
pub mod config;
pub mod error;
pub mod extraction;
pub mod indexing;
pub mod latex;
pub mod matcher;
pub mod stats;
pub mod throttle;

// Re-export commonly used types
pub use annotate::{index_marker, Annotator};
pub use concepts::{ConceptEntry, ConceptTable};
pub use config::{Config, ExtractorConfig, IndexerConfig};
pub use error::{Result, TexIndexError};
pub use indexing::{run_indexer, IndexOptions, IndexReport};
pub use matcher::{ConceptMatch, ConceptMatcher};
pub use stats::IndexStats;
pub use throttle::{Throttle, ThrottleMethod};

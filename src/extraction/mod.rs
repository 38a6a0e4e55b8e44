//! Concept extraction
//!
//! Produces the concept table consumed by the indexer:
//!
//! 1. convert the manuscript to plain text (`convert`)
//! 2. keep the body between two section titles and clean it up
//! 3. rank keyphrases with the selected method (`rank`)
//! 4. optionally let a human curate the result (`curate`)
//! 5. write `concept,match,weight` rows

pub mod convert;
pub mod curate;
pub mod rank;

use std::path::PathBuf;

use tracing::info;

use crate::concepts::ConceptTable;
use crate::config::ExtractorConfig;
use crate::error::{Result, TexIndexError};

pub use convert::{clean_text, select_body, Detex, TextConverter};
pub use curate::{curate, CurationAction, Curator, TerminalCurator};
pub use rank::{ranker_for, Candidate, EntityCounter, Rake, RankMethod, RankRequest, Ranker};

/// Everything an extraction run needs
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Main LaTeX file
    pub input: PathBuf,
    /// Concept table to write
    pub output: PathBuf,
    pub method: RankMethod,
    /// RAKE stopword file; the built-in English list otherwise
    pub stoplist: Option<PathBuf>,
    pub config: ExtractorConfig,
}

impl ExtractOptions {
    pub fn rank_request(&self) -> RankRequest {
        RankRequest {
            number: self.config.number,
            exclude: self.config.exclude.iter().cloned().collect(),
            min_length: self.config.min_length,
        }
    }
}

/// Run the whole extraction and write the concept table
pub fn run_extractor(
    options: &ExtractOptions,
    converter: &dyn TextConverter,
    curator: Option<&mut dyn Curator>,
) -> Result<ConceptTable> {
    if !options.input.exists() {
        return Err(TexIndexError::FileNotFound {
            path: options.input.display().to_string(),
        });
    }

    info!("Converting LaTeX files to plain text");
    let raw = converter.convert(&options.input)?;
    let body = select_body(
        &raw,
        &options.config.from_section,
        &options.config.to_section,
    );
    let text = clean_text(&body);

    info!(method = ?options.method, "Extracting concepts");
    let ranker = ranker_for(options.method, options.stoplist.as_deref())?;
    let candidates = ranker.rank(&text, &options.rank_request());
    info!("Ranked {} candidate concepts", candidates.len());

    let table = curate(&candidates, curator)?;
    table.save(&options.output)?;
    info!(
        "Wrote {} concept rows to {}",
        table.len(),
        options.output.display()
    );

    Ok(table)
}

//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{ExtractOptions, RankMethod};
use crate::indexing::IndexOptions;
use crate::throttle::ThrottleMethod;

/// Index concepts in your LaTeX manuscript
#[derive(Parser, Debug)]
#[command(name = "texindex")]
#[command(about = "Insert \\index{...} entries for known concepts into a copy of a LaTeX manuscript")]
#[command(version)]
pub struct IndexCli {
    /// Main LaTeX file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Concepts CSV (generated by texindex-extract)
    #[arg(short, long, value_name = "CSV")]
    pub concepts: PathBuf,

    /// Output directory (receives a copy of the project with \index{...} entries)
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Exclude LaTeX files (glob relative to the main LaTeX directory; repeatable)
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Allowed environment for indexing concepts; text inside other environments is skipped (repeatable)
    #[arg(short, long = "allowed-env", value_name = "ENV")]
    pub allowed_env: Vec<String>,

    /// Throttling method to reduce the number of page entries per concept (repeatable)
    #[arg(short, long, value_enum)]
    pub method: Vec<ThrottleMethod>,

    /// Minimum line distance between annotations of one concept
    #[arg(long, value_name = "LINES")]
    pub distance: Option<usize>,

    /// Number of concepts shown in the annotation distribution
    #[arg(long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Report format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// TOML config file
    #[arg(long, env = "TEXINDEX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl IndexCli {
    /// Merge command-line values over the loaded config
    pub fn to_options(&self, config: &Config) -> IndexOptions {
        let mut indexer = config.indexer.clone();
        if let Some(distance) = self.distance {
            indexer.distance_window = distance;
        }
        if let Some(top_n) = self.top_n {
            indexer.top_n = top_n;
        }

        IndexOptions {
            input: self.input.clone(),
            concepts: self.concepts.clone(),
            output: self.output.clone(),
            exclude: self.exclude.clone(),
            allowed_environments: self.allowed_env.clone(),
            methods: self.method.clone(),
            config: indexer,
        }
    }
}

/// Extract concepts from your LaTeX manuscript
#[derive(Parser, Debug)]
#[command(name = "texindex-extract")]
#[command(about = "Rank candidate concepts of a LaTeX manuscript and write a concepts CSV")]
#[command(version)]
pub struct ExtractCli {
    /// Main LaTeX file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output CSV to store keywords and their weights
    #[arg(short, long, value_name = "CSV")]
    pub output: PathBuf,

    /// Exact title of the first section [default: Introduction]
    #[arg(short, long)]
    pub from: Option<String>,

    /// Exact title of the first section to ignore [default: Appendix]
    #[arg(short, long)]
    pub to: Option<String>,

    /// Number of concepts to extract [default: 200]
    #[arg(short, long)]
    pub number: Option<usize>,

    /// Comma-separated keywords to exclude [default: Figure,Table,Figures,Tables,Section,Sections]
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Minimum number of characters of an entity keyword [default: 0]
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Concept extraction method
    #[arg(short, long, default_value = "rake", value_enum)]
    pub method: RankMethod,

    /// Interactively select or edit concepts to keep
    #[arg(short, long)]
    pub select: bool,

    /// Stopword file for RAKE (one word per line)
    #[arg(long, value_name = "FILE")]
    pub stoplist: Option<PathBuf>,

    /// LaTeX to plain text converter command [default: detex]
    #[arg(long, env = "TEXINDEX_DETEX", value_name = "CMD")]
    pub detex: Option<String>,

    /// TOML config file
    #[arg(long, env = "TEXINDEX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExtractCli {
    /// Merge command-line values over the loaded config
    pub fn to_options(&self, config: &Config) -> ExtractOptions {
        let mut extractor = config.extractor.clone();
        if let Some(from) = &self.from {
            extractor.from_section = from.clone();
        }
        if let Some(to) = &self.to {
            extractor.to_section = to.clone();
        }
        if let Some(number) = self.number {
            extractor.number = number;
        }
        if let Some(exclude) = &self.exclude {
            extractor.exclude = exclude.clone();
        }
        if let Some(min_length) = self.min_length {
            extractor.min_length = min_length;
        }
        if let Some(detex) = &self.detex {
            extractor.detex_command = detex.clone();
        }

        ExtractOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            method: self.method,
            stoplist: self.stoplist.clone(),
            config: extractor,
        }
    }
}

/// Report format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one statistic per line
    #[default]
    Text,
    /// JSON object
    Json,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}

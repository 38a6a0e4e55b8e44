//! Indexing run over a whole manuscript project

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::annotate::Annotator;
use crate::concepts::ConceptTable;
use crate::config::IndexerConfig;
use crate::error::{Result, TexIndexError};
use crate::matcher::ConceptMatcher;
use crate::stats::IndexStats;
use crate::throttle::{Throttle, ThrottleMethod};

use super::files::collect_tex_files;

/// Everything an indexing run needs
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Main LaTeX file; its directory is the manuscript root
    pub input: PathBuf,
    /// Concept table CSV
    pub concepts: PathBuf,
    /// Directory that receives the annotated copy
    pub output: PathBuf,
    /// Exclude patterns relative to the manuscript root
    pub exclude: Vec<String>,
    /// Extra allowed environments on top of the configured ones
    pub allowed_environments: Vec<String>,
    /// Selected throttling policies
    pub methods: Vec<ThrottleMethod>,
    pub config: IndexerConfig,
}

impl IndexOptions {
    /// Configured allowed environments followed by the extra ones, deduplicated
    pub fn allowed_environments(&self) -> Vec<String> {
        let mut envs = self.config.allowed_environments.clone();
        for env in &self.allowed_environments {
            if !envs.contains(env) {
                envs.push(env.clone());
            }
        }
        envs
    }
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct IndexReport {
    /// Root of the annotated copy
    pub target_dir: PathBuf,
    pub stats: IndexStats,
}

/// Copy the manuscript, annotate every `.tex` file of the copy, and report
/// statistics. Fails before touching anything if the target already exists.
pub fn run_indexer(options: &IndexOptions) -> Result<IndexReport> {
    if !options.input.exists() {
        return Err(TexIndexError::FileNotFound {
            path: options.input.display().to_string(),
        });
    }

    let input = options.input.canonicalize()?;
    let source_dir = input.parent().unwrap_or(Path::new("/")).to_path_buf();
    let target_dir = target_dir_for(&source_dir, &options.output);

    if target_dir.exists() {
        return Err(TexIndexError::TargetExists {
            path: target_dir.display().to_string(),
        });
    }

    info!("Preparing Aho-Corasick concept matcher");
    let table = ConceptTable::load(&options.concepts)?;
    let matcher = ConceptMatcher::from_table(&table)?;

    let mut stats = IndexStats::new();
    stats.index_terms = table.len();

    info!("Copying files from main LaTeX directory to output directory");
    copy_project(&source_dir, &target_dir)?;

    info!("Identifying LaTeX files to edit");
    let files = collect_tex_files(&target_dir, &options.exclude)?;

    let annotator = Annotator::new(
        matcher,
        options.allowed_environments(),
        Throttle::from_config(options.methods.clone(), &options.config),
    );

    info!("Inserting \\index{{...}} entries");
    for relative in &files {
        info!("    {}", relative.display());
        stats.edited_files += 1;

        let path = target_dir.join(relative);
        let source = fs::read_to_string(&path)?;
        let annotated = annotator.annotate_source(&source, &mut stats);
        replace_atomically(&path, &annotated)?;
    }

    info!(
        "A new indexed version of your document is available in {}",
        target_dir.display()
    );

    Ok(IndexReport { target_dir, stats })
}

/// `<output>/<name of the manuscript directory>`
pub fn target_dir_for(source_dir: &Path, output: &Path) -> PathBuf {
    match source_dir.file_name() {
        Some(name) => output.join(name),
        None => output.to_path_buf(),
    }
}

/// Copy the whole manuscript tree. The target must not exist yet.
pub fn copy_project(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        return Err(TexIndexError::TargetExists {
            path: target.display().to_string(),
        });
    }
    fs::create_dir_all(target)?;

    let source = source.canonicalize()?;
    let target = target.canonicalize()?;

    let skip = target.clone();
    let walker = WalkBuilder::new(&source)
        .standard_filters(false)
        .filter_entry(move |entry| !entry.path().starts_with(&skip))
        .build();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        let relative = match path.strip_prefix(&source) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let destination = target.join(relative);

        if path.is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            debug!(file = %relative.display(), "Copying");
            fs::copy(path, &destination)?;
        }
    }

    Ok(())
}

/// Write `content` to a scratch file next to `path`, then rename it over
/// `path`. An interrupted run leaves the original intact.
pub fn replace_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut scratch = NamedTempFile::new_in(dir)?;
    scratch.write_all(content.as_bytes())?;
    scratch.flush()?;
    scratch.persist(path).map_err(|e| TexIndexError::Io(e.error))?;
    Ok(())
}

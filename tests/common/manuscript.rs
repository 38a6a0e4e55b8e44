//! Temporary LaTeX projects for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use texindex::{Config, IndexOptions, ThrottleMethod};

/// A manuscript directory plus an output directory, both temporary
pub struct TestManuscript {
    root: TempDir,
    out: TempDir,
}

impl TestManuscript {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create manuscript dir");
        fs::create_dir_all(root.path().join("thesis")).expect("create thesis dir");
        Self {
            root,
            out: TempDir::new().expect("create output dir"),
        }
    }

    /// Manuscript root (the directory of `main.tex`)
    pub fn dir(&self) -> PathBuf {
        self.root.path().join("thesis")
    }

    pub fn out_dir(&self) -> &Path {
        self.out.path()
    }

    /// Where the annotated copy ends up
    pub fn target_dir(&self) -> PathBuf {
        self.out.path().join("thesis")
    }

    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, content).expect("write manuscript file");
        self
    }

    /// Write `concepts.csv` next to (not inside) the manuscript
    pub fn with_concepts(self, rows: &[(&str, &str, f64)]) -> Self {
        let mut csv = String::from("concept,match,weight\n");
        for (concept, surface, weight) in rows {
            csv.push_str(&format!("{},{},{:?}\n", concept, surface, weight));
        }
        fs::write(self.concepts_path(), csv).expect("write concepts");
        self
    }

    pub fn concepts_path(&self) -> PathBuf {
        self.root.path().join("concepts.csv")
    }

    pub fn options(&self, methods: Vec<ThrottleMethod>) -> IndexOptions {
        IndexOptions {
            input: self.dir().join("main.tex"),
            concepts: self.concepts_path(),
            output: self.out_dir().to_path_buf(),
            exclude: Vec::new(),
            allowed_environments: Vec::new(),
            methods,
            config: Config::default().indexer,
        }
    }

    pub fn read_source(&self, relative: &str) -> String {
        fs::read_to_string(self.dir().join(relative)).expect("read source file")
    }

    pub fn read_output(&self, relative: &str) -> String {
        fs::read_to_string(self.target_dir().join(relative)).expect("read output file")
    }
}

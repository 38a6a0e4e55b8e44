//! Annotation throttling policies

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::IndexerConfig;

/// Policy limiting how often a concept is annotated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum ThrottleMethod {
    /// Skip repeats of a concept within the distance window
    #[value(name = "dist")]
    Distance,
    /// Never annotate concepts in the stopword set
    #[value(name = "stop")]
    Stopword,
}

/// Combination of the selected policies; all of them must pass
#[derive(Debug, Clone)]
pub struct Throttle {
    methods: Vec<ThrottleMethod>,
    window: usize,
    stopwords: BTreeSet<String>,
}

impl Throttle {
    pub fn new(methods: Vec<ThrottleMethod>, window: usize, stopwords: BTreeSet<String>) -> Self {
        Self {
            methods,
            window,
            stopwords,
        }
    }

    pub fn from_config(methods: Vec<ThrottleMethod>, config: &IndexerConfig) -> Self {
        Self::new(methods, config.distance_window, config.stopwords.clone())
    }

    /// No policy selected: every valid match is annotated
    pub fn unrestricted() -> Self {
        Self::new(Vec::new(), 0, BTreeSet::new())
    }

    pub fn methods(&self) -> &[ThrottleMethod] {
        &self.methods
    }

    /// `last_line` is the line of the concept's previous annotation in the
    /// current file, if any.
    pub fn can_annotate(&self, last_line: Option<usize>, current_line: usize, concept: &str) -> bool {
        self.methods.iter().all(|method| match method {
            ThrottleMethod::Distance => {
                last_line.map_or(true, |last| current_line > last + self.window)
            }
            ThrottleMethod::Stopword => !self.stopwords.contains(concept),
        })
    }
}

//! Indexing statistics and the final console report

use std::collections::BTreeMap;

use serde::Serialize;

/// Counters accumulated over a whole indexing run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexStats {
    /// Rows read from the concept table
    pub index_terms: usize,
    /// Manuscript files rewritten
    pub edited_files: usize,
    /// Markers inserted
    pub indexed_matches: usize,
    /// Matches rejected by the LaTeX validator
    pub invalid_matches: usize,
    /// Lines skipped because they sit inside a tracked environment
    pub environment_blocks_skipped: usize,
    /// Markers inserted per concept
    pub annotation_distribution: BTreeMap<String, usize>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_annotation(&mut self, concept: &str) {
        self.indexed_matches += 1;
        *self
            .annotation_distribution
            .entry(concept.to_string())
            .or_insert(0) += 1;
    }

    /// Integer counters as (name, value), sorted by name
    pub fn counters(&self) -> Vec<(&'static str, usize)> {
        let mut counters = vec![
            ("index terms", self.index_terms),
            ("edited files", self.edited_files),
            ("indexed matches", self.indexed_matches),
            ("invalid matches", self.invalid_matches),
            ("environment blocks skipped", self.environment_blocks_skipped),
        ];
        counters.sort_by_key(|(name, _)| *name);
        counters
    }

    /// Most annotated concepts, descending by frequency then by name
    pub fn top_concepts(&self, top_n: usize) -> Vec<(&str, usize)> {
        let mut dist: Vec<(&str, usize)> = self
            .annotation_distribution
            .iter()
            .map(|(concept, freq)| (concept.as_str(), *freq))
            .collect();
        dist.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        dist.truncate(top_n);
        dist
    }

    /// Plain-text report
    pub fn render_text(&self, top_n: usize) -> String {
        let mut output = String::new();

        for (name, value) in self.counters() {
            output.push_str(&format!("    {}: {}\n", name, value));
        }

        output.push_str(&format!("\n    ANNOTATION DISTRIBUTION (top {})\n\n", top_n));
        for (concept, freq) in self.top_concepts(top_n) {
            output.push_str(&format!("    {:3} {}\n", freq, concept));
        }

        output
    }

    /// JSON report
    pub fn render_json(&self, top_n: usize) -> String {
        let counters: serde_json::Map<String, serde_json::Value> = self
            .counters()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.into()))
            .collect();

        let json = serde_json::json!({
            "counters": counters,
            "top_n": top_n,
            "annotation_distribution": self.top_concepts(top_n).iter().map(|(concept, freq)| {
                serde_json::json!({ "concept": concept, "frequency": freq })
            }).collect::<Vec<_>>(),
        });
        serde_json::to_string_pretty(&json).unwrap_or_default()
    }
}

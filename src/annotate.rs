//! Inline `\index{...}` insertion
//!
//! Each file is processed line by line: environment tracking decides whether
//! the line is eligible, the matcher finds surface forms, the validator and
//! the throttle decide which ones receive a marker. Markers go right after
//! the matched text.

use std::collections::HashMap;

use tracing::debug;

use crate::latex::{check_match, EnvironmentTracker, Verdict};
use crate::matcher::ConceptMatcher;
use crate::stats::IndexStats;
use crate::throttle::Throttle;

/// Index marker for a concept
pub fn index_marker(concept: &str) -> String {
    format!("\\index{{{}}}", concept)
}

/// Rewrites manuscript text with index markers
pub struct Annotator {
    matcher: ConceptMatcher,
    allowed_environments: Vec<String>,
    throttle: Throttle,
}

impl Annotator {
    pub fn new(matcher: ConceptMatcher, allowed_environments: Vec<String>, throttle: Throttle) -> Self {
        Self {
            matcher,
            allowed_environments,
            throttle,
        }
    }

    /// Annotate a whole file. Environment depths and last-annotated lines
    /// start empty for every call; `stats` accumulates across calls.
    pub fn annotate_source(&self, source: &str, stats: &mut IndexStats) -> String {
        let mut tracker = EnvironmentTracker::new(self.allowed_environments.iter().cloned());
        let mut last_line: HashMap<String, usize> = HashMap::new();
        let mut output = String::with_capacity(source.len());

        for (line_nr, line) in source.split_inclusive('\n').enumerate() {
            tracker.observe(line);

            if tracker.is_excluded() {
                output.push_str(line);
                stats.environment_blocks_skipped += 1;
                continue;
            }

            output.push_str(&self.annotate_line(line, line_nr, &mut last_line, stats));
        }

        output
    }

    /// Annotate one eligible line.
    ///
    /// Matches are found on the original line; each offset is shifted by the
    /// length of the markers already inserted before it.
    pub fn annotate_line(
        &self,
        line: &str,
        line_nr: usize,
        last_line: &mut HashMap<String, usize>,
        stats: &mut IndexStats,
    ) -> String {
        let mut annotated = line.to_string();
        let mut inserted = 0usize;

        for found in self.matcher.find_iter(line) {
            let start = found.start + inserted;
            let end = found.end + inserted;

            match check_match(&annotated, start, end, found.concept) {
                Verdict::Accept => {}
                Verdict::Invalid(reason) => {
                    debug!(line = line_nr, concept = found.concept, ?reason, "Invalid match");
                    stats.invalid_matches += 1;
                    continue;
                }
                Verdict::NotAWord => continue,
            }

            let previous = last_line.get(found.concept).copied();
            if !self.throttle.can_annotate(previous, line_nr, found.concept) {
                continue;
            }

            let marker = index_marker(found.concept);
            annotated.insert_str(end, &marker);
            inserted += marker.len();

            stats.record_annotation(found.concept);
            last_line.insert(found.concept.to_string(), line_nr);
        }

        annotated
    }
}

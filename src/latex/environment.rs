//! LaTeX environment nesting tracker
//!
//! Lines inside any tracked environment are not indexed. Environments named
//! in the allow-list are never tracked, so their content stays eligible.
//! Only the first `\begin{..}` and the first `\end{..}` of a line are seen.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static BEGIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\begin\{(.*?)\}").unwrap());
static END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\end\{(.*?)\}").unwrap());

/// Environment depth counters for one file. A new tracker is built for every
/// file, so depths never carry over.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentTracker {
    allowed: HashSet<String>,
    depth: HashMap<String, i64>,
}

impl EnvironmentTracker {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            depth: HashMap::new(),
        }
    }

    /// Increment the depth of the first environment opened on `line`
    pub fn observe_begin(&mut self, line: &str) {
        if let Some(name) = first_capture(&BEGIN_RE, line) {
            if !self.allowed.contains(name) {
                *self.depth.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }

    /// Decrement the depth of the first environment closed on `line`
    pub fn observe_end(&mut self, line: &str) {
        if let Some(name) = first_capture(&END_RE, line) {
            if !self.allowed.contains(name) {
                *self.depth.entry(name.to_string()).or_insert(0) -= 1;
            }
        }
    }

    /// Apply both delimiters of a line, begin first
    pub fn observe(&mut self, line: &str) {
        self.observe_begin(line);
        self.observe_end(line);
    }

    /// True when some tracked environment is currently open
    pub fn is_excluded(&self) -> bool {
        self.depth.values().any(|&d| d > 0)
    }
}

fn first_capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> EnvironmentTracker {
        EnvironmentTracker::new(["sloppypar"])
    }

    fn depth_of(t: &EnvironmentTracker, name: &str) -> i64 {
        t.depth.get(name).copied().unwrap_or(0)
    }

    #[test]
    fn test_begin_line_is_excluded() {
        let mut t = tracker();
        t.observe("\\begin{figure}[t]\n");
        assert!(t.is_excluded());
        assert_eq!(depth_of(&t, "figure"), 1);
    }

    #[test]
    fn test_end_line_is_eligible_again() {
        let mut t = tracker();
        t.observe("\\begin{table}\n");
        t.observe("a model inside\n");
        assert!(t.is_excluded());
        t.observe("\\end{table}\n");
        assert!(!t.is_excluded());
    }

    #[test]
    fn test_allowed_environment_not_tracked() {
        let mut t = tracker();
        t.observe("\\begin{sloppypar}\n");
        assert!(!t.is_excluded());
        assert_eq!(depth_of(&t, "sloppypar"), 0);
    }

    #[test]
    fn test_nested_environments() {
        let mut t = tracker();
        t.observe("\\begin{figure}\n");
        t.observe("\\begin{center}\n");
        t.observe("\\end{center}\n");
        assert!(t.is_excluded());
        t.observe("\\end{figure}\n");
        assert!(!t.is_excluded());
    }

    #[test]
    fn test_only_first_delimiter_per_line() {
        let mut t = tracker();
        t.observe("\\begin{itemize}\\begin{enumerate}\n");
        assert_eq!(depth_of(&t, "itemize"), 1);
        assert_eq!(depth_of(&t, "enumerate"), 0);
    }

    #[test]
    fn test_inline_environment_balances_on_same_line() {
        let mut t = tracker();
        t.observe("see \\begin{math}x\\end{math} here\n");
        assert!(!t.is_excluded());
    }

    #[test]
    fn test_stray_end_goes_negative() {
        let mut t = tracker();
        t.observe("\\end{proof}\n");
        assert_eq!(depth_of(&t, "proof"), -1);
        assert!(!t.is_excluded());
        t.observe("\\begin{proof}\n");
        assert!(!t.is_excluded());
    }

    #[test]
    fn test_first_begin_wins_over_later_ones() {
        let mut t = tracker();
        t.observe("\\begin{sloppypar}\\begin{figure}\n");
        assert!(!t.is_excluded());
        assert_eq!(depth_of(&t, "figure"), 0);
    }
}

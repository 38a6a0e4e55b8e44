//! End-to-end indexing runs over small manuscripts

mod common;

use std::fs;

use common::TestManuscript;
use texindex::{run_indexer, TexIndexError, ThrottleMethod};

const TWO_LINES: &str = "The hypergraph model is useful.\nWe extend the hypergraph further.\n";

#[test]
fn stopword_concept_leaves_file_unchanged() {
    let m = TestManuscript::new()
        .with_file("main.tex", TWO_LINES)
        .with_concepts(&[("hypergraph", "hypergraph", 5.0)]);

    let report = run_indexer(&m.options(vec![ThrottleMethod::Stopword])).unwrap();

    assert_eq!(m.read_output("main.tex"), TWO_LINES);
    assert_eq!(report.stats.indexed_matches, 0);
    assert_eq!(report.stats.invalid_matches, 0);
    assert_eq!(report.stats.edited_files, 1);
    assert_eq!(report.stats.index_terms, 1);
}

#[test]
fn absent_concept_leaves_file_unchanged() {
    let m = TestManuscript::new()
        .with_file("main.tex", TWO_LINES)
        .with_concepts(&[("foo", "foo", 1.0)]);

    let report = run_indexer(&m.options(vec![ThrottleMethod::Stopword])).unwrap();

    assert_eq!(m.read_output("main.tex"), TWO_LINES);
    assert_eq!(report.stats.indexed_matches, 0);
    assert!(report.stats.annotation_distribution.is_empty());
}

#[test]
fn unthrottled_run_annotates_every_occurrence() {
    let m = TestManuscript::new()
        .with_file("main.tex", TWO_LINES)
        .with_concepts(&[("hypergraph", "hypergraph", 5.0)]);

    let report = run_indexer(&m.options(vec![])).unwrap();

    assert_eq!(
        m.read_output("main.tex"),
        "The hypergraph\\index{hypergraph} model is useful.\n\
         We extend the hypergraph\\index{hypergraph} further.\n"
    );
    assert_eq!(report.stats.annotation_distribution["hypergraph"], 2);
    // The original manuscript is never modified
    assert_eq!(m.read_source("main.tex"), TWO_LINES);
}

#[test]
fn annotates_included_files_and_copies_the_rest() {
    let m = TestManuscript::new()
        .with_file("main.tex", "\\input{chapters/intro}\n\\input{chapters/cover}\n")
        .with_file("chapters/intro.tex", "Entity linking uses a knowledge base.\n")
        .with_file("chapters/cover.tex", "Entity linking for the cover.\n")
        .with_file("figures/plot.txt", "Entity linking\n")
        .with_concepts(&[
            ("entity linking", "Entity linking", 3.0),
            ("knowledge base", "knowledge base", 2.0),
        ]);

    let mut options = m.options(vec![]);
    options.exclude = vec!["chapters/cover.tex".to_string()];
    let report = run_indexer(&options).unwrap();

    assert_eq!(
        m.read_output("chapters/intro.tex"),
        "Entity linking\\index{entity linking} uses a knowledge base\\index{knowledge base}.\n"
    );
    assert_eq!(m.read_output("chapters/cover.tex"), "Entity linking for the cover.\n");
    assert_eq!(m.read_output("figures/plot.txt"), "Entity linking\n");
    assert_eq!(report.stats.edited_files, 2);
    assert_eq!(report.target_dir, m.target_dir());
}

#[test]
fn environments_do_not_leak_across_files() {
    let m = TestManuscript::new()
        .with_file("a.tex", "\\begin{figure}\nthe graph\n")
        .with_file("main.tex", "the graph\n")
        .with_concepts(&[("graph", "graph", 1.0)]);

    let report = run_indexer(&m.options(vec![])).unwrap();

    assert_eq!(m.read_output("a.tex"), "\\begin{figure}\nthe graph\n");
    assert_eq!(m.read_output("main.tex"), "the graph\\index{graph}\n");
    assert_eq!(report.stats.environment_blocks_skipped, 2);
}

#[test]
fn extra_allowed_environment_is_indexed() {
    let source = "\\begin{itemize}\n\\item a graph\n\\end{itemize}\n";
    let m = TestManuscript::new()
        .with_file("main.tex", source)
        .with_concepts(&[("graph", "graph", 1.0)]);

    let mut options = m.options(vec![]);
    options.allowed_environments = vec!["itemize".to_string()];
    run_indexer(&options).unwrap();

    assert_eq!(
        m.read_output("main.tex"),
        "\\begin{itemize}\n\\item a graph\\index{graph}\n\\end{itemize}\n"
    );
}

#[test]
fn invalid_matches_are_counted_not_annotated() {
    let source = "See \\cite{graph} and \\graph and the graph/tree.\n";
    let m = TestManuscript::new()
        .with_file("main.tex", source)
        .with_concepts(&[("graph", "graph", 1.0), ("graph/tree", "graph/tree", 1.0)]);

    let report = run_indexer(&m.options(vec![])).unwrap();

    assert_eq!(m.read_output("main.tex"), source);
    assert_eq!(report.stats.invalid_matches, 3);
}

#[test]
fn distance_throttle_restarts_in_each_file() {
    let mut chapter = String::new();
    for i in 0..120 {
        if i == 0 || i == 100 {
            chapter.push_str("a graph here\n");
        } else {
            chapter.push_str("filler\n");
        }
    }
    let m = TestManuscript::new()
        .with_file("main.tex", &chapter)
        .with_file("second.tex", &chapter)
        .with_concepts(&[("graph", "graph", 1.0)]);

    let report = run_indexer(&m.options(vec![ThrottleMethod::Distance])).unwrap();

    assert_eq!(report.stats.indexed_matches, 2);
    for file in ["main.tex", "second.tex"] {
        let out = m.read_output(file);
        assert_eq!(out.matches("\\index{graph}").count(), 1);
        assert!(out.starts_with("a graph\\index{graph} here\n"));
    }
}

#[test]
fn existing_target_aborts_before_touching_anything() {
    let m = TestManuscript::new()
        .with_file("main.tex", TWO_LINES)
        .with_concepts(&[("hypergraph", "hypergraph", 5.0)]);
    fs::create_dir_all(m.target_dir()).unwrap();
    fs::write(m.target_dir().join("keep.txt"), "mine\n").unwrap();

    let err = run_indexer(&m.options(vec![])).unwrap_err();

    assert!(matches!(err, TexIndexError::TargetExists { .. }));
    assert!(!m.target_dir().join("main.tex").exists());
    assert_eq!(fs::read_to_string(m.target_dir().join("keep.txt")).unwrap(), "mine\n");
}

#[test]
fn missing_input_is_reported() {
    let m = TestManuscript::new().with_concepts(&[("graph", "graph", 1.0)]);
    let err = run_indexer(&m.options(vec![])).unwrap_err();
    assert!(matches!(err, TexIndexError::FileNotFound { .. }));
}

#[test]
fn report_lists_top_concepts() {
    let m = TestManuscript::new()
        .with_file("main.tex", "a node, a graph, a node\n")
        .with_concepts(&[("graph", "graph", 1.0), ("node", "node", 1.0)]);

    let report = run_indexer(&m.options(vec![])).unwrap();
    let text = report.stats.render_text(1);

    assert!(text.contains("    indexed matches: 3\n"));
    assert!(text.contains("ANNOTATION DISTRIBUTION (top 1)"));
    assert!(text.ends_with("      2 node\n"));
}

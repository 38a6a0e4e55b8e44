//! Concept table shared by the extractor and the indexer
//!
//! The table is a CSV file with header `concept,match,weight`. One concept
//! may appear on several rows, one per surface form that should be indexed
//! under it.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TexIndexError};

/// One (concept, surface form) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptEntry {
    /// Canonical index entry
    pub concept: String,
    /// Literal text recognized as an occurrence of the concept
    #[serde(rename = "match")]
    pub surface: String,
    /// Ranking weight, passed through untouched
    pub weight: f64,
}

impl ConceptEntry {
    pub fn new(concept: impl Into<String>, surface: impl Into<String>, weight: f64) -> Self {
        Self {
            concept: concept.into(),
            surface: surface.into(),
            weight,
        }
    }
}

/// Ordered list of concept rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConceptTable {
    pub entries: Vec<ConceptEntry>,
}

impl ConceptTable {
    pub fn new(entries: Vec<ConceptEntry>) -> Self {
        Self { entries }
    }

    /// Read a concept table from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TexIndexError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path)?;
        Self::from_reader(file).map_err(|e| TexIndexError::concept_table(path, e))
    }

    /// Write the table to a CSV file, replacing any existing content
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(file)
            .map_err(|e| TexIndexError::concept_table(path, e))
    }

    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let entries = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<ConceptEntry>, _>>()?;
        Ok(Self { entries })
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> std::result::Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if self.entries.is_empty() {
            csv_writer.write_record(["concept", "match", "weight"])?;
        }
        for entry in &self.entries {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConceptEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_aliases() {
        let csv = "concept,match,weight\n\
                   hypergraph,hypergraph,5.0\n\
                   hypergraph,hypergraphs,5.0\n\
                   entity linking,entity linking,2.5\n";
        let table = ConceptTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.entries[1], ConceptEntry::new("hypergraph", "hypergraphs", 5.0));
        assert_eq!(table.entries[2].weight, 2.5);
    }

    #[test]
    fn test_write_header_and_quoting() {
        let table = ConceptTable::new(vec![ConceptEntry::new("graph, weighted", "graph", 1.5)]);
        let mut out = Vec::new();
        table.to_writer(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "concept,match,weight\n\"graph, weighted\",graph,1.5\n");
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let mut out = Vec::new();
        ConceptTable::default().to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "concept,match,weight\n");
    }

    #[test]
    fn test_non_numeric_weight_is_error() {
        let csv = "concept,match,weight\nnode,node,heavy\n";
        assert!(ConceptTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConceptTable::load(Path::new("/nonexistent/concepts.csv")).unwrap_err();
        assert!(matches!(err, TexIndexError::FileNotFound { .. }));
    }
}

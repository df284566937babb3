//! One pipeline per tool. Each takes its parsed options and an output sink,
//! prints the report, writes the export if asked, and returns what it
//! collected so callers (and tests) can inspect it.
//!
//! A pipeline returns `Ok(None)` when the run ended early because the
//! requested dataset does not exist.

pub mod inspect;
pub mod multi;
pub mod show;

use std::io::Write;
use std::ops::Index;

use anyhow::Result;
use log::warn;
use serde::{Serialize, Serializer};

use crate::data::loader::load_parquet;
use crate::data::model::Dataset;
use crate::data::scan::{DataFile, DatasetNotFound};

/// Per-dataset results kept in the order the datasets were processed, so
/// the printed summary and the JSON export list them the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ByDataset<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ByDataset<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> ByDataset<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dataset's result. Dataset names are file stems within one
    /// directory, so each name is pushed at most once per run.
    pub fn push(&mut self, name: impl Into<String>, value: T) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Index<&str> for ByDataset<T> {
    type Output = T;

    fn index(&self, name: &str) -> &T {
        self.get(name)
            .unwrap_or_else(|| panic!("no dataset named '{name}'"))
    }
}

/// Serializes as a JSON object keyed by dataset name, in processing order.
impl<T: Serialize> Serialize for ByDataset<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Load a file, or report why it could not be loaded and return `None`.
fn load_or_report<W: Write>(file: &DataFile, out: &mut W) -> Result<Option<Dataset>> {
    match load_parquet(file) {
        Ok(dataset) => Ok(Some(dataset)),
        Err(err) => {
            warn!("skipping {}: {err:#}", file.path.display());
            writeln!(
                out,
                "Error loading {} from {}: {err:#}",
                file.name,
                file.path.display()
            )?;
            Ok(None)
        }
    }
}

fn report_not_found<W: Write>(not_found: &DatasetNotFound, out: &mut W) -> Result<()> {
    writeln!(out, "Error: {not_found}. Available datasets:")?;
    for name in &not_found.available {
        writeln!(out, "  - {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_processing_order() {
        let mut results = ByDataset::new();
        results.push("a-b", 1);
        results.push("a", 2);
        assert_eq!(results.names().collect::<Vec<_>>(), ["a-b", "a"]);
        assert_eq!(results["a"], 2);
        assert!(results.get("b").is_none());
        assert_eq!(serde_json::to_string(&results).unwrap(), r#"{"a-b":1,"a":2}"#);
    }

    #[test]
    fn not_found_lists_every_name() {
        let not_found = DatasetNotFound {
            requested: "desktop".into(),
            available: vec!["android".into(), "web".into()],
        };
        let mut out = Vec::new();
        report_not_found(&not_found, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Dataset 'desktop' not found. Available datasets:\n  - android\n  - web\n"
        );
    }
}

use std::fmt;

use serde::Serialize;

use crate::data::model::{Dataset, DecodingRule, FieldValue};

use super::format::INSTRUCTION_COLUMN;

/// Missing-value tally for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
    pub percent: f64,
}

/// Character-length distribution of a text column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthStats {
    pub avg: f64,
    pub min: usize,
    pub max: usize,
}

/// Descriptive statistics for one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetAnalysis {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<String>,
    /// Only columns with at least one missing value, in column order.
    pub missing: Vec<MissingCount>,
    /// Present only when the dataset has an `instruction` column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_length: Option<LengthStats>,
}

/// Compute row count, missing values per non-binary column, and the
/// instruction length distribution.
pub fn analyze(dataset: &Dataset) -> DatasetAnalysis {
    let rows = dataset.len();

    let missing = dataset
        .columns
        .iter()
        .filter(|c| c.rule != DecodingRule::OpaqueBinary)
        .filter_map(|c| {
            let missing = dataset
                .records
                .iter()
                .filter(|r| r.get(&c.name).map_or(true, FieldValue::is_missing))
                .count();
            (missing > 0).then(|| MissingCount {
                column: c.name.clone(),
                missing,
                percent: missing as f64 / rows as f64 * 100.0,
            })
        })
        .collect();

    let instruction_length = dataset
        .rule_of(INSTRUCTION_COLUMN)
        .and_then(|_| length_stats(dataset, INSTRUCTION_COLUMN));

    DatasetAnalysis {
        name: dataset.name.clone(),
        rows,
        columns: dataset.column_names(),
        missing,
        instruction_length,
    }
}

/// Lengths are counted in characters; null cells count as zero. `None` for
/// an empty dataset.
fn length_stats(dataset: &Dataset, column: &str) -> Option<LengthStats> {
    let lengths: Vec<usize> = dataset
        .records
        .iter()
        .map(|r| {
            r.get(column)
                .and_then(FieldValue::as_text)
                .map_or(0, |s| s.chars().count())
        })
        .collect();

    let min = *lengths.iter().min()?;
    let max = *lengths.iter().max()?;
    let avg = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    Some(LengthStats { avg, min, max })
}

impl fmt::Display for DatasetAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis of {} dataset:", self.name)?;
        writeln!(f, "  - Number of examples: {}", self.rows)?;
        writeln!(f, "  - Columns: {:?}", self.columns)?;
        for m in &self.missing {
            writeln!(
                f,
                "  - Missing values in '{}': {} ({:.2}%)",
                m.column, m.missing, m.percent
            )?;
        }
        if let Some(len) = &self.instruction_length {
            writeln!(
                f,
                "  - Instruction length: avg={:.1}, min={}, max={}",
                len.avg, len.min, len.max
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnRule, Record};
    use crate::data::schema::infer_schema;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn dataset(columns: &[&str], rows: Vec<Vec<FieldValue>>) -> Dataset {
        let rules: Vec<ColumnRule> = infer_schema(columns.iter());
        let names: Arc<[String]> = columns.iter().map(|c| c.to_string()).collect();
        Dataset {
            name: "test".into(),
            path: PathBuf::from("test.parquet"),
            columns: rules,
            records: rows
                .into_iter()
                .map(|values| Record::new(Arc::clone(&names), values))
                .collect(),
        }
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn counts_falsy_values_as_missing() {
        let ds = dataset(
            &["instruction", "gt_bbox", "image", "history"],
            vec![
                vec![text("go"), FieldValue::Numbers(vec![]), FieldValue::Binary, text("")],
                vec![text("home"), FieldValue::Numbers(vec![0.0]), FieldValue::Binary, FieldValue::Null],
                vec![text("x"), FieldValue::Numbers(vec![1.0]), FieldValue::Binary, text("a")],
                vec![text("y"), FieldValue::Null, FieldValue::Binary, text("b")],
            ],
        );
        let report = analyze(&ds);
        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, ["instruction", "gt_bbox", "image", "history"]);
        assert_eq!(
            report.missing,
            vec![
                MissingCount { column: "gt_bbox".into(), missing: 2, percent: 50.0 },
                MissingCount { column: "history".into(), missing: 2, percent: 50.0 },
            ]
        );
    }

    #[test]
    fn instruction_lengths_count_characters() {
        let ds = dataset(
            &["instruction"],
            vec![vec![text("ab")], vec![text("点击设置")], vec![text("abcdef")]],
        );
        let stats = analyze(&ds).instruction_length.unwrap();
        assert_eq!(stats.min, 2);
        assert_eq!(stats.max, 6);
        assert!((stats.avg - 4.0).abs() < 1e-9);
    }

    #[test]
    fn no_instruction_column_no_length_stats() {
        let ds = dataset(&["gt_action"], vec![vec![text("click")]]);
        assert!(analyze(&ds).instruction_length.is_none());
    }

    #[test]
    fn empty_dataset_reports_nothing_missing() {
        let ds = dataset(&["instruction", "history"], vec![]);
        let report = analyze(&ds);
        assert_eq!(report.rows, 0);
        assert!(report.missing.is_empty());
        assert!(report.instruction_length.is_none());
    }

    #[test]
    fn display_formats_percentages_and_lengths() {
        let ds = dataset(
            &["instruction", "history"],
            vec![
                vec![text("abc"), text("")],
                vec![text("abcd"), text("h")],
                vec![text("ab"), text("h")],
            ],
        );
        let out = analyze(&ds).to_string();
        assert!(out.starts_with("Analysis of test dataset:\n"));
        assert!(out.contains("  - Number of examples: 3\n"));
        assert!(out.contains("  - Columns: [\"instruction\", \"history\"]\n"));
        assert!(out.contains("  - Missing values in 'history': 1 (33.33%)\n"));
        assert!(out.contains("  - Instruction length: avg=3.0, min=2, max=4\n"));
    }
}

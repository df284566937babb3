use std::io::Write;

use anyhow::Result;
use serde_json::Value as JsonValue;

use crate::cli::InspectDatasetsCli;
use crate::data::loader::read_file_schema;
use crate::data::model::{Dataset, DecodingRule};
use crate::data::scan::{list_data_files, select_dataset, DataFile};
use crate::export::export_json;
use crate::report::analysis::{analyze, DatasetAnalysis};
use crate::report::banner;

use super::{load_or_report, report_not_found, ByDataset};

/// Dataset name → its analysis, or `None` if it failed to load.
pub type InspectionSummary = ByDataset<Option<DatasetAnalysis>>;

/// Load every selected dataset, print its statistics and a closing summary.
pub fn run<W: Write>(cli: &InspectDatasetsCli, out: &mut W) -> Result<Option<InspectionSummary>> {
    let data_dir = &cli.common.data_dir;
    let files = list_data_files(data_dir)?;
    writeln!(out, "Found {} parquet files in {}", files.len(), data_dir.display())?;

    let files = match select_dataset(files, &cli.dataset) {
        Ok(files) => files,
        Err(not_found) => {
            report_not_found(&not_found, out)?;
            return Ok(None);
        }
    };

    let mut summary = InspectionSummary::new();

    for file in &files {
        let file_name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.name.clone());
        if cli.verbose {
            writeln!(out, "\n{}\nProcessing {file_name}...\n{}", banner(50), banner(50))?;
            print_schema(file, out)?;
        } else {
            writeln!(out, "\nProcessing {file_name}...")?;
        }

        let Some(dataset) = load_or_report(file, out)? else {
            summary.push(file.name.clone(), None);
            continue;
        };

        writeln!(
            out,
            "Successfully loaded {} dataset with {} examples",
            dataset.name,
            dataset.len()
        )?;
        if cli.verbose && !dataset.is_empty() {
            print_preview(&dataset, out)?;
        }

        let analysis = analyze(&dataset);
        write!(out, "\n{analysis}")?;
        summary.push(dataset.name.clone(), Some(analysis));
    }

    writeln!(out, "\n{}", banner(80))?;
    writeln!(out, "SUMMARY OF LOADED DATASETS")?;
    writeln!(out, "{}", banner(80))?;
    for (name, analysis) in summary.iter() {
        match analysis {
            Some(a) => writeln!(out, "{name}: {} examples, columns: {:?}", a.rows, a.columns)?,
            None => writeln!(out, "{name}: Failed to load")?,
        }
    }

    if cli.common.save_json {
        export_json(&cli.json_path, &summary, "Summary", out)?;
    }

    Ok(Some(summary))
}

/// Schema as stored in the file. Unreadable schemas are left for the loader
/// to report.
fn print_schema<W: Write>(file: &DataFile, out: &mut W) -> Result<()> {
    if let Ok(schema) = read_file_schema(&file.path) {
        writeln!(out, "Schema for {}:", file.name)?;
        for field in schema.fields() {
            writeln!(out, "{}: {}", field.name(), field.data_type())?;
        }
    }
    Ok(())
}

/// First row as JSON with binary columns left out, then the column list.
fn print_preview<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    let Some(first) = dataset.get(0) else {
        return Ok(());
    };
    let preview: serde_json::Map<String, JsonValue> = first
        .iter()
        .filter(|(name, _)| dataset.rule_of(name) != Some(DecodingRule::OpaqueBinary))
        .map(|(name, value)| (name.to_string(), value.to_json()))
        .collect();

    writeln!(out, "Sample from {}:", dataset.name)?;
    writeln!(out, "{}", JsonValue::Object(preview))?;
    writeln!(out, "Available columns: {:?}", dataset.column_names())?;
    Ok(())
}

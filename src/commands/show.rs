use std::io::Write;

use anyhow::Result;

use crate::cli::ShowSamplesCli;
use crate::data::model::MaskedRecord;
use crate::data::scan::list_data_files;
use crate::data::select::clamp_index;
use crate::export::export_json;
use crate::report::banner;
use crate::report::format::format_plain;

use super::{load_or_report, ByDataset};

/// Dataset name → the one masked record shown for it.
pub type SingleSampleCollection = ByDataset<MaskedRecord>;

/// Print the record at `sample_index` (clamped) from every dataset.
pub fn run<W: Write>(cli: &ShowSamplesCli, out: &mut W) -> Result<SingleSampleCollection> {
    let data_dir = &cli.common.data_dir;
    let files = list_data_files(data_dir)?;
    writeln!(out, "Found {} parquet files in {}", files.len(), data_dir.display())?;

    let mut samples = SingleSampleCollection::new();

    for file in &files {
        writeln!(out, "\n{}", banner(80))?;
        writeln!(out, "Sample from {}:", file.name)?;
        writeln!(out, "{}", banner(80))?;

        let record = load_or_report(file, out)?.and_then(|dataset| {
            let index = clamp_index(dataset.len(), cli.sample_index)?;
            dataset.records.into_iter().nth(index)
        });
        let Some(record) = record else {
            writeln!(out, "No samples available for {}", file.name)?;
            continue;
        };

        write!(out, "{}", format_plain(&record))?;
        samples.push(file.name.clone(), record.masked());
    }

    if cli.common.save_json {
        export_json(&cli.json_path, &samples, "Samples", out)?;
    }

    Ok(samples)
}

use std::io::Write;

use anyhow::Result;
use log::debug;
use rand::Rng;

use crate::cli::ShowMultipleSamplesCli;
use crate::data::model::MaskedRecord;
use crate::data::scan::{list_data_files, select_dataset};
use crate::data::select::{select_indices, SelectionPolicy};
use crate::export::export_json;
use crate::report::banner;
use crate::report::format::format_sample;

use super::{load_or_report, report_not_found, ByDataset};

/// Dataset name → the masked records shown for it.
pub type SampleCollection = ByDataset<Vec<MaskedRecord>>;

/// Print `num_samples` records from each selected dataset.
pub fn run<W, R>(cli: &ShowMultipleSamplesCli, out: &mut W, rng: &mut R) -> Result<Option<SampleCollection>>
where
    W: Write,
    R: Rng + ?Sized,
{
    let data_dir = &cli.common.data_dir;
    let files = match select_dataset(list_data_files(data_dir)?, &cli.dataset) {
        Ok(files) => files,
        Err(not_found) => {
            report_not_found(&not_found, out)?;
            return Ok(None);
        }
    };

    writeln!(out, "Found {} parquet files in {}", files.len(), data_dir.display())?;
    writeln!(out, "Showing {} samples from each dataset", cli.num_samples)?;

    let policy = if cli.random {
        SelectionPolicy::Random
    } else {
        SelectionPolicy::Sequential
    };
    let mut samples = SampleCollection::new();

    for file in &files {
        writeln!(out, "\n{}", banner(80))?;
        writeln!(out, "Dataset: {}", file.name)?;
        writeln!(out, "{}", banner(80))?;

        let dataset = match load_or_report(file, out)? {
            Some(dataset) if !dataset.is_empty() => dataset,
            _ => {
                writeln!(out, "No samples available for {}", file.name)?;
                continue;
            }
        };

        let indices = select_indices(dataset.len(), cli.num_samples, policy, rng);
        debug!("{}: showing rows {indices:?}", dataset.name);

        let mut shown = Vec::with_capacity(indices.len());
        for index in indices {
            let Some(record) = dataset.get(index) else {
                continue;
            };
            writeln!(out, "{}\n", format_sample(record, index))?;
            shown.push(record.masked());
        }
        samples.push(dataset.name.clone(), shown);
    }

    if cli.common.save_json {
        export_json(&cli.json_path, &samples, "Samples", out)?;
    }

    Ok(Some(samples))
}

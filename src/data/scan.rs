use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

pub const PARQUET_EXTENSION: &str = "parquet";

/// Selects every data file in the directory.
pub const ALL_DATASETS: &str = "all";

/// A data file found in the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    /// File stem, used as the dataset name.
    pub name: String,
    pub path: PathBuf,
}

impl DataFile {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_stem()?.to_str()?.to_string();
        Some(DataFile {
            name,
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug, Error)]
#[error("Dataset '{requested}' not found")]
pub struct DatasetNotFound {
    pub requested: String,
    pub available: Vec<String>,
}

/// List the `.parquet` files directly inside `dir`, sorted by file name.
pub fn list_data_files(dir: &Path) -> Result<Vec<DataFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("listing data directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("reading entry in {}", dir.display()))?
            .path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PARQUET_EXTENSION) {
            continue;
        }
        match DataFile::from_path(&path) {
            Some(file) => files.push(file),
            None => log::warn!("skipping {}: file name is not valid UTF-8", path.display()),
        }
    }

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

/// Narrow `files` to the requested dataset. `"all"` keeps everything.
pub fn select_dataset(files: Vec<DataFile>, requested: &str) -> Result<Vec<DataFile>, DatasetNotFound> {
    if requested == ALL_DATASETS {
        return Ok(files);
    }
    match files.iter().position(|f| f.name == requested) {
        Some(i) => Ok(vec![files[i].clone()]),
        None => Err(DatasetNotFound {
            requested: requested.to_string(),
            available: files.into_iter().map(|f| f.name).collect(),
        }),
    }
}

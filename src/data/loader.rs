use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::kernels::cast::{can_cast_types, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Field, Float64Type, SchemaRef};
use arrow::error::ArrowError;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{ColumnRule, DecodingRule, Dataset, FieldValue, Record};
use super::scan::DataFile;
use super::schema::infer_schema;

/// A column whose stored values cannot be read under its inferred rule.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("column '{column}' has type {data_type}, which cannot be read as {rule}")]
    Unsupported {
        column: String,
        data_type: DataType,
        rule: DecodingRule,
    },
    #[error("column '{column}' holds a value that cannot be read as {rule}")]
    Malformed {
        column: String,
        rule: DecodingRule,
        #[source]
        source: ArrowError,
    },
    #[error("column '{column}' is a struct without a binary 'bytes' field")]
    MissingBytes { column: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every row of a Parquet data file.
///
/// The file schema is read first and a [`DecodingRule`] is inferred for each
/// column from its name. Record batches are then decoded column by column
/// under those rules. Any failure (missing file, bad footer, a value that
/// does not fit its rule) fails the whole file.
pub fn load_parquet(file: &DataFile) -> Result<Dataset> {
    let handle = std::fs::File::open(&file.path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(handle).context("reading parquet metadata")?;

    let columns = infer_schema(builder.schema().fields().iter().map(|f| f.name()));
    debug!(
        "{}: {}",
        file.name,
        columns
            .iter()
            .map(|c| format!("{} => {}", c.name, c.rule))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let reader = builder.build().context("building parquet reader")?;
    let names: Arc<[String]> = columns.iter().map(|c| c.name.clone()).collect();
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let decoded = columns
            .iter()
            .zip(batch.columns())
            .map(|(column, array)| decode_column(column, array))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cells: Vec<_> = decoded.into_iter().map(Vec::into_iter).collect();
        for _ in 0..batch.num_rows() {
            let values = cells
                .iter_mut()
                .map(|col| col.next().unwrap_or(FieldValue::Null))
                .collect();
            records.push(Record::new(Arc::clone(&names), values));
        }
    }

    debug!("{}: decoded {} rows", file.name, records.len());

    Ok(Dataset {
        name: file.name.clone(),
        path: file.path.clone(),
        columns,
        records,
    })
}

/// Arrow schema of a Parquet file, as stored, without reading any rows.
pub fn read_file_schema(path: &Path) -> Result<SchemaRef> {
    let handle = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(handle).context("reading parquet metadata")?;
    Ok(builder.schema().clone())
}

/// Shorthand for loading a file by path; the dataset is named after the
/// file stem.
pub fn load_path(path: &Path) -> Result<Dataset> {
    let file = DataFile::from_path(path)
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    load_parquet(&file)
}

// ---------------------------------------------------------------------------
// Column codecs
// ---------------------------------------------------------------------------

/// Decode one Arrow column under its rule, yielding one value per row.
pub fn decode_column(column: &ColumnRule, array: &ArrayRef) -> Result<Vec<FieldValue>, DecodeError> {
    match column.rule {
        DecodingRule::Text => decode_text(column, array),
        DecodingRule::NumericSequence => decode_numbers(column, array),
        DecodingRule::OpaqueBinary => decode_binary(column, array),
    }
}

fn decode_text(column: &ColumnRule, array: &ArrayRef) -> Result<Vec<FieldValue>, DecodeError> {
    let utf8 = strict_cast(column, array, &DataType::Utf8)?;
    Ok(utf8
        .as_string::<i32>()
        .iter()
        .map(|v| v.map_or(FieldValue::Null, |s| FieldValue::Text(s.to_string())))
        .collect())
}

/// Lists of integers or floats, widened to `f64`. Null elements become NaN.
/// A column of Arrow type `Null` decodes as all-null cells.
fn decode_numbers(column: &ColumnRule, array: &ArrayRef) -> Result<Vec<FieldValue>, DecodeError> {
    match array.data_type() {
        DataType::List(_) | DataType::LargeList(_) | DataType::FixedSizeList(_, _) => {}
        DataType::Null => return Ok(vec![FieldValue::Null; array.len()]),
        other => return Err(unsupported(column, other)),
    }

    let target = DataType::List(Arc::new(Field::new("item", DataType::Float64, true)));
    let lists = strict_cast(column, array, &target)?;
    let lists = lists.as_list::<i32>();

    Ok((0..lists.len())
        .map(|row| {
            if lists.is_null(row) {
                return FieldValue::Null;
            }
            let values = lists.value(row);
            let values = values.as_primitive::<Float64Type>();
            FieldValue::Numbers(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        })
        .collect())
}

/// Hugging Face writes images as `struct<bytes: binary, path: string>`;
/// plain binary columns are accepted too. The payload is never read, only
/// its type is checked, so null cells (and a column of Arrow type `Null`)
/// are masked like any other.
fn decode_binary(column: &ColumnRule, array: &ArrayRef) -> Result<Vec<FieldValue>, DecodeError> {
    if let DataType::Struct(_) = array.data_type() {
        let bytes = array
            .as_struct()
            .column_by_name("bytes")
            .ok_or_else(|| DecodeError::MissingBytes {
                column: column.name.clone(),
            })?;
        check_payload(column, bytes)?;
    } else {
        check_payload(column, array)?;
    }
    Ok(vec![FieldValue::Binary; array.len()])
}

fn check_payload(column: &ColumnRule, array: &ArrayRef) -> Result<(), DecodeError> {
    match array.data_type() {
        DataType::Binary
        | DataType::LargeBinary
        | DataType::BinaryView
        | DataType::FixedSizeBinary(_)
        | DataType::Null => Ok(()),
        other => Err(unsupported(column, other)),
    }
}

// -- helpers --

/// Cast that fails on any value that does not convert, instead of nulling it.
fn strict_cast(column: &ColumnRule, array: &ArrayRef, to: &DataType) -> Result<ArrayRef, DecodeError> {
    if !can_cast_types(array.data_type(), to) {
        return Err(unsupported(column, array.data_type()));
    }
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array, to, &options).map_err(|source| DecodeError::Malformed {
        column: column.name.clone(),
        rule: column.rule,
        source,
    })
}

fn unsupported(column: &ColumnRule, data_type: &DataType) -> DecodeError {
    DecodeError::Unsupported {
        column: column.name.clone(),
        data_type: data_type.clone(),
        rule: column.rule,
    }
}

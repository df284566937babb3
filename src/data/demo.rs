//! Synthetic GUI-grounding rows, laid out the way the real dataset files are:
//! text columns, a `gt_bbox` list and an `image` struct of `{bytes, path}`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BinaryArray, Float64Builder, ListBuilder, StringArray, StructArray};
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TARGETS: &[&str] = &["Settings", "Search", "Back", "Send", "Profile"];
const ACTIONS: &[&str] = &["click", "type", "scroll"];
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Build `rows` synthetic samples. Output is deterministic.
///
/// Row `i` has the instruction `#i ...`; row 0 has the `None` history
/// marker; only `type` actions carry input text.
pub fn demo_batch(rows: usize) -> Result<RecordBatch, ArrowError> {
    let mut rng = StdRng::seed_from_u64(42);

    let mut instructions = Vec::with_capacity(rows);
    let mut histories = Vec::with_capacity(rows);
    let mut actions = Vec::with_capacity(rows);
    let mut input_texts = Vec::with_capacity(rows);
    let mut images = Vec::with_capacity(rows);
    let mut paths = Vec::with_capacity(rows);
    let mut bbox_builder = ListBuilder::new(Float64Builder::new());

    for i in 0..rows {
        let target = TARGETS[i % TARGETS.len()];
        let action = ACTIONS[i % ACTIONS.len()];

        instructions.push(format!("#{i} Tap the {target} button"));
        histories.push(if i == 0 {
            "None".to_string()
        } else {
            format!("Step {i}: opened the {} screen", TARGETS[(i - 1) % TARGETS.len()])
        });
        actions.push(action.to_string());
        input_texts.push(if action == "type" {
            format!("query {i}")
        } else {
            "no input text".to_string()
        });

        let x: f64 = rng.gen_range(0.0..900.0);
        let y: f64 = rng.gen_range(0.0..1800.0);
        bbox_builder
            .values()
            .append_slice(&[x.round(), y.round(), (x + 120.0).round(), (y + 60.0).round()]);
        bbox_builder.append(true);

        let mut png = PNG_MAGIC.to_vec();
        png.extend((0..64).map(|_| rng.gen::<u8>()));
        images.push(png);
        paths.push(format!("screens/{i:05}.png"));
    }

    let image_fields = Fields::from(vec![
        Field::new("bytes", DataType::Binary, true),
        Field::new("path", DataType::Utf8, true),
    ]);
    let image = StructArray::new(
        image_fields.clone(),
        vec![
            Arc::new(BinaryArray::from_iter_values(images.iter())) as ArrayRef,
            Arc::new(StringArray::from(paths)) as ArrayRef,
        ],
        None,
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("instruction", DataType::Utf8, false),
        Field::new("history", DataType::Utf8, false),
        Field::new("gt_action", DataType::Utf8, false),
        Field::new(
            "gt_bbox",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            true,
        ),
        Field::new("gt_input_text", DataType::Utf8, false),
        Field::new("image", DataType::Struct(image_fields), true),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(instructions)),
            Arc::new(StringArray::from(histories)),
            Arc::new(StringArray::from(actions)),
            Arc::new(bbox_builder.finish()),
            Arc::new(StringArray::from(input_texts)),
            Arc::new(image),
        ],
    )
}

/// Write one batch to a new Parquet file at `path`.
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};

    #[test]
    fn batch_has_requested_rows_and_columns() {
        let batch = demo_batch(5).unwrap();
        assert_eq!(batch.num_rows(), 5);
        let names: Vec<_> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(
            names,
            ["instruction", "history", "gt_action", "gt_bbox", "gt_input_text", "image"]
        );
    }

    #[test]
    fn batch_is_deterministic() {
        assert_eq!(demo_batch(3).unwrap(), demo_batch(3).unwrap());
    }

    #[test]
    fn only_type_actions_carry_input_text() {
        let batch = demo_batch(6).unwrap();
        let actions = batch.column(2).as_string::<i32>();
        let texts = batch.column(4).as_string::<i32>();
        for row in 0..actions.len() {
            let typed = actions.value(row) == "type";
            assert_eq!(texts.value(row) != "no input text", typed);
        }
    }
}

use crate::data::model::{FieldValue, Record, BINARY_PLACEHOLDER};
use crate::data::schema::{BBOX_COLUMN, IMAGE_COLUMN};

pub const INSTRUCTION_COLUMN: &str = "instruction";
pub const HISTORY_COLUMN: &str = "history";
pub const ACTION_COLUMN: &str = "gt_action";
pub const INPUT_TEXT_COLUMN: &str = "gt_input_text";

/// `gt_input_text` value meaning the action types nothing.
pub const NO_INPUT_TEXT: &str = "no input text";
/// `history` value meaning there were no earlier steps.
pub const EMPTY_HISTORY: &str = "None";

/// Fields shown before everything else, in this order.
const PRIORITY_COLUMNS: &[&str] = &[
    INSTRUCTION_COLUMN,
    HISTORY_COLUMN,
    ACTION_COLUMN,
    BBOX_COLUMN,
    INPUT_TEXT_COLUMN,
];

/// Order in which a record's fields are displayed: priority fields first,
/// then the rest in file order, then the image.
pub fn display_order(record: &Record) -> Vec<&str> {
    let mut order: Vec<&str> = PRIORITY_COLUMNS
        .iter()
        .copied()
        .filter(|name| record.contains(name))
        .collect();

    order.extend(
        record
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !PRIORITY_COLUMNS.iter().any(|p| p == name) && *name != IMAGE_COLUMN),
    );

    if record.contains(IMAGE_COLUMN) {
        order.push(IMAGE_COLUMN);
    }
    order
}

/// A single display line for a field, or `None` if the field is suppressed.
fn field_line(name: &str, value: &FieldValue) -> Option<String> {
    match name {
        INSTRUCTION_COLUMN => Some(format!("Instruction: {value}")),
        HISTORY_COLUMN => {
            let text = value.as_text()?.trim();
            (!text.is_empty() && text != EMPTY_HISTORY).then(|| format!("History: {value}"))
        }
        ACTION_COLUMN => Some(format!("Action: {value}")),
        BBOX_COLUMN => Some(format!("Bounding Box: {value}")),
        INPUT_TEXT_COLUMN => {
            (value.as_text() != Some(NO_INPUT_TEXT)).then(|| format!("Input Text: {value}"))
        }
        IMAGE_COLUMN => Some(format!("Image: {BINARY_PLACEHOLDER}")),
        other => Some(format!("{other}: {value}")),
    }
}

/// Multi-line block for one sample, headed by its row index.
pub fn format_sample(record: &Record, index: usize) -> String {
    let mut out = format!("Sample #{index}:\n{}", "-".repeat(40));
    for name in display_order(record) {
        let Some(value) = record.get(name) else {
            continue;
        };
        if let Some(line) = field_line(name, value) {
            out.push('\n');
            out.push_str(&line);
        }
    }
    out
}

/// `name: value` per field in file order, binary fields masked.
pub fn format_plain(record: &Record) -> String {
    let mut out = String::new();
    for (name, value) in record.iter() {
        out.push_str(&format!("{name}: {value}\n"));
    }
    out
}

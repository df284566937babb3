//! Presentation of loaded datasets: sample formatting and the statistics
//! report.

pub mod analysis;
pub mod format;

/// Separator printed around per-dataset headers.
pub fn banner(width: usize) -> String {
    "=".repeat(width)
}

use tracing::debug;

use crate::build::build;
use crate::diagnostics::Diagnostics;
use crate::extract::{extract, ExtractedCode, ParseOptions};
use crate::layout::{assign_layout, LayoutConfig};
use crate::position::Position;

/// Codes of the built-in sample dataset. `0300103` and `0300104` share
/// slot `03-001`.
pub const SAMPLE_CODES: [&str; 5] = ["0300103", "0300104", "0501702", "0501703", "0700305"];

/// Extracts, groups and lays out every location code in `text`.
pub fn parse(
    text: &str,
    options: &ParseOptions,
    layout: &LayoutConfig,
    diag: &dyn Diagnostics,
) -> Vec<Position> {
    let codes = extract(text, options, diag);
    let positions = assign_layout(build(&codes, diag), layout);
    debug!(positions = positions.len(), "parsed location text");
    positions
}

/// A small fixed dataset for when no source is available.
pub fn sample_positions(layout: &LayoutConfig) -> Vec<Position> {
    let codes: Vec<ExtractedCode> = SAMPLE_CODES
        .iter()
        .filter_map(|c| c.parse().ok())
        .map(ExtractedCode::bare)
        .collect();
    assign_layout(build(&codes, &crate::NoDiagnostics), layout)
}

//! Rackmap Core - location-code parsing and layout engine for warehouse slots

pub mod build;
pub mod code;
pub mod compare;
pub mod diagnostics;
pub mod extract;
pub mod layout;
pub mod pipeline;
pub mod position;

pub use build::build;
pub use code::{CodeError, LocationCode};
pub use compare::{changes, compare, summarize, Change, ComparisonSummary};
pub use diagnostics::{Diagnostics, NoDiagnostics, Stage, StageCounts, TracingDiagnostics};
pub use extract::{extract, ExtractedCode, ParseOptions, SourceFormat};
pub use layout::{aisle_headers, assign_layout, bounds, AisleHeader, Axis, Bounds, LayoutConfig};
pub use pipeline::{parse, sample_positions, SAMPLE_CODES};
pub use position::{Floor, Position, PositionId};

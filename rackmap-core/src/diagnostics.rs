//! Observability seam for the parsing pipeline.
//!
//! Each pipeline step reports how many items survived it. What happens to
//! those counts is up to the [`Diagnostics`] implementation handed in by the
//! caller; none of them influence the pipeline's output.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use serde::Serialize;

/// A counted step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Lines in the raw text.
    LinesRead,
    /// Lines that passed the format filter.
    CodesMatched,
    /// Codes left after the height-zero filter.
    CodesKept,
    /// Distinct `(aisle, slot)` groups.
    GroupsFormed,
    /// Positions materialized from those groups.
    PositionsBuilt,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LinesRead => "lines_read",
            Stage::CodesMatched => "codes_matched",
            Stage::CodesKept => "codes_kept",
            Stage::GroupsFormed => "groups_formed",
            Stage::PositionsBuilt => "positions_built",
        };
        f.write_str(name)
    }
}

/// Receives stage counts from the pipeline.
pub trait Diagnostics: Send + Sync {
    fn record(&self, stage: Stage, count: usize);
}

/// Emits every count as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, stage: Stage, count: usize) {
        tracing::debug!(%stage, count, "pipeline stage");
    }
}

/// Discards all counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn record(&self, _stage: Stage, _count: usize) {}
}

/// Keeps the most recent count per stage.
#[derive(Debug, Default)]
pub struct StageCounts {
    counts: Mutex<BTreeMap<Stage, usize>>,
}

impl StageCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stage: Stage) -> Option<usize> {
        self.lock().get(&stage).copied()
    }

    /// Snapshot of every recorded stage, in pipeline order.
    pub fn snapshot(&self) -> BTreeMap<Stage, usize> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<Stage, usize>> {
        // A poisoned map still holds valid counts.
        self.counts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Diagnostics for StageCounts {
    fn record(&self, stage: Stage, count: usize) {
        self.lock().insert(stage, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_counts_keeps_latest() {
        let counts = StageCounts::new();
        counts.record(Stage::LinesRead, 3);
        counts.record(Stage::LinesRead, 5);
        counts.record(Stage::CodesKept, 2);

        assert_eq!(counts.get(Stage::LinesRead), Some(5));
        assert_eq!(counts.get(Stage::CodesKept), Some(2));
        assert_eq!(counts.get(Stage::GroupsFormed), None);
        assert_eq!(counts.snapshot().len(), 2);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::GroupsFormed.to_string(), "groups_formed");
    }
}

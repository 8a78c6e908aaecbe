//! Merging of two snapshots into one highlighted position set.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::layout::{assign_layout, LayoutConfig};
use crate::position::{Position, PositionId};

/// How a slot differs between a baseline and a target snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl Change {
    pub fn is_highlighted(self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

/// Floors compare by level and by per-level material sequence.
fn classify(baseline: Option<&Position>, target: Option<&Position>) -> Change {
    match (baseline, target) {
        (Some(b), Some(t)) if b.floors == t.floors => Change::Unchanged,
        (Some(_), Some(_)) => Change::Modified,
        (None, Some(_)) => Change::Added,
        (Some(_), None) | (None, None) => Change::Removed,
    }
}

/// First occurrence of each id wins.
fn index(positions: &[Position]) -> BTreeMap<&str, &Position> {
    let mut by_id = BTreeMap::new();
    for pos in positions {
        by_id.entry(pos.id.as_str()).or_insert(pos);
    }
    by_id
}

/// Per-id change between the two snapshots, over the union of their ids.
pub fn changes(baseline: &[Position], target: &[Position]) -> BTreeMap<PositionId, Change> {
    let base = index(baseline);
    let next = index(target);
    let ids: BTreeSet<&str> = base.keys().chain(next.keys()).copied().collect();

    ids.into_iter()
        .map(|id| {
            let change = classify(base.get(id).copied(), next.get(id).copied());
            (id.to_string(), change)
        })
        .collect()
}

/// Merges `target` onto `baseline`.
///
/// Every slot of either snapshot is present in the result. Slots that were
/// added, removed or whose floors differ are highlighted. `show_target`
/// selects whose floors are shown for slots present in both. Layout is
/// recomputed over the union, so toggling `show_target` never moves a box.
pub fn compare(
    baseline: &[Position],
    target: &[Position],
    show_target: bool,
    config: &LayoutConfig,
) -> Vec<Position> {
    let base = index(baseline);
    let mut merged = Vec::with_capacity(baseline.len().max(target.len()));
    let mut seen = BTreeSet::new();

    for t in target {
        if !seen.insert(t.id.as_str()) {
            continue;
        }
        let b = base.get(t.id.as_str()).copied();
        let change = classify(b, Some(t));

        let mut pos = t.clone();
        if let (Some(b), false) = (b, show_target) {
            pos.floors = b.floors.clone();
        }
        pos.highlighted = change.is_highlighted();
        merged.push(pos);
    }

    for b in baseline {
        if seen.insert(b.id.as_str()) {
            let mut pos = b.clone();
            pos.highlighted = true;
            merged.push(pos);
        }
    }

    assign_layout(merged, config)
}

/// Counts of each change kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

pub fn summarize(baseline: &[Position], target: &[Position]) -> ComparisonSummary {
    changes(baseline, target)
        .values()
        .fold(ComparisonSummary::default(), |mut acc, change| {
            match change {
                Change::Added => acc.added += 1,
                Change::Removed => acc.removed += 1,
                Change::Modified => acc.changed += 1,
                Change::Unchanged => acc.unchanged += 1,
            }
            acc
        })
}

//! Grouping of extracted codes into positions.

use std::collections::BTreeMap;

use crate::diagnostics::{Diagnostics, Stage};
use crate::extract::ExtractedCode;
use crate::position::{Floor, Position};

/// `level -> materials` for one `(aisle, slot)` group.
type LevelMap = BTreeMap<u8, Vec<String>>;

/// Groups codes by `(aisle, slot)` and assembles each group's floors.
///
/// Repeated levels collapse into one floor; their material batches are
/// appended in encounter order. Coordinates are left unassigned, see
/// [`assign_layout`](crate::layout::assign_layout).
pub fn build(codes: &[ExtractedCode], diag: &dyn Diagnostics) -> Vec<Position> {
    let mut groups: BTreeMap<(&str, &str), LevelMap> = BTreeMap::new();

    for extracted in codes {
        let code = &extracted.code;
        let materials = groups
            .entry((code.aisle(), code.slot()))
            .or_default()
            .entry(code.level())
            .or_default();
        if let Some(batch) = &extracted.materials {
            materials.extend(batch.iter().cloned());
        }
    }
    diag.record(Stage::GroupsFormed, groups.len());

    let positions: Vec<Position> = groups
        .into_iter()
        .filter_map(|((aisle, slot), levels)| {
            if levels.is_empty() {
                tracing::warn!(aisle, slot, "group without floors skipped");
                return None;
            }
            let floors = levels
                .into_iter()
                .map(|(level, materials)| Floor { level, materials })
                .collect();
            Some(Position::unplaced(aisle, slot, floors))
        })
        .collect();
    diag.record(Stage::PositionsBuilt, positions.len());

    positions
}

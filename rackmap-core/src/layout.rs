//! Deterministic grid placement of positions.
//!
//! Every distinct aisle gets an ordinal rank by numeric value, and every slot
//! gets a rank among the slots of its aisle. Pixel coordinates follow from
//! those ranks and the box/gap dimensions in [`LayoutConfig`], so re-parsing
//! the same data always lands every box at the same place.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Which screen axis the aisle rank drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Aisles are columns (x), slots are rows within the column (y).
    #[default]
    AisleColumns,
    /// Aisles are rows (y), slots are columns within the row (x).
    AisleRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub box_width: u32,
    pub box_height: u32,
    pub gap_x: u32,
    pub gap_y: u32,
    pub margin: u32,
    pub axis: Axis,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 50,
            box_height: 35,
            gap_x: 12,
            gap_y: 10,
            margin: 5,
            axis: Axis::default(),
        }
    }
}

impl LayoutConfig {
    fn step_x(&self) -> u32 {
        self.box_width.saturating_add(self.gap_x)
    }

    fn step_y(&self) -> u32 {
        self.box_height.saturating_add(self.gap_y)
    }

    /// Pixel origin of the box at the given ranks. Saturates at `u32::MAX`.
    pub fn origin(&self, aisle_index: usize, slot_index: usize) -> (u32, u32) {
        let (col, row) = match self.axis {
            Axis::AisleColumns => (aisle_index, slot_index),
            Axis::AisleRows => (slot_index, aisle_index),
        };
        let offset = |rank: usize, step: u32| {
            u32::try_from(rank)
                .unwrap_or(u32::MAX)
                .saturating_mul(step)
                .saturating_add(self.margin)
        };
        (offset(col, self.step_x()), offset(row, self.step_y()))
    }
}

/// Sort key for aisle and slot identifiers: numeric first, text as tiebreak.
fn numeric_key(id: &str) -> (u64, &str) {
    (id.parse().unwrap_or(u64::MAX), id)
}

fn sorted_numeric<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    ids.sort_by_key(|&id| numeric_key(id));
    ids
}

/// Ranks of every aisle and of every slot within its aisle.
struct Ranks {
    aisles: BTreeMap<String, usize>,
    slots: BTreeMap<(String, String), usize>,
}

impl Ranks {
    fn compute(positions: &[Position]) -> Self {
        let mut by_aisle: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for pos in positions {
            by_aisle
                .entry(pos.aisle.as_str())
                .or_default()
                .insert(pos.slot.as_str());
        }

        let mut aisles = BTreeMap::new();
        let mut slots = BTreeMap::new();
        for (aisle_index, aisle) in sorted_numeric(by_aisle.keys().copied()).into_iter().enumerate() {
            aisles.insert(aisle.to_string(), aisle_index);
            let in_aisle = by_aisle.get(aisle).into_iter().flatten().copied();
            for (slot_index, slot) in sorted_numeric(in_aisle).into_iter().enumerate() {
                slots.insert((aisle.to_string(), slot.to_string()), slot_index);
            }
        }

        Self { aisles, slots }
    }

    fn of(&self, pos: &Position) -> (usize, usize) {
        let aisle = self.aisles.get(&pos.aisle).copied().unwrap_or_default();
        let slot = self
            .slots
            .get(&(pos.aisle.clone(), pos.slot.clone()))
            .copied()
            .unwrap_or_default();
        (aisle, slot)
    }
}

/// Fills in ranks, coordinates and box size, and orders the result by
/// `(aisle_index, slot_index)`.
pub fn assign_layout(mut positions: Vec<Position>, config: &LayoutConfig) -> Vec<Position> {
    let ranks = Ranks::compute(&positions);

    for pos in &mut positions {
        let (aisle_index, slot_index) = ranks.of(pos);
        let (x, y) = config.origin(aisle_index, slot_index);
        pos.aisle_index = aisle_index;
        pos.slot_index = slot_index;
        pos.x = x;
        pos.y = y;
        pos.width = config.box_width;
        pos.height = config.box_height;
    }

    positions.sort_by(|a, b| {
        (a.aisle_index, a.slot_index, &a.id).cmp(&(b.aisle_index, b.slot_index, &b.id))
    });
    positions
}

/// Label strip entry for one aisle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AisleHeader {
    pub aisle: String,
    pub index: usize,
    /// Offset of the aisle along its axis (x for columns, y for rows).
    pub offset: u32,
}

/// Distinct aisles of a laid-out set in rank order.
pub fn aisle_headers(positions: &[Position], config: &LayoutConfig) -> Vec<AisleHeader> {
    let mut seen = BTreeMap::new();
    for pos in positions {
        seen.entry(pos.aisle_index).or_insert_with(|| pos.aisle.clone());
    }
    seen.into_iter()
        .map(|(index, aisle)| {
            let (x, y) = config.origin(index, 0);
            let offset = match config.axis {
                Axis::AisleColumns => x,
                Axis::AisleRows => y,
            };
            AisleHeader { aisle, index, offset }
        })
        .collect()
}

/// Canvas size needed to show every box of a laid-out set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

pub fn bounds(positions: &[Position], config: &LayoutConfig) -> Bounds {
    positions
        .iter()
        .fold(Bounds::default(), |acc, pos| Bounds {
            width: acc
                .width
                .max(pos.x.saturating_add(pos.width).saturating_add(config.margin)),
            height: acc
                .height
                .max(pos.y.saturating_add(pos.height).saturating_add(config.margin)),
        })
}

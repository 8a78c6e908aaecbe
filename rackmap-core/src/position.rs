use serde::{Deserialize, Serialize};

/// Stable identifier of a slot, `"{aisle}-{slot}"` (e.g. `"03-001"`).
pub type PositionId = String;

/// One vertical level inside a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub level: u8,
    /// Material identifiers in source order. Empty means nothing recorded.
    #[serde(default)]
    pub materials: Vec<String>,
}

impl Floor {
    pub fn empty(level: u8) -> Self {
        Self {
            level,
            materials: Vec::new(),
        }
    }

    /// Display label for the floor's contents.
    pub fn product(&self) -> Option<String> {
        if self.materials.is_empty() {
            None
        } else {
            Some(self.materials.join(", "))
        }
    }
}

/// One physical storage slot and its floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub aisle: String,
    pub slot: String,
    pub aisle_index: usize,
    pub slot_index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub label: String,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Sorted ascending by level, one entry per level.
    pub floors: Vec<Floor>,
}

impl Position {
    /// A position with no layout assigned yet.
    pub fn unplaced(aisle: &str, slot: &str, floors: Vec<Floor>) -> Self {
        let id = format!("{aisle}-{slot}");
        Self {
            label: id.clone(),
            id,
            aisle: aisle.to_string(),
            slot: slot.to_string(),
            aisle_index: 0,
            slot_index: 0,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            highlighted: false,
            color: None,
            floors,
        }
    }

    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.floors.iter().map(|f| f.level)
    }

    pub fn floor(&self, level: u8) -> Option<&Floor> {
        self.floors.iter().find(|f| f.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unplaced_ids() {
        let pos = Position::unplaced("03", "001", vec![Floor::empty(3)]);
        assert_eq!(pos.id, "03-001");
        assert_eq!(pos.label, "03-001");
        assert_eq!(pos.levels().collect::<Vec<_>>(), [3]);
        assert!(pos.floor(3).is_some());
        assert!(pos.floor(4).is_none());
    }

    #[test]
    fn test_floor_product() {
        assert_eq!(Floor::empty(1).product(), None);
        let floor = Floor {
            level: 1,
            materials: vec!["A1".to_string(), "B2".to_string()],
        };
        assert_eq!(floor.product().as_deref(), Some("A1, B2"));
    }
}

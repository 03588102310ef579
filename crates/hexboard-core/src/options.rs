//! Caller-supplied generation settings.
//!
//! Every field has a default, and the struct deserializes from partial JSON so
//! callers only send what they want to change.

use crate::graph::{TileId, CENTER_TILE, CORNER_TILES};
use serde::{Deserialize, Serialize};

/// Default search budget for [`crate::generate`]
pub const DEFAULT_ATTEMPTS: usize = 200;

/// Default cap on an intersection's summed pip weight
pub const DEFAULT_INTERSECTION_CAP: u32 = 11;

/// Default number of local repair moves per candidate
pub const DEFAULT_REPAIR_BUDGET: usize = 32;

/// Where the desert may sit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DesertPlacement {
    /// No constraint
    #[default]
    Any,
    /// Only on the center slot
    CenterOnly,
    /// Never on one of the four corner slots
    NotInCorner,
}

impl DesertPlacement {
    /// Whether the desert may occupy this slot
    pub fn allows(&self, tile: TileId) -> bool {
        match self {
            DesertPlacement::Any => true,
            DesertPlacement::CenterOnly => tile == CENTER_TILE,
            DesertPlacement::NotInCorner => !CORNER_TILES.contains(&tile),
        }
    }
}

/// Generation toggles. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Keep same-terrain clusters small (soft, best effort)
    pub limit_same_terrain: bool,
    /// Rank candidates by how evenly pips spread across terrains
    pub balance_pips: bool,
    /// Desert placement policy (hard)
    pub desert_placement: DesertPlacement,
    /// Reject boards with an intersection above `intersection_cap` (hard)
    pub cap_intersections: bool,
    /// Highest allowed intersection value when capping
    pub intersection_cap: u32,
    /// Local repair moves tried before a candidate is discarded
    pub repair_budget: usize,
    /// Stop searching once a board scores at least this much
    pub target_score: Option<f64>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            limit_same_terrain: true,
            balance_pips: true,
            desert_placement: DesertPlacement::Any,
            cap_intersections: true,
            intersection_cap: DEFAULT_INTERSECTION_CAP,
            repair_budget: DEFAULT_REPAIR_BUDGET,
            target_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GenerationOptions::default();
        assert!(options.limit_same_terrain);
        assert!(options.balance_pips);
        assert!(options.cap_intersections);
        assert_eq!(options.intersection_cap, 11);
        assert_eq!(options.desert_placement, DesertPlacement::Any);
        assert_eq!(options.target_score, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: GenerationOptions =
            serde_json::from_str(r#"{"desert_placement": "center-only", "intersection_cap": 12}"#)
                .unwrap();
        assert_eq!(options.desert_placement, DesertPlacement::CenterOnly);
        assert_eq!(options.intersection_cap, 12);
        assert!(options.cap_intersections);
        assert_eq!(options.repair_budget, DEFAULT_REPAIR_BUDGET);

        let empty: GenerationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GenerationOptions::default());
    }

    #[test]
    fn test_desert_policies() {
        assert!(DesertPlacement::Any.allows(0));
        assert!(DesertPlacement::CenterOnly.allows(CENTER_TILE));
        assert!(!DesertPlacement::CenterOnly.allows(4));
        for corner in CORNER_TILES {
            assert!(!DesertPlacement::NotInCorner.allows(corner));
        }
        assert!(DesertPlacement::NotInCorner.allows(7));
    }
}

//! Axial hex coordinates for the tile slots.
//!
//! The engine itself works on tile ids and the compiled-in adjacency table in
//! [`crate::graph`]. Coordinates are carried alongside so that renderers and
//! the harbor service can reason about geometry, and so the adjacency table
//! can be checked against real hex distances.

use serde::{Deserialize, Serialize};

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The six surrounding hexes, clockwise from the upper-left one.
    ///
    /// Same order as the neighbor lists in [`crate::graph`].
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q, self.r - 1),     // NorthWest
            HexCoord::new(self.q + 1, self.r - 1), // NorthEast
            HexCoord::new(self.q + 1, self.r),     // East
            HexCoord::new(self.q, self.r + 1),     // SouthEast
            HexCoord::new(self.q - 1, self.r + 1), // SouthWest
            HexCoord::new(self.q - 1, self.r),     // West
        ]
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Convert to pixel coordinates (center of hex)
    /// Uses pointy-top orientation with the given hex size (radius)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let x = hex_size * (3.0_f64.sqrt() * self.q as f64 + 3.0_f64.sqrt() / 2.0 * self.r as f64);
        let y = hex_size * (3.0 / 2.0 * self.r as f64);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hex_neighbors() {
        let center = HexCoord::new(0, 0);
        let neighbors = center.neighbors();

        let unique: HashSet<_> = neighbors.iter().collect();
        assert_eq!(unique.len(), 6);

        for neighbor in &neighbors {
            assert_eq!(center.distance_to(neighbor), 1);
        }
    }

    #[test]
    fn test_hex_distance() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(2, -1);
        assert_eq!(a.distance_to(&b), 2);

        let c = HexCoord::new(-2, 2);
        assert_eq!(a.distance_to(&c), 2);
        assert_eq!(b.distance_to(&c), 4);
    }

    #[test]
    fn test_pixel_center_and_rows() {
        let (x, y) = HexCoord::new(0, 0).to_pixel(60.0);
        assert_eq!((x, y), (0.0, 0.0));

        // Same row hexes share a y coordinate
        let (_, y1) = HexCoord::new(-1, 1).to_pixel(60.0);
        let (_, y2) = HexCoord::new(1, 1).to_pixel(60.0);
        assert!((y1 - y2).abs() < 1e-9);
        assert!(y1 > 0.0);
    }
}

//! Fixed adjacency graph of the 19 land tile slots.
//!
//! Slots are numbered row by row over the 3-4-5-4-3 layout:
//!
//! ```text
//!        0   1   2
//!      3   4   5   6
//!    7   8   9  10  11
//!     12  13  14  15
//!       16  17  18
//! ```
//!
//! Neighbor lists run clockwise starting from the upper-left neighbor. All data
//! here is compile-time `static` and never changes between boards.

use crate::hex::HexCoord;

/// Tile slot identifier (0-18)
pub type TileId = usize;

/// Number of tile slots on the board
pub const TILE_COUNT: usize = 19;

/// Every tile id in ascending order
pub const ALL_TILES: [TileId; TILE_COUNT] =
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18];

/// The four designated corner slots used by the "not in a corner" desert
/// policy.
///
/// Six slots have three neighbors; 7 and 11 sit on the middle row's ends and
/// are not designated, so the desert may still land there.
pub const CORNER_TILES: [TileId; 4] = [0, 2, 16, 18];

/// The single center slot
pub const CENTER_TILE: TileId = 9;

/// Number of unordered adjacent pairs in [`NEIGHBORS`]
pub const ADJACENT_PAIR_COUNT: usize = 42;

static NEIGHBORS: [&[TileId]; TILE_COUNT] = [
    &[1, 4, 3],
    &[2, 5, 4, 0],
    &[6, 5, 1],
    &[0, 4, 8, 7],
    &[0, 1, 5, 9, 8, 3],
    &[1, 2, 6, 10, 9, 4],
    &[2, 11, 10, 5],
    &[3, 8, 12],
    &[3, 4, 9, 13, 12, 7],
    &[4, 5, 10, 14, 13, 8],
    &[5, 6, 11, 15, 14, 9],
    &[6, 15, 10],
    &[7, 8, 13, 16],
    &[8, 9, 14, 17, 16, 12],
    &[9, 10, 15, 18, 17, 13],
    &[10, 11, 18, 14],
    &[12, 13, 17],
    &[13, 14, 18, 16],
    &[14, 15, 17],
];

static TILE_COORDS: [HexCoord; TILE_COUNT] = [
    HexCoord::new(0, -2),
    HexCoord::new(1, -2),
    HexCoord::new(2, -2),
    HexCoord::new(-1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
    HexCoord::new(2, -1),
    HexCoord::new(-2, 0),
    HexCoord::new(-1, 0),
    HexCoord::new(0, 0),
    HexCoord::new(1, 0),
    HexCoord::new(2, 0),
    HexCoord::new(-2, 1),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
    HexCoord::new(1, 1),
    HexCoord::new(-2, 2),
    HexCoord::new(-1, 2),
    HexCoord::new(0, 2),
];

/// Neighbor ids of a tile, clockwise from the upper-left neighbor.
///
/// Panics if `tile` is not a valid slot id.
#[inline]
pub fn neighbors(tile: TileId) -> &'static [TileId] {
    NEIGHBORS[tile]
}

/// Whether two tiles share an edge
pub fn are_adjacent(a: TileId, b: TileId) -> bool {
    NEIGHBORS[a].contains(&b)
}

/// Axial coordinate of a tile slot
#[inline]
pub fn coord(tile: TileId) -> HexCoord {
    TILE_COORDS[tile]
}

/// Whether a tile lies on the outer ring (fewer than six neighbors)
pub fn is_coastal(tile: TileId) -> bool {
    NEIGHBORS[tile].len() < 6
}

/// Every unordered adjacent pair `(a, b)` with `a < b`, in ascending order
pub fn adjacent_pairs() -> impl Iterator<Item = (TileId, TileId)> {
    ALL_TILES.into_iter().flat_map(|a| {
        NEIGHBORS[a]
            .iter()
            .copied()
            .filter(move |&b| a < b)
            .map(move |b| (a, b))
    })
}

/// Panics if the neighbor table is not symmetric and irreflexive.
///
/// A malformed table is a build defect, so this fails loudly instead of
/// returning an error.
pub(crate) fn assert_well_formed() {
    for tile in ALL_TILES {
        for &other in NEIGHBORS[tile] {
            assert!(other < TILE_COUNT, "tile {tile} lists unknown neighbor {other}");
            assert_ne!(tile, other, "tile {tile} lists itself as a neighbor");
            assert!(
                NEIGHBORS[other].contains(&tile),
                "adjacency {tile} -> {other} has no reverse entry"
            );
        }
    }
}

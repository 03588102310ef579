//! Tile contents and the fixed inventories they are drawn from.
//!
//! This module contains:
//! - Resource and terrain kinds
//! - The terrain and number inventories, checked at compile time
//! - The pip weight table
//! - `Board`: one full terrain + number assignment over the 19 slots
//! - `TileView`: the read-only layout handed to harbor placement

use crate::graph::{self, TileId, TILE_COUNT};
use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Producing resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Wool,
    Grain,
    Brick,
    Ore,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Wool,
        Resource::Grain,
        Resource::Brick,
        Resource::Ore,
    ];
}

/// Terrain of a tile slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Produces a resource when its number is rolled
    Resource(Resource),
    /// Desert - no production, never carries a number
    Desert,
}

impl Terrain {
    /// Get the resource this terrain produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Resource(r) => Some(*r),
            Terrain::Desert => None,
        }
    }

    pub fn is_desert(&self) -> bool {
        matches!(self, Terrain::Desert)
    }
}

/// Terrain counts consumed by every board
pub const TERRAIN_INVENTORY: [(Terrain, usize); 6] = [
    (Terrain::Resource(Resource::Wood), 4),
    (Terrain::Resource(Resource::Wool), 4),
    (Terrain::Resource(Resource::Grain), 4),
    (Terrain::Resource(Resource::Brick), 3),
    (Terrain::Resource(Resource::Ore), 3),
    (Terrain::Desert, 1),
];

/// Dice numbers consumed by the non-desert tiles of every board
pub const NUMBER_INVENTORY: [(u8, usize); 10] = [
    (2, 1),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (8, 2),
    (9, 2),
    (10, 2),
    (11, 2),
    (12, 1),
];

/// Number of tiles that carry a dice number
pub const PRODUCING_TILE_COUNT: usize = TILE_COUNT - 1;

/// The two numbers with the highest pip weight
pub const HIGH_PROBABILITY_NUMBERS: [u8; 2] = [6, 8];

const fn terrain_total() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < TERRAIN_INVENTORY.len() {
        total += TERRAIN_INVENTORY[i].1;
        i += 1;
    }
    total
}

const fn desert_total() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < TERRAIN_INVENTORY.len() {
        if matches!(TERRAIN_INVENTORY[i].0, Terrain::Desert) {
            total += TERRAIN_INVENTORY[i].1;
        }
        i += 1;
    }
    total
}

const fn number_total() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < NUMBER_INVENTORY.len() {
        total += NUMBER_INVENTORY[i].1;
        i += 1;
    }
    total
}

const _: () = assert!(terrain_total() == TILE_COUNT, "terrain inventory must cover every slot");
const _: () = assert!(desert_total() == 1, "exactly one desert per board");
const _: () = assert!(
    number_total() == PRODUCING_TILE_COUNT,
    "number inventory must cover every producing slot"
);

/// Relative likelihood of a dice total on two six-sided dice.
///
/// 7 and anything outside 2..=12 weigh nothing.
pub const fn pip_weight(number: u8) -> u32 {
    match number {
        2 | 12 => 1,
        3 | 11 => 2,
        4 | 10 => 3,
        5 | 9 => 4,
        6 | 8 => 5,
        _ => 0,
    }
}

/// Terrain inventory flattened into one entry per tile
pub fn terrain_pool() -> Vec<Terrain> {
    TERRAIN_INVENTORY
        .iter()
        .flat_map(|&(terrain, count)| std::iter::repeat(terrain).take(count))
        .collect()
}

/// Number inventory flattened into one entry per producing tile
pub fn number_pool() -> Vec<u8> {
    NUMBER_INVENTORY
        .iter()
        .flat_map(|&(number, count)| std::iter::repeat(number).take(count))
        .collect()
}

/// Errors from building a board out of caller-supplied tiles
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Expected 19 tiles, got {0}")]
    WrongTileCount(usize),

    #[error("Tile {0} has a number but is a desert, or lacks one but produces")]
    NumberMismatch(TileId),

    #[error("Tile {tile} carries {number}, which is not a producible number")]
    InvalidNumber { tile: TileId, number: u8 },

    #[error("Terrain counts do not match the terrain inventory")]
    TerrainInventoryMismatch,

    #[error("Dice numbers do not match the number inventory")]
    NumberInventoryMismatch,

    #[error("Entry {index} claims to be tile {id}")]
    MisplacedTile { index: usize, id: TileId },
}

/// A single tile slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Slot id (0-18)
    pub id: TileId,
    /// Terrain kind
    pub terrain: Terrain,
    /// Dice number (2-12 except 7, None for the desert)
    pub number: Option<u8>,
}

impl Tile {
    /// Pip weight of this tile's number (0 for the desert)
    pub fn pip(&self) -> u32 {
        self.number.map_or(0, pip_weight)
    }

    /// Whether this tile carries one of the two highest-probability numbers
    pub fn is_high_probability(&self) -> bool {
        self.number.is_some_and(|n| HIGH_PROBABILITY_NUMBERS.contains(&n))
    }
}

/// One terrain + number assignment over all 19 slots.
///
/// Every `Board` fully consumes both inventories and has a number on a tile
/// exactly when that tile is not the desert. Mutation goes through swaps that
/// keep both properties, and deserialization goes through [`Board::from_tiles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredBoard")]
pub struct Board {
    tiles: Vec<Tile>,
}

/// Serialized shape of a board before it is checked
#[derive(Deserialize)]
struct StoredBoard {
    tiles: Vec<Tile>,
}

impl TryFrom<StoredBoard> for Board {
    type Error = BoardError;

    fn try_from(stored: StoredBoard) -> Result<Self, Self::Error> {
        if let Some((index, tile)) = stored.tiles.iter().enumerate().find(|(i, t)| t.id != *i) {
            return Err(BoardError::MisplacedTile { index, id: tile.id });
        }
        let parts: Vec<(Terrain, Option<u8>)> =
            stored.tiles.iter().map(|t| (t.terrain, t.number)).collect();
        Board::from_tiles(&parts)
    }
}

impl Board {
    /// Build a board from per-slot terrain and numbers, in tile-id order.
    pub fn from_tiles(tiles: &[(Terrain, Option<u8>)]) -> Result<Self, BoardError> {
        if tiles.len() != TILE_COUNT {
            return Err(BoardError::WrongTileCount(tiles.len()));
        }

        for (id, (terrain, number)) in tiles.iter().enumerate() {
            if terrain.is_desert() != number.is_none() {
                return Err(BoardError::NumberMismatch(id));
            }
            if let Some(n) = number {
                if pip_weight(*n) == 0 {
                    return Err(BoardError::InvalidNumber { tile: id, number: *n });
                }
            }
        }

        let board = Self::from_parts_unchecked(tiles.iter().copied());
        if board.terrain_counts() != inventory_counts(&TERRAIN_INVENTORY) {
            return Err(BoardError::TerrainInventoryMismatch);
        }
        if board.number_counts() != inventory_counts(&NUMBER_INVENTORY) {
            return Err(BoardError::NumberInventoryMismatch);
        }
        Ok(board)
    }

    /// Used by the assigner, which guarantees the invariants by construction
    pub(crate) fn from_parts_unchecked(parts: impl IntoIterator<Item = (Terrain, Option<u8>)>) -> Self {
        let tiles: Vec<Tile> = parts
            .into_iter()
            .enumerate()
            .map(|(id, (terrain, number))| Tile { id, terrain, number })
            .collect();
        debug_assert_eq!(tiles.len(), TILE_COUNT);
        Self { tiles }
    }

    // ==================== Query Methods ====================

    /// All tiles in id order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile by id
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id]
    }

    /// Pip weight of a tile's number
    pub fn pip(&self, id: TileId) -> u32 {
        self.tiles[id].pip()
    }

    /// Slot currently holding the desert
    pub fn desert(&self) -> Option<TileId> {
        self.tiles.iter().find(|t| t.terrain.is_desert()).map(|t| t.id)
    }

    /// Tiles that produce (everything except the desert)
    pub fn producing_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| !t.terrain.is_desert())
    }

    /// How many tiles of each terrain the board holds
    pub fn terrain_counts(&self) -> BTreeMap<Terrain, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.terrain).or_insert(0) += 1;
        }
        counts
    }

    /// How many times each dice number appears
    pub fn number_counts(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for number in self.tiles.iter().filter_map(|t| t.number) {
            *counts.entry(number).or_insert(0) += 1;
        }
        counts
    }

    /// Read-only layout (terrain, numbers and adjacency) for harbor placement
    pub fn layout(&self) -> Vec<TileView> {
        self.tiles
            .iter()
            .map(|tile| TileView {
                id: tile.id,
                terrain: tile.terrain,
                number: tile.number,
                coord: graph::coord(tile.id),
                neighbors: graph::neighbors(tile.id),
                coastal: graph::is_coastal(tile.id),
            })
            .collect()
    }

    // ==================== Mutation Methods ====================

    /// Swap everything on two slots (terrain and number together)
    pub(crate) fn swap_tiles(&mut self, a: TileId, b: TileId) {
        let (ta, tb) = (self.tiles[a], self.tiles[b]);
        self.tiles[a].terrain = tb.terrain;
        self.tiles[a].number = tb.number;
        self.tiles[b].terrain = ta.terrain;
        self.tiles[b].number = ta.number;
    }

    /// Swap the numbers of two producing slots
    pub(crate) fn swap_numbers(&mut self, a: TileId, b: TileId) {
        debug_assert!(self.tiles[a].number.is_some() && self.tiles[b].number.is_some());
        let number = self.tiles[a].number;
        self.tiles[a].number = self.tiles[b].number;
        self.tiles[b].number = number;
    }

    /// Swap the terrains of two producing slots, leaving numbers in place
    pub(crate) fn swap_terrains(&mut self, a: TileId, b: TileId) {
        debug_assert!(!self.tiles[a].terrain.is_desert() && !self.tiles[b].terrain.is_desert());
        let terrain = self.tiles[a].terrain;
        self.tiles[a].terrain = self.tiles[b].terrain;
        self.tiles[b].terrain = terrain;
    }
}

/// One slot of the read-only layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub id: TileId,
    pub terrain: Terrain,
    pub number: Option<u8>,
    /// Axial position on the hex grid
    pub coord: HexCoord,
    /// Neighbor ids, clockwise from the upper-left neighbor
    pub neighbors: &'static [TileId],
    /// On the outer ring, so a harbor may sit next to it
    pub coastal: bool,
}

fn inventory_counts<K: Ord + Copy>(inventory: &[(K, usize)]) -> BTreeMap<K, usize> {
    inventory.iter().copied().collect()
}

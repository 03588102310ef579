//! Hexboard - board generation and fairness scoring for the 19-tile settlers board
//!
//! This crate provides:
//! - The fixed adjacency graph of the 19 tile slots
//! - Random terrain and number assignment from the standard inventories
//! - Derivation of the 2- and 3-tile intersections (building spots)
//! - Placement rules with local repair
//! - Fairness metrics and a composite balance score
//! - Best-of-N generation returning one valid, scored board
//!
//! # Architecture
//!
//! The engine is synchronous and keeps no shared mutable state. The graph and
//! intersection shapes are process-wide constants; every generation call owns
//! its random source, so boards can be generated in parallel without locking.
//! It can be compiled to:
//! - Native Rust for server-side generation
//! - WebAssembly for client-side generation
//!
//! # Modules
//!
//! - [`graph`]: Tile slots, neighbor table, corners and center
//! - [`hex`]: Axial coordinates of the slots
//! - [`board`]: Terrain, inventories, pip weights and the tile assignment
//! - [`intersection`]: Meeting points derived from the graph
//! - [`assign`]: Raw random sampling
//! - [`options`]: Caller-supplied generation settings
//! - [`rules`]: Validation and repair
//! - [`fairness`]: Metrics and scoring
//! - [`generator`]: The public entry points

pub mod assign;
pub mod board;
pub mod fairness;
pub mod generator;
pub mod graph;
pub mod hex;
pub mod intersection;
pub mod options;
pub mod rules;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{pip_weight, Board, BoardError, Resource, Terrain, Tile, TileView};
pub use fairness::FairnessMetrics;
pub use generator::{generate, generate_seeded, generate_with_rng, BoardCandidate, GenerationError};
pub use graph::{TileId, CENTER_TILE, CORNER_TILES, TILE_COUNT};
pub use hex::HexCoord;
pub use intersection::{Intersection, IntersectionShape};
pub use options::{DesertPlacement, GenerationOptions, DEFAULT_ATTEMPTS};

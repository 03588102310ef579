//! Placement rules and local repair.
//!
//! Hard rules (desert placement, intersection cap) decide whether a candidate
//! survives. Soft rules (same-terrain clustering, adjacent 6/8) are measured
//! and fed to the scorer. Repair makes small swaps that keep every tile
//! invariant intact: the desert moves together with its missing number,
//! numbers only move between producing tiles, and terrains only move between
//! producing tiles.

use crate::board::Board;
use crate::graph::{self, TileId, ALL_TILES};
use crate::intersection::intersection_shapes;
use crate::options::GenerationOptions;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Rule check results for one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// The desert sits where the placement policy allows
    pub desert_ok: bool,
    /// Indices into [`intersection_shapes`] whose value exceeds the cap
    pub over_cap: Vec<usize>,
    /// Extra same-terrain neighbors beyond the one allowed per tile
    pub same_terrain_violations: usize,
    /// Some adjacent pair both carry a 6 or an 8
    pub adjacent_high_probability: bool,
}

impl Validation {
    /// Whether every hard rule passes
    pub fn is_valid(&self) -> bool {
        self.desert_ok && self.over_cap.is_empty()
    }
}

/// How a repair run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Every hard rule passes
    Repaired { validation: Validation, moves: usize },
    /// Budget ran out, or no swap helped, with a hard rule still failing
    Exhausted { validation: Validation, moves: usize },
}

/// Check a candidate against every enabled rule.
pub fn validate(board: &Board, options: &GenerationOptions) -> Validation {
    let desert_ok = board
        .desert()
        .is_some_and(|tile| options.desert_placement.allows(tile));

    let over_cap = if options.cap_intersections {
        intersection_shapes()
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.value_on(board) > options.intersection_cap)
            .map(|(idx, _)| idx)
            .collect()
    } else {
        Vec::new()
    };

    Validation {
        desert_ok,
        over_cap,
        same_terrain_violations: same_terrain_violations(board),
        adjacent_high_probability: adjacent_high_probability(board),
    }
}

/// Count same-terrain neighbors beyond the first, summed over producing tiles.
///
/// The desert is exempt.
pub fn same_terrain_violations(board: &Board) -> usize {
    board
        .producing_tiles()
        .map(|tile| same_terrain_neighbors(board, tile.id).saturating_sub(1))
        .sum()
}

fn same_terrain_neighbors(board: &Board, tile: TileId) -> usize {
    let terrain = board.tile(tile).terrain;
    graph::neighbors(tile)
        .iter()
        .filter(|&&n| board.tile(n).terrain == terrain)
        .count()
}

/// Whether any two adjacent tiles both carry one of the two highest-probability numbers
pub fn adjacent_high_probability(board: &Board) -> bool {
    graph::adjacent_pairs()
        .any(|(a, b)| board.tile(a).is_high_probability() && board.tile(b).is_high_probability())
}

/// Total amount by which intersections exceed the cap
fn cap_excess(board: &Board, cap: u32) -> u32 {
    intersection_shapes()
        .iter()
        .map(|shape| shape.value_on(board).saturating_sub(cap))
        .sum()
}

/// Validate, then try local swaps until hard rules pass or the budget runs out.
///
/// Once hard rules pass and same-terrain limiting is on, any budget left is
/// spent reducing same-terrain clusters. Those swaps never touch numbers or the
/// desert, so they cannot break a hard rule.
pub fn repair<R: Rng + ?Sized>(
    board: &mut Board,
    options: &GenerationOptions,
    rng: &mut R,
) -> RepairOutcome {
    let mut moves = 0;

    loop {
        let validation = validate(board, options);
        if validation.is_valid() {
            break;
        }
        if moves >= options.repair_budget {
            return RepairOutcome::Exhausted { validation, moves };
        }

        let progressed = if !validation.desert_ok {
            relocate_desert(board, options, rng)
        } else {
            reduce_cap_excess(board, options.intersection_cap, rng)
        };
        if !progressed {
            return RepairOutcome::Exhausted { validation, moves };
        }
        moves += 1;
    }

    if options.limit_same_terrain {
        while moves < options.repair_budget && reduce_same_terrain(board, rng) {
            moves += 1;
        }
    }

    RepairOutcome::Repaired {
        validation: validate(board, options),
        moves,
    }
}

/// Swap the desert onto a random slot the placement policy allows.
fn relocate_desert<R: Rng + ?Sized>(
    board: &mut Board,
    options: &GenerationOptions,
    rng: &mut R,
) -> bool {
    let Some(desert) = board.desert() else {
        return false;
    };
    let legal: Vec<TileId> = ALL_TILES
        .into_iter()
        .filter(|&t| t != desert && options.desert_placement.allows(t))
        .collect();

    match legal.choose(rng) {
        Some(&target) => {
            trace!(from = desert, to = target, "moving desert");
            board.swap_tiles(desert, target);
            true
        }
        None => false,
    }
}

/// Swap a number off an over-cap intersection for a lighter one elsewhere.
///
/// Every numbered member of every over-cap intersection is paired with every
/// producing tile holding a lighter number; the swap leaving the least total
/// excess wins, with ties broken at random. Returns false when no swap lowers
/// the excess.
fn reduce_cap_excess<R: Rng + ?Sized>(board: &mut Board, cap: u32, rng: &mut R) -> bool {
    let current = cap_excess(board, cap);
    if current == 0 {
        return false;
    }

    let mut members: Vec<TileId> = intersection_shapes()
        .iter()
        .filter(|shape| shape.value_on(board) > cap)
        .flat_map(|shape| shape.tiles().iter().copied())
        .filter(|&t| board.tile(t).number.is_some())
        .collect();
    members.sort_unstable();
    members.dedup();

    let producing: Vec<TileId> = board.producing_tiles().map(|t| t.id).collect();
    let mut best_excess = current;
    let mut best: Vec<(TileId, TileId)> = Vec::new();
    for &member in &members {
        for &other in &producing {
            if board.pip(other) >= board.pip(member) {
                continue;
            }
            board.swap_numbers(member, other);
            let excess = cap_excess(board, cap);
            board.swap_numbers(member, other);

            if excess < best_excess {
                best_excess = excess;
                best.clear();
                best.push((member, other));
            } else if excess == best_excess && !best.is_empty() {
                best.push((member, other));
            }
        }
    }

    match best.choose(rng) {
        Some(&(member, other)) => {
            trace!(member, other, excess = best_excess, "swapping numbers under cap");
            board.swap_numbers(member, other);
            true
        }
        None => false,
    }
}

/// Swap the terrain of one clustered tile to strictly lower the violation count.
fn reduce_same_terrain<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> bool {
    let current = same_terrain_violations(board);
    if current == 0 {
        return false;
    }

    let mut clustered: Vec<TileId> = board
        .producing_tiles()
        .map(|t| t.id)
        .filter(|&t| same_terrain_neighbors(board, t) > 1)
        .collect();
    clustered.shuffle(rng);

    let producing: Vec<TileId> = board.producing_tiles().map(|t| t.id).collect();
    for tile in clustered {
        let mut best_count = current;
        let mut best: Vec<TileId> = Vec::new();
        for &other in &producing {
            if board.tile(other).terrain == board.tile(tile).terrain {
                continue;
            }
            board.swap_terrains(tile, other);
            let count = same_terrain_violations(board);
            board.swap_terrains(tile, other);

            if count < best_count {
                best_count = count;
                best.clear();
                best.push(other);
            } else if count == best_count && !best.is_empty() {
                best.push(other);
            }
        }

        if let Some(&other) = best.choose(rng) {
            trace!(tile, other, violations = best_count, "swapping terrains");
            board.swap_terrains(tile, other);
            return true;
        }
    }
    false
}

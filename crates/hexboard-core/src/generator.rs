//! Best-of-N board generation.
//!
//! Each attempt deals a fresh random board, repairs it against the hard
//! rules, throws it away if repair fails, and scores it otherwise. The
//! highest-scoring survivor wins. Failed attempts never leave this module; the
//! caller sees a finished board or `GenerationError::Ungenerable`.

use crate::assign::random_board;
use crate::board::{Board, Tile, TileView};
use crate::fairness::{evaluate, FairnessMetrics};
use crate::intersection::Intersection;
use crate::options::GenerationOptions;
use crate::rules::{repair, RepairOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when generating a board
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GenerationError {
    /// No attempt produced a board passing every hard rule. Retrying with the
    /// same options is pointless.
    #[error("No valid board found in {attempts} attempts with options {options:?}")]
    Ungenerable {
        options: GenerationOptions,
        attempts: usize,
    },
}

/// A finished, valid board with its intersections and fairness metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardCandidate {
    /// Terrain and numbers for all 19 slots
    pub board: Board,
    /// Every meeting point with its value on this board
    pub intersections: Vec<Intersection>,
    /// Balance statistics and composite score
    pub metrics: FairnessMetrics,
}

impl BoardCandidate {
    /// All tiles in id order
    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    /// Read-only layout for the harbor placement service
    pub fn layout(&self) -> Vec<TileView> {
        self.board.layout()
    }
}

/// Generate a board using a fresh entropy-seeded random source for this call.
pub fn generate(
    options: &GenerationOptions,
    attempts: usize,
) -> Result<BoardCandidate, GenerationError> {
    let mut rng = StdRng::from_entropy();
    generate_with_rng(options, attempts, &mut rng)
}

/// Generate a reproducible board from a seed
pub fn generate_seeded(
    options: &GenerationOptions,
    attempts: usize,
    seed: u64,
) -> Result<BoardCandidate, GenerationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(options, attempts, &mut rng)
}

/// Generate a board with a provided random source.
///
/// Runs up to `attempts` draws and keeps the best-scoring survivor; the first
/// survivor wins ties. Stops early once a survivor reaches
/// `options.target_score`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    options: &GenerationOptions,
    attempts: usize,
    rng: &mut R,
) -> Result<BoardCandidate, GenerationError> {
    let mut best: Option<BoardCandidate> = None;
    let mut used = 0;
    let mut discarded = 0;

    for attempt in 0..attempts {
        used += 1;
        let mut board = random_board(rng);

        if let RepairOutcome::Exhausted { validation, moves } = repair(&mut board, options, rng) {
            discarded += 1;
            debug!(
                attempt,
                moves,
                desert_ok = validation.desert_ok,
                over_cap = validation.over_cap.len(),
                "discarding candidate"
            );
            continue;
        }

        let (intersections, metrics) = evaluate(&board, options);
        let score = metrics.score;
        if best.as_ref().map_or(true, |b| score > b.metrics.score) {
            debug!(attempt, score, "new best candidate");
            best = Some(BoardCandidate {
                board,
                intersections,
                metrics,
            });
        }

        if options.target_score.is_some_and(|target| score >= target) {
            debug!(attempt, score, "target score reached");
            break;
        }
    }

    match best {
        Some(candidate) => {
            info!(
                attempts = used,
                discarded,
                score = candidate.metrics.score,
                "board generated"
            );
            Ok(candidate)
        }
        None => {
            warn!(attempts, "no candidate survived validation");
            Err(GenerationError::Ungenerable {
                options: options.clone(),
                attempts,
            })
        }
    }
}

//! Fairness metrics over a finished board.
//!
//! Everything here is a pure function of the board and the cached
//! intersection shapes, so scoring the same board twice gives identical
//! results, including the order of the top intersections.

use crate::board::{Board, Resource};
use crate::intersection::{value_intersections, Intersection};
use crate::options::GenerationOptions;
use crate::rules::{adjacent_high_probability, same_terrain_violations};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many intersections the ranked list keeps
pub const TOP_INTERSECTIONS: usize = 5;

/// Starting point of the composite score before penalties
const BASE_SCORE: f64 = 100.0;
/// Penalty per unit of standard deviation in per-resource pip totals
const SPREAD_WEIGHT: f64 = 2.0;
/// Penalty per pip on the strongest intersection
const PEAK_WEIGHT: f64 = 3.0;
/// Flat penalty when two 6/8 tiles touch
const ADJACENT_HIGH_PENALTY: f64 = 25.0;
/// Penalty per same-terrain violation
const CLUSTER_WEIGHT: f64 = 1.5;

/// Aggregate balance statistics for one board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessMetrics {
    /// Total pip weight per producing resource
    pub pips_by_resource: BTreeMap<Resource, u32>,
    /// Value of the strongest intersection
    pub max_intersection: u32,
    /// Strongest intersections, descending, ties to the lower minimum tile id
    pub top_intersections: Vec<Intersection>,
    /// Two adjacent tiles both carry a 6 or an 8
    pub adjacent_high_probability: bool,
    /// Mean value across all intersections
    pub mean_intersection: f64,
    /// Standard deviation of `pips_by_resource`
    pub pip_spread: f64,
    /// Same-terrain violations left on the board
    pub same_terrain_violations: usize,
    /// Single balance score; higher is fairer
    pub score: f64,
}

/// Compute the full metrics record for a board and its valued intersections.
pub fn score_board(
    board: &Board,
    intersections: &[Intersection],
    options: &GenerationOptions,
) -> FairnessMetrics {
    let pips_by_resource = pips_by_resource(board);
    let max_intersection = intersections.iter().map(|i| i.value).max().unwrap_or(0);
    let mean_intersection = if intersections.is_empty() {
        0.0
    } else {
        intersections.iter().map(|i| i.value as f64).sum::<f64>() / intersections.len() as f64
    };

    let mut metrics = FairnessMetrics {
        pip_spread: std_dev(pips_by_resource.values().copied()),
        pips_by_resource,
        max_intersection,
        top_intersections: top_intersections(intersections, TOP_INTERSECTIONS),
        adjacent_high_probability: adjacent_high_probability(board),
        mean_intersection,
        same_terrain_violations: same_terrain_violations(board),
        score: 0.0,
    };
    metrics.score = composite_score(&metrics, options);
    metrics
}

/// Score a board from scratch, valuing its intersections first
pub fn evaluate(board: &Board, options: &GenerationOptions) -> (Vec<Intersection>, FairnessMetrics) {
    let intersections = value_intersections(board);
    let metrics = score_board(board, &intersections, options);
    (intersections, metrics)
}

/// Pip weight summed per resource over the producing tiles
pub fn pips_by_resource(board: &Board) -> BTreeMap<Resource, u32> {
    let mut totals: BTreeMap<Resource, u32> = Resource::ALL.iter().map(|&r| (r, 0)).collect();
    for tile in board.producing_tiles() {
        if let Some(resource) = tile.terrain.resource() {
            *totals.entry(resource).or_insert(0) += tile.pip();
        }
    }
    totals
}

/// The `k` strongest intersections.
///
/// Sorted by value descending, then by lower minimum member id, then by the
/// full member list, so the order is fully deterministic.
pub fn top_intersections(intersections: &[Intersection], k: usize) -> Vec<Intersection> {
    let mut ranked: Vec<&Intersection> = intersections.iter().collect();
    ranked.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| a.tiles.first().cmp(&b.tiles.first()))
            .then_with(|| a.tiles.cmp(&b.tiles))
    });
    ranked.into_iter().take(k).cloned().collect()
}

/// Collapse metrics into one number.
///
/// Lower pip spread and a lower peak intersection both raise the score. Spread
/// only counts when pip balancing is on, clustering only when same-terrain
/// limiting is on.
pub fn composite_score(metrics: &FairnessMetrics, options: &GenerationOptions) -> f64 {
    let mut score = BASE_SCORE - PEAK_WEIGHT * metrics.max_intersection as f64;
    if options.balance_pips {
        score -= SPREAD_WEIGHT * metrics.pip_spread;
    }
    if metrics.adjacent_high_probability {
        score -= ADJACENT_HIGH_PENALTY;
    }
    if options.limit_same_terrain {
        score -= CLUSTER_WEIGHT * metrics.same_terrain_violations as f64;
    }
    score
}

/// Population standard deviation
fn std_dev(values: impl Iterator<Item = u32>) -> f64 {
    let values: Vec<f64> = values.map(f64::from).collect();
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

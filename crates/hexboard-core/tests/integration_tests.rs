//! Integration tests for the Hexboard generator.
//!
//! These tests drive the public entry points and check every property a
//! returned board must have.

use hexboard_core::board::{NUMBER_INVENTORY, TERRAIN_INVENTORY};
use hexboard_core::fairness::{evaluate, top_intersections};
use hexboard_core::graph;
use hexboard_core::intersection::{derive_intersections, intersection_shapes};
use hexboard_core::*;
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Search budget per sampled board
const SAMPLE_ATTEMPTS: usize = 40;

/// Generate a handful of boards from distinct seeds
fn sample_boards(options: &GenerationOptions, count: u64) -> Vec<BoardCandidate> {
    (0..count)
        .map(|seed| {
            generate_seeded(options, SAMPLE_ATTEMPTS, seed)
                .unwrap_or_else(|e| panic!("seed {seed} failed: {e}"))
        })
        .collect()
}

/// Check everything that must hold for any returned board
fn assert_board_invariants(candidate: &BoardCandidate) {
    let terrains: BTreeMap<Terrain, usize> = TERRAIN_INVENTORY.iter().copied().collect();
    let numbers: BTreeMap<u8, usize> = NUMBER_INVENTORY.iter().copied().collect();
    assert_eq!(candidate.board.terrain_counts(), terrains);
    assert_eq!(candidate.board.number_counts(), numbers);

    for tile in candidate.tiles() {
        assert_eq!(
            tile.number.is_some(),
            !tile.terrain.is_desert(),
            "tile {} breaks the number/desert rule",
            tile.id
        );
    }

    assert_eq!(candidate.intersections.len(), intersection_shapes().len());
    for intersection in &candidate.intersections {
        let expected: u32 = intersection
            .tiles
            .iter()
            .map(|&t| candidate.board.tile(t).number.map_or(0, pip_weight))
            .sum();
        assert_eq!(intersection.value, expected);
    }
}

#[test]
fn test_inventory_constants() {
    let terrain_total: usize = TERRAIN_INVENTORY.iter().map(|(_, n)| n).sum();
    let number_total: usize = NUMBER_INVENTORY.iter().map(|(_, n)| n).sum();
    assert_eq!(terrain_total, 19);
    assert_eq!(number_total, 18);

    let count = |r: Resource| {
        TERRAIN_INVENTORY
            .iter()
            .find(|(t, _)| *t == Terrain::Resource(r))
            .map(|(_, n)| *n)
    };
    assert_eq!(count(Resource::Wood), Some(4));
    assert_eq!(count(Resource::Wool), Some(4));
    assert_eq!(count(Resource::Grain), Some(4));
    assert_eq!(count(Resource::Brick), Some(3));
    assert_eq!(count(Resource::Ore), Some(3));
}

#[test]
fn test_tile_4_neighbors() {
    assert_eq!(graph::neighbors(4), &[0, 1, 5, 9, 8, 3]);
}

#[test]
fn test_default_generation_meets_every_invariant() {
    let options = GenerationOptions::default();
    for candidate in sample_boards(&options, 8) {
        assert_board_invariants(&candidate);
        assert!(candidate.intersections.iter().all(|i| i.value <= 11));
        assert!(candidate.metrics.max_intersection <= 11);
    }
}

#[test]
fn test_tighter_cap_is_honored() {
    let options = GenerationOptions {
        intersection_cap: 10,
        ..Default::default()
    };
    for candidate in sample_boards(&options, 4) {
        assert_board_invariants(&candidate);
        assert!(candidate.intersections.iter().all(|i| i.value <= 10));
    }
}

#[test]
fn test_center_only_desert() {
    let options = GenerationOptions {
        desert_placement: DesertPlacement::CenterOnly,
        ..Default::default()
    };
    for candidate in sample_boards(&options, 6) {
        assert_board_invariants(&candidate);
        assert_eq!(candidate.board.desert(), Some(CENTER_TILE));
    }
}

#[test]
fn test_desert_never_in_corner() {
    let options = GenerationOptions {
        desert_placement: DesertPlacement::NotInCorner,
        ..Default::default()
    };
    for candidate in sample_boards(&options, 10) {
        assert_board_invariants(&candidate);
        let desert = candidate.board.desert().unwrap();
        assert!(!CORNER_TILES.contains(&desert), "desert on corner {desert}");
    }
}

#[test]
fn test_all_rules_disabled_still_valid() {
    let options = GenerationOptions {
        limit_same_terrain: false,
        balance_pips: false,
        cap_intersections: false,
        ..Default::default()
    };
    for candidate in sample_boards(&options, 3) {
        assert_board_invariants(&candidate);
    }
}

#[test]
fn test_zero_attempts() {
    let options = GenerationOptions::default();
    for seed in 0..3 {
        match generate_seeded(&options, 0, seed) {
            Err(GenerationError::Ungenerable { options: failed, attempts }) => {
                assert_eq!(failed, options);
                assert_eq!(attempts, 0);
            }
            Ok(_) => panic!("zero attempts produced a board"),
        }
    }
}

#[test]
fn test_impossible_cap_reports_configuration_error() {
    let options = GenerationOptions {
        intersection_cap: 2,
        ..Default::default()
    };
    let err = generate(&options, 10).unwrap_err();
    assert!(matches!(err, GenerationError::Ungenerable { attempts: 10, .. }));
}

#[test]
fn test_independent_sources_give_distinct_boards() {
    let options = GenerationOptions::default();
    let boards: HashSet<Vec<(Terrain, Option<u8>)>> = sample_boards(&options, 5)
        .iter()
        .map(|c| c.tiles().iter().map(|t| (t.terrain, t.number)).collect())
        .collect();
    assert!(boards.len() >= 2, "every seed produced the same board");

    let a = generate(&options, 20).unwrap();
    let mut found_different = false;
    for _ in 0..10 {
        let b = generate(&options, 20).unwrap();
        assert_board_invariants(&b);
        if a.board != b.board {
            found_different = true;
            break;
        }
    }
    assert!(found_different, "entropy-seeded generation never varied");
}

#[test]
fn test_top_intersections_are_ranked_and_reproducible() {
    let candidate = generate_seeded(&GenerationOptions::default(), 50, 99).unwrap();
    let top = &candidate.metrics.top_intersections;
    assert_eq!(top.len(), 5);

    for pair in top.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.value > b.value || (a.value == b.value && a.tiles[0] <= b.tiles[0]));
    }
    assert_eq!(top, &top_intersections(&candidate.intersections, 5));
    assert_eq!(top[0].value, candidate.metrics.max_intersection);
}

#[test]
fn test_deriver_is_order_independent() {
    let as_sets = |shapes: &[IntersectionShape]| -> HashSet<BTreeSet<TileId>> {
        shapes.iter().map(|s| s.tiles().iter().copied().collect()).collect()
    };
    let first = derive_intersections();
    let second = derive_intersections();
    assert_eq!(as_sets(&first), as_sets(&second));
    assert_eq!(first.len(), 36);
}

#[test]
fn test_layout_view_for_harbor_placement() {
    let candidate = generate_seeded(&GenerationOptions::default(), 20, 4).unwrap();
    let layout = candidate.layout();

    assert_eq!(layout.len(), TILE_COUNT);
    let coastal: Vec<TileId> = layout.iter().filter(|t| t.coastal).map(|t| t.id).collect();
    assert_eq!(coastal.len(), 12);
    for view in &layout {
        assert_eq!(view.terrain, candidate.board.tile(view.id).terrain);
        assert_eq!(view.neighbors, graph::neighbors(view.id));
        for &n in view.neighbors {
            assert_eq!(view.coord.distance_to(&layout[n].coord), 1);
        }
    }
}

#[test]
fn test_parallel_generation() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                generate_seeded(&GenerationOptions::default(), 50, seed + 100)
            })
        })
        .collect();

    for handle in handles {
        let candidate = handle.join().unwrap().unwrap();
        assert_board_invariants(&candidate);
    }
}

#[test]
fn test_candidate_survives_json_for_persistence() {
    let candidate = generate_seeded(&GenerationOptions::default(), 20, 7).unwrap();
    let json = serde_json::to_string(&candidate).unwrap();
    let restored: BoardCandidate = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.board, candidate.board);
    assert_eq!(restored.intersections, candidate.intersections);
    assert_eq!(restored.metrics.top_intersections, candidate.metrics.top_intersections);
}

#[test]
fn test_corrupt_stored_candidate_is_rejected() {
    let candidate = generate_seeded(&GenerationOptions::default(), 20, 7).unwrap();
    let mut value = serde_json::to_value(&candidate).unwrap();
    value["board"]["tiles"].as_array_mut().unwrap().truncate(1);

    let err = serde_json::from_value::<BoardCandidate>(value).unwrap_err();
    assert!(err.to_string().contains("Expected 19 tiles"), "{err}");
}

#[test]
fn test_rescoring_a_generated_board_reproduces_its_metrics() {
    for options in [
        GenerationOptions::default(),
        GenerationOptions {
            balance_pips: false,
            limit_same_terrain: false,
            ..Default::default()
        },
    ] {
        for candidate in sample_boards(&options, 3) {
            let copy = candidate.clone();
            let (intersections, metrics) = evaluate(&copy.board, &options);
            assert_eq!(intersections, candidate.intersections);
            assert_eq!(metrics, candidate.metrics);
        }
    }
}

//! Meeting points of tiles, derived from the adjacency graph.
//!
//! A building spot touches either three mutually adjacent tiles (interior
//! corners) or two adjacent tiles (coastal corners where the third hex is sea).
//! The shapes depend only on the graph, so they are derived once per process
//! and shared. Values depend on the board and are filled in per board.

use crate::board::Board;
use crate::graph::{self, TileId, ALL_TILES};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Number of 3-tile meeting points on the standard layout
pub const TRIANGLE_COUNT: usize = 24;

/// Number of 2-tile coastal meeting points on the standard layout
pub const COASTAL_PAIR_COUNT: usize = 12;

/// Tile ids meeting at one point, sorted ascending
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IntersectionShape {
    tiles: Vec<TileId>,
}

impl IntersectionShape {
    fn new(mut tiles: Vec<TileId>) -> Self {
        tiles.sort_unstable();
        Self { tiles }
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    /// Summed pip weight of the members on a given board
    pub fn value_on(&self, board: &Board) -> u32 {
        self.tiles.iter().map(|&t| board.pip(t)).sum()
    }
}

/// A meeting point with its value on a specific board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    /// Member tile ids, sorted ascending
    pub tiles: Vec<TileId>,
    /// Sum of member pip weights (the desert counts 0)
    pub value: u32,
}

static SHAPES: LazyLock<Vec<IntersectionShape>> = LazyLock::new(|| {
    graph::assert_well_formed();
    let shapes = derive_intersections();
    for shape in &shapes {
        let members = shape.tiles();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                assert!(graph::are_adjacent(a, b), "intersection {members:?} is not a clique");
            }
        }
    }
    shapes
});

/// Enumerate every meeting point of the adjacency graph.
///
/// Triangles come from each tile's mutually adjacent neighbor pairs,
/// canonicalized so each is emitted once. An adjacent pair that completes fewer
/// than two triangles has at least one corner with no third land tile, which
/// becomes a 2-tile meeting point. Output holds all triangles in lexicographic
/// order followed by all pairs in lexicographic order.
pub fn derive_intersections() -> Vec<IntersectionShape> {
    let mut triangles: BTreeSet<[TileId; 3]> = BTreeSet::new();

    for t in ALL_TILES {
        let around = graph::neighbors(t);
        for &u in around {
            for &v in around {
                if u < v && graph::are_adjacent(u, v) {
                    let mut tri = [t, u, v];
                    tri.sort_unstable();
                    triangles.insert(tri);
                }
            }
        }
    }

    let mut pair_triangles: BTreeMap<(TileId, TileId), usize> =
        graph::adjacent_pairs().map(|p| (p, 0)).collect();
    for [a, b, c] in &triangles {
        for pair in [(*a, *b), (*a, *c), (*b, *c)] {
            if let Some(count) = pair_triangles.get_mut(&pair) {
                *count += 1;
            }
        }
    }

    let triangle_shapes = triangles.into_iter().map(|tri| IntersectionShape::new(tri.to_vec()));
    let pair_shapes = pair_triangles
        .into_iter()
        .filter(|&(_, count)| count < 2)
        .map(|((a, b), _)| IntersectionShape::new(vec![a, b]));

    triangle_shapes.chain(pair_shapes).collect()
}

/// The process-wide cached intersection shapes
pub fn intersection_shapes() -> &'static [IntersectionShape] {
    &SHAPES
}

/// Value every cached intersection on a board, in shape order
pub fn value_intersections(board: &Board) -> Vec<Intersection> {
    intersection_shapes()
        .iter()
        .map(|shape| Intersection {
            tiles: shape.tiles().to_vec(),
            value: shape.value_on(board),
        })
        .collect()
}

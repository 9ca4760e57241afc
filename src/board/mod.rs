use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::coords::{Corner, LatticeCoord, ROW_LENGTHS};
use crate::geometry::Point;
use crate::resolver::VertexTopology;
use crate::types::{Resource, TileId, VertexId};

mod centers;

pub use centers::TileCenters;

/// Touching tiles of one vertex; a valid board never has more than three.
pub type TouchingTiles = SmallVec<[TileId; 3]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub resource: Resource,
    #[serde(default)]
    pub number: Option<u8>,
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board has no tiles")]
    Empty,
    #[error("tile id {0} appears more than once")]
    DuplicateTile(TileId),
    #[error("tiles {first} and {second} both sit at row {row}, col {col}")]
    DuplicatePosition {
        first: TileId,
        second: TileId,
        row: u8,
        col: u8,
    },
    #[error("board has more vertices than vertex ids can address")]
    TooManyVertices,
    #[error("invalid board json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read board file: {0}")]
    Io(#[from] std::io::Error),
}

/// Static board topology. Vertex relations are derived once from the tile
/// rows and columns; nothing changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Board {
    tiles: Vec<Tile>,
    tiles_touching: BTreeMap<VertexId, TouchingTiles>,
    vertex_neighbors: BTreeMap<VertexId, Vec<VertexId>>,
    vertex_corners: BTreeMap<VertexId, (TileId, Corner)>,
}

impl Board {
    pub fn new(mut tiles: Vec<Tile>) -> Result<Self, BoardError> {
        if tiles.is_empty() {
            return Err(BoardError::Empty);
        }
        tiles.sort_by_key(|tile| tile.id);

        for pair in tiles.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(BoardError::DuplicateTile(pair[0].id));
            }
        }
        let mut occupied: HashMap<(u8, u8), TileId> = HashMap::new();
        for tile in &tiles {
            if let Some(first) = occupied.insert((tile.row, tile.col), tile.id) {
                return Err(BoardError::DuplicatePosition {
                    first,
                    second: tile.id,
                    row: tile.row,
                    col: tile.col,
                });
            }
        }

        let relabel: &[(VertexId, VertexId)] = if is_standard_layout(&tiles) {
            &STANDARD_LAYOUT_RELABEL
        } else {
            &[]
        };

        let mut corner_ids: HashMap<LatticeCoord, VertexId> = HashMap::new();
        let mut tiles_touching: BTreeMap<VertexId, TouchingTiles> = BTreeMap::new();
        let mut neighbor_sets: BTreeMap<VertexId, BTreeSet<VertexId>> = BTreeMap::new();
        let mut vertex_corners: BTreeMap<VertexId, (TileId, Corner)> = BTreeMap::new();

        for tile in &tiles {
            let center = LatticeCoord::tile_center(tile.row, tile.col);
            // indexed by `Corner as usize`, which follows `Corner::RING`
            let mut ring_ids: [VertexId; 6] = [0; 6];

            for corner in Corner::NUMBERING_ORDER {
                let key = center.corner(corner);
                let vertex = match corner_ids.get(&key) {
                    Some(existing) => *existing,
                    None => {
                        let fresh = VertexId::try_from(corner_ids.len())
                            .map_err(|_| BoardError::TooManyVertices)?;
                        let next = relabel
                            .iter()
                            .find_map(|&(from, to)| (from == fresh).then_some(to))
                            .unwrap_or(fresh);
                        corner_ids.insert(key, next);
                        vertex_corners.insert(next, (tile.id, corner));
                        next
                    }
                };
                tiles_touching.entry(vertex).or_default().push(tile.id);
                ring_ids[corner as usize] = vertex;
            }

            for (i, a) in ring_ids.iter().enumerate() {
                let b = ring_ids[(i + 1) % ring_ids.len()];
                neighbor_sets.entry(*a).or_default().insert(b);
                neighbor_sets.entry(b).or_default().insert(*a);
            }
        }

        let vertex_neighbors = neighbor_sets
            .into_iter()
            .map(|(vertex, set)| (vertex, set.into_iter().collect()))
            .collect();

        debug!(
            tiles = tiles.len(),
            vertices = tiles_touching.len(),
            "board topology built"
        );

        Ok(Self {
            tiles,
            tiles_touching,
            vertex_neighbors,
            vertex_corners,
        })
    }

    /// Fixed 19-tile layout with the usual introductory resource and number
    /// placement.
    pub fn reference() -> Self {
        REFERENCE_BOARD.clone()
    }

    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let tiles: Vec<Tile> = serde_json::from_str(json)?;
        Self::new(tiles)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles
            .binary_search_by_key(&id, |tile| tile.id)
            .ok()
            .map(|idx| &self.tiles[idx])
    }

    pub fn vertex_count(&self) -> usize {
        self.tiles_touching.len()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.tiles_touching.contains_key(&vertex)
    }

    /// Tile and corner that first produced `vertex` during numbering.
    pub fn vertex_corner(&self, vertex: VertexId) -> Option<(TileId, Corner)> {
        self.vertex_corners.get(&vertex).copied()
    }

    /// Position of `vertex` on the drawn hexagon outline, as opposed to the
    /// inferred position from the resolver.
    pub fn exact_vertex_position(
        &self,
        vertex: VertexId,
        centers: &TileCenters,
        hex_radius: f64,
    ) -> Option<Point> {
        let (tile_id, corner) = self.vertex_corner(vertex)?;
        let center = centers.get(tile_id)?;
        Some(corner.position(center, hex_radius))
    }
}

impl VertexTopology for Board {
    fn tiles_touching(&self, vertex: VertexId) -> &[TileId] {
        self.tiles_touching
            .get(&vertex)
            .map(|tiles| tiles.as_slice())
            .unwrap_or(&[])
    }

    fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.vertex_neighbors
            .get(&vertex)
            .map(|neighbors| neighbors.as_slice())
            .unwrap_or(&[])
    }

    fn vertex_ids(&self) -> Vec<VertexId> {
        self.tiles_touching.keys().copied().collect()
    }
}

impl TryFrom<Vec<Tile>> for Board {
    type Error = BoardError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        Board::new(tiles)
    }
}

impl From<Board> for Vec<Tile> {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

/// Published vertex ids of the standard 19-tile layout that differ from the
/// geometric numbering: the last tile hands out its south corner before its
/// south-east one.
const STANDARD_LAYOUT_RELABEL: [(VertexId, VertexId); 2] = [(52, 53), (53, 52)];

/// Tile ids `0..19` placed row by row on the 3-4-5-4-3 rows. `tiles` must be
/// sorted by id.
fn is_standard_layout(tiles: &[Tile]) -> bool {
    let positions = row_major_positions(&ROW_LENGTHS);
    tiles.len() == positions.len()
        && tiles
            .iter()
            .zip(positions)
            .enumerate()
            .all(|(i, (tile, (row, col)))| {
                usize::from(tile.id) == i && tile.row == row && tile.col == col
            })
}

/// Row and column of every tile, row by row, for the given row lengths.
pub fn row_major_positions(row_lengths: &[u8]) -> Vec<(u8, u8)> {
    let mut positions = Vec::new();
    for (row, len) in row_lengths.iter().enumerate() {
        for col in 0..*len {
            positions.push((row as u8, col));
        }
    }
    positions
}

static REFERENCE_BOARD: Lazy<Board> = Lazy::new(|| {
    use Resource::*;
    let layout: [(Resource, Option<u8>); 19] = [
        (Ore, Some(10)),
        (Sheep, Some(2)),
        (Wood, Some(9)),
        (Wheat, Some(12)),
        (Brick, Some(6)),
        (Sheep, Some(4)),
        (Brick, Some(10)),
        (Wheat, Some(9)),
        (Wood, Some(11)),
        (Desert, None),
        (Wood, Some(3)),
        (Ore, Some(8)),
        (Wood, Some(8)),
        (Ore, Some(3)),
        (Wheat, Some(4)),
        (Sheep, Some(5)),
        (Brick, Some(5)),
        (Wheat, Some(6)),
        (Sheep, Some(11)),
    ];
    let tiles = row_major_positions(&ROW_LENGTHS)
        .into_iter()
        .zip(layout)
        .enumerate()
        .map(|(id, ((row, col), (resource, number)))| Tile {
            id: id as TileId,
            resource,
            number,
            row,
            col,
        })
        .collect();
    match Board::new(tiles) {
        Ok(board) => board,
        Err(err) => panic!("reference layout is malformed: {err}"),
    }
});

/// Distinct tiles of `vertices`, ascending.
pub fn tiles_around<'a, I>(board: &Board, vertices: I) -> Vec<TileId>
where
    I: IntoIterator<Item = &'a VertexId>,
{
    vertices
        .into_iter()
        .flat_map(|vertex| board.tiles_touching(*vertex).iter().copied())
        .sorted_unstable()
        .dedup()
        .collect()
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coords::hex_to_pixel;
use crate::geometry::{Bounds, Point, bounds};
use crate::types::TileId;

/// Precomputed tile center lookup. The resolver only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileCenters {
    centers: BTreeMap<TileId, Point>,
}

impl TileCenters {
    /// Centers for every tile of `board`, spaced for hexagons of circumradius
    /// `size`.
    pub fn for_board(board: &Board, size: f64) -> Self {
        board
            .tiles()
            .iter()
            .map(|tile| (tile.id, hex_to_pixel(tile.row, tile.col, size)))
            .collect()
    }

    pub fn get(&self, tile: TileId) -> Option<Point> {
        self.centers.get(&tile).copied()
    }

    pub fn insert(&mut self, tile: TileId, center: Point) -> Option<Point> {
        self.centers.insert(tile, center)
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, Point)> + '_ {
        self.centers.iter().map(|(id, p)| (*id, *p))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        bounds(self.centers.values().copied())
    }
}

impl FromIterator<(TileId, Point)> for TileCenters {
    fn from_iter<I: IntoIterator<Item = (TileId, Point)>>(iter: I) -> Self {
        Self {
            centers: iter.into_iter().collect(),
        }
    }
}

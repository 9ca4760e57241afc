//! Vertex placement from board topology.
//!
//! A vertex has no stored coordinate. Its position is inferred from the
//! centers of the tiles it touches:
//!
//! * three tiles: the centroid of their centers,
//! * two tiles: the midpoint pushed `0.6 * hex_radius` from the first tile
//!   toward the second,
//! * one tile: extrapolated outward past the first neighbor that touches two
//!   or more tiles, or placed at a fixed 30° angle from the tile center when
//!   no such neighbor exists.
//!
//! Every call yields a point. Inputs that only allow a best-effort placement
//! come back as [`Resolution::Degenerate`] so callers can choose whether to
//! draw them anyway or reject them through [`Resolution::strict`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use strum::Display;
use tracing::trace;

use crate::board::TileCenters;
use crate::geometry::{Point, average};
use crate::types::{TileId, VertexId};

/// Fraction of the hex radius a shared-edge vertex sits past the tile midpoint.
pub const SHARED_EDGE_OFFSET: f64 = 0.6;
/// How far a rim vertex is pushed past its neighbor, relative to the
/// neighbor's distance from the rim tile center.
pub const RIM_EXTENSION: f64 = 0.5;
pub const FALLBACK_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// Read-only adjacency queries the resolver needs from a board.
pub trait VertexTopology {
    /// Tiles whose corners include `vertex`; empty for unknown vertices.
    fn tiles_touching(&self, vertex: VertexId) -> &[TileId];

    /// Vertices joined to `vertex` by a board edge, in any order.
    fn neighbors(&self, vertex: VertexId) -> &[VertexId];

    fn vertex_ids(&self) -> Vec<VertexId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum VertexKind {
    /// Rim vertex of a single tile, placed relative to a neighbor.
    Edge,
    SharedEdge,
    Corner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    NoTouchingTiles,
    MissingTileCenters { missing: usize },
    NoResolvableNeighbor,
    CoincidentTiles,
    TooManyTiles(usize),
    InvalidHexRadius,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::NoTouchingTiles => write!(f, "vertex touches no tiles"),
            DegenerateReason::MissingTileCenters { missing } => {
                write!(f, "{missing} touching tile(s) have no center")
            }
            DegenerateReason::NoResolvableNeighbor => {
                write!(f, "no neighbor touches two tiles, used the fixed-angle fallback")
            }
            DegenerateReason::CoincidentTiles => write!(f, "touching tile centers coincide"),
            DegenerateReason::TooManyTiles(count) => write!(f, "vertex touches {count} tiles"),
            DegenerateReason::InvalidHexRadius => {
                write!(f, "hex radius is not a positive finite number")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved { point: Point, kind: VertexKind },
    Degenerate { point: Point, reason: DegenerateReason },
}

impl Resolution {
    /// Best-effort coordinate, whatever the outcome.
    pub fn point(&self) -> Point {
        match self {
            Resolution::Resolved { point, .. } | Resolution::Degenerate { point, .. } => *point,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }

    pub fn degenerate_reason(&self) -> Option<DegenerateReason> {
        match self {
            Resolution::Resolved { .. } => None,
            Resolution::Degenerate { reason, .. } => Some(*reason),
        }
    }

    pub fn strict(self, vertex: VertexId) -> Result<Point, ResolveError> {
        match self {
            Resolution::Resolved { point, .. } => Ok(point),
            Resolution::Degenerate { point, reason } => Err(ResolveError::Degenerate {
                vertex,
                reason,
                fallback: point,
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("vertex {vertex} cannot be placed reliably: {reason}")]
    Degenerate {
        vertex: VertexId,
        reason: DegenerateReason,
        fallback: Point,
    },
}

pub struct VertexPositionResolver<'a, T: ?Sized> {
    topology: &'a T,
    centers: &'a TileCenters,
    hex_radius: f64,
}

impl<'a, T> VertexPositionResolver<'a, T>
where
    T: VertexTopology + ?Sized,
{
    /// A `hex_radius` that is not positive and finite makes every vertex
    /// with a known tile center resolve as [`DegenerateReason::InvalidHexRadius`],
    /// placed at the centroid of its tile centers.
    pub fn new(topology: &'a T, centers: &'a TileCenters, hex_radius: f64) -> Self {
        Self {
            topology,
            centers,
            hex_radius,
        }
    }

    pub fn hex_radius(&self) -> f64 {
        self.hex_radius
    }

    pub fn centers(&self) -> &'a TileCenters {
        self.centers
    }

    pub fn resolve(&self, vertex: VertexId) -> Resolution {
        let touching = self.topology.tiles_touching(vertex);
        if touching.is_empty() {
            return Resolution::Degenerate {
                point: Point::ORIGIN,
                reason: DegenerateReason::NoTouchingTiles,
            };
        }

        let positions = self.centers_of(touching);
        let missing = touching.len() - positions.len();

        if !positions.is_empty() && !(self.hex_radius.is_finite() && self.hex_radius > 0.0) {
            return Resolution::Degenerate {
                point: average(&positions).unwrap_or(Point::ORIGIN),
                reason: DegenerateReason::InvalidHexRadius,
            };
        }

        let resolution = match positions.as_slice() {
            [] => Resolution::Degenerate {
                point: Point::ORIGIN,
                reason: DegenerateReason::MissingTileCenters { missing },
            },
            [sole] => self.place_rim_vertex(vertex, *sole),
            [first, second] => match shared_edge_position(*first, *second, self.hex_radius) {
                Some(point) => Resolution::Resolved {
                    point,
                    kind: VertexKind::SharedEdge,
                },
                None => Resolution::Degenerate {
                    point: first.midpoint(*second),
                    reason: DegenerateReason::CoincidentTiles,
                },
            },
            [_, _, _] => Resolution::Resolved {
                point: average(&positions).unwrap_or(Point::ORIGIN),
                kind: VertexKind::Corner,
            },
            many => Resolution::Degenerate {
                point: average(many).unwrap_or(Point::ORIGIN),
                reason: DegenerateReason::TooManyTiles(many.len()),
            },
        };

        if missing > 0 {
            Resolution::Degenerate {
                point: resolution.point(),
                reason: DegenerateReason::MissingTileCenters { missing },
            }
        } else {
            resolution
        }
    }

    pub fn resolve_strict(&self, vertex: VertexId) -> Result<Point, ResolveError> {
        self.resolve(vertex).strict(vertex)
    }

    /// Every vertex of the topology, keyed by id.
    pub fn resolve_all(&self) -> BTreeMap<VertexId, Resolution> {
        self.topology
            .vertex_ids()
            .into_iter()
            .map(|vertex| (vertex, self.resolve(vertex)))
            .collect()
    }

    fn centers_of(&self, tiles: &[TileId]) -> SmallVec<[Point; 3]> {
        tiles.iter().filter_map(|tile| self.centers.get(*tile)).collect()
    }

    fn place_rim_vertex(&self, vertex: VertexId, tile_center: Point) -> Resolution {
        // lowest id first, whatever order the topology reports
        let mut neighbors: SmallVec<[VertexId; 6]> =
            self.topology.neighbors(vertex).iter().copied().collect();
        neighbors.sort_unstable();
        neighbors.dedup();

        for neighbor in neighbors {
            let neighbor_tiles = self.topology.tiles_touching(neighbor);
            if neighbor_tiles.len() < 2 {
                continue;
            }
            let positions = self.centers_of(neighbor_tiles);
            let [first, second, ..] = positions.as_slice() else {
                continue;
            };
            if let Some(anchor) = shared_edge_position(*first, *second, self.hex_radius) {
                trace!(vertex, neighbor, "rim vertex placed past neighbor");
                return Resolution::Resolved {
                    point: anchor + (anchor - tile_center) * RIM_EXTENSION,
                    kind: VertexKind::Edge,
                };
            }
        }

        Resolution::Degenerate {
            point: Point::new(
                tile_center.x + self.hex_radius * FALLBACK_ANGLE.cos(),
                tile_center.y + self.hex_radius * FALLBACK_ANGLE.sin(),
            ),
            reason: DegenerateReason::NoResolvableNeighbor,
        }
    }
}

/// Midpoint of two tile centers moved `SHARED_EDGE_OFFSET * hex_radius` along
/// the direction from `first` to `second`. `None` when the centers coincide.
pub fn shared_edge_position(first: Point, second: Point, hex_radius: f64) -> Option<Point> {
    let delta = second - first;
    let dist = delta.length();
    if dist <= 0.0 {
        return None;
    }
    let mid = first.midpoint(second);
    Some(Point::new(
        mid.x + hex_radius * SHARED_EDGE_OFFSET * delta.x / dist,
        mid.y + hex_radius * SHARED_EDGE_OFFSET * delta.y / dist,
    ))
}

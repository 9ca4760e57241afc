use serde::Serialize;
use tracing::warn;

use crate::board::{Board, TileCenters};
use crate::error::VizError;
use crate::geometry::Point;
use crate::render::{Placement, RenderConfig};
use crate::resolver::{Resolution, VertexPositionResolver, VertexTopology};
use crate::state::State;
use crate::types::{PlayerId, TileId, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub vertex: VertexId,
    pub player: PlayerId,
    pub position: Point,
}

/// One marker per occupied vertex, ordered by vertex. A vertex claimed by
/// several players goes to the lowest-numbered one.
pub fn settlement_markers(
    board: &Board,
    state: &State,
    centers: &TileCenters,
    hex_radius: f64,
    config: &RenderConfig,
) -> Result<Vec<Marker>, VizError> {
    let resolver = VertexPositionResolver::new(board, centers, hex_radius);
    state
        .settlements_by_vertex()
        .into_iter()
        .map(|(vertex, player)| {
            let position = marker_position(board, &resolver, vertex, config)?;
            Ok(Marker {
                vertex,
                player,
                position,
            })
        })
        .collect()
}

fn marker_position(
    board: &Board,
    resolver: &VertexPositionResolver<'_, Board>,
    vertex: VertexId,
    config: &RenderConfig,
) -> Result<Point, VizError> {
    if config.placement == Placement::Exact {
        let centers = resolver.centers();
        if let Some(point) = board.exact_vertex_position(vertex, centers, resolver.hex_radius()) {
            return Ok(point);
        }
        if config.strict {
            return Err(VizError::UnknownVertex(vertex));
        }
    }

    let resolution = resolver.resolve(vertex);
    if config.strict {
        return Ok(resolution.strict(vertex)?);
    }
    if let Some(reason) = resolution.degenerate_reason() {
        warn!(vertex, %reason, "settlement drawn at a fallback position");
    }
    Ok(resolution.point())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexRow {
    pub vertex: VertexId,
    pub tiles: Vec<TileId>,
    pub neighbors: Vec<VertexId>,
    #[serde(flatten)]
    pub resolution: Resolution,
    pub exact: Option<Point>,
}

/// Resolved and exact position of every vertex, for inspection.
pub fn vertex_table(board: &Board, centers: &TileCenters, hex_radius: f64) -> Vec<VertexRow> {
    let resolver = VertexPositionResolver::new(board, centers, hex_radius);
    resolver
        .resolve_all()
        .into_iter()
        .map(|(vertex, resolution)| VertexRow {
            vertex,
            tiles: board.tiles_touching(vertex).to_vec(),
            neighbors: board.neighbors(vertex).to_vec(),
            resolution,
            exact: board.exact_vertex_position(vertex, centers, hex_radius),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Board, TileCenters) {
        let board = Board::reference();
        let centers = TileCenters::for_board(&board, 0.8);
        (board, centers)
    }

    fn state(json: &str) -> State {
        State::from_json(json).unwrap()
    }

    #[test]
    fn resolved_markers_match_resolver() {
        let (board, centers) = setup();
        let state = state(r#"{"houses": {"1": [1, 4], "2": [30]}}"#);
        let markers =
            settlement_markers(&board, &state, &centers, 0.8, &RenderConfig::default()).unwrap();

        let resolver = VertexPositionResolver::new(&board, &centers, 0.8);
        let vertices: Vec<VertexId> = markers.iter().map(|m| m.vertex).collect();
        assert_eq!(vertices, vec![1, 4, 30]);
        for marker in &markers {
            assert_eq!(marker.position, resolver.resolve(marker.vertex).point());
        }
        assert_eq!(markers[2].player, PlayerId(2));
    }

    #[test]
    fn exact_markers_sit_on_hexagon_corners() {
        let (board, centers) = setup();
        let state = state(r#"{"houses": {"1": [0]}}"#);
        let config = RenderConfig {
            placement: Placement::Exact,
            ..RenderConfig::default()
        };
        let markers = settlement_markers(&board, &state, &centers, 0.8, &config).unwrap();
        assert!((markers[0].position.x - 2.078461).abs() < 1e-6);
        assert!((markers[0].position.y + 0.4).abs() < 1e-6);
    }

    #[test]
    fn unknown_vertex_is_lenient_unless_strict() {
        let (board, centers) = setup();
        let state = state(r#"{"houses": {"3": [99]}}"#);

        let lenient =
            settlement_markers(&board, &state, &centers, 0.8, &RenderConfig::default()).unwrap();
        assert_eq!(lenient[0].position, Point::ORIGIN);

        let strict = RenderConfig {
            strict: true,
            ..RenderConfig::default()
        };
        assert!(matches!(
            settlement_markers(&board, &state, &centers, 0.8, &strict),
            Err(VizError::Resolve(_))
        ));

        let strict_exact = RenderConfig {
            strict: true,
            placement: Placement::Exact,
            ..RenderConfig::default()
        };
        assert!(matches!(
            settlement_markers(&board, &state, &centers, 0.8, &strict_exact),
            Err(VizError::UnknownVertex(99))
        ));
    }

    #[test]
    fn vertex_table_lists_every_vertex() {
        let (board, centers) = setup();
        let table = vertex_table(&board, &centers, 0.8);
        assert_eq!(table.len(), 54);
        assert_eq!(table[0].tiles, vec![0, 1]);
        assert_eq!(table[0].neighbors, vec![1, 4, 9]);
        assert!(table.iter().all(|row| row.exact.is_some()));

        let json = serde_json::to_value(&table[4]).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["kind"], "edge");
    }
}

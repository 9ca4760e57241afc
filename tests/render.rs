use std::fs;
use std::path::PathBuf;

use catan_board_viz::board::{Board, TileCenters};
use catan_board_viz::render::{
    Placement, RenderConfig, render_board, render_settlements_detailed, vertex_table,
};
use catan_board_viz::resolver::{Resolution, VertexKind, VertexPositionResolver};
use catan_board_viz::state::State;
use catan_board_viz::{PlayerId, VizError};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn demo_state() -> State {
    State::load(demo("state.json")).unwrap()
}

#[test]
fn demo_board_is_the_reference_board() {
    let board = Board::load(demo("board.json")).unwrap();
    assert_eq!(board.tiles(), Board::reference().tiles());
    assert_eq!(board.vertex_count(), 54);
}

#[test]
fn demo_state_fits_the_board() {
    let state = demo_state();
    state.validate(&Board::reference()).unwrap();
    assert_eq!(state.players().count(), 4);
    assert_eq!(state.settlements(PlayerId(3)), &[16, 47]);
}

#[test]
fn every_reference_vertex_resolves() {
    let board = Board::reference();
    let centers = TileCenters::for_board(&board, 0.8);
    let resolver = VertexPositionResolver::new(&board, &centers, 0.8);
    let resolutions = resolver.resolve_all();
    assert_eq!(resolutions.len(), 54);
    assert!(resolutions.values().all(Resolution::is_resolved));

    let count = |kind: VertexKind| {
        resolutions
            .values()
            .filter(|r| matches!(r, Resolution::Resolved { kind: k, .. } if *k == kind))
            .count()
    };
    assert_eq!(count(VertexKind::Edge), 18);
    assert_eq!(count(VertexKind::SharedEdge), 12);
    assert_eq!(count(VertexKind::Corner), 24);
}

#[test]
fn vertex_table_serializes_to_json() {
    let board = Board::reference();
    let centers = TileCenters::for_board(&board, 0.8);
    let table = vertex_table(&board, &centers, 0.8);
    let json = serde_json::to_value(&table).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 54);
    assert_eq!(rows[1]["tiles"], serde_json::json!([0, 1, 4]));
    assert_eq!(rows[1]["kind"], "corner");
}

#[test]
fn renders_overview_and_detailed_svg() {
    let dir = tempfile::tempdir().unwrap();
    let board = Board::reference();
    let state = demo_state();

    for placement in [Placement::Resolved, Placement::Exact] {
        let config = RenderConfig {
            placement,
            ..RenderConfig::default()
        };
        let overview = dir.path().join(format!("board_{placement}.svg"));
        render_board(&board, Some(&state), &config, &overview).unwrap();
        let svg = fs::read_to_string(&overview).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Player 4 (Yellow)"));

        let detailed = dir.path().join(format!("detailed_{placement}.svg"));
        render_settlements_detailed(&board, &state, &config, &detailed).unwrap();
        let svg = fs::read_to_string(&detailed).unwrap();
        assert!(svg.contains("Settlements at vertices [30, 41]"));
    }
}

#[test]
fn renders_bare_board_without_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.svg");
    render_board(&Board::reference(), None, &RenderConfig::default(), &path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn strict_rendering_rejects_unknown_vertices() {
    let dir = tempfile::tempdir().unwrap();
    let state = State::from_json(r#"{"houses": {"1": [0, 77]}}"#).unwrap();
    let config = RenderConfig {
        strict: true,
        ..RenderConfig::default()
    };
    let err = render_board(
        &Board::reference(),
        Some(&state),
        &config,
        dir.path().join("strict.svg"),
    )
    .unwrap_err();
    assert!(matches!(err, VizError::Resolve(_)));

    let lenient = dir.path().join("lenient.svg");
    render_board(&Board::reference(), Some(&state), &RenderConfig::default(), &lenient).unwrap();
    assert!(lenient.exists());
}

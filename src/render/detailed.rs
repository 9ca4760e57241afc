use std::path::Path;

use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::board::{Board, TileCenters};
use crate::error::VizError;
use crate::render::board::{
    PADDING, TITLE_LINE_HEIGHT, TileShape, draw_marker, draw_tile, draw_title, fit_tiles,
};
use crate::render::canvas::Canvas;
use crate::render::markers::{Marker, settlement_markers};
use crate::render::{OutputFormat, RenderConfig};
use crate::state::State;
use crate::types::PlayerId;

const GRID: (usize, usize) = (2, 2);
const MAX_PANELS: usize = GRID.0 * GRID.1;

/// One player's view: their settlements only, with the tiles those
/// settlements touch highlighted.
#[derive(Debug, Clone)]
pub struct PlayerPanel {
    pub player: PlayerId,
    pub title: Vec<String>,
    pub tiles: Vec<TileShape>,
    pub markers: Vec<Marker>,
    canvas: Canvas,
}

impl PlayerPanel {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

/// A 2x2 grid of player panels.
#[derive(Debug, Clone)]
pub struct DetailedScene {
    pub panels: Vec<PlayerPanel>,
    hex_radius: f64,
    panel_size: (u32, u32),
}

impl DetailedScene {
    pub fn build(board: &Board, state: &State, config: &RenderConfig) -> Result<Self, VizError> {
        config.validate()?;
        let players: Vec<PlayerId> = state.players().collect();
        if players.is_empty() {
            return Err(VizError::EmptyScene("state has no players"));
        }
        if players.len() > MAX_PANELS {
            warn!(
                players = players.len(),
                shown = MAX_PANELS,
                "detailed view only has room for the lowest-numbered players"
            );
        }

        let radius = config.detailed_hex_size;
        let scale = config.pixels_per_unit * config.hex_radius / radius;
        let centers = TileCenters::for_board(board, radius);
        let markers = settlement_markers(board, state, &centers, radius, config)?;

        let panels = players
            .into_iter()
            .take(MAX_PANELS)
            .map(|player| {
                let highlighted = state.tiles_touched_by(player, board);
                let tiles = TileShape::collect(board, &centers, &highlighted);
                let markers: Vec<Marker> = markers
                    .iter()
                    .filter(|marker| marker.player == player)
                    .copied()
                    .collect();
                let title = vec![
                    player.label(),
                    format!(
                        "Settlements at vertices [{}]",
                        state.settlements(player).iter().join(", ")
                    ),
                ];
                let title_height = TITLE_LINE_HEIGHT * title.len() as u32;
                let canvas = fit_tiles(&tiles, &markers, radius, scale, title_height)?;
                Ok(PlayerPanel {
                    player,
                    title,
                    tiles,
                    markers,
                    canvas,
                })
            })
            .collect::<Result<Vec<_>, VizError>>()?;

        let panel_size = panels
            .iter()
            .map(|panel| {
                let (width, height) = panel.canvas.extent();
                let title_height = TITLE_LINE_HEIGHT * panel.title.len() as u32;
                (width + 2 * PADDING, height + 2 * PADDING + title_height)
            })
            .fold((0, 0), |(w, h), (pw, ph)| (w.max(pw), h.max(ph)));

        Ok(Self {
            panels,
            hex_radius: radius,
            panel_size,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (
            self.panel_size.0 * GRID.1 as u32,
            self.panel_size.1 * GRID.0 as u32,
        )
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), VizError> {
        root.fill(&WHITE)?;
        let areas = root.split_evenly(GRID);
        for (panel, area) in self.panels.iter().zip(areas.iter()) {
            draw_title(area, &panel.title, self.panel_size.0)?;
            for tile in &panel.tiles {
                draw_tile(area, &panel.canvas, tile, self.hex_radius)?;
            }
            for marker in &panel.markers {
                draw_marker(area, &panel.canvas, marker, self.hex_radius * 0.15)?;
            }
        }
        Ok(())
    }
}

pub fn render_settlements_detailed(
    board: &Board,
    state: &State,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> Result<(), VizError> {
    let path = path.as_ref();
    let scene = DetailedScene::build(board, state, config)?;
    let (width, height) = scene.size();
    info!(
        path = %path.display(),
        width,
        height,
        panels = scene.panels.len(),
        "rendering per-player view"
    );

    match OutputFormat::from_path(path) {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, scene.size()).into_drawing_area();
            scene.draw(&root)?;
            root.present()?;
        }
        OutputFormat::Bitmap => {
            let root = BitMapBackend::new(path, scene.size()).into_drawing_area();
            scene.draw(&root)?;
            root.present()?;
        }
    }
    Ok(())
}

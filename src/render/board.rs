use std::path::Path;

use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::board::{Board, TileCenters};
use crate::coords::hexagon_corners;
use crate::error::VizError;
use crate::geometry::{Point, bounds};
use crate::render::canvas::Canvas;
use crate::render::markers::{Marker, settlement_markers};
use crate::render::palette::{HIGHLIGHT_COLOR, HIGHLIGHT_EDGE_COLOR, player_color, resource_color};
use crate::render::{OutputFormat, RenderConfig};
use crate::state::State;
use crate::types::{PlayerId, Resource, TileId};

pub(crate) const PADDING: u32 = 24;
pub(crate) const TITLE_LINE_HEIGHT: u32 = 22;
const LEGEND_WIDTH: u32 = 220;
const LEGEND_ROW_HEIGHT: i32 = 24;
const LEGEND_SWATCH: i32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct TileShape {
    pub id: TileId,
    pub resource: Resource,
    pub number: Option<u8>,
    pub center: Point,
    pub highlighted: bool,
}

impl TileShape {
    pub(crate) fn collect(board: &Board, centers: &TileCenters, highlighted: &[TileId]) -> Vec<Self> {
        board
            .tiles()
            .iter()
            .filter_map(|tile| {
                let center = centers.get(tile.id)?;
                Some(TileShape {
                    id: tile.id,
                    resource: tile.resource,
                    number: tile.number,
                    center,
                    highlighted: highlighted.contains(&tile.id),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
}

/// Everything the overview image shows, laid out in pixels.
#[derive(Debug, Clone)]
pub struct BoardScene {
    pub tiles: Vec<TileShape>,
    pub markers: Vec<Marker>,
    pub title: Vec<String>,
    pub legend: Vec<LegendEntry>,
    hex_radius: f64,
    canvas: Canvas,
    size: (u32, u32),
}

impl BoardScene {
    pub fn build(board: &Board, state: Option<&State>, config: &RenderConfig) -> Result<Self, VizError> {
        config.validate()?;
        let radius = config.hex_radius;
        let centers = TileCenters::for_board(board, radius);
        let markers = match state {
            Some(state) => settlement_markers(board, state, &centers, radius, config)?,
            None => Vec::new(),
        };
        let tiles = TileShape::collect(board, &centers, &[]);

        let title = title_lines(&config.title, state);
        let title_height = TITLE_LINE_HEIGHT * title.len() as u32;

        let canvas = fit_tiles(&tiles, &markers, radius, config.pixels_per_unit, title_height)?;
        let (width, height) = canvas.extent();
        let size = (
            width + 2 * PADDING + LEGEND_WIDTH,
            height + 2 * PADDING + title_height,
        );

        Ok(Self {
            tiles,
            markers,
            title,
            legend: legend_entries(state),
            hex_radius: radius,
            canvas,
            size,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), VizError> {
        root.fill(&WHITE)?;
        draw_title(root, &self.title, self.size.0 - LEGEND_WIDTH)?;
        for tile in &self.tiles {
            draw_tile(root, &self.canvas, tile, self.hex_radius)?;
        }
        for marker in &self.markers {
            draw_marker(root, &self.canvas, marker, self.hex_radius * 0.15)?;
        }
        self.draw_legend(root)
    }

    fn draw_legend<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), VizError> {
        let left = (self.size.0 - LEGEND_WIDTH + PADDING / 2) as i32;
        let top = (PADDING + TITLE_LINE_HEIGHT * self.title.len() as u32) as i32;
        let label_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));

        for (row, entry) in self.legend.iter().enumerate() {
            let y = top + row as i32 * LEGEND_ROW_HEIGHT;
            let swatch = [(left, y - LEGEND_SWATCH / 2), (left + LEGEND_SWATCH, y + LEGEND_SWATCH / 2)];
            root.draw(&Rectangle::new(swatch, ShapeStyle::from(&entry.color).filled()))?;
            root.draw(&Rectangle::new(swatch, ShapeStyle::from(&BLACK).stroke_width(1)))?;
            root.draw(&Text::new(
                entry.label.clone(),
                (left + LEGEND_SWATCH + 8, y),
                label_style.clone(),
            ))?;
        }
        Ok(())
    }
}

pub fn render_board(
    board: &Board,
    state: Option<&State>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> Result<(), VizError> {
    let path = path.as_ref();
    let scene = BoardScene::build(board, state, config)?;
    let (width, height) = scene.size();
    info!(
        path = %path.display(),
        width,
        height,
        settlements = scene.markers.len(),
        "rendering board"
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

fn title_lines(title: &str, state: Option<&State>) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if let Some(state) = state {
        let players = state
            .houses
            .iter()
            .map(|(player, vertices)| {
                format!("{}: Vertices [{}]", player.label(), vertices.iter().join(", "))
            })
            .join("  |  ");
        if !players.is_empty() {
            lines.push(players);
        }
    }
    lines
}

fn legend_entries(state: Option<&State>) -> Vec<LegendEntry> {
    let resources = Resource::ALL.iter().map(|resource| LegendEntry {
        label: format!("{}: {resource}", resource.abbreviation()),
        color: resource_color(*resource),
    });
    let players = state
        .into_iter()
        .flat_map(|state| state.players())
        .map(|player: PlayerId| LegendEntry {
            label: player.label(),
            color: player_color(player),
        });
    resources.chain(players).collect()
}

/// Canvas covering every hexagon outline and marker, placed below the title.
pub(crate) fn fit_tiles(
    tiles: &[TileShape],
    markers: &[Marker],
    hex_radius: f64,
    pixels_per_unit: f64,
    title_height: u32,
) -> Result<Canvas, VizError> {
    let points = tiles
        .iter()
        .flat_map(|tile| hexagon_corners(tile.center, hex_radius))
        .chain(markers.iter().map(|marker| marker.position));
    let area = bounds(points)
        .ok_or(VizError::EmptyScene("board has no tiles with a center"))?
        .expand(hex_radius * 0.5);
    Ok(Canvas::new(
        area,
        pixels_per_unit,
        (PADDING as i32, (PADDING + title_height) as i32),
    ))
}

pub(crate) fn draw_title<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    lines: &[String],
    width: u32,
) -> Result<(), VizError> {
    for (i, line) in lines.iter().enumerate() {
        let (size, style) = if i == 0 {
            (18, FontStyle::Bold)
        } else {
            (12, FontStyle::Normal)
        };
        let font = ("sans-serif", size)
            .into_font()
            .style(style)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        let y = (PADDING / 2 + TITLE_LINE_HEIGHT * i as u32) as i32;
        root.draw(&Text::new(line.clone(), ((width / 2) as i32, y), font))?;
    }
    Ok(())
}

pub(crate) fn draw_tile<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    tile: &TileShape,
    hex_radius: f64,
) -> Result<(), VizError> {
    let corners: Vec<(i32, i32)> = hexagon_corners(tile.center, hex_radius)
        .into_iter()
        .map(|corner| canvas.to_pixel(corner))
        .collect();
    let (fill, edge, edge_width) = if tile.highlighted {
        (HIGHLIGHT_COLOR, HIGHLIGHT_EDGE_COLOR, 3)
    } else {
        (resource_color(tile.resource), BLACK, 2)
    };
    root.draw(&Polygon::new(corners.clone(), ShapeStyle::from(&fill.mix(0.9)).filled()))?;
    let mut outline = corners;
    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }
    root.draw(&PathElement::new(outline, ShapeStyle::from(&edge).stroke_width(edge_width)))?;

    let label_color = match tile.resource {
        Resource::Desert => BLACK,
        _ => WHITE,
    };
    let label = Point::new(tile.center.x, tile.center.y - hex_radius * 0.4);
    root.draw(&Text::new(
        tile.resource.abbreviation().to_string(),
        canvas.to_pixel(label),
        centered_text(15, FontStyle::Bold, &label_color),
    ))?;

    if let Some(number) = tile.number {
        let token = canvas.to_pixel(Point::new(tile.center.x, tile.center.y + hex_radius * 0.4));
        let token_radius = canvas.length(hex_radius * 0.25);
        root.draw(&Circle::new(token, token_radius, ShapeStyle::from(&WHITE).filled()))?;
        root.draw(&Circle::new(token, token_radius, ShapeStyle::from(&BLACK).stroke_width(1)))?;
        root.draw(&Text::new(
            number.to_string(),
            token,
            centered_text(13, FontStyle::Bold, &BLACK),
        ))?;
    }
    Ok(())
}

pub(crate) fn draw_marker<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    marker: &Marker,
    radius: f64,
) -> Result<(), VizError> {
    let center = canvas.to_pixel(marker.position);
    let size = canvas.length(radius);
    root.draw(&Circle::new(
        center,
        size,
        ShapeStyle::from(&player_color(marker.player)).filled(),
    ))?;
    root.draw(&Circle::new(center, size, ShapeStyle::from(&BLACK).stroke_width(2)))?;
    root.draw(&Text::new(
        marker.player.to_string(),
        center,
        centered_text(12, FontStyle::Bold, &WHITE),
    ))?;
    Ok(())
}

pub(crate) fn centered_text(size: i32, style: FontStyle, color: &RGBColor) -> TextStyle<'static> {
    ("sans-serif", size)
        .into_font()
        .style(style)
        .color(color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

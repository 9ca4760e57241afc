//! Image output for boards and settlement placements.
//!
//! Layout is computed into plain scene values first (`BoardScene`,
//! `DetailedScene`), then drawn with plotters onto a bitmap or SVG backend
//! picked from the output file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::VizError;

mod board;
mod canvas;
mod detailed;
mod markers;
mod palette;

pub use board::{BoardScene, LegendEntry, TileShape, render_board};
pub use canvas::Canvas;
pub use detailed::{DetailedScene, PlayerPanel, render_settlements_detailed};
pub use markers::{Marker, VertexRow, settlement_markers, vertex_table};
pub use palette::{player_color, resource_color};

pub const DEFAULT_TITLE: &str = "Catan Board - Settlement Placement";

/// Where settlement markers are drawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Placement {
    /// Inferred from the touching tiles by the vertex resolver.
    #[default]
    Resolved,
    /// On the corner of the drawn hexagon.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Circumradius of the drawn hexagons, in board units. Tile centers are
    /// spaced to match.
    pub hex_radius: f64,
    pub pixels_per_unit: f64,
    /// Hexagon size used by the per-player detailed view.
    pub detailed_hex_size: f64,
    pub placement: Placement,
    /// Fail instead of drawing a settlement whose position is only a guess.
    pub strict: bool,
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hex_radius: 0.8,
            pixels_per_unit: 120.0,
            detailed_hex_size: 1.2,
            placement: Placement::Resolved,
            strict: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), VizError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.hex_radius) {
            return Err(VizError::Config(format!(
                "hex radius must be positive, got {}",
                self.hex_radius
            )));
        }
        if !positive(self.pixels_per_unit) {
            return Err(VizError::Config(format!(
                "pixels per unit must be positive, got {}",
                self.pixels_per_unit
            )));
        }
        if !positive(self.detailed_hex_size) {
            return Err(VizError::Config(format!(
                "detailed hex size must be positive, got {}",
                self.detailed_hex_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bitmap,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Bitmap,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn output_format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("board.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("board.SVG")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("board.png")), OutputFormat::Bitmap);
        assert_eq!(OutputFormat::from_path(Path::new("board")), OutputFormat::Bitmap);
    }

    #[test]
    fn config_rejects_non_positive_sizes() {
        assert!(RenderConfig::default().validate().is_ok());

        let config = RenderConfig {
            hex_radius: 0.0,
            ..RenderConfig::default()
        };
        assert!(matches!(config.validate(), Err(VizError::Config(_))));

        let config = RenderConfig {
            pixels_per_unit: f64::NAN,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"placement": "exact", "strict": true}"#).unwrap();
        assert_eq!(config.placement, Placement::Exact);
        assert!(config.strict);
        assert_eq!(config.hex_radius, 0.8);
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(Placement::from_str("resolved").unwrap(), Placement::Resolved);
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::geometry::Point;

/// Tiles per row of the reference board.
pub const ROW_LENGTHS: [u8; 5] = [3, 4, 5, 4, 3];

// Horizontal row shift in half tile spacings, so the 3-4-5-4-3 rows interlock.
const ROW_HALF_OFFSETS: [i32; 5] = [2, 1, 0, 1, 2];

fn row_half_offset(row: u8) -> i32 {
    ROW_HALF_OFFSETS
        .get(usize::from(row))
        .copied()
        .unwrap_or(0)
}

/// Corners of a pointy-top hexagon, in screen orientation (y grows downward).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Corner {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Corner {
    /// Order in which a tile hands out fresh vertex ids.
    pub const NUMBERING_ORDER: [Corner; 6] = [
        Corner::NorthEast,
        Corner::SouthEast,
        Corner::South,
        Corner::SouthWest,
        Corner::North,
        Corner::NorthWest,
    ];

    /// Clockwise ring; consecutive corners share a board edge.
    pub const RING: [Corner; 6] = [
        Corner::North,
        Corner::NorthEast,
        Corner::SouthEast,
        Corner::South,
        Corner::SouthWest,
        Corner::NorthWest,
    ];

    pub fn angle(self) -> f64 {
        match self {
            Corner::North => -std::f64::consts::FRAC_PI_2,
            Corner::NorthEast => -std::f64::consts::FRAC_PI_6,
            Corner::SouthEast => std::f64::consts::FRAC_PI_6,
            Corner::South => std::f64::consts::FRAC_PI_2,
            Corner::SouthWest => 5.0 * std::f64::consts::FRAC_PI_6,
            Corner::NorthWest => -5.0 * std::f64::consts::FRAC_PI_6,
        }
    }

    /// Corner position of a hexagon of circumradius `size` centred on `center`.
    pub fn position(self, center: Point, size: f64) -> Point {
        let angle = self.angle();
        Point::new(center.x + size * angle.cos(), center.y + size * angle.sin())
    }

    fn lattice_offset(self) -> (i32, i32) {
        match self {
            Corner::North => (0, -2),
            Corner::NorthEast => (1, -1),
            Corner::SouthEast => (1, 1),
            Corner::South => (0, 2),
            Corner::SouthWest => (-1, 1),
            Corner::NorthWest => (-1, -1),
        }
    }
}

/// Exact grid position on a lattice of `√3/2 · size` horizontal and `size / 2`
/// vertical steps. Every tile center and hexagon corner lands on it, so shared
/// corners compare equal without float tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatticeCoord {
    pub x: i32,
    pub y: i32,
}

impl LatticeCoord {
    pub fn tile_center(row: u8, col: u8) -> Self {
        Self {
            x: 2 * i32::from(col) + row_half_offset(row),
            y: 3 * i32::from(row),
        }
    }

    pub fn corner(self, corner: Corner) -> Self {
        let (dx, dy) = corner.lattice_offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn to_point(self, size: f64) -> Point {
        let half_width = size * 3.0_f64.sqrt() / 2.0;
        Point::new(f64::from(self.x) * half_width, f64::from(self.y) * size / 2.0)
    }
}

/// Tile center for a board `row` and `col`, with rows shifted so they interlock.
pub fn hex_to_pixel(row: u8, col: u8, size: f64) -> Point {
    LatticeCoord::tile_center(row, col).to_point(size)
}

pub fn hexagon_corners(center: Point, size: f64) -> Vec<Point> {
    Corner::RING
        .iter()
        .map(|corner| corner.position(center, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn hex_to_pixel_matches_row_offsets() {
        let first = hex_to_pixel(0, 0, 0.8);
        assert!((first.x - 1.385641).abs() < EPS);
        assert!(first.y.abs() < EPS);

        let middle_row = hex_to_pixel(2, 0, 0.8);
        assert!(middle_row.x.abs() < EPS);
        assert!((middle_row.y - 2.4).abs() < EPS);

        let last = hex_to_pixel(4, 2, 0.8);
        assert!((last.x - 4.156922).abs() < EPS);
        assert!((last.y - 4.8).abs() < EPS);
    }

    #[test]
    fn rows_outside_reference_have_no_offset() {
        assert_eq!(row_half_offset(7), 0);
        assert_eq!(row_half_offset(1), 1);
        assert_eq!(LatticeCoord::tile_center(7, 1), LatticeCoord { x: 2, y: 21 });
    }

    #[test]
    fn lattice_corners_agree_with_angles() {
        let center = LatticeCoord::tile_center(1, 2);
        for corner in Corner::RING {
            let exact = center.corner(corner).to_point(0.8);
            let angled = corner.position(center.to_point(0.8), 0.8);
            assert!(exact.distance(angled) < 1e-9, "{corner} differs");
        }
    }

    #[test]
    fn neighbouring_tiles_share_two_corners() {
        let left = LatticeCoord::tile_center(2, 0);
        let right = LatticeCoord::tile_center(2, 1);
        assert_eq!(left.corner(Corner::NorthEast), right.corner(Corner::NorthWest));
        assert_eq!(left.corner(Corner::SouthEast), right.corner(Corner::SouthWest));

        let below = LatticeCoord::tile_center(3, 0);
        assert_eq!(left.corner(Corner::South), below.corner(Corner::NorthWest));
    }

    #[test]
    fn ring_order_matches_enum_order() {
        for (i, corner) in Corner::RING.iter().enumerate() {
            assert_eq!(*corner as usize, i);
        }
    }
}

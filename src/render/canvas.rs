use crate::geometry::{Bounds, Point};

/// Maps board coordinates onto pixels: `scale` pixels per board unit, with the
/// top-left of `bounds` landing on `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    bounds: Bounds,
    scale: f64,
    origin: (i32, i32),
}

impl Canvas {
    pub fn new(bounds: Bounds, scale: f64, origin: (i32, i32)) -> Self {
        Self {
            bounds,
            scale,
            origin,
        }
    }

    /// Largest scale that fits `bounds` into `size` pixels, centred.
    pub fn fit(bounds: Bounds, size: (u32, u32)) -> Self {
        let (width, height) = (f64::from(size.0), f64::from(size.1));
        let scale_x = width / bounds.width().max(f64::EPSILON);
        let scale_y = height / bounds.height().max(f64::EPSILON);
        let scale = scale_x.min(scale_y);
        let origin = (
            ((width - bounds.width() * scale) / 2.0).round() as i32,
            ((height - bounds.height() * scale) / 2.0).round() as i32,
        );
        Self::new(bounds, scale, origin)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel extent of the mapped bounds.
    pub fn extent(&self) -> (u32, u32) {
        (
            (self.bounds.width() * self.scale).ceil() as u32,
            (self.bounds.height() * self.scale).ceil() as u32,
        )
    }

    pub fn to_pixel(&self, point: Point) -> (i32, i32) {
        let x = f64::from(self.origin.0) + (point.x - self.bounds.min_x) * self.scale;
        let y = f64::from(self.origin.1) + (point.y - self.bounds.min_y) * self.scale;
        (x.round() as i32, y.round() as i32)
    }

    /// A board-unit length in pixels, never below one.
    pub fn length(&self, units: f64) -> i32 {
        ((units * self.scale).round() as i32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Bounds {
        Bounds {
            min_x: -1.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 2.0,
        }
    }

    #[test]
    fn maps_corners_with_origin() {
        let canvas = Canvas::new(unit_square(), 50.0, (10, 20));
        assert_eq!(canvas.to_pixel(Point::new(-1.0, 0.0)), (10, 20));
        assert_eq!(canvas.to_pixel(Point::new(1.0, 2.0)), (110, 120));
        assert_eq!(canvas.extent(), (100, 100));
        assert_eq!(canvas.length(0.001), 1);
    }

    #[test]
    fn fit_centres_the_short_side() {
        let canvas = Canvas::fit(unit_square(), (400, 200));
        assert_eq!(canvas.scale(), 100.0);
        assert_eq!(canvas.to_pixel(Point::new(-1.0, 0.0)), (100, 0));
        assert_eq!(canvas.to_pixel(Point::new(1.0, 2.0)), (300, 200));
    }
}

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn expand(self, margin: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }
}

pub fn bounds<I>(points: I) -> Option<Bounds>
where
    I: IntoIterator<Item = Point>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let init = Bounds {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    Some(iter.fold(init, |acc, p| Bounds {
        min_x: acc.min_x.min(p.x),
        max_x: acc.max_x.max(p.x),
        min_y: acc.min_y.min(p.y),
        max_y: acc.max_y.max(p.y),
    }))
}

/// Arithmetic mean, `None` for an empty slice.
pub fn average(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
    let n = points.len() as f64;
    Some(Point::new(sum.x / n, sum.y / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_triangle() {
        let centroid = average(&[
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 2.0),
        ])
        .unwrap();
        assert!((centroid.x - 1.0).abs() < 1e-12);
        assert!((centroid.y - 2.0 / 3.0).abs() < 1e-12);
        assert!(average(&[]).is_none());
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = bounds([Point::new(1.0, -2.0), Point::new(-3.0, 4.0), Point::new(0.5, 0.5)]).unwrap();
        assert_eq!(b.min_x, -3.0);
        assert_eq!(b.max_x, 1.0);
        assert_eq!(b.min_y, -2.0);
        assert_eq!(b.max_y, 4.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.expand(1.0).height(), 8.0);
        assert!(bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
        assert_eq!(a.distance(b), 5.0);
    }
}

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point.
///
/// The frame is contextual: canvas pixels, page coordinates or normalized
/// image coordinates. Conversions between frames always go through an
/// explicit transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    pub fn to_pair(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
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

impl From<[f64; 2]> for Point {
    fn from(pair: [f64; 2]) -> Self {
        Self::from_pair(pair)
    }
}

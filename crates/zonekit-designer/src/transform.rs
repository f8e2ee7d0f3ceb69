//! 2D affine transforms in homogeneous coordinates.

use nalgebra::{Matrix3, Point2, Vector2};
use zonekit_core::Point;

/// A 2D affine transform backed by a homogeneous 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(Matrix3<f64>);

impl AffineTransform {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self(Matrix3::new_translation(&Vector2::new(dx, dy)))
    }

    /// Rotation around the origin, clockwise on screen (Y points down).
    pub fn rotation_degrees(degrees: f64) -> Self {
        Self(Matrix3::new_rotation(degrees.to_radians()))
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self(Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)))
    }

    /// `self · other`: `other` is applied first.
    pub fn multiply(&self, other: &AffineTransform) -> Self {
        Self(self.0 * other.0)
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let q = self.0.transform_point(&Point2::new(p.x, p.y));
        Point::new(q.x, q.y)
    }

    /// Applies the linear part only (no translation).
    pub fn transform_vector(&self, v: Point) -> Point {
        let q = self.0.transform_vector(&Vector2::new(v.x, v.y));
        Point::new(q.x, q.y)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotates `p` around `origin` by `degrees`.
pub fn rotate_point(p: Point, origin: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return p;
    }
    let v = AffineTransform::rotation_degrees(degrees).transform_vector(p - origin);
    origin + v
}

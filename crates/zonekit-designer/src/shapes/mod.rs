//! Canvas shapes: finalized zone outlines and provisional guide segments.

mod guide;
mod polygon;

pub use guide::{GuideId, GuideLine};
pub use polygon::{CornerStyle, EditAffordance, PolygonShape};

use zonekit_core::{GeometryError, Point};

use crate::transform::AffineTransform;

/// Geometry a shape exposes to the vertex editing protocol.
///
/// Vertices live in the shape's own vertex space; `calc_transform` maps
/// `vertex - path_offset` to canvas (scene) space.
pub trait EditableShape {
    fn vertices(&self) -> &[Point];

    /// Replaces one vertex.
    ///
    /// # Errors
    /// `GeometryError::VertexOutOfRange` when `index` is not a vertex.
    fn set_vertex(&mut self, index: usize, point: Point) -> Result<(), GeometryError>;

    /// Center of the vertex bounding box, in vertex space.
    fn path_offset(&self) -> Point;

    /// Object transform: translate(center) · rotate(angle) · scale.
    fn calc_transform(&self) -> AffineTransform;

    /// Untransformed size including the stroke.
    fn size_with_stroke(&self) -> Point;

    /// On-canvas size including the stroke, after scaling.
    fn transformed_dimensions(&self) -> Point;

    /// Re-derives the bounding box and `path_offset` from the vertex list.
    /// The object position is left untouched.
    fn recompute_dimensions(&mut self);

    /// Moves the object so that its fractional origin `(origin_x, origin_y)`
    /// (0 = left/top, 1 = right/bottom) lands on `point`.
    fn set_position_by_origin(&mut self, point: Point, origin_x: f64, origin_y: f64);

    /// Converts a canvas point into the object's centered, unrotated frame.
    fn to_local_point(&self, point: Point) -> Point;

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Canvas position of a vertex.
    fn absolute_vertex(&self, index: usize) -> Result<Point, GeometryError> {
        let vertex = self
            .vertices()
            .get(index)
            .copied()
            .ok_or(GeometryError::VertexOutOfRange {
                index,
                len: self.vertex_count(),
            })?;
        Ok(self
            .calc_transform()
            .transform_point(vertex - self.path_offset()))
    }

    /// Canvas positions of all vertices, in order.
    fn absolute_vertices(&self) -> Vec<Point> {
        let transform = self.calc_transform();
        let offset = self.path_offset();
        self.vertices()
            .iter()
            .map(|v| transform.transform_point(*v - offset))
            .collect()
    }
}

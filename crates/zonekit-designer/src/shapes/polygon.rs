use zonekit_core::constants::{DEFAULT_STROKE_WIDTH, MIN_POLYGON_VERTICES, SHAPE_FILL_COLOR};
use zonekit_core::{GeometryError, Point, PolygonId};

use super::EditableShape;
use crate::controls::VertexControl;
use crate::transform::{rotate_point, AffineTransform};
use crate::viewport::{min_x, min_y};

/// Drawing style of the selection corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerStyle {
    Rect,
    Circle,
}

/// Selection decoration of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct EditAffordance {
    pub corner_style: CornerStyle,
    pub corner_size: f64,
    pub corner_color: String,
    pub has_borders: bool,
}

impl EditAffordance {
    /// One round handle per vertex, no bounding box.
    pub fn editing() -> Self {
        Self {
            corner_style: CornerStyle::Circle,
            corner_size: 15.0,
            corner_color: "rgba(0, 0, 255, 1.0)".to_string(),
            has_borders: false,
        }
    }

    /// The regular move/scale/rotate box.
    pub fn idle() -> Self {
        Self {
            corner_style: CornerStyle::Rect,
            corner_size: 13.0,
            corner_color: "rgb(178, 204, 255)".to_string(),
            has_borders: true,
        }
    }
}

impl Default for EditAffordance {
    fn default() -> Self {
        Self::idle()
    }
}

/// A finalized zone outline on the canvas.
///
/// The vertex list is kept in vertex space. The object is positioned by its
/// center; `path_offset` is the center of the vertex bounding box, so a shape
/// that was never moved, scaled or rotated has vertex space equal to canvas
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    id: PolygonId,
    points: Vec<Point>,
    stroke: String,
    fill: String,
    stroke_width: f64,
    stroke_uniform: bool,
    width: f64,
    height: f64,
    path_offset: Point,
    center: Point,
    scale_x: f64,
    scale_y: f64,
    angle: f64,
    pub(crate) editing: bool,
    pub(crate) controls: Option<Vec<VertexControl>>,
    pub(crate) affordance: EditAffordance,
}

impl PolygonShape {
    /// Builds a shape from canvas points, with its bounding box placed at the
    /// points' minimum corner.
    ///
    /// # Errors
    /// `GeometryError::TooFewVertices` for fewer than three points.
    pub fn new(
        id: PolygonId,
        points: Vec<Point>,
        stroke: impl Into<String>,
        stroke_width: f64,
    ) -> Result<Self, GeometryError> {
        if points.len() < MIN_POLYGON_VERTICES {
            return Err(GeometryError::TooFewVertices {
                min: MIN_POLYGON_VERTICES,
                actual: points.len(),
            });
        }
        let left = min_x(&points)? - stroke_width / 2.0;
        let top = min_y(&points)? - stroke_width / 2.0;

        let mut shape = Self {
            id,
            points,
            stroke: stroke.into(),
            fill: SHAPE_FILL_COLOR.to_string(),
            stroke_width,
            stroke_uniform: false,
            width: 0.0,
            height: 0.0,
            path_offset: Point::default(),
            center: Point::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            editing: false,
            controls: None,
            affordance: EditAffordance::idle(),
        };
        shape.recompute_dimensions();
        shape.set_position_by_origin(Point::new(left, top), 0.0, 0.0);
        Ok(shape)
    }

    /// Same as [`PolygonShape::new`] with the default stroke width.
    pub fn with_default_stroke(
        id: PolygonId,
        points: Vec<Point>,
        stroke: impl Into<String>,
    ) -> Result<Self, GeometryError> {
        Self::new(id, points, stroke, DEFAULT_STROKE_WIDTH)
    }

    pub fn id(&self) -> &PolygonId {
        &self.id
    }

    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn stroke_uniform(&self) -> bool {
        self.stroke_uniform
    }

    /// Keeps the on-screen stroke width constant under scaling.
    pub fn set_stroke_uniform(&mut self, uniform: bool) {
        self.stroke_uniform = uniform;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Object center in canvas space.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Left edge of the (unrotated) stroke-inclusive bounding box.
    pub fn left(&self) -> f64 {
        self.center.x - self.transformed_dimensions().x / 2.0
    }

    /// Top edge of the (unrotated) stroke-inclusive bounding box.
    pub fn top(&self) -> f64 {
        self.center.y - self.transformed_dimensions().y / 2.0
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Scales around the object center.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }

    /// Rotation in degrees, around the object center.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
    }

    /// Moves the object by a canvas delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center + Point::new(dx, dy);
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Per-vertex controls, present only while editing.
    pub fn vertex_controls(&self) -> Option<&[VertexControl]> {
        self.controls.as_deref()
    }

    pub fn affordance(&self) -> &EditAffordance {
        &self.affordance
    }

    /// True when vertex space coincides with canvas space (never moved,
    /// scaled or rotated), within `tolerance` on the position.
    pub fn is_canvas_aligned(&self, tolerance: f64) -> bool {
        self.angle == 0.0
            && self.scale_x == 1.0
            && self.scale_y == 1.0
            && (self.center.x - self.path_offset.x).abs() <= tolerance
            && (self.center.y - self.path_offset.y).abs() <= tolerance
    }

    /// Even-odd point-in-polygon test against the on-canvas outline.
    pub fn contains_point(&self, point: Point) -> bool {
        let outline = self.absolute_vertices();
        let mut inside = false;
        let mut j = outline.len() - 1;
        for i in 0..outline.len() {
            let (a, b) = (outline[i], outline[j]);
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn stroke_extent(&self) -> Point {
        if self.stroke_uniform {
            Point::new(
                self.stroke_width / self.scale_x,
                self.stroke_width / self.scale_y,
            )
        } else {
            Point::new(self.stroke_width, self.stroke_width)
        }
    }
}

impl EditableShape for PolygonShape {
    fn vertices(&self) -> &[Point] {
        &self.points
    }

    fn set_vertex(&mut self, index: usize, point: Point) -> Result<(), GeometryError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::VertexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    fn path_offset(&self) -> Point {
        self.path_offset
    }

    fn calc_transform(&self) -> AffineTransform {
        AffineTransform::translation(self.center.x, self.center.y)
            .multiply(&AffineTransform::rotation_degrees(self.angle))
            .multiply(&AffineTransform::scaling(self.scale_x, self.scale_y))
    }

    fn size_with_stroke(&self) -> Point {
        let stroke = self.stroke_extent();
        Point::new(self.width + stroke.x, self.height + stroke.y)
    }

    fn transformed_dimensions(&self) -> Point {
        if self.stroke_uniform {
            Point::new(
                (self.width * self.scale_x).abs() + self.stroke_width,
                (self.height * self.scale_y).abs() + self.stroke_width,
            )
        } else {
            Point::new(
                ((self.width + self.stroke_width) * self.scale_x).abs(),
                ((self.height + self.stroke_width) * self.scale_y).abs(),
            )
        }
    }

    fn recompute_dimensions(&mut self) {
        let (mut lo, mut hi) = (self.points[0], self.points[0]);
        for p in &self.points[1..] {
            lo = Point::new(lo.x.min(p.x), lo.y.min(p.y));
            hi = Point::new(hi.x.max(p.x), hi.y.max(p.y));
        }
        self.width = hi.x - lo.x;
        self.height = hi.y - lo.y;
        self.path_offset = Point::new(lo.x + self.width / 2.0, lo.y + self.height / 2.0);
    }

    fn set_position_by_origin(&mut self, point: Point, origin_x: f64, origin_y: f64) {
        let dims = self.transformed_dimensions();
        let unrotated = Point::new(
            point.x - (origin_x - 0.5) * dims.x,
            point.y - (origin_y - 0.5) * dims.y,
        );
        self.center = rotate_point(unrotated, point, self.angle);
    }

    fn to_local_point(&self, point: Point) -> Point {
        rotate_point(point - self.center, Point::default(), -self.angle)
    }
}

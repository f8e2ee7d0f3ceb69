//! Viewport and coordinate transformation.
//!
//! Three frames are involved when an operator works on a zone:
//!
//! - **page**: pointer coordinates as delivered by the host window,
//! - **canvas**: pixels of the displayed (client-sized) image, relative to the
//!   canvas element's top-left corner,
//! - **normalized**: pixels of the natural-size image, the frame in which
//!   zone outlines are stored.
//!
//! Page and canvas differ by the canvas offset; canvas and normalized differ
//! by the image scale. The [`Viewport`] adds canvas zoom and pan on top of the
//! canvas frame ("screen" vs "scene").

use std::fmt;

use zonekit_core::{GeometryError, Point};

use crate::transform::AffineTransform;

/// Ratio between the displayed image size and its natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageScale {
    scale_width: f64,
    scale_height: f64,
}

impl ImageScale {
    /// Creates a scale from explicit ratios.
    ///
    /// # Errors
    /// Returns `GeometryError::InvalidScale` when a ratio is zero, negative or
    /// not finite.
    pub fn new(scale_width: f64, scale_height: f64) -> Result<Self, GeometryError> {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        if !valid(scale_width) || !valid(scale_height) {
            return Err(GeometryError::InvalidScale {
                scale_width,
                scale_height,
            });
        }
        Ok(Self {
            scale_width,
            scale_height,
        })
    }

    /// `client / natural` on both axes.
    pub fn from_dimensions(
        client_width: f64,
        client_height: f64,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<Self, GeometryError> {
        Self::new(client_width / natural_width, client_height / natural_height)
    }

    /// The image is displayed at its natural size.
    pub fn identity() -> Self {
        Self {
            scale_width: 1.0,
            scale_height: 1.0,
        }
    }

    pub fn scale_width(&self) -> f64 {
        self.scale_width
    }

    pub fn scale_height(&self) -> f64 {
        self.scale_height
    }
}

impl Default for ImageScale {
    fn default() -> Self {
        Self::identity()
    }
}

/// Converts a page point to canvas-local pixels.
pub fn to_canvas_local(page_point: Point, canvas_origin: Point) -> Point {
    page_point - canvas_origin
}

/// Converts canvas pixels to normalized image coordinates.
///
/// Both axes are floored, so sub-pixel precision is lost: stored outlines are
/// always integral.
pub fn to_normalized(point: Point, scale: &ImageScale) -> Point {
    Point::new(
        (point.x / scale.scale_width).floor(),
        (point.y / scale.scale_height).floor(),
    )
}

/// Converts normalized image coordinates to canvas pixels.
///
/// Not an exact inverse of [`to_normalized`]: a pixel round trip may be off by
/// one normalized unit per axis because of the floor.
pub fn to_pixel(point: Point, scale: &ImageScale) -> Point {
    Point::new(point.x * scale.scale_width, point.y * scale.scale_height)
}

/// Absolute value of the smallest x of `points`.
pub fn min_x(points: &[Point]) -> Result<f64, GeometryError> {
    points
        .iter()
        .map(|p| p.x)
        .reduce(f64::min)
        .map(f64::abs)
        .ok_or(GeometryError::EmptyVertexList)
}

/// Absolute value of the smallest y of `points`.
pub fn min_y(points: &[Point]) -> Result<f64, GeometryError> {
    points
        .iter()
        .map(|p| p.y)
        .reduce(f64::min)
        .map(f64::abs)
        .ok_or(GeometryError::EmptyVertexList)
}

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;

/// Canvas zoom and pan.
///
/// `screen = scene * zoom + pan`. Y points down in both frames.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates an untransformed viewport for a canvas of the given size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, ignored outside the (0.1, 50.0) range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// The scene-to-screen transform.
    pub fn transform(&self) -> AffineTransform {
        AffineTransform::translation(self.pan_x, self.pan_y)
            .multiply(&AffineTransform::scaling(self.zoom, self.zoom))
    }

    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.zoom + self.pan_x,
            scene.y * self.zoom + self.pan_y,
        )
    }

    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_scale_from_dimensions() {
        let scale = ImageScale::from_dimensions(640.0, 360.0, 1280.0, 720.0).unwrap();
        assert_eq!(scale.scale_width(), 0.5);
        assert_eq!(scale.scale_height(), 0.5);
    }

    #[test]
    fn test_image_scale_rejects_degenerate_dimensions() {
        assert!(ImageScale::from_dimensions(640.0, 360.0, 0.0, 720.0).is_err());
        assert!(ImageScale::from_dimensions(0.0, 360.0, 1280.0, 720.0).is_err());
        assert!(ImageScale::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_to_normalized_floors() {
        let scale = ImageScale::new(0.5, 0.25).unwrap();
        assert_eq!(
            to_normalized(Point::new(10.0, 10.0), &scale),
            Point::new(20.0, 40.0)
        );
        let scale = ImageScale::new(3.0, 3.0).unwrap();
        assert_eq!(
            to_normalized(Point::new(10.0, -1.0), &scale),
            Point::new(3.0, -1.0)
        );
    }

    #[test]
    fn test_to_pixel() {
        let scale = ImageScale::new(0.5, 2.0).unwrap();
        assert_eq!(to_pixel(Point::new(20.0, 3.0), &scale), Point::new(10.0, 6.0));
    }

    #[test]
    fn test_to_canvas_local() {
        let p = to_canvas_local(Point::new(110.0, 60.0), Point::new(100.0, 50.0));
        assert_eq!(p, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_min_xy() {
        let pts = [Point::new(5.0, -7.0), Point::new(-3.0, 2.0), Point::new(9.0, 1.0)];
        assert_eq!(min_x(&pts).unwrap(), 3.0);
        assert_eq!(min_y(&pts).unwrap(), 7.0);
        assert_eq!(min_x(&[]), Err(GeometryError::EmptyVertexList));
        assert_eq!(min_y(&[]), Err(GeometryError::EmptyVertexList));
    }

    #[test]
    fn test_viewport_round_trip() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(2.0);
        vp.set_pan(15.0, -5.0);
        let scene = Point::new(12.5, 40.0);
        let screen = vp.scene_to_screen(scene);
        assert_eq!(screen, Point::new(40.0, 75.0));
        assert_eq!(vp.screen_to_scene(screen), scene);
        assert_eq!(vp.transform().transform_point(scene), screen);
        assert_eq!(format!("{}", vp), "Zoom: 2.00x | Pan: (15.0, -5.0)");
    }

    #[test]
    fn test_viewport_zoom_limits() {
        let mut vp = Viewport::default();
        vp.set_zoom(100.0);
        assert_eq!(vp.zoom(), 1.0);
        vp.set_zoom(0.05);
        assert_eq!(vp.zoom(), 1.0);
    }
}

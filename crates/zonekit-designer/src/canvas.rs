//! Rendering surface seam.
//!
//! The editor never draws; it keeps a [`RenderingSurface`] up to date and asks
//! it to re-render. [`InMemoryCanvas`] is the headless implementation.

use std::collections::BTreeMap;

use tracing::trace;
use zonekit_core::{Point, PolygonId};

use crate::shapes::{GuideId, GuideLine, PolygonShape};
use crate::viewport::Viewport;

/// Interactive drawing surface holding zone shapes and guide segments.
pub trait RenderingSurface {
    /// Adds a shape on top of the others.
    fn add_shape(&mut self, shape: PolygonShape);

    /// Removes a shape; `None` when it is not on the surface.
    fn remove_shape(&mut self, id: &PolygonId) -> Option<PolygonShape>;

    fn shape(&self, id: &PolygonId) -> Option<&PolygonShape>;

    fn shape_mut(&mut self, id: &PolygonId) -> Option<&mut PolygonShape>;

    /// Ids of all shapes, bottom to top.
    fn shape_ids(&self) -> Vec<PolygonId>;

    fn contains_shape(&self, id: &PolygonId) -> bool {
        self.shape(id).is_some()
    }

    /// Topmost shape whose outline contains a scene point.
    fn shape_at(&self, scene_point: Point) -> Option<PolygonId> {
        self.shape_ids()
            .into_iter()
            .rev()
            .find(|id| self.shape(id).is_some_and(|s| s.contains_point(scene_point)))
    }

    fn add_guide(&mut self, id: GuideId, guide: GuideLine);

    /// Moves the free end of a guide. Returns `false` for an unknown guide.
    fn move_guide_end(&mut self, id: GuideId, to: Point) -> bool;

    fn remove_guide(&mut self, id: GuideId) -> bool;

    /// Page position of the canvas' top-left corner.
    fn canvas_offset(&self) -> Point;

    fn viewport(&self) -> &Viewport;

    /// Makes a shape the active object, or clears the active object.
    fn set_active_shape(&mut self, id: Option<&PolygonId>);

    fn active_shape(&self) -> Option<&PolygonId>;

    /// Enables or disables rubber-band group selection.
    fn set_selection_enabled(&mut self, enabled: bool);

    fn request_render(&mut self);
}

/// Headless [`RenderingSurface`] that keeps everything in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCanvas {
    shapes: Vec<PolygonShape>,
    guides: BTreeMap<GuideId, GuideLine>,
    offset: Point,
    viewport: Viewport,
    active: Option<PolygonId>,
    selection_enabled: bool,
    render_requests: usize,
}

impl InMemoryCanvas {
    /// Creates an empty canvas of the given size at page offset (0, 0).
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            shapes: Vec::new(),
            guides: BTreeMap::new(),
            offset: Point::default(),
            viewport: Viewport::new(width, height),
            active: None,
            selection_enabled: true,
            render_requests: 0,
        }
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn shapes(&self) -> impl Iterator<Item = &PolygonShape> {
        self.shapes.iter()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn guide(&self, id: GuideId) -> Option<&GuideLine> {
        self.guides.get(&id)
    }

    pub fn guide_count(&self) -> usize {
        self.guides.len()
    }

    pub fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    pub fn render_requests(&self) -> usize {
        self.render_requests
    }
}

impl Default for InMemoryCanvas {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl RenderingSurface for InMemoryCanvas {
    fn shape_at(&self, scene_point: Point) -> Option<PolygonId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.contains_point(scene_point))
            .map(|shape| shape.id().clone())
    }

    fn add_shape(&mut self, shape: PolygonShape) {
        trace!(id = %shape.id(), "Shape added");
        self.shapes.push(shape);
    }

    fn remove_shape(&mut self, id: &PolygonId) -> Option<PolygonShape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        Some(self.shapes.remove(index))
    }

    fn shape(&self, id: &PolygonId) -> Option<&PolygonShape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    fn shape_mut(&mut self, id: &PolygonId) -> Option<&mut PolygonShape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    fn shape_ids(&self) -> Vec<PolygonId> {
        self.shapes.iter().map(|s| s.id().clone()).collect()
    }

    fn add_guide(&mut self, id: GuideId, guide: GuideLine) {
        self.guides.insert(id, guide);
    }

    fn move_guide_end(&mut self, id: GuideId, to: Point) -> bool {
        match self.guides.get_mut(&id) {
            Some(guide) => {
                guide.end = to;
                true
            }
            None => false,
        }
    }

    fn remove_guide(&mut self, id: GuideId) -> bool {
        self.guides.remove(&id).is_some()
    }

    fn canvas_offset(&self) -> Point {
        self.offset
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn set_active_shape(&mut self, id: Option<&PolygonId>) {
        self.active = id.filter(|id| self.shapes.iter().any(|s| s.id() == *id)).cloned();
    }

    fn active_shape(&self) -> Option<&PolygonId> {
        self.active.as_ref()
    }

    fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(id: &str, dx: f64) -> PolygonShape {
        PolygonShape::new(
            PolygonId::from(id),
            vec![
                Point::new(dx, 0.0),
                Point::new(dx + 50.0, 0.0),
                Point::new(dx + 50.0, 50.0),
                Point::new(dx, 50.0),
            ],
            "red",
            3.0,
        )
        .unwrap()
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let mut canvas = InMemoryCanvas::default();
        canvas.add_shape(shape("below", 0.0));
        canvas.add_shape(shape("above", 25.0));
        assert_eq!(
            canvas.shape_at(Point::new(40.0, 10.0)),
            Some(PolygonId::from("above"))
        );
        assert_eq!(
            canvas.shape_at(Point::new(10.0, 10.0)),
            Some(PolygonId::from("below"))
        );
        assert!(canvas.shape_at(Point::new(500.0, 10.0)).is_none());
    }

    #[test]
    fn test_remove_clears_active() {
        let mut canvas = InMemoryCanvas::default();
        let id = PolygonId::from("a");
        canvas.add_shape(shape("a", 0.0));
        canvas.set_active_shape(Some(&id));
        assert_eq!(canvas.active_shape(), Some(&id));
        assert!(canvas.remove_shape(&id).is_some());
        assert!(canvas.active_shape().is_none());
        assert!(canvas.remove_shape(&id).is_none());
    }

    #[test]
    fn test_unknown_shape_cannot_become_active() {
        let mut canvas = InMemoryCanvas::default();
        canvas.set_active_shape(Some(&PolygonId::from("ghost")));
        assert!(canvas.active_shape().is_none());
    }

    #[test]
    fn test_guides() {
        let mut canvas = InMemoryCanvas::default();
        canvas.add_guide(GuideId(1), GuideLine::at(Point::new(1.0, 1.0)));
        assert!(canvas.move_guide_end(GuideId(1), Point::new(4.0, 5.0)));
        assert!(!canvas.move_guide_end(GuideId(2), Point::new(4.0, 5.0)));
        assert_eq!(canvas.guide(GuideId(1)).unwrap().length(), 5.0);
        assert!(canvas.remove_guide(GuideId(1)));
        assert_eq!(canvas.guide_count(), 0);
    }
}

use tracing::debug;
use zonekit_core::{FeatureError, Point, PolygonId, Result};

use super::ZoneEditor;
use crate::canvas::RenderingSurface;
use crate::controls;
use crate::interaction::{transition, Command, InputEvent, Mode, MouseButton};
use crate::map_overlay::MapOverlay;
use crate::viewport::to_canvas_local;

impl<S: RenderingSurface, M: MapOverlay> ZoneEditor<S, M> {
    /// Runs one event through the state machine and executes its effects.
    pub(super) fn dispatch(&mut self, event: InputEvent) {
        let effects = transition(&mut self.state, event, &self.options.rules);
        self.apply(effects);
    }

    /// Page point to scene (unzoomed canvas) coordinates.
    fn page_to_scene(&self, page_point: Point) -> Point {
        let local = to_canvas_local(page_point, self.surface.canvas_offset());
        self.surface.viewport().screen_to_scene(local)
    }

    /// Toolbar "add": toggles drawing mode.
    pub fn command_add(&mut self) {
        self.dispatch(InputEvent::Command(Command::Add));
    }

    /// Toolbar "delete": toggles delete mode.
    pub fn command_delete(&mut self) {
        self.dispatch(InputEvent::Command(Command::Delete));
    }

    /// Pointer pressed on the canvas background.
    pub fn pointer_down(&mut self, page_point: Point) {
        let point = self.page_to_scene(page_point);
        self.dispatch(InputEvent::PointerDown { point });
    }

    pub fn pointer_move(&mut self, page_point: Point) {
        let point = self.page_to_scene(page_point);
        self.dispatch(InputEvent::PointerMove { point });
    }

    pub fn double_click(&mut self) {
        self.dispatch(InputEvent::DoubleClick);
    }

    /// Pointer pressed on a finalized shape. Unknown ids are ignored.
    pub fn shape_pointer_down(&mut self, id: &PolygonId, button: MouseButton) {
        if !self.surface.contains_shape(id) {
            debug!(%id, "Pointer down on unknown shape ignored");
            return;
        }
        self.dispatch(InputEvent::ShapePointerDown {
            id: id.clone(),
            button,
        });
    }

    /// A shape became the active selection. Unknown ids are ignored.
    pub fn selection_changed(&mut self, id: &PolygonId) {
        if !self.surface.contains_shape(id) {
            debug!(%id, "Selection of unknown shape ignored");
            return;
        }
        self.dispatch(InputEvent::SelectionChanged { id: id.clone() });
    }

    /// A full pointer press as the canvas reports it: routed to the shape
    /// under the pointer, or to the background.
    ///
    /// While drawing, shapes do not capture clicks. A primary press on a
    /// shape also makes it the active selection.
    pub fn click(&mut self, page_point: Point, button: MouseButton) {
        let scene = self.page_to_scene(page_point);
        let hit = match self.mode() {
            Mode::AddingPolygon => None,
            _ => self.surface.shape_at(scene),
        };
        let Some(id) = hit else {
            if self.mode() != Mode::AddingPolygon {
                self.surface.set_active_shape(None);
            }
            self.dispatch(InputEvent::PointerDown { point: scene });
            return;
        };

        self.shape_pointer_down(&id, button);
        if button == MouseButton::Primary && self.surface.active_shape() != Some(&id) {
            self.surface.set_active_shape(Some(&id));
            self.selection_changed(&id);
        }
    }

    /// Drags a vertex handle of a shape in edit mode to a canvas point
    /// (before zoom and pan are undone).
    ///
    /// Returns `false` when the shape is not in edit mode.
    ///
    /// # Errors
    /// `FeatureError::UnknownFeature` for an unknown shape,
    /// `GeometryError::VertexOutOfRange` for a bad index.
    pub fn drag_vertex(
        &mut self,
        id: &PolygonId,
        vertex_index: usize,
        screen_point: Point,
    ) -> Result<bool> {
        let target = self.surface.viewport().screen_to_scene(screen_point);
        let shape = self
            .surface
            .shape_mut(id)
            .ok_or_else(|| FeatureError::UnknownFeature { id: id.to_string() })?;
        if !shape.is_editing() {
            debug!(%id, "Vertex drag on a shape that is not being edited");
            return Ok(false);
        }
        controls::drag_vertex(shape, vertex_index, target)?;
        self.surface.request_render();
        Ok(true)
    }
}

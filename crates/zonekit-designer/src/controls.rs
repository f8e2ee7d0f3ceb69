//! Vertex editing protocol.
//!
//! While a zone is in edit mode every vertex gets a [`VertexControl`]. A
//! control reports where its handle is drawn ([`position_handler`]) and turns
//! a drag into a vertex move ([`anchored_action`]). Moving a vertex changes
//! the bounding box the shape is positioned by, so each drag re-places the
//! shape such that the control's anchor vertex (the previous vertex, or the
//! last one for vertex 0) stays where it was on screen.

use tracing::debug;
use zonekit_core::{GeometryError, Point};

use crate::shapes::{EditAffordance, EditableShape, PolygonShape};
use crate::viewport::Viewport;

/// Name of the action performed by vertex controls.
pub const MODIFY_POLYGON_ACTION: &str = "modifyPolygon";

/// Handle bound to one vertex of a shape in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexControl {
    pub vertex_index: usize,
    /// Vertex whose screen position is held fixed while this one is dragged.
    pub anchor_index: usize,
}

impl VertexControl {
    /// Control for `vertex_index` on a ring of `vertex_count` vertices.
    pub fn new(vertex_index: usize, vertex_count: usize) -> Self {
        let anchor_index = if vertex_index > 0 {
            vertex_index - 1
        } else {
            vertex_count.saturating_sub(1)
        };
        Self {
            vertex_index,
            anchor_index,
        }
    }

    pub fn action_name(&self) -> &'static str {
        MODIFY_POLYGON_ACTION
    }
}

/// One control per vertex, in vertex order.
pub fn controls_for(vertex_count: usize) -> Vec<VertexControl> {
    (0..vertex_count)
        .map(|i| VertexControl::new(i, vertex_count))
        .collect()
}

/// Screen position of a control's handle.
///
/// Stateless: recomputed from the current vertex list on every call.
pub fn position_handler<S: EditableShape + ?Sized>(
    control: &VertexControl,
    shape: &S,
    viewport: &Viewport,
) -> Option<Point> {
    let vertex = shape.vertices().get(control.vertex_index)?;
    let matrix = viewport.transform().multiply(&shape.calc_transform());
    Some(matrix.transform_point(*vertex - shape.path_offset()))
}

/// Moves one vertex so that it lands on `target` (canvas space).
///
/// Returns `false`, leaving the shape untouched, when `vertex_index` is not a
/// vertex.
pub fn action_handler<S: EditableShape + ?Sized>(
    shape: &mut S,
    vertex_index: usize,
    target: Point,
) -> bool {
    let local = shape.to_local_point(target);
    let base = shape.size_with_stroke();
    let size = shape.transformed_dimensions();
    let ratio = |b: f64, s: f64| if s == 0.0 { 1.0 } else { b / s };
    let offset = shape.path_offset();
    let vertex = Point::new(
        local.x * ratio(base.x, size.x) + offset.x,
        local.y * ratio(base.y, size.y) + offset.y,
    );
    shape.set_vertex(vertex_index, vertex).is_ok()
}

/// [`action_handler`] that keeps the control's anchor vertex fixed on the
/// canvas.
pub fn anchored_action<S: EditableShape + ?Sized>(
    control: &VertexControl,
    shape: &mut S,
    target: Point,
) -> bool {
    let Ok(anchor_before) = shape.absolute_vertex(control.anchor_index) else {
        return false;
    };
    if !action_handler(shape, control.vertex_index, target) {
        return false;
    }
    shape.recompute_dimensions();

    let anchor = shape.vertices()[control.anchor_index];
    let offset = shape.path_offset();
    let base = shape.size_with_stroke();
    let fraction = Point::new(
        (anchor.x - offset.x) / base.x,
        (anchor.y - offset.y) / base.y,
    );
    shape.set_position_by_origin(anchor_before, fraction.x + 0.5, fraction.y + 0.5);
    true
}

/// Drags vertex `vertex_index` of `shape` to `target`.
///
/// # Errors
/// `GeometryError::VertexOutOfRange` when the index is not a vertex.
pub fn drag_vertex<S: EditableShape + ?Sized>(
    shape: &mut S,
    vertex_index: usize,
    target: Point,
) -> Result<(), GeometryError> {
    let len = shape.vertex_count();
    if vertex_index >= len {
        return Err(GeometryError::VertexOutOfRange {
            index: vertex_index,
            len,
        });
    }
    let control = VertexControl::new(vertex_index, len);
    anchored_action(&control, shape, target);
    Ok(())
}

/// Flips a shape between edit mode and the regular selection box.
///
/// Returns the new `editing` flag.
pub fn toggle_edit(shape: &mut PolygonShape) -> bool {
    shape.editing = !shape.editing;
    if shape.editing {
        shape.affordance = EditAffordance::editing();
        shape.controls = Some(controls_for(shape.vertex_count()));
    } else {
        let corner_size = shape.affordance.corner_size;
        shape.affordance = EditAffordance {
            corner_size,
            ..EditAffordance::idle()
        };
        shape.controls = None;
    }
    debug!(id = %shape.id(), editing = shape.editing, "Toggled vertex editing");
    shape.editing
}

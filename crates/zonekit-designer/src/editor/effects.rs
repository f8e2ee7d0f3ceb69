use tracing::{debug, warn};
use zonekit_core::{Point, PolygonId, Rgb};

use super::ZoneEditor;
use crate::canvas::RenderingSurface;
use crate::controls::toggle_edit;
use crate::interaction::Effect;
use crate::map_overlay::MapOverlay;
use crate::shapes::GuideLine;
use crate::sync;

impl<S: RenderingSurface, M: MapOverlay> ZoneEditor<S, M> {
    /// Executes effects in order.
    pub(super) fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply_one(effect);
        }
    }

    fn apply_one(&mut self, effect: Effect) {
        match effect {
            Effect::AddGuide { id, at } => {
                let style = &self.options.style;
                let guide = GuideLine::at(at)
                    .with_style(style.guide_color.clone(), style.guide_stroke_width);
                self.surface.add_guide(id, guide);
                self.surface.request_render();
            }
            Effect::MoveGuideEnd { id, to } => {
                if self.surface.move_guide_end(id, to) {
                    self.surface.request_render();
                }
            }
            Effect::RemoveGuide { id } => {
                self.surface.remove_guide(id);
            }
            Effect::SetSelectionEnabled(enabled) => self.surface.set_selection_enabled(enabled),
            Effect::FinalizePolygon {
                id,
                vertices,
                enter_edit,
            } => self.finalize(id, vertices, enter_edit),
            Effect::ToggleEdit { id } => self.toggle_edit(&id),
            Effect::CommitEdit { id } => {
                if let Err(e) = sync::commit_edit(&self.surface, &mut self.store, &id, &self.scale)
                {
                    warn!(%id, error = %e, "Edit not committed");
                }
            }
            Effect::Delete { id } => {
                self.pending_map.retain(|f| f.id != id);
                sync::delete_everywhere(&mut self.surface, &mut self.store, &mut self.map, &id);
            }
            Effect::ModeChanged { from, to } => debug!(%from, %to, "Mode changed"),
        }
    }

    fn finalize(&mut self, id: PolygonId, vertices: Vec<Point>, enter_edit: bool) {
        let result = sync::finalize_drawn(
            &mut self.surface,
            &mut self.store,
            id.clone(),
            vertices,
            Rgb::random(),
            &self.scale,
            &self.options.style,
        );
        match result {
            Ok(()) if enter_edit => self.toggle_edit(&id),
            Ok(()) => {}
            Err(e) => {
                warn!(%id, error = %e, "Drawn zone discarded");
                let effects = self.state.forget_shape(&id);
                self.apply(effects);
            }
        }
    }

    fn toggle_edit(&mut self, id: &PolygonId) {
        let Some(shape) = self.surface.shape_mut(id) else {
            warn!(%id, "Edit toggled on a missing shape");
            return;
        };
        toggle_edit(shape);
        self.surface.set_active_shape(Some(id));
        self.surface.request_render();
    }
}

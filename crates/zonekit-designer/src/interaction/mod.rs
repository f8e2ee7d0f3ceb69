//! Interaction state machine.
//!
//! [`transition`] interprets one [`InputEvent`] against the current
//! [`Mode`] and returns the [`Effect`]s the editor has to carry out. Events
//! without a transition in the current mode return no effects.

mod types;

pub use types::{Command, DrawingRules, Effect, InputEvent, Mode, MouseButton};

use tracing::debug;
use zonekit_core::constants::MIN_POLYGON_VERTICES;
use zonekit_core::{Point, PolygonId};

use crate::shapes::GuideId;

/// Mode plus the buffers of the gesture in progress.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: Mode,
    /// Canvas points clicked while drawing.
    draw_buffer: Vec<Point>,
    /// Guide segments shown for the buffered clicks, oldest first.
    guides: Vec<GuideId>,
    /// Shape currently showing vertex controls.
    editing: Option<PolygonId>,
    next_guide: u64,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draw_buffer(&self) -> &[Point] {
        &self.draw_buffer
    }

    pub fn guides(&self) -> &[GuideId] {
        &self.guides
    }

    pub fn editing(&self) -> Option<&PolygonId> {
        self.editing.as_ref()
    }

    /// Drops every reference to a shape that no longer exists.
    pub fn forget_shape(&mut self, id: &PolygonId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
            if self.mode == Mode::EditingPolygon {
                self.set_mode(Mode::Waiting, &mut effects);
            }
        }
        effects
    }

    fn set_mode(&mut self, mode: Mode, effects: &mut Vec<Effect>) {
        if self.mode != mode {
            effects.push(Effect::ModeChanged {
                from: self.mode,
                to: mode,
            });
            self.mode = mode;
        }
    }

    fn allocate_guide(&mut self) -> GuideId {
        self.next_guide += 1;
        GuideId(self.next_guide)
    }

    fn clear_guides(&mut self, effects: &mut Vec<Effect>) {
        effects.extend(self.guides.drain(..).map(|id| Effect::RemoveGuide { id }));
    }

    /// Throws away a gesture in progress.
    fn discard_gesture(&mut self, effects: &mut Vec<Effect>) {
        if self.mode == Mode::AddingPolygon {
            self.clear_guides(effects);
            self.draw_buffer.clear();
            effects.push(Effect::SetSelectionEnabled(true));
        }
    }

    /// Commits and closes the shape in edit mode, if any.
    fn end_edit(&mut self, effects: &mut Vec<Effect>) {
        if let Some(id) = self.editing.take() {
            effects.push(Effect::CommitEdit { id: id.clone() });
            effects.push(Effect::ToggleEdit { id });
        }
    }

    fn on_command(&mut self, command: Command, effects: &mut Vec<Effect>) {
        let target = match command {
            Command::Add => Mode::AddingPolygon,
            Command::Delete => Mode::DeletingPolygon,
        };
        if self.mode == target {
            self.discard_gesture(effects);
            self.set_mode(Mode::Waiting, effects);
            return;
        }
        self.discard_gesture(effects);
        self.end_edit(effects);
        if target == Mode::AddingPolygon {
            self.draw_buffer.clear();
            effects.push(Effect::SetSelectionEnabled(false));
        }
        self.set_mode(target, effects);
    }

    fn on_pointer_down(&mut self, point: Point, rules: &DrawingRules, effects: &mut Vec<Effect>) {
        if let Some(&last) = self.guides.last() {
            effects.push(Effect::MoveGuideEnd {
                id: last,
                to: point,
            });
        }
        self.draw_buffer.push(point);

        if self.draw_buffer.len() >= rules.auto_close_clicks {
            self.clear_guides(effects);
            let mut vertices = std::mem::take(&mut self.draw_buffer);
            vertices.pop();
            effects.push(Effect::FinalizePolygon {
                id: PolygonId::generate(),
                vertices,
                enter_edit: false,
            });
            effects.push(Effect::SetSelectionEnabled(true));
            self.set_mode(Mode::Waiting, effects);
            return;
        }

        let id = self.allocate_guide();
        self.guides.push(id);
        effects.push(Effect::AddGuide { id, at: point });
    }

    fn on_double_click(&mut self, effects: &mut Vec<Effect>) {
        self.clear_guides(effects);
        let mut vertices = std::mem::take(&mut self.draw_buffer);
        while vertices.len() >= 2 && vertices[vertices.len() - 1] == vertices[vertices.len() - 2] {
            vertices.pop();
        }
        if vertices.len() < MIN_POLYGON_VERTICES {
            debug!(
                vertices = vertices.len(),
                "Double-click with too few vertices, drawing restarted"
            );
            return;
        }
        let id = PolygonId::generate();
        self.editing = Some(id.clone());
        effects.push(Effect::FinalizePolygon {
            id,
            vertices,
            enter_edit: true,
        });
        effects.push(Effect::SetSelectionEnabled(true));
        self.set_mode(Mode::EditingPolygon, effects);
    }

    fn on_shape_pointer_down(
        &mut self,
        id: PolygonId,
        button: MouseButton,
        effects: &mut Vec<Effect>,
    ) {
        let editing_this = self.editing.as_ref() == Some(&id);
        match button {
            MouseButton::Secondary if editing_this => {
                self.end_edit(effects);
                self.set_mode(Mode::Waiting, effects);
            }
            MouseButton::Secondary => {
                self.end_edit(effects);
                effects.push(Effect::ToggleEdit { id: id.clone() });
                self.editing = Some(id);
                self.set_mode(Mode::EditingPolygon, effects);
            }
            _ if editing_this => {}
            _ => {
                self.end_edit(effects);
                self.set_mode(Mode::PickPolygon, effects);
            }
        }
    }
}

/// Applies one event to `state` and returns the effects to execute.
pub fn transition(
    state: &mut InteractionState,
    event: InputEvent,
    rules: &DrawingRules,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    match (state.mode, event) {
        (_, InputEvent::Command(command)) => state.on_command(command, &mut effects),
        (Mode::AddingPolygon, InputEvent::PointerDown { point }) => {
            state.on_pointer_down(point, rules, &mut effects)
        }
        (Mode::AddingPolygon, InputEvent::PointerMove { point }) => {
            if let Some(&id) = state.guides.last() {
                effects.push(Effect::MoveGuideEnd { id, to: point });
            }
        }
        (Mode::AddingPolygon, InputEvent::DoubleClick) => state.on_double_click(&mut effects),
        (Mode::AddingPolygon | Mode::DeletingPolygon, InputEvent::ShapePointerDown { .. }) => {}
        (_, InputEvent::ShapePointerDown { id, button }) => {
            state.on_shape_pointer_down(id, button, &mut effects)
        }
        (Mode::DeletingPolygon, InputEvent::SelectionChanged { id }) => {
            effects.push(Effect::Delete { id });
            state.set_mode(Mode::Waiting, &mut effects);
        }
        (mode, event) => debug!(%mode, ?event, "No transition"),
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> DrawingRules {
        DrawingRules::default()
    }

    fn click(state: &mut InteractionState, x: f64, y: f64) -> Vec<Effect> {
        transition(
            state,
            InputEvent::PointerDown {
                point: Point::new(x, y),
            },
            &rules(),
        )
    }

    fn command(state: &mut InteractionState, command: Command) -> Vec<Effect> {
        transition(state, InputEvent::Command(command), &rules())
    }

    fn finalized(effects: &[Effect]) -> Option<(&PolygonId, &Vec<Point>, bool)> {
        effects.iter().find_map(|e| match e {
            Effect::FinalizePolygon {
                id,
                vertices,
                enter_edit,
            } => Some((id, vertices, *enter_edit)),
            _ => None,
        })
    }

    #[test]
    fn test_add_command_toggles() {
        let mut state = InteractionState::new();
        let effects = command(&mut state, Command::Add);
        assert_eq!(state.mode(), Mode::AddingPolygon);
        assert!(effects.contains(&Effect::SetSelectionEnabled(false)));
        command(&mut state, Command::Add);
        assert_eq!(state.mode(), Mode::Waiting);
    }

    #[test]
    fn test_delete_command_toggles() {
        let mut state = InteractionState::new();
        command(&mut state, Command::Delete);
        assert_eq!(state.mode(), Mode::DeletingPolygon);
        command(&mut state, Command::Delete);
        assert_eq!(state.mode(), Mode::Waiting);
    }

    #[test]
    fn test_clicks_add_guides_and_auto_close() {
        let mut state = InteractionState::new();
        command(&mut state, Command::Add);

        let effects = click(&mut state, 10.0, 10.0);
        assert_eq!(
            effects,
            vec![Effect::AddGuide {
                id: GuideId(1),
                at: Point::new(10.0, 10.0)
            }]
        );

        let effects = click(&mut state, 100.0, 10.0);
        assert_eq!(
            effects[0],
            Effect::MoveGuideEnd {
                id: GuideId(1),
                to: Point::new(100.0, 10.0)
            }
        );
        click(&mut state, 100.0, 100.0);
        assert_eq!(state.guides().len(), 3);

        let effects = click(&mut state, 10.0, 100.0);
        let (id, vertices, enter_edit) = finalized(&effects).unwrap();
        assert!(id.is_uuid_v4());
        assert!(!enter_edit);
        assert_eq!(
            vertices,
            &vec![
                Point::new(10.0, 10.0),
                Point::new(100.0, 10.0),
                Point::new(100.0, 100.0)
            ]
        );
        let removed = effects
            .iter()
            .filter(|e| matches!(e, Effect::RemoveGuide { .. }))
            .count();
        assert_eq!(removed, 3);
        assert_eq!(state.mode(), Mode::Waiting);
        assert!(state.draw_buffer().is_empty());
        assert!(state.guides().is_empty());
    }

    #[test]
    fn test_pointer_move_drags_last_guide() {
        let mut state = InteractionState::new();
        command(&mut state, Command::Add);
        let move_event = InputEvent::PointerMove {
            point: Point::new(5.0, 5.0),
        };
        assert!(transition(&mut state, move_event.clone(), &rules()).is_empty());
        click(&mut state, 1.0, 1.0);
        click(&mut state, 2.0, 2.0);
        let effects = transition(&mut state, move_event, &rules());
        assert_eq!(
            effects,
            vec![Effect::MoveGuideEnd {
                id: GuideId(2),
                to: Point::new(5.0, 5.0)
            }]
        );
    }

    #[test]
    fn test_double_click_finalizes_into_edit_mode() {
        let mut state = InteractionState::new();
        command(&mut state, Command::Add);
        let rules = DrawingRules {
            auto_close_clicks: 10,
        };
        for (x, y) in [(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (50.0, 50.0)] {
            transition(
                &mut state,
                InputEvent::PointerDown {
                    point: Point::new(x, y),
                },
                &rules,
            );
        }
        let effects = transition(&mut state, InputEvent::DoubleClick, &rules);
        let (id, vertices, enter_edit) = finalized(&effects).unwrap();
        assert!(enter_edit);
        assert_eq!(vertices.len(), 3);
        assert_eq!(state.editing(), Some(id));
        assert_eq!(state.mode(), Mode::EditingPolygon);
    }

    #[test]
    fn test_double_click_with_too_few_points_restarts() {
        let mut state = InteractionState::new();
        command(&mut state, Command::Add);
        click(&mut state, 0.0, 0.0);
        click(&mut state, 0.0, 0.0);
        let effects = transition(&mut state, InputEvent::DoubleClick, &rules());
        assert!(finalized(&effects).is_none());
        assert_eq!(state.mode(), Mode::AddingPolygon);
        assert!(state.draw_buffer().is_empty());
        assert!(state.guides().is_empty());
    }

    #[test]
    fn test_secondary_click_toggles_edit() {
        let mut state = InteractionState::new();
        let id = PolygonId::from("z1");
        let down = InputEvent::ShapePointerDown {
            id: id.clone(),
            button: MouseButton::Secondary,
        };
        let effects = transition(&mut state, down.clone(), &rules());
        assert!(effects.contains(&Effect::ToggleEdit { id: id.clone() }));
        assert_eq!(state.mode(), Mode::EditingPolygon);

        let effects = transition(&mut state, down, &rules());
        assert_eq!(effects[0], Effect::CommitEdit { id: id.clone() });
        assert_eq!(effects[1], Effect::ToggleEdit { id });
        assert_eq!(state.mode(), Mode::Waiting);
        assert!(state.editing().is_none());
    }

    #[test]
    fn test_primary_click_picks_and_ends_other_edit() {
        let mut state = InteractionState::new();
        let a = PolygonId::from("a");
        let b = PolygonId::from("b");
        transition(
            &mut state,
            InputEvent::ShapePointerDown {
                id: a.clone(),
                button: MouseButton::Secondary,
            },
            &rules(),
        );
        // pressing the shape being edited keeps the edit going
        let effects = transition(
            &mut state,
            InputEvent::ShapePointerDown {
                id: a.clone(),
                button: MouseButton::Primary,
            },
            &rules(),
        );
        assert!(effects.is_empty());
        assert_eq!(state.mode(), Mode::EditingPolygon);

        let effects = transition(
            &mut state,
            InputEvent::ShapePointerDown {
                id: b,
                button: MouseButton::Primary,
            },
            &rules(),
        );
        assert!(effects.contains(&Effect::CommitEdit { id: a }));
        assert_eq!(state.mode(), Mode::PickPolygon);
    }

    #[test]
    fn test_selection_deletes_only_in_delete_mode() {
        let mut state = InteractionState::new();
        let id = PolygonId::from("z1");
        let select = InputEvent::SelectionChanged { id: id.clone() };
        assert!(transition(&mut state, select.clone(), &rules()).is_empty());

        command(&mut state, Command::Delete);
        let effects = transition(&mut state, select, &rules());
        assert_eq!(effects[0], Effect::Delete { id });
        assert_eq!(state.mode(), Mode::Waiting);
    }

    #[test]
    fn test_shape_clicks_ignored_while_drawing_or_deleting() {
        for (cmd, mode) in [
            (Command::Add, Mode::AddingPolygon),
            (Command::Delete, Mode::DeletingPolygon),
        ] {
            for button in [MouseButton::Primary, MouseButton::Secondary] {
                let mut state = InteractionState::new();
                command(&mut state, cmd);
                let effects = transition(
                    &mut state,
                    InputEvent::ShapePointerDown {
                        id: PolygonId::from("z"),
                        button,
                    },
                    &rules(),
                );
                assert!(effects.is_empty());
                assert_eq!(state.mode(), mode);
            }
        }
    }

    #[test]
    fn test_command_while_editing_commits_first() {
        let mut state = InteractionState::new();
        let id = PolygonId::from("z");
        transition(
            &mut state,
            InputEvent::ShapePointerDown {
                id: id.clone(),
                button: MouseButton::Secondary,
            },
            &rules(),
        );
        let effects = command(&mut state, Command::Delete);
        assert_eq!(effects[0], Effect::CommitEdit { id: id.clone() });
        assert_eq!(effects[1], Effect::ToggleEdit { id });
        assert_eq!(state.mode(), Mode::DeletingPolygon);
    }

    #[test]
    fn test_leaving_add_mode_discards_gesture() {
        let mut state = InteractionState::new();
        command(&mut state, Command::Add);
        click(&mut state, 1.0, 1.0);
        click(&mut state, 2.0, 1.0);
        let effects = command(&mut state, Command::Delete);
        let removed = effects
            .iter()
            .filter(|e| matches!(e, Effect::RemoveGuide { .. }))
            .count();
        assert_eq!(removed, 2);
        assert!(state.draw_buffer().is_empty());
        assert_eq!(state.mode(), Mode::DeletingPolygon);
    }

    #[test]
    fn test_forget_shape_leaves_edit_mode() {
        let mut state = InteractionState::new();
        let id = PolygonId::from("z");
        transition(
            &mut state,
            InputEvent::ShapePointerDown {
                id: id.clone(),
                button: MouseButton::Secondary,
            },
            &rules(),
        );
        let effects = state.forget_shape(&id);
        assert_eq!(
            effects,
            vec![Effect::ModeChanged {
                from: Mode::EditingPolygon,
                to: Mode::Waiting
            }]
        );
        assert!(state.editing().is_none());
    }

    #[test]
    fn test_mouse_button_codes() {
        assert_eq!(MouseButton::from_code(1), Some(MouseButton::Primary));
        assert_eq!(MouseButton::from_code(3), Some(MouseButton::Secondary));
        assert_eq!(MouseButton::from_code(0), None);
    }
}

//! Interaction type definitions: Mode, MouseButton, Command, InputEvent, Effect, DrawingRules.

use std::fmt;

use zonekit_core::constants::AUTO_CLOSE_CLICKS;
use zonekit_core::{Point, PolygonId};

use crate::shapes::GuideId;

/// Operator interaction modes. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Waiting,
    AddingPolygon,
    EditingPolygon,
    DeletingPolygon,
    PickPolygon,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Waiting => "Waiting",
            Mode::AddingPolygon => "AddingPolygon",
            Mode::EditingPolygon => "EditingPolygon",
            Mode::DeletingPolygon => "DeletingPolygon",
            Mode::PickPolygon => "PickPolygon",
        };
        f.write_str(name)
    }
}

/// Pointer button of a shape click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    /// Maps the 1-based button code reported by the canvas (1 = left,
    /// 2 = middle, 3 = right).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(MouseButton::Primary),
            2 => Some(MouseButton::Middle),
            3 => Some(MouseButton::Secondary),
            _ => None,
        }
    }
}

/// Toolbar commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Delete,
}

/// Operator input, already converted to canvas-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Command(Command),
    /// Pointer pressed on the canvas background.
    PointerDown { point: Point },
    PointerMove { point: Point },
    DoubleClick,
    /// Pointer pressed on a finalized shape.
    ShapePointerDown { id: PolygonId, button: MouseButton },
    /// A shape became the active selection.
    SelectionChanged { id: PolygonId },
}

/// Side effects requested by a transition, executed by the editor in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add a zero-length guide segment at `at`.
    AddGuide { id: GuideId, at: Point },
    MoveGuideEnd { id: GuideId, to: Point },
    RemoveGuide { id: GuideId },
    /// Enable or disable rubber-band selection on the surface.
    SetSelectionEnabled(bool),
    /// Turn the drawn canvas points into a shape and a record.
    FinalizePolygon {
        id: PolygonId,
        vertices: Vec<Point>,
        enter_edit: bool,
    },
    ToggleEdit { id: PolygonId },
    /// Write the shape's outline back into its record.
    CommitEdit { id: PolygonId },
    Delete { id: PolygonId },
    ModeChanged { from: Mode, to: Mode },
}

/// Drawing parameters of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingRules {
    /// Click count that closes a zone. The closing click is not kept.
    pub auto_close_clicks: usize,
}

impl Default for DrawingRules {
    fn default() -> Self {
        Self {
            auto_close_clicks: AUTO_CLOSE_CLICKS,
        }
    }
}

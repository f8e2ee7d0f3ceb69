use zonekit_core::constants::{GUIDE_STROKE_COLOR, GUIDE_STROKE_WIDTH};
use zonekit_core::Point;

/// Handle of a guide segment on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuideId(pub u64);

/// A provisional segment drawn between consecutive clicks while a zone is
/// being drawn. Not selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    pub stroke: String,
    pub stroke_width: f64,
}

impl GuideLine {
    /// A zero-length segment at `point`; its end follows the pointer.
    pub fn at(point: Point) -> Self {
        Self {
            start: point,
            end: point,
            stroke: GUIDE_STROKE_COLOR.to_string(),
            stroke_width: GUIDE_STROKE_WIDTH,
        }
    }

    pub fn with_style(mut self, stroke: impl Into<String>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

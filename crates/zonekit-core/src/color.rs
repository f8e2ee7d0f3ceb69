//! Stroke and fill colors.
//!
//! Colors travel between the canvas, the feature store and the map as CSS
//! strings (`rgb(r,g,b)`), and inside feature records as `[r, g, b]`
//! component lists.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::trace;
use uuid::Uuid;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Picks a random color for a freshly drawn zone.
    pub fn random() -> Self {
        // A v4 UUID carries 122 random bits; three bytes are plenty.
        let bytes = Uuid::new_v4().into_bytes();
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Builds a color from a `color_rgb` component list.
    ///
    /// Returns `None` unless the list has exactly three components.
    pub fn from_components(components: &[u8]) -> Option<Self> {
        match components {
            [r, g, b] => Some(Self::new(*r, *g, *b)),
            _ => None,
        }
    }

    pub fn components(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// CSS form used for strokes and map fills, e.g. `rgb(10,20,30)`.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn rgb_pattern() -> &'static Regex {
    static RGB_REGEX: OnceLock<Regex> = OnceLock::new();
    RGB_REGEX.get_or_init(|| {
        Regex::new(r"rgba?\((\d{1,3}), ?(\d{1,3}), ?(\d{1,3})\)?(?:, ?(\d(?:\.\d?))\))?")
            .expect("invalid rgb regex")
    })
}

/// Extracts the `[r, g, b]` components of a CSS `rgb(...)` / `rgba(...)`
/// string. Alpha is ignored.
///
/// A string that does not match yields an empty list; callers treat that
/// as "no color" and fall back to a default.
pub fn parse_rgb_components(css: &str) -> Vec<u8> {
    let Some(caps) = rgb_pattern().captures(css) else {
        trace!(css, "Not an rgb() color");
        return Vec::new();
    };
    let mut components = Vec::with_capacity(3);
    for i in 1..=3 {
        // Three-digit groups above 255 are not colors.
        match caps[i].parse::<u16>().ok().and_then(|v| u8::try_from(v).ok()) {
            Some(v) => components.push(v),
            None => {
                trace!(css, "rgb() component out of range");
                return Vec::new();
            }
        }
    }
    components
}

//! Positions, sizes and the host's layout constants.

use serde::{Deserialize, Serialize};

/// Height of one input/output row.
pub const NODE_SLOT_HEIGHT: f64 = 20.0;
/// Default height of an inline widget.
pub const NODE_WIDGET_HEIGHT: f64 = 20.0;
/// Gap the layout inserts after every widget.
pub const WIDGET_GAP: f64 = 4.0;
/// Narrowest node the layout produces.
pub const NODE_MIN_WIDTH: f64 = 140.0;
/// Approximate width of one title character.
pub const TITLE_CHAR_WIDTH: f64 = 7.0;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

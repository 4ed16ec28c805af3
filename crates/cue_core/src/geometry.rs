//! Document-space geometry and scroll state

/// An axis-aligned rectangle in absolute document coordinates
///
/// `y` grows downward: a rect with `y = 2000.0` sits 2000px below the
/// document top, regardless of the current scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Document-space y of the top edge
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Document-space y of the bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Document-space y of the vertical center
    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }
}

/// Current scroll state, updated once per frame from the host environment
///
/// Owned exclusively by the scroll observer; triggers read it, never write.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollPosition {
    /// Scroll offset from the document top, in pixels
    pub scroll_y: f32,
    /// Height of the visible viewport, in pixels
    pub viewport_height: f32,
}

impl ScrollPosition {
    pub fn new(scroll_y: f32, viewport_height: f32) -> Self {
        Self {
            scroll_y,
            viewport_height,
        }
    }
}

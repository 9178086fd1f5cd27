//! Frames, margins, and the layout cursor used to carve frames out of a canvas.
//!
//! All values are whole pixels in canvas space; `(0, 0)` is the top-left
//! corner of the composition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position and size of an object or layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame at the origin covering `width` x `height`.
    pub const fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Grow the frame outward by `margin` on each side.
    ///
    /// Positions saturate at the `i32` range and extents at the `u32` range.
    pub fn expand(&self, margin: &Margin) -> Frame {
        Frame {
            x: shift(self.x, -i64::from(margin.left)),
            y: shift(self.y, -i64::from(margin.top)),
            width: grow(self.width, i64::from(margin.left) + i64::from(margin.right)),
            height: grow(self.height, i64::from(margin.top) + i64::from(margin.bottom)),
        }
    }

    /// Shrink the frame inward by `margin` on each side.
    pub fn inset(&self, margin: &Margin) -> Frame {
        Frame {
            x: shift(self.x, i64::from(margin.left)),
            y: shift(self.y, i64::from(margin.top)),
            width: grow(self.width, -(i64::from(margin.left) + i64::from(margin.right))),
            height: grow(self.height, -(i64::from(margin.top) + i64::from(margin.bottom))),
        }
    }

    /// `x,y,0` as written in `Location` attributes.
    pub fn location_attr(&self) -> String {
        format!("{},{},0", self.x, self.y)
    }

    /// `width,height,0` as written in `Dimensions` attributes.
    pub fn dimensions_attr(&self) -> String {
        format!("{},{},0", self.width, self.height)
    }
}

impl From<(i32, i32, u32, u32)> for Frame {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Self::new(x, y, width, height)
    }
}

fn grow(extent: u32, delta: i64) -> u32 {
    let grown = i64::from(extent) + delta;
    grown.clamp(0, i64::from(u32::MAX)) as u32
}

fn shift(position: i32, delta: i64) -> i32 {
    let moved = i64::from(position) + delta;
    moved.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Distances around a frame, in `top, right, bottom, left` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Margin {
    pub const ZERO: Margin = Margin::uniform(0);

    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same distance on all four sides.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` above and below, `horizontal` left and right.
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<i32> for Margin {
    fn from(value: i32) -> Self {
        Self::uniform(value)
    }
}

impl From<(i32, i32)> for Margin {
    fn from((vertical, horizontal): (i32, i32)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}

impl From<(i32, i32, i32, i32)> for Margin {
    fn from((top, right, bottom, left): (i32, i32, i32, i32)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Written as the `Padding` attribute of a `Bounding` element.
impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.top, self.right, self.bottom, self.left)
    }
}

/// A cursor over a rectangular region.
///
/// `take_from_*` hands out a strip of the remaining region and shrinks the
/// region so the next strip starts where the last one ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    remaining: Frame,
}

impl Layout {
    pub fn new(frame: impl Into<Frame>) -> Self {
        Self {
            remaining: frame.into(),
        }
    }

    /// What is left of the region.
    pub fn frame(&self) -> Frame {
        self.remaining
    }

    /// Shrink the remaining region by `margin` on every side.
    pub fn pad(&mut self, margin: impl Into<Margin>) -> &mut Self {
        self.remaining = self.remaining.inset(&margin.into());
        self
    }

    pub fn take_from_top(&mut self, height: u32) -> Frame {
        let height = height.min(self.remaining.height);
        let taken = Frame { height, ..self.remaining };
        self.remaining.y = shift(self.remaining.y, i64::from(height));
        self.remaining.height -= height;
        taken
    }

    pub fn take_from_bottom(&mut self, height: u32) -> Frame {
        let height = height.min(self.remaining.height);
        self.remaining.height -= height;
        Frame {
            y: shift(self.remaining.y, i64::from(self.remaining.height)),
            height,
            ..self.remaining
        }
    }

    pub fn take_from_left(&mut self, width: u32) -> Frame {
        let width = width.min(self.remaining.width);
        let taken = Frame { width, ..self.remaining };
        self.remaining.x = shift(self.remaining.x, i64::from(width));
        self.remaining.width -= width;
        taken
    }

    pub fn take_from_right(&mut self, width: u32) -> Frame {
        let width = width.min(self.remaining.width);
        self.remaining.width -= width;
        Frame {
            x: shift(self.remaining.x, i64::from(self.remaining.width)),
            width,
            ..self.remaining
        }
    }
}

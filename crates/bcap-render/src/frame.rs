#![forbid(unsafe_code)]

//! Frame = Buffer + cursor for one render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to.
//!
//! ```
//! use bcap_render::frame::Frame;
//! use bcap_render::style::Style;
//!
//! let mut frame = Frame::new(20, 2);
//! frame.buffer.set_string(0, 0, "95.00%", Style::new(), 20);
//! frame.set_cursor(Some((6, 0)));
//! assert_eq!(frame.buffer.row_text(0), "95.00%");
//! ```

use crate::buffer::Buffer;
use crate::geometry::Rect;

#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor: None,
        }
    }

    #[inline]
    pub fn area(&self) -> Rect {
        self.buffer.area()
    }

    /// Request the hardware cursor at `position`, or hide it with `None`.
    ///
    /// Positions outside the buffer hide the cursor.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position.filter(|&(x, y)| self.area().contains(x, y));
    }

    #[inline]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_outside_area_is_hidden() {
        let mut frame = Frame::new(4, 4);
        frame.set_cursor(Some((9, 0)));
        assert_eq!(frame.cursor(), None);
        frame.set_cursor(Some((3, 3)));
        assert_eq!(frame.cursor(), Some((3, 3)));
    }
}

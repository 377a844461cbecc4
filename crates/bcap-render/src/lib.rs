#![forbid(unsafe_code)]

//! Render kernel: geometry, styled cells, buffers, and ANSI presentation.
//!
//! # Role in the dashboard
//! `bcap-render` is the deterministic drawing surface. Views write into a
//! [`Frame`](frame::Frame); the runtime hands the frame's
//! [`Buffer`](buffer::Buffer) to the [`Presenter`](presenter::Presenter),
//! which emits only the cells that changed since the previous frame.
//!
//! Tests and the headless snapshot mode skip the presenter entirely and read
//! the buffer back as plain text with [`Buffer::to_text`](buffer::Buffer::to_text).

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod geometry;
pub mod presenter;
pub mod style;

pub use buffer::Buffer;
pub use cell::Cell;
pub use frame::Frame;
pub use geometry::{Rect, Sides};
pub use style::{Color, Style, StyleFlags};

/// Display width of a string in terminal columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(text)
}

/// Display width of a single grapheme cluster.
///
/// Zero-width clusters (lone combining marks, control characters) are
/// reported as width 1 so they still occupy a cell.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    display_width(grapheme).max(1)
}

#[cfg(test)]
mod tests {
    use super::{display_width, grapheme_width};

    #[test]
    fn display_width_counts_wide_hangul() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("배터리"), 6);
        assert_eq!(display_width("Porosity (다공성)"), 17);
    }

    #[test]
    fn grapheme_width_never_zero() {
        assert_eq!(grapheme_width("a"), 1);
        assert_eq!(grapheme_width("용"), 2);
        assert_eq!(grapheme_width("\u{0301}"), 1);
    }
}

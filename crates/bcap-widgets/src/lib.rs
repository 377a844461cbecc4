#![forbid(unsafe_code)]

//! Widgets for the battery capacity dashboard.
//!
//! Every widget implements [`Widget`] and draws into a
//! [`Frame`](bcap_render::Frame) within a given [`Rect`]. Widgets never hold
//! application state: anything interactive (a number input's edit buffer,
//! which control has focus, whether an expander is open) is passed in by
//! the caller when the widget is built for a render pass.

pub mod block;
pub mod button;
pub mod expander;
pub mod layout;
pub mod metric;
pub mod notice;
pub mod number_input;
pub mod paragraph;
pub mod rule;
pub mod table;
pub mod text;

use bcap_render::{Frame, Rect, Style};

pub use layout::{Constraint, Direction, Flex};
pub use text::{Line, Span, Text};

/// A `Widget` renders itself into a frame region.
pub trait Widget {
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Draw `text` at `(x, y)` clipped to `max_x`; returns the next column.
pub(crate) fn draw_text_span(
    frame: &mut Frame,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    frame.buffer.set_string(x, y, text, style, max_x)
}

/// Draw every span of `line` at `(x, y)`, each patched over `base`.
pub(crate) fn draw_line(
    frame: &mut Frame,
    x: u16,
    y: u16,
    line: &Line,
    base: Style,
    max_x: u16,
) -> u16 {
    let mut cursor = x;
    for span in &line.spans {
        if cursor >= max_x {
            break;
        }
        cursor = draw_text_span(frame, cursor, y, &span.content, base.patch(span.style), max_x);
    }
    cursor
}

/// Apply a style to every cell in `area`, skipping empty styles.
pub(crate) fn set_style_area(frame: &mut Frame, area: Rect, style: Style) {
    if !style.is_empty() {
        frame.buffer.set_style(area, style);
    }
}

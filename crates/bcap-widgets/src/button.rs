#![forbid(unsafe_code)]

use bcap_render::{Color, Frame, Rect, Style};

use crate::block::{Alignment, align_x};
use crate::{Widget, draw_text_span, set_style_area};

/// A single-row push button spanning its area.
///
/// The focused button is drawn reversed so the keyboard target is obvious
/// without color support.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    focused: bool,
    style: Style,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            focused: false,
            style: Style::new().fg(Color::White).bg(Color::Red).bold(),
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Button<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let row = area.row(0);
        let style = if self.focused {
            self.style.reversed()
        } else {
            self.style
        };
        frame.buffer.fill(row, ' ', Style::new());
        set_style_area(frame, row, style);

        let label = if self.focused {
            format!("▶ {} ◀", self.label)
        } else {
            format!("[ {} ]", self.label)
        };
        let x = align_x(row, bcap_render::display_width(&label), Alignment::Center);
        draw_text_span(frame, x, row.y, &label, style, row.right());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcap_render::StyleFlags;

    #[test]
    fn centered_label() {
        let mut frame = Frame::new(15, 1);
        Button::new("Predict").render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "  [ Predict ]");
    }

    #[test]
    fn focus_reverses_style() {
        let mut frame = Frame::new(15, 1);
        Button::new("Predict").focused(true).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "  ▶ Predict ◀");
        let cell = frame.buffer.get(0, 0).expect("cell");
        assert!(cell.attrs.contains(StyleFlags::REVERSED));
    }
}

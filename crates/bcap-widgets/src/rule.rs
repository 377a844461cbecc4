#![forbid(unsafe_code)]

use bcap_render::{Frame, Rect, Style};

use crate::{Widget, draw_text_span};

/// A horizontal divider across the first row of its area.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rule {
    style: Style,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Rule {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let line = "─".repeat(area.width as usize);
        draw_text_span(frame, area.x, area.y, &line, self.style, area.right());
    }
}

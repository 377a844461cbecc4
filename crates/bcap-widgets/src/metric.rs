#![forbid(unsafe_code)]

use bcap_render::{Frame, Rect, Style};

use crate::paragraph::Paragraph;
use crate::text::{Line, Text};
use crate::{Widget, draw_text_span};

/// A labelled value: a dim label above an emphasized value row.
///
/// Labels wider than the area wrap onto further rows.
#[derive(Debug, Clone)]
pub struct Metric<'a> {
    label: &'a str,
    value: &'a str,
    label_style: Style,
    value_style: Style,
}

impl<'a> Metric<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            label_style: Style::new().dim(),
            value_style: Style::new().bold(),
        }
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }

    fn label_paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(Text::from(Line::styled(self.label, self.label_style))).wrap(true)
    }

    /// Rows needed at `width`: the wrapped label plus the value row.
    pub fn height(&self, width: u16) -> u16 {
        self.label_paragraph().height(width).max(1).saturating_add(1)
    }
}

impl Widget for Metric<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let label = self.label_paragraph();
        let label_height = label.height(area.width).max(1).min(area.height);
        label.render(Rect::new(area.x, area.y, area.width, label_height), frame);
        let y = area.y + label_height;
        if y < area.bottom() {
            draw_text_span(frame, area.x, y, self.value, self.value_style, area.right());
        }
    }
}

#![forbid(unsafe_code)]

use bcap_render::{Frame, Rect, Style};

use crate::block::{Block, Borders};
use crate::paragraph::Paragraph;
use crate::text::Text;
use crate::{Widget, draw_text_span};

/// A titled section whose body is shown only when expanded.
///
/// Collapsed, it occupies a single header row. Expanded, the body is
/// wrapped below the header behind a left guide bar.
#[derive(Debug, Clone)]
pub struct Expander<'a> {
    title: &'a str,
    body: Text,
    expanded: bool,
    title_style: Style,
    guide_style: Style,
}

impl<'a> Expander<'a> {
    pub fn new(title: &'a str, body: impl Into<Text>) -> Self {
        Self {
            title,
            body: body.into(),
            expanded: false,
            title_style: Style::new().bold(),
            guide_style: Style::new().dim(),
        }
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn guide_style(mut self, style: Style) -> Self {
        self.guide_style = style;
        self
    }

    fn body_paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.body.clone()).wrap(true).block(
            Block::new()
                .borders(Borders::LEFT)
                .border_style(self.guide_style),
        )
    }

    pub fn height(&self, width: u16) -> u16 {
        if !self.expanded {
            return 1;
        }
        let inner = width.saturating_sub(2);
        1u16.saturating_add(self.body_paragraph().height(inner))
    }
}

impl Widget for Expander<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let marker = if self.expanded { "▾ " } else { "▸ " };
        let x = draw_text_span(frame, area.x, area.y, marker, self.title_style, area.right());
        draw_text_span(frame, x, area.y, self.title, self.title_style, area.right());

        if !self.expanded || area.height < 2 || area.width < 2 {
            return;
        }
        let body = Rect::new(area.x + 1, area.y + 1, area.width - 1, area.height - 1);
        self.body_paragraph().render(body, frame);
    }
}

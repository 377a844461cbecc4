#![forbid(unsafe_code)]

use bcap_render::{Frame, Rect, Style};

use crate::block::{Alignment, Block, align_x};
use crate::text::{Text, wrap_line};
use crate::{Widget, draw_line, set_style_area};

/// A widget that renders multi-line styled text.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    text: Text,
    block: Option<Block<'a>>,
    style: Style,
    wrap: bool,
    alignment: Alignment,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            text: text.into(),
            block: None,
            style: Style::default(),
            wrap: false,
            alignment: Alignment::Left,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Word-wrap lines wider than the area.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Rows needed to show the whole text at `width` (block borders excluded).
    pub fn height(&self, width: u16) -> u16 {
        let rows = if self.wrap {
            self.text.wrapped_height(width as usize)
        } else {
            self.text.height()
        };
        rows.min(u16::MAX as usize) as u16
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        set_style_area(frame, area, self.style);

        let text_area = match self.block {
            Some(ref b) => {
                b.render(area, frame);
                b.inner(area)
            }
            None => area,
        };
        if text_area.is_empty() {
            return;
        }

        let mut y = text_area.y;
        for line in self.text.lines() {
            let rows = if self.wrap {
                wrap_line(line, text_area.width as usize)
            } else {
                vec![line.clone()]
            };
            for row in &rows {
                if y >= text_area.bottom() {
                    return;
                }
                let x = align_x(text_area, row.width(), self.alignment);
                draw_line(frame, x, y, row, self.style, text_area.right());
                y += 1;
            }
            if rows.is_empty() {
                y += 1;
            }
        }
    }
}

#![forbid(unsafe_code)]

use bcap_render::{Frame, Rect, Style, display_width};
use bitflags::bitflags;

use crate::{Widget, draw_text_span, set_style_area};

bitflags! {
    /// Which sides of a block get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Borders: u8 {
        const TOP = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT = 0b1000;
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Plain,
    Rounded,
    Double,
}

struct BorderSet {
    horizontal: &'static str,
    vertical: &'static str,
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
}

impl BorderType {
    const fn set(self) -> BorderSet {
        match self {
            Self::Plain => BorderSet {
                horizontal: "─",
                vertical: "│",
                top_left: "┌",
                top_right: "┐",
                bottom_left: "└",
                bottom_right: "┘",
            },
            Self::Rounded => BorderSet {
                horizontal: "─",
                vertical: "│",
                top_left: "╭",
                top_right: "╮",
                bottom_left: "╰",
                bottom_right: "╯",
            },
            Self::Double => BorderSet {
                horizontal: "═",
                vertical: "║",
                top_left: "╔",
                top_right: "╗",
                bottom_left: "╚",
                bottom_right: "╝",
            },
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column where content of `width` starts inside `area` for `alignment`.
pub(crate) fn align_x(area: Rect, width: usize, alignment: Alignment) -> u16 {
    let width = width.min(area.width as usize) as u16;
    match alignment {
        Alignment::Left => area.x,
        Alignment::Center => area.x + (area.width - width) / 2,
        Alignment::Right => area.x + area.width - width,
    }
}

/// A widget that draws a block with optional borders and a title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    title: Option<&'a str>,
    title_alignment: Alignment,
    title_style: Style,
    style: Style,
}

impl<'a> Block<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block with all borders enabled.
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Compute the inner area inside the block's borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    fn render_borders(&self, area: Rect, frame: &mut Frame) {
        let set = self.border_type.set();
        let style = self.style.patch(self.border_style);
        let (left, top) = (area.x, area.y);
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        if self.borders.contains(Borders::TOP) {
            for x in left..=right {
                draw_text_span(frame, x, top, set.horizontal, style, x + 1);
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in left..=right {
                draw_text_span(frame, x, bottom, set.horizontal, style, x + 1);
            }
        }
        if self.borders.contains(Borders::LEFT) {
            for y in top..=bottom {
                draw_text_span(frame, left, y, set.vertical, style, left + 1);
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in top..=bottom {
                draw_text_span(frame, right, y, set.vertical, style, right + 1);
            }
        }

        let corners = [
            (Borders::TOP | Borders::LEFT, left, top, set.top_left),
            (Borders::TOP | Borders::RIGHT, right, top, set.top_right),
            (Borders::BOTTOM | Borders::LEFT, left, bottom, set.bottom_left),
            (Borders::BOTTOM | Borders::RIGHT, right, bottom, set.bottom_right),
        ];
        for (needed, x, y, symbol) in corners {
            if self.borders.contains(needed) {
                draw_text_span(frame, x, y, symbol, style, x + 1);
            }
        }
    }

    fn render_title(&self, area: Rect, frame: &mut Frame) {
        let Some(title) = self.title else {
            return;
        };
        let inset = u16::from(self.borders.contains(Borders::LEFT));
        let room = area
            .width
            .saturating_sub(inset)
            .saturating_sub(u16::from(self.borders.contains(Borders::RIGHT)));
        if room < 3 {
            return;
        }
        let label = format!(" {title} ");
        let row = Rect::new(area.x + inset, area.y, room, 1);
        let x = align_x(row, display_width(&label), self.title_alignment);
        let style = self.style.patch(self.title_style);
        draw_text_span(frame, x, area.y, &label, style, row.right());
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        set_style_area(frame, area, self.style);
        self.render_borders(area, frame);
        self.render_title(area, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_with_all_borders() {
        let block = Block::bordered();
        assert_eq!(block.inner(Rect::new(0, 0, 10, 5)), Rect::new(1, 1, 8, 3));
    }

    #[test]
    fn renders_rounded_box_with_title() {
        let mut frame = Frame::new(12, 3);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Input")
            .render(frame.area(), &mut frame);
        assert_eq!(
            frame.buffer.to_text(),
            "╭ Input ───╮\n│          │\n╰──────────╯"
        );
    }

    #[test]
    fn centered_title() {
        let mut frame = Frame::new(11, 1);
        Block::new()
            .borders(Borders::TOP)
            .title("ab")
            .title_alignment(Alignment::Center)
            .render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "─── ab ────");
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut frame = Frame::new(1, 1);
        Block::bordered().title("x").render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "┘");
    }
}

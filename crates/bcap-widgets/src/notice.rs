#![forbid(unsafe_code)]

//! Status callouts: success, info, warning, error.

use bcap_render::{Color, Frame, Rect, Style};

use crate::Widget;
use crate::paragraph::Paragraph;
use crate::text::{Line, Span, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✖",
        }
    }

    pub fn style(self) -> Style {
        match self {
            Self::Success => Style::new().fg(Color::Green),
            Self::Info => Style::new().fg(Color::Cyan),
            Self::Warning => Style::new().fg(Color::Yellow),
            Self::Error => Style::new().fg(Color::Red).bold(),
        }
    }
}

/// One callout line (wrapped if needed) prefixed by the kind's icon.
#[derive(Debug, Clone)]
pub struct Notice<'a> {
    kind: NoticeKind,
    message: &'a str,
}

impl<'a> Notice<'a> {
    pub fn new(kind: NoticeKind, message: &'a str) -> Self {
        Self { kind, message }
    }

    pub fn success(message: &'a str) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: &'a str) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn warning(message: &'a str) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: &'a str) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    fn paragraph(&self) -> Paragraph<'static> {
        let mut text = Text::new();
        for (i, line) in self.message.split('\n').enumerate() {
            let prefix = if i == 0 {
                format!("{} ", self.kind.icon())
            } else {
                "  ".to_string()
            };
            text.push_line(Line::from(vec![
                Span::styled(prefix, self.kind.style().bold()),
                Span::raw(line),
            ]));
        }
        Paragraph::new(text).style(self.kind.style()).wrap(true)
    }

    pub fn height(&self, width: u16) -> u16 {
        self.paragraph().height(width)
    }
}

impl Widget for Notice<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        self.paragraph().render(area, frame);
    }
}

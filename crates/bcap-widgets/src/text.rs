#![forbid(unsafe_code)]

//! Styled text: spans, lines, word wrapping, and a small markup dialect.
//!
//! The markup understands exactly what the dashboard's help panels use:
//!
//! ```text
//! ### Heading
//! 1. numbered item with **bold** words
//! - bullet item
//! ```

use bcap_render::{Style, display_width, grapheme_width};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Style,
}

impl Span {
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::new(),
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        display_width(&self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(content)],
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::styled(content, style)],
        }
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn to_plain_text(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }

    /// Append `text`, merging into the last span when the style matches.
    fn push_str(&mut self, text: &str, style: Style) {
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.push_str(text),
            _ => self.spans.push(Span::styled(text, style)),
        }
    }

    fn trim_end(&mut self) {
        while let Some(last) = self.spans.last_mut() {
            let trimmed = last.content.trim_end().len();
            last.content.truncate(trimmed);
            if last.content.is_empty() {
                self.spans.pop();
            } else {
                break;
            }
        }
    }
}

impl From<Vec<Span>> for Line {
    fn from(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    lines: Vec<Line>,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn push_line(&mut self, line: impl Into<Line>) {
        self.lines.push(line.into());
    }

    /// Number of rows the text occupies when wrapped to `width`.
    pub fn wrapped_height(&self, width: usize) -> usize {
        self.lines.iter().map(|l| wrap_line(l, width).len().max(1)).sum()
    }

    /// Parse the markup dialect described in the module docs.
    ///
    /// Leading indentation is ignored and blank lines are kept.
    pub fn from_markup(src: &str, styles: MarkupStyles) -> Self {
        let mut text = Text::new();
        for raw in src.lines() {
            let trimmed = raw.trim();
            if let Some(heading) = trimmed.strip_prefix("### ") {
                text.push_line(Line::styled(heading, styles.heading));
            } else if let Some(item) = trimmed.strip_prefix("- ") {
                let mut line = Line::default();
                line.push_str("• ", styles.body);
                push_inline(&mut line, item, styles);
                text.push_line(line);
            } else {
                let mut line = Line::default();
                push_inline(&mut line, trimmed, styles);
                text.push_line(line);
            }
        }
        text
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self {
            lines: s.split('\n').map(Line::raw).collect(),
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Line> for Text {
    fn from(line: Line) -> Self {
        Self { lines: vec![line] }
    }
}

impl From<Vec<Line>> for Text {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// Styles applied by [`Text::from_markup`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStyles {
    pub body: Style,
    pub heading: Style,
    pub strong: Style,
}

/// `**bold**` toggles between body and strong styles.
fn push_inline(line: &mut Line, src: &str, styles: MarkupStyles) {
    for (i, part) in src.split("**").enumerate() {
        if part.is_empty() {
            continue;
        }
        let style = if i % 2 == 1 {
            styles.body.patch(styles.strong)
        } else {
            styles.body
        };
        line.push_str(part, style);
    }
}

/// Word-wrap `line` to `width` columns, keeping span styles.
///
/// Words wider than `width` are broken at grapheme boundaries. Whitespace
/// at the start of a wrapped row is dropped.
pub fn wrap_line(line: &Line, width: usize) -> Vec<Line> {
    if width == 0 {
        return Vec::new();
    }
    if line.width() <= width {
        return vec![line.clone()];
    }

    let mut segments: Vec<(bool, Vec<(&str, Style)>)> = Vec::new();
    for span in &line.spans {
        for grapheme in span.content.graphemes(true) {
            let is_space = grapheme.chars().all(char::is_whitespace);
            match segments.last_mut() {
                Some((space, graphemes)) if *space == is_space => graphemes.push((grapheme, span.style)),
                _ => segments.push((is_space, vec![(grapheme, span.style)])),
            }
        }
    }

    let mut rows = Vec::new();
    let mut current = Line::default();
    let mut current_width = 0usize;

    for (is_space, graphemes) in segments {
        let segment_width: usize = graphemes.iter().map(|(g, _)| grapheme_width(g)).sum();
        if is_space {
            if current_width == 0 {
                continue;
            }
            if current_width + segment_width <= width {
                for (g, style) in graphemes {
                    current.push_str(g, style);
                }
                current_width += segment_width;
            } else {
                current.trim_end();
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            continue;
        }

        if current_width > 0 && current_width + segment_width > width {
            current.trim_end();
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for (g, style) in graphemes {
            let w = grapheme_width(g);
            if current_width + w > width && current_width > 0 {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push_str(g, style);
            current_width += w;
        }
    }

    current.trim_end();
    if !current.spans.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcap_render::Color;

    fn plain(rows: &[Line]) -> Vec<String> {
        rows.iter().map(Line::to_plain_text).collect()
    }

    #[test]
    fn short_lines_are_untouched() {
        let line = Line::raw("95.00%");
        assert_eq!(plain(&wrap_line(&line, 10)), vec!["95.00%"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let line = Line::raw("values outside the typical range");
        assert_eq!(
            plain(&wrap_line(&line, 14)),
            vec!["values outside", "the typical", "range"]
        );
    }

    #[test]
    fn breaks_long_words() {
        let line = Line::raw("abcdefghij");
        assert_eq!(plain(&wrap_line(&line, 4)), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wide_graphemes_respect_width() {
        let line = Line::raw("배터리용량");
        let rows = wrap_line(&line, 5);
        assert!(rows.iter().all(|r| r.width() <= 5));
        assert_eq!(plain(&rows).concat(), "배터리용량");
    }

    #[test]
    fn wrapping_keeps_styles() {
        let strong = Style::new().fg(Color::Green);
        let line = Line::from(vec![Span::raw("feature "), Span::styled("Porosity", strong)]);
        let rows = wrap_line(&line, 9);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].spans[0].style, strong);
    }

    #[test]
    fn markup_parses_headings_bullets_and_bold() {
        let styles = MarkupStyles {
            body: Style::new(),
            heading: Style::new().bold(),
            strong: Style::new().fg(Color::Yellow),
        };
        let text = Text::from_markup(
            "### Usage\n  - **Porosity**: 0.313 ~ 0.428\n",
            styles,
        );
        assert_eq!(text.height(), 2);
        assert_eq!(text.lines()[0].to_plain_text(), "Usage");
        assert_eq!(text.lines()[0].spans[0].style, styles.heading);
        assert_eq!(text.lines()[1].to_plain_text(), "• Porosity: 0.313 ~ 0.428");
        assert_eq!(text.lines()[1].spans[1].style.fg, Some(Color::Yellow));
    }

    #[test]
    fn wrapped_height_counts_blank_lines() {
        let text = Text::from("a\n\nb");
        assert_eq!(text.wrapped_height(10), 3);
    }
}

#![forbid(unsafe_code)]

use bcap_render::{Frame, Rect, Style, display_width};

use crate::layout::{Constraint, Flex};
use crate::{Widget, draw_text_span, set_style_area};

/// A static table with a header row, a separator, and body rows.
///
/// Cells that do not fit their column are truncated.
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<Constraint>,
    column_spacing: u16,
    header_style: Style,
    separator_style: Style,
    style: Style,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>, widths: impl IntoIterator<Item = Constraint>) -> Self {
        Self {
            rows,
            widths: widths.into_iter().collect(),
            column_spacing: 1,
            ..Default::default()
        }
    }

    pub fn widths(mut self, widths: impl IntoIterator<Item = Constraint>) -> Self {
        self.widths = widths.into_iter().collect();
        self
    }

    /// Widest cell of each column, header included.
    pub fn content_widths(&self) -> Vec<u16> {
        let all_rows = || std::iter::once(&self.header).chain(&self.rows);
        let columns = all_rows().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|i| {
                let widest = all_rows()
                    .filter_map(|row| row.get(i))
                    .map(|cell| display_width(cell))
                    .max()
                    .unwrap_or(0);
                u16::try_from(widest).unwrap_or(u16::MAX)
            })
            .collect()
    }

    /// Width at which no cell is truncated.
    pub fn content_width(&self) -> u16 {
        let widths = self.content_widths();
        let gaps = u16::try_from(widths.len().saturating_sub(1)).unwrap_or(u16::MAX);
        widths
            .iter()
            .fold(self.column_spacing.saturating_mul(gaps), |acc, &w| acc.saturating_add(w))
    }

    pub fn header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }

    pub fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }

    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    pub fn separator_style(mut self, style: Style) -> Self {
        self.separator_style = style;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Rows needed to show the header, separator, and every body row.
    pub fn height(&self) -> u16 {
        let header = if self.header.is_empty() { 0 } else { 2 };
        (header + self.rows.len()).min(u16::MAX as usize) as u16
    }

    fn render_row(&self, frame: &mut Frame, columns: &[Rect], y: u16, cells: &[String], style: Style) {
        for (column, cell) in columns.iter().zip(cells) {
            draw_text_span(frame, column.x, y, cell, style, column.right());
        }
    }
}

impl Widget for Table {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        set_style_area(frame, area, self.style);

        let columns = Flex::horizontal()
            .gap(self.column_spacing)
            .constraints(self.widths.iter().copied())
            .split(Rect::new(area.x, area.y, area.width, 1));

        let mut y = area.y;
        if !self.header.is_empty() {
            let style = self.style.patch(self.header_style);
            self.render_row(frame, &columns, y, &self.header, style);
            y += 1;
            if y >= area.bottom() {
                return;
            }
            let rule = "─".repeat(area.width as usize);
            let style = self.style.patch(self.separator_style);
            draw_text_span(frame, area.x, y, &rule, style, area.right());
            y += 1;
        }

        for row in &self.rows {
            if y >= area.bottom() {
                break;
            }
            self.render_row(frame, &columns, y, row, self.style);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_header_separator_and_rows() {
        let table = Table::new(
            vec![strings(&["min", "0.313"]), strings(&["max", "0.428"])],
            [Constraint::Fixed(4), Constraint::Fixed(6)],
        )
        .header(strings(&["case", "value"]));
        assert_eq!(table.height(), 4);

        let mut frame = Frame::new(11, 4);
        table.render(frame.area(), &mut frame);
        assert_eq!(
            frame.buffer.to_text(),
            "case value\n───────────\nmin  0.313\nmax  0.428"
        );
    }

    #[test]
    fn content_widths_cover_header_and_cells() {
        let table = Table::new(
            vec![strings(&["Minimum", "0.313", "4.22e-08"]), strings(&["Max", "0.4", "확산"])],
            [],
        )
        .header(strings(&["Case", "Porosity", "Diffusivity"]));
        assert_eq!(table.content_widths(), [7, 8, 11]);
        assert_eq!(table.content_width(), 28);

        let widths: Vec<Constraint> = table.content_widths().into_iter().map(Constraint::Min).collect();
        let table = table.widths(widths);
        let mut frame = Frame::new(28, 4);
        table.render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "Case    Porosity Diffusivity");
        assert_eq!(frame.buffer.row_text(2), "Minimum 0.313    4.22e-08");
    }

    #[test]
    fn truncates_to_available_rows() {
        let table = Table::new(
            vec![strings(&["a"]), strings(&["b"]), strings(&["c"])],
            [Constraint::Min(1)],
        );
        let mut frame = Frame::new(3, 2);
        table.render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "a\nb");
    }
}

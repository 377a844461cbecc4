#![forbid(unsafe_code)]

//! 2D grid of cells.
//!
//! All writes are clipped to the buffer bounds, so widgets can draw with
//! saturating arithmetic and never index out of range.

use unicode_segmentation::UnicodeSegmentation;

use crate::cell::Cell;
use crate::geometry::Rect;
use crate::grapheme_width;
use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        let i = self.index(x, y)?;
        Some(&self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        Some(&mut self.cells[i])
    }

    /// Blank out any wide grapheme that overlaps column `x` on row `y`.
    fn release_wide(&mut self, x: u16, y: u16) {
        let Some(cell) = self.get(x, y) else {
            return;
        };
        if cell.is_continuation() {
            let mut head = x;
            while head > 0 {
                head -= 1;
                match self.get(head, y) {
                    Some(c) if c.is_continuation() => continue,
                    Some(_) => break,
                    None => return,
                }
            }
            self.blank_run(head, y);
        } else if self.get(x + 1, y).is_some_and(Cell::is_continuation) {
            self.blank_run(x, y);
        }
    }

    fn blank_run(&mut self, head: u16, y: u16) {
        if let Some(cell) = self.get_mut(head, y) {
            cell.set_symbol(" ");
        }
        let mut x = head + 1;
        while let Some(cell) = self.get_mut(x, y) {
            if !cell.is_continuation() {
                break;
            }
            cell.set_symbol(" ");
            x += 1;
        }
    }

    /// Write `text` starting at `(x, y)`, stopping before column `max_x`.
    ///
    /// Returns the column after the last written grapheme. A wide grapheme
    /// that would straddle `max_x` is not written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        if y >= self.height {
            return x;
        }
        let mut cursor = x;
        for grapheme in text.graphemes(true) {
            let symbol = if grapheme.chars().any(char::is_control) {
                " "
            } else {
                grapheme
            };
            let width = grapheme_width(symbol) as u16;
            if cursor.saturating_add(width) > max_x {
                break;
            }
            for dx in 0..width {
                self.release_wide(cursor + dx, y);
            }
            if let Some(cell) = self.get_mut(cursor, y) {
                cell.set_symbol(symbol);
                cell.apply_style(style);
            }
            for dx in 1..width {
                if let Some(cell) = self.get_mut(cursor + dx, y) {
                    *cell = Cell::continuation();
                    cell.apply_style(style);
                }
            }
            cursor += width;
        }
        cursor
    }

    /// Apply `style` to every cell of `area` (clipped to the buffer).
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.apply_style(style);
                }
            }
        }
    }

    /// Fill `area` with `symbol` in `style`.
    pub fn fill(&mut self, area: Rect, symbol: char, style: Style) {
        let area = area.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell::from_char(symbol);
                    cell.apply_style(style);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Plain text of row `y` with trailing blanks removed.
    pub fn row_text(&self, y: u16) -> String {
        let mut line = String::with_capacity(self.width as usize);
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y)
                && !cell.is_continuation()
            {
                line.push_str(cell.symbol());
            }
        }
        line.truncate(line.trim_end().len());
        line
    }

    /// The whole buffer as plain text, one line per row.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Positions whose cells differ from `previous`.
    ///
    /// A size change marks every cell as changed.
    pub fn diff(&self, previous: &Buffer) -> Vec<(u16, u16)> {
        let same_size = self.width == previous.width && self.height == previous.height;
        let mut changed = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let differs = !same_size || self.get(x, y) != previous.get(x, y);
                if differs {
                    changed.push((x, y));
                }
            }
        }
        changed
    }
}

#![forbid(unsafe_code)]

//! A single terminal cell.
//!
//! Wide graphemes (CJK, most emoji) occupy a head cell holding the grapheme
//! followed by continuation cells with an empty symbol. The presenter skips
//! continuation cells and the headless text dump ignores them.

use crate::style::{Color, Style, StyleFlags};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    symbol: String,
    pub fg: Color,
    pub bg: Color,
    pub attrs: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: " ".to_string(),
            fg: Color::Reset,
            bg: Color::Reset,
            attrs: StyleFlags::empty(),
        }
    }
}

impl Cell {
    pub fn from_char(ch: char) -> Self {
        Self {
            symbol: ch.to_string(),
            ..Self::default()
        }
    }

    /// Cell covered by the right half of a wide grapheme.
    pub fn continuation() -> Self {
        Self {
            symbol: String::new(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.symbol.is_empty()
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol.clear();
        self.symbol.push_str(symbol);
    }

    /// Apply the set properties of `style`, leaving the rest untouched.
    pub fn apply_style(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        if let Some(attrs) = style.attrs {
            self.attrs |= attrs;
        }
    }

    /// The cell's resolved style, for run grouping in the presenter.
    pub fn style(&self) -> Style {
        Style {
            fg: Some(self.fg),
            bg: Some(self.bg),
            attrs: Some(self.attrs),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_blank() {
        let cell = Cell::default();
        assert_eq!(cell.symbol(), " ");
        assert!(!cell.is_continuation());
    }

    #[test]
    fn apply_style_merges_attrs() {
        let mut cell = Cell::from_char('x');
        cell.apply_style(Style::new().bold());
        cell.apply_style(Style::new().fg(Color::Green).dim());
        assert_eq!(cell.fg, Color::Green);
        assert_eq!(cell.attrs, StyleFlags::BOLD | StyleFlags::DIM);
    }
}

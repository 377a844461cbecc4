#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter diffs the next frame against the previously presented
//! buffer and writes only changed cells. Cursor moves are skipped for
//! contiguous runs and style sequences are only emitted when the style
//! changes. Every frame is wrapped in a synchronized update so terminals
//! that support DEC 2026 swap it in atomically.
//!
//! ```
//! use bcap_render::frame::Frame;
//! use bcap_render::presenter::Presenter;
//! use bcap_render::style::Style;
//!
//! let mut presenter = Presenter::new(Vec::new());
//! let mut frame = Frame::new(10, 1);
//! frame.buffer.set_string(0, 0, "ok", Style::new(), 10);
//! let written = presenter.present(None, &frame)?;
//! assert_eq!(written, 10);
//! let again = presenter.present(Some(&frame.buffer), &frame)?;
//! assert_eq!(again, 0);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufWriter, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use crate::buffer::Buffer;
use crate::cell::Cell;
use crate::frame::Frame;
use crate::grapheme_width;
use crate::style::{Style, StyleFlags};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
        }
    }

    /// Present `frame`, diffing against `previous` when given.
    ///
    /// Returns the number of changed cells (continuation cells included).
    pub fn present(&mut self, previous: Option<&Buffer>, frame: &Frame) -> io::Result<usize> {
        let buffer = &frame.buffer;
        let changed = match previous {
            Some(prev) => buffer.diff(prev),
            None => (0..buffer.height())
                .flat_map(|y| (0..buffer.width()).map(move |x| (x, y)))
                .collect(),
        };

        queue!(self.writer, BeginSynchronizedUpdate, Hide)?;

        let mut expected_pos: Option<(u16, u16)> = None;
        let mut current_style: Option<Style> = None;
        for &(x, y) in &changed {
            let Some(cell) = buffer.get(x, y) else {
                continue;
            };
            if cell.is_continuation() {
                continue;
            }
            if expected_pos != Some((x, y)) {
                queue!(self.writer, MoveTo(x, y))?;
            }
            let style = cell.style();
            if current_style != Some(style) {
                self.emit_style(cell)?;
                current_style = Some(style);
            }
            queue!(self.writer, Print(cell.symbol()))?;
            let width = grapheme_width(cell.symbol()) as u16;
            expected_pos = Some((x.saturating_add(width), y));
        }

        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        if let Some((x, y)) = frame.cursor() {
            queue!(self.writer, MoveTo(x, y), Show)?;
        }
        queue!(self.writer, EndSynchronizedUpdate)?;
        self.writer.flush()?;
        Ok(changed.len())
    }

    fn emit_style(&mut self, cell: &Cell) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(cell.fg.into()),
            SetBackgroundColor(cell.bg.into())
        )?;
        let attrs = [
            (StyleFlags::BOLD, Attribute::Bold),
            (StyleFlags::DIM, Attribute::Dim),
            (StyleFlags::ITALIC, Attribute::Italic),
            (StyleFlags::UNDERLINE, Attribute::Underlined),
            (StyleFlags::REVERSED, Attribute::Reverse),
        ];
        for (flag, attribute) in attrs {
            if cell.attrs.contains(flag) {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }

    /// Mutable access to the underlying writer (flushes pending output first).
    pub fn writer_mut(&mut self) -> io::Result<&mut W> {
        self.writer.flush()?;
        Ok(self.writer.get_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn output(presenter: &mut Presenter<Vec<u8>>) -> String {
        let bytes = std::mem::take(presenter.writer_mut().expect("flush"));
        String::from_utf8(bytes).expect("utf8")
    }

    #[test]
    fn first_present_writes_every_cell() {
        let mut presenter = Presenter::new(Vec::new());
        let mut frame = Frame::new(8, 2);
        frame.buffer.set_string(0, 1, "95.00%", Style::new(), 8);
        let written = presenter.present(None, &frame).expect("present");
        assert_eq!(written, 16);
        assert!(output(&mut presenter).contains("95.00%"));
    }

    #[test]
    fn unchanged_frame_writes_nothing_but_framing() {
        let mut presenter = Presenter::new(Vec::new());
        let frame = Frame::new(4, 1);
        presenter.present(None, &frame).expect("present");
        let _ = output(&mut presenter);
        let written = presenter
            .present(Some(&frame.buffer), &frame)
            .expect("present");
        assert_eq!(written, 0);
        assert!(!output(&mut presenter).contains(' '));
    }

    #[test]
    fn only_changed_cells_are_printed() {
        let mut presenter = Presenter::new(Vec::new());
        let before = Frame::new(10, 1);
        let mut after = before.clone();
        after
            .buffer
            .set_string(3, 0, "Z", Style::new().fg(Color::Red).bold(), 10);
        let written = presenter
            .present(Some(&before.buffer), &after)
            .expect("present");
        assert_eq!(written, 1);
        let out = output(&mut presenter);
        assert!(out.contains('Z'));
        assert!(!out.contains(' '));
    }
}

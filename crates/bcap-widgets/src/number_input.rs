#![forbid(unsafe_code)]

//! Bounded numeric input with step buttons and an edit buffer.
//!
//! The widget is split in the usual way: [`NumberInputState`] owns the
//! committed value and any in-progress text edit, while [`NumberInput`] is
//! rebuilt every frame to draw that state.
//!
//! Values are always kept inside `[min, max]`. Typed text is parsed only on
//! commit; text that does not parse reverts to the previous value.

use bcap_render::{Color, Frame, Rect, Style, StyleFlags};

use crate::block::{Block, BorderType, Borders};
use crate::paragraph::Paragraph;
use crate::text::{Line, Span, Text};
use crate::{Widget, draw_text_span};

/// How a value is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Fixed-point with `n` decimals (`%.nf`).
    Fixed(usize),
    /// Scientific with `n` mantissa decimals and a signed two-digit
    /// exponent (`%.ne`).
    Scientific(usize),
}

impl NumberFormat {
    /// Parse a printf-style pattern such as `%.3f` or `%.2e`.
    pub fn parse(pattern: &str) -> Option<Self> {
        let body = pattern.strip_prefix("%.")?;
        if let Some(digits) = body.strip_suffix('f') {
            digits.parse().ok().map(Self::Fixed)
        } else if let Some(digits) = body.strip_suffix('e') {
            digits.parse().ok().map(Self::Scientific)
        } else {
            None
        }
    }

    pub fn format(self, value: f64) -> String {
        match self {
            Self::Fixed(precision) => format!("{value:.precision$}"),
            Self::Scientific(precision) => {
                let raw = format!("{value:.precision$e}");
                match raw.split_once('e') {
                    Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                        Ok(exp) => {
                            let sign = if exp < 0 { '-' } else { '+' };
                            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
                        }
                        Err(_) => raw,
                    },
                    // inf / NaN have no exponent part
                    None => raw,
                }
            }
        }
    }
}

/// Bounds, default, and step of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberField {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    pub format: NumberFormat,
}

impl NumberField {
    /// Clamp into `[min, max]`; NaN becomes the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    /// Round to the nearest step counted from `min`, then clamp.
    pub fn snap(&self, value: f64) -> f64 {
        let value = self.clamp(value);
        if self.step <= 0.0 {
            return value;
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    pub fn format(&self, value: f64) -> String {
        self.format.format(value)
    }
}

/// Interactive state of one number input.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInputState {
    field: NumberField,
    value: f64,
    edit: Option<String>,
}

impl NumberInputState {
    pub fn new(field: NumberField) -> Self {
        Self {
            value: field.clamp(field.default),
            field,
            edit: None,
        }
    }

    pub fn field(&self) -> &NumberField {
        &self.field
    }

    /// The committed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Replace the committed value, dropping any edit. Returns whether it changed.
    pub fn set_value(&mut self, value: f64) -> bool {
        self.edit = None;
        let value = self.field.clamp(value);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    pub fn step_up(&mut self) -> bool {
        self.step_by(1.0)
    }

    pub fn step_down(&mut self) -> bool {
        self.step_by(-1.0)
    }

    fn step_by(&mut self, direction: f64) -> bool {
        let committed = self.commit();
        let next = self.field.snap(self.value + direction * self.field.step);
        let stepped = next != self.value;
        self.value = next;
        committed || stepped
    }

    /// Append a typed character to the edit buffer.
    ///
    /// The first keystroke starts a fresh buffer. Characters that cannot
    /// appear in a number are ignored and `false` is returned.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !(ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '-' | '+')) {
            return false;
        }
        self.edit.get_or_insert_with(String::new).push(ch);
        true
    }

    /// Delete the last character, starting from the shown value if no edit
    /// is active.
    pub fn backspace(&mut self) {
        let formatted = self.field.format(self.value);
        let buffer = self.edit.get_or_insert(formatted);
        buffer.pop();
    }

    /// Parse the edit buffer into the value. Returns whether the value changed.
    pub fn commit(&mut self) -> bool {
        let Some(text) = self.edit.take() else {
            return false;
        };
        match text.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => {
                let value = self.field.clamp(parsed);
                let changed = value != self.value;
                self.value = value;
                changed
            }
            _ => false,
        }
    }

    /// Drop the edit buffer, keeping the committed value.
    pub fn cancel(&mut self) {
        self.edit = None;
    }

    /// The edit buffer while editing, else the formatted value.
    pub fn display_text(&self) -> String {
        match &self.edit {
            Some(buffer) => buffer.clone(),
            None => self.field.format(self.value),
        }
    }
}

/// Draws a [`NumberInputState`]: label row, bordered value box, help text,
/// and an optional warning.
#[derive(Debug, Clone)]
pub struct NumberInput<'a> {
    state: &'a NumberInputState,
    label: &'a str,
    help: Option<&'a str>,
    warning: Option<&'a str>,
    focused: bool,
}

const BOX_HEIGHT: u16 = 3;

impl<'a> NumberInput<'a> {
    pub fn new(label: &'a str, state: &'a NumberInputState) -> Self {
        Self {
            state,
            label,
            help: None,
            warning: None,
            focused: false,
        }
    }

    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn warning(mut self, warning: Option<&'a str>) -> Self {
        self.warning = warning;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn label_paragraph(&self) -> Paragraph<'static> {
        let style = if self.focused {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().bold()
        };
        Paragraph::new(Text::from(Line::styled(self.label, style))).wrap(true)
    }

    fn help_paragraph(&self) -> Option<Paragraph<'static>> {
        self.help
            .map(|h| Paragraph::new(h).style(Style::new().dim()).wrap(true))
    }

    fn warning_paragraph(&self) -> Option<Paragraph<'static>> {
        self.warning.map(|w| {
            let line = Line::from(vec![Span::raw("⚠ "), Span::raw(w)]);
            Paragraph::new(Text::from(line))
                .style(Style::new().fg(Color::Yellow))
                .wrap(true)
        })
    }

    /// Rows needed at `width`.
    pub fn height(&self, width: u16) -> u16 {
        let help = self.help_paragraph().map_or(0, |p| p.height(width));
        let warning = self.warning_paragraph().map_or(0, |p| p.height(width));
        let label = self.label_paragraph().height(width).max(1);
        label + BOX_HEIGHT + help + warning
    }
}

impl Widget for NumberInput<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let remaining = |y: u16| area.bottom().saturating_sub(y);
        let label = self.label_paragraph();
        let label_height = label.height(area.width).max(1).min(area.height);
        label.render(Rect::new(area.x, area.y, area.width, label_height), frame);

        let mut y = area.y + label_height;
        if remaining(y) == 0 {
            return;
        }

        let box_area = Rect::new(area.x, y, area.width, BOX_HEIGHT.min(remaining(y)));
        let border_style = if self.focused {
            Style::new().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::DarkGray)
        };
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(box_area);
        block.render(box_area, frame);

        if !inner.is_empty() {
            let text = self.state.display_text();
            let steppers = " − + ";
            let stepper_width = bcap_render::display_width(steppers) as u16;
            let text_right = if inner.width > stepper_width + 1 {
                let sx = inner.right() - stepper_width;
                draw_text_span(frame, sx, inner.y, steppers, Style::new().dim(), inner.right());
                sx
            } else {
                inner.right()
            };
            let value_style = if self.state.is_editing() {
                Style::new().add(StyleFlags::UNDERLINE)
            } else {
                Style::new()
            };
            let end = draw_text_span(frame, inner.x, inner.y, &text, value_style, text_right);
            if self.focused && self.state.is_editing() {
                frame.set_cursor(Some((end.min(text_right.saturating_sub(1)), inner.y)));
            }
        }
        y += box_area.height;

        for paragraph in [self.help_paragraph(), self.warning_paragraph()]
            .into_iter()
            .flatten()
        {
            if remaining(y) == 0 {
                return;
            }
            let h = paragraph.height(area.width).min(remaining(y));
            paragraph.render(Rect::new(area.x, y, area.width, h), frame);
            y += h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn porosity() -> NumberField {
        NumberField {
            min: 0.0,
            max: 1.0,
            default: 0.365,
            step: 0.001,
            format: NumberFormat::Fixed(3),
        }
    }

    fn diffusivity() -> NumberField {
        NumberField {
            min: 0.0,
            max: 1e-5,
            default: 9.5e-8,
            step: 1e-9,
            format: NumberFormat::Scientific(2),
        }
    }

    #[test]
    fn parses_printf_patterns() {
        assert_eq!(NumberFormat::parse("%.3f"), Some(NumberFormat::Fixed(3)));
        assert_eq!(NumberFormat::parse("%.2e"), Some(NumberFormat::Scientific(2)));
        assert_eq!(NumberFormat::parse("%d"), None);
        assert_eq!(NumberFormat::parse("%."), None);
        assert_eq!(NumberFormat::parse("%.3é"), None);
        assert_eq!(NumberFormat::parse("%.é"), None);
        assert_eq!(NumberFormat::parse("%.f"), None);
    }

    #[test]
    fn scientific_uses_signed_two_digit_exponent() {
        let fmt = NumberFormat::Scientific(2);
        assert_eq!(fmt.format(9.5e-8), "9.50e-08");
        assert_eq!(fmt.format(1.75e-7), "1.75e-07");
        assert_eq!(fmt.format(12345.0), "1.23e+04");
        assert_eq!(fmt.format(0.0), "0.00e+00");
        assert_eq!(fmt.format(1e-100), "1.00e-100");
    }

    #[test]
    fn fixed_format() {
        assert_eq!(NumberFormat::Fixed(3).format(0.365), "0.365");
        assert_eq!(NumberFormat::Fixed(3).format(1.0), "1.000");
    }

    #[test]
    fn clamp_and_nan() {
        let field = porosity();
        assert_eq!(field.clamp(2.0), 1.0);
        assert_eq!(field.clamp(-0.5), 0.0);
        assert_eq!(field.clamp(f64::NAN), 0.365);
    }

    #[test]
    fn stepping_moves_by_step_and_stops_at_bounds() {
        let mut state = NumberInputState::new(porosity());
        assert!(state.step_up());
        assert_eq!(state.field().format(state.value()), "0.366");
        assert!(state.step_down());
        assert!(state.step_down());
        assert_eq!(state.display_text(), "0.364");

        state.set_value(1.0);
        assert!(!state.step_up());
        assert_eq!(state.value(), 1.0);
    }

    #[test]
    fn typed_edit_commits_clamped_value() {
        let mut state = NumberInputState::new(diffusivity());
        for ch in "1.2e-7".chars() {
            assert!(state.insert_char(ch));
        }
        assert!(!state.insert_char('x'));
        assert_eq!(state.display_text(), "1.2e-7");
        assert!(state.commit());
        assert_eq!(state.value(), 1.2e-7);
        assert!(!state.is_editing());

        for ch in "5".chars() {
            state.insert_char(ch);
        }
        assert!(state.commit());
        assert_eq!(state.value(), 1e-5);
    }

    #[test]
    fn invalid_edit_reverts() {
        let mut state = NumberInputState::new(porosity());
        state.insert_char('-');
        state.insert_char('-');
        assert!(!state.commit());
        assert_eq!(state.value(), 0.365);
        assert_eq!(state.display_text(), "0.365");
    }

    #[test]
    fn backspace_edits_shown_value_and_cancel_restores() {
        let mut state = NumberInputState::new(porosity());
        state.backspace();
        assert_eq!(state.display_text(), "0.36");
        state.insert_char('9');
        assert_eq!(state.display_text(), "0.369");
        state.cancel();
        assert_eq!(state.display_text(), "0.365");
    }

    #[test]
    fn committing_same_value_reports_unchanged() {
        let mut state = NumberInputState::new(porosity());
        for ch in "0.365".chars() {
            state.insert_char(ch);
        }
        assert!(!state.commit());
    }

    #[test]
    fn renders_label_box_and_help() {
        let state = NumberInputState::new(porosity());
        let input = NumberInput::new("Porosity", &state).help("Fraction of void space");
        assert_eq!(input.height(24), 5);
        let mut frame = Frame::new(24, 5);
        input.render(frame.area(), &mut frame);
        assert_eq!(
            frame.buffer.to_text(),
            "Porosity\n\
             ╭──────────────────────╮\n\
             │0.365             − + │\n\
             ╰──────────────────────╯\n\
             Fraction of void space"
        );
        assert_eq!(frame.cursor(), None);
    }

    #[test]
    fn editing_sets_cursor_after_text() {
        let mut state = NumberInputState::new(porosity());
        state.insert_char('0');
        state.insert_char('.');
        let input = NumberInput::new("Porosity", &state).focused(true);
        let mut frame = Frame::new(24, 4);
        input.render(frame.area(), &mut frame);
        assert_eq!(frame.cursor(), Some((3, 2)));
    }

    #[test]
    fn long_label_wraps_above_the_box() {
        let state = NumberInputState::new(diffusivity());
        let input = NumberInput::new("Effective diffusivity (유효확산도)", &state);
        assert_eq!(input.height(24), 5);
        let mut frame = Frame::new(24, 5);
        input.render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "Effective diffusivity");
        assert_eq!(frame.buffer.row_text(1), "(유효확산도)");
        assert!(frame.buffer.row_text(3).contains("9.50e-08"));
    }

    #[test]
    fn warning_adds_rows() {
        let state = NumberInputState::new(porosity());
        let input = NumberInput::new("Porosity", &state).warning(Some("outside typical range"));
        assert_eq!(input.height(30), 5);
        let mut frame = Frame::new(30, 5);
        input.render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(4), "⚠ outside typical range");
    }
}

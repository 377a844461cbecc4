#![forbid(unsafe_code)]

//! The sidebar form: two bounded number inputs and the predict button.

use bcap_model::FeatureRow;
use bcap_widgets::number_input::{NumberField, NumberFormat, NumberInputState};

use crate::content::keys;

/// Model column names, in the order the model was fit on.
pub const SCHEMA: [&str; 2] = ["Porosity", "diffusivity"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Porosity,
    Diffusivity,
}

/// Static description of one numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    /// Column the value is sent to the model under.
    pub column: &'static str,
    pub label_key: &'static str,
    pub help_key: &'static str,
    pub field: NumberField,
    /// Range the training data covered. Values outside it are accepted
    /// but flagged.
    pub typical: (f64, f64),
}

pub const POROSITY: FieldSpec = FieldSpec {
    id: FieldId::Porosity,
    column: SCHEMA[0],
    label_key: keys::POROSITY_LABEL,
    help_key: keys::POROSITY_HELP,
    field: NumberField {
        min: 0.0,
        max: 1.0,
        default: 0.365,
        step: 0.001,
        format: NumberFormat::Fixed(3),
    },
    typical: (0.313, 0.428),
};

pub const DIFFUSIVITY: FieldSpec = FieldSpec {
    id: FieldId::Diffusivity,
    column: SCHEMA[1],
    label_key: keys::DIFFUSIVITY_LABEL,
    help_key: keys::DIFFUSIVITY_HELP,
    field: NumberField {
        min: 1e-9,
        max: 1e-6,
        default: 9.5e-8,
        step: 1e-9,
        format: NumberFormat::Scientific(2),
    },
    typical: (4.22e-8, 1.75e-7),
};

impl FieldSpec {
    pub fn get(id: FieldId) -> &'static FieldSpec {
        match id {
            FieldId::Porosity => &POROSITY,
            FieldId::Diffusivity => &DIFFUSIVITY,
        }
    }

    pub fn is_typical(&self, value: f64) -> bool {
        (self.typical.0..=self.typical.1).contains(&value)
    }

    pub fn format(&self, value: f64) -> String {
        self.field.format(value)
    }
}

/// The committed values of both inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormValues {
    pub porosity: f64,
    pub diffusivity: f64,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            porosity: POROSITY.field.default,
            diffusivity: DIFFUSIVITY.field.default,
        }
    }
}

impl FormValues {
    pub fn get(&self, id: FieldId) -> f64 {
        match id {
            FieldId::Porosity => self.porosity,
            FieldId::Diffusivity => self.diffusivity,
        }
    }

    /// The single-row record sent to the model.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::new()
            .with(POROSITY.column, self.porosity)
            .with(DIFFUSIVITY.column, self.diffusivity)
    }
}

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Porosity,
    Diffusivity,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Porosity => Self::Diffusivity,
            Self::Diffusivity => Self::Button,
            Self::Button => Self::Porosity,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Porosity => Self::Button,
            Self::Diffusivity => Self::Porosity,
            Self::Button => Self::Diffusivity,
        }
    }

    pub fn field(self) -> Option<FieldId> {
        match self {
            Self::Porosity => Some(FieldId::Porosity),
            Self::Diffusivity => Some(FieldId::Diffusivity),
            Self::Button => None,
        }
    }
}

/// Interactive state of the whole form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    porosity: NumberInputState,
    diffusivity: NumberInputState,
    focus: Focus,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            porosity: NumberInputState::new(POROSITY.field),
            diffusivity: NumberInputState::new(DIFFUSIVITY.field),
            focus: Focus::default(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> FormValues {
        FormValues {
            porosity: self.porosity.value(),
            diffusivity: self.diffusivity.value(),
        }
    }

    /// Set both values, clamping each to its field. Returns whether either
    /// committed value changed.
    pub fn set_values(&mut self, values: FormValues) -> bool {
        let a = self.porosity.set_value(values.porosity);
        let b = self.diffusivity.set_value(values.diffusivity);
        a || b
    }

    pub fn input(&self, id: FieldId) -> &NumberInputState {
        match id {
            FieldId::Porosity => &self.porosity,
            FieldId::Diffusivity => &self.diffusivity,
        }
    }

    pub fn input_mut(&mut self, id: FieldId) -> &mut NumberInputState {
        match id {
            FieldId::Porosity => &mut self.porosity,
            FieldId::Diffusivity => &mut self.diffusivity,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The focused input, if an input (not the button) has focus.
    pub fn focused_input_mut(&mut self) -> Option<&mut NumberInputState> {
        let id = self.focus.field()?;
        Some(self.input_mut(id))
    }

    /// Whether the focused input has an uncommitted edit.
    pub fn is_editing(&self) -> bool {
        self.focus
            .field()
            .is_some_and(|id| self.input(id).is_editing())
    }

    /// Commit any edit and move focus forward. Returns whether a value changed.
    pub fn focus_next(&mut self) -> bool {
        let changed = self.commit_focused();
        self.focus = self.focus.next();
        changed
    }

    pub fn focus_prev(&mut self) -> bool {
        let changed = self.commit_focused();
        self.focus = self.focus.prev();
        changed
    }

    pub fn commit_focused(&mut self) -> bool {
        self.focused_input_mut().is_some_and(NumberInputState::commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_field_table() {
        let values = FormState::new().values();
        assert_eq!(values, FormValues::default());
        assert_eq!(POROSITY.format(values.porosity), "0.365");
        assert_eq!(DIFFUSIVITY.format(values.diffusivity), "9.50e-08");
    }

    #[test]
    fn field_formats_follow_printf_patterns() {
        assert_eq!(NumberFormat::parse("%.3f"), Some(POROSITY.field.format));
        assert_eq!(NumberFormat::parse("%.2e"), Some(DIFFUSIVITY.field.format));
    }

    #[test]
    fn row_uses_model_column_names() {
        let row = FormValues::default().to_row();
        let names: Vec<&str> = row.columns().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, SCHEMA);
        assert_eq!(row.get("Porosity"), Some(0.365));
    }

    #[test]
    fn focus_ring_cycles_through_button() {
        let mut focus = Focus::Porosity;
        let mut seen = Vec::new();
        for _ in 0..3 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(seen, [Focus::Diffusivity, Focus::Button, Focus::Porosity]);
        assert_eq!(Focus::Porosity.prev(), Focus::Button);
    }

    #[test]
    fn typical_ranges_are_inclusive() {
        assert!(POROSITY.is_typical(0.313));
        assert!(POROSITY.is_typical(0.428));
        assert!(!POROSITY.is_typical(0.5));
        assert!(DIFFUSIVITY.is_typical(9.5e-8));
        assert!(!DIFFUSIVITY.is_typical(1e-9));
    }

    #[test]
    fn set_values_clamps() {
        let mut form = FormState::new();
        assert!(form.set_values(FormValues {
            porosity: 1.5,
            diffusivity: 1e-3,
        }));
        assert_eq!(
            form.values(),
            FormValues {
                porosity: 1.0,
                diffusivity: 1e-6,
            }
        );
    }

    #[test]
    fn moving_focus_commits_the_edit() {
        let mut form = FormState::new();
        for ch in "0.4".chars() {
            form.focused_input_mut().expect("input focused").insert_char(ch);
        }
        assert!(form.is_editing());
        assert!(form.focus_next());
        assert!(!form.is_editing());
        assert_eq!(form.focus(), Focus::Diffusivity);
        assert_eq!(form.values().porosity, 0.4);
    }
}

#![forbid(unsafe_code)]

//! The dashboard as a runtime [`Model`].
//!
//! The page is re-described after every form interaction. A pass caused by
//! the predict button runs the model; any other value change re-describes
//! the page without the trigger, which drops the previous result.
//!
//! | key                 | action                                      |
//! |---------------------|---------------------------------------------|
//! | Tab / Shift+Tab     | next / previous control (commits an edit)   |
//! | ↑ ↓ or + -          | step the focused value                      |
//! | digits . e - +      | type a value into the focused input         |
//! | Enter               | commit the edit, or predict on the button   |
//! | Space               | predict on the button                       |
//! | Esc                 | drop the edit                               |
//! | u / i               | toggle the usage / model information panel |
//! | L                   | switch language                             |
//! | q, Ctrl+C           | quit (`q` only while not typing)            |

use bcap_i18n::StringCatalog;
use bcap_render::Frame;
use bcap_runtime::{Cmd, Event, KeyCode, KeyEvent, Model};

use crate::content::{LOCALES, Strings, catalog};
use crate::form::{Focus, FormState, FormValues};
use crate::page::{MainPanel, ModelStatus, PageDescription, describe_page};
use crate::view::{self, Panels};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Key(KeyEvent),
    Paste(String),
    Resize,
    /// Enter both values as if typed and committed.
    SetValues(FormValues),
    /// Press the predict button.
    Predict,
    ToggleUsage,
    ToggleModelInfo,
    SetLocale(String),
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::Key(key),
            Event::Paste(text) => Self::Paste(text),
            Event::Resize { .. } => Self::Resize,
        }
    }
}

pub struct Dashboard {
    status: ModelStatus,
    catalog: StringCatalog,
    locale: String,
    form: FormState,
    panels: Panels,
    /// Whether the current page came from a predict press.
    triggered: bool,
    page: PageDescription,
}

impl Dashboard {
    pub fn new(status: ModelStatus, locale: impl Into<String>) -> Self {
        let catalog = catalog();
        let locale = locale.into();
        let form = FormState::new();
        let page = describe_page(
            &status,
            form.values(),
            false,
            &Strings::new(&catalog, &locale),
        );
        Self {
            status,
            catalog,
            locale,
            form,
            panels: Panels::default(),
            triggered: false,
            page,
        }
    }

    pub fn page(&self) -> &PageDescription {
        &self.page
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether the page currently shows a prediction outcome.
    pub fn shows_result(&self) -> bool {
        matches!(
            self.page.body.as_ref().map(|b| &b.main),
            Some(MainPanel::Result { .. } | MainPanel::Failed { .. })
        )
    }

    fn rerun(&mut self, trigger_fired: bool) {
        self.triggered = trigger_fired;
        self.page = describe_page(
            &self.status,
            self.form.values(),
            trigger_fired,
            &Strings::new(&self.catalog, &self.locale),
        );
    }

    /// Re-run without the trigger when a committed value changed.
    fn after_value_change(&mut self, changed: bool) {
        if changed {
            self.rerun(false);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        if key.ctrl() && key.is_char('c') {
            return Cmd::quit();
        }
        if !self.status.is_ready() {
            return match key.code {
                KeyCode::Char('q') | KeyCode::Escape => Cmd::quit(),
                KeyCode::Char('L') => self.cycle_locale(),
                _ => Cmd::none(),
            };
        }

        if self.form.is_editing() {
            self.handle_edit_key(key);
            return Cmd::none();
        }

        match key.code {
            KeyCode::Char('q') => return Cmd::quit(),
            KeyCode::Char('u') => self.panels.usage_open = !self.panels.usage_open,
            KeyCode::Char('i') => self.panels.model_info_open = !self.panels.model_info_open,
            KeyCode::Char('L') => return self.cycle_locale(),
            KeyCode::Tab => {
                let changed = self.form.focus_next();
                self.after_value_change(changed);
            }
            KeyCode::BackTab => {
                let changed = self.form.focus_prev();
                self.after_value_change(changed);
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.form.focus() == Focus::Button => {
                self.rerun(true);
            }
            _ => self.handle_field_key(key),
        }
        Cmd::none()
    }

    /// Keys while the focused input has an uncommitted edit.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(input) = self.form.focused_input_mut() else {
            return;
        };
        let changed = match key.code {
            KeyCode::Char(ch) => {
                input.insert_char(ch);
                false
            }
            KeyCode::Backspace => {
                input.backspace();
                false
            }
            KeyCode::Escape => {
                input.cancel();
                false
            }
            KeyCode::Enter => input.commit(),
            KeyCode::Up => input.step_up(),
            KeyCode::Down => input.step_down(),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            _ => false,
        };
        self.after_value_change(changed);
    }

    /// Keys on a focused input that is not being edited.
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(input) = self.form.focused_input_mut() else {
            return;
        };
        let changed = match key.code {
            KeyCode::Up | KeyCode::Char('+') => input.step_up(),
            KeyCode::Down | KeyCode::Char('-') => input.step_down(),
            KeyCode::Backspace => {
                input.backspace();
                false
            }
            KeyCode::Char(ch) => {
                input.insert_char(ch);
                false
            }
            _ => false,
        };
        self.after_value_change(changed);
    }

    fn cycle_locale(&mut self) -> Cmd<Msg> {
        let current = LOCALES
            .iter()
            .position(|l| self.locale.starts_with(l))
            .unwrap_or(0);
        let next = LOCALES[(current + 1) % LOCALES.len()];
        self.set_locale(next.to_string())
    }

    fn set_locale(&mut self, locale: String) -> Cmd<Msg> {
        self.locale = locale;
        // Same values and trigger: only the language of the page changes.
        self.rerun(self.triggered);
        Cmd::log(format!("locale switched to {}", self.locale))
    }
}

impl Model for Dashboard {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::log(format!(
            "dashboard started (locale {}, model {:?})",
            self.locale, self.status
        ))
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Paste(text) => {
                if self.status.is_ready() {
                    if let Some(input) = self.form.focused_input_mut() {
                        for ch in text.trim().chars() {
                            input.insert_char(ch);
                        }
                    }
                }
                Cmd::none()
            }
            Msg::Resize => Cmd::none(),
            Msg::SetValues(values) => {
                let changed = self.form.set_values(values);
                self.after_value_change(changed);
                Cmd::none()
            }
            Msg::Predict => {
                if self.status.is_ready() {
                    self.rerun(true);
                }
                Cmd::none()
            }
            Msg::ToggleUsage => {
                self.panels.usage_open = !self.panels.usage_open;
                Cmd::none()
            }
            Msg::ToggleModelInfo => {
                self.panels.model_info_open = !self.panels.model_info_open;
                Cmd::none()
            }
            Msg::SetLocale(locale) => self.set_locale(locale),
            Msg::Quit => Cmd::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        view::render(&self.page, &self.form, self.panels, frame);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bcap_model::{FeatureRow, InferenceError, ModelSummary, Regressor};

    use super::*;
    use crate::form::{FieldId, POROSITY};

    struct Echo(Vec<String>);

    impl Regressor for Echo {
        fn feature_names(&self) -> &[String] {
            &self.0
        }

        /// Capacity rises with porosity so distinct inputs give distinct results.
        fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
            rows.iter()
                .map(|row| row.align(&self.0).map(|v| 90.0 + 10.0 * v[0]))
                .collect()
        }

        fn describe(&self) -> ModelSummary {
            ModelSummary {
                algorithm: "echo".into(),
                objective: "reg:squarederror".into(),
                num_trees: 1,
                feature_names: self.0.clone(),
                importance: None,
            }
        }
    }

    fn dashboard() -> Dashboard {
        let model = Arc::new(Echo(vec!["Porosity".into(), "diffusivity".into()]));
        Dashboard::new(ModelStatus::Ready(model), "en")
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code))
    }

    fn capacity(app: &Dashboard) -> Option<String> {
        match &app.page().body.as_ref()?.main {
            MainPanel::Result { capacity, .. } => Some(capacity.clone()),
            _ => None,
        }
    }

    #[test]
    fn predict_then_step_clears_the_result() {
        let mut app = dashboard();
        app.update(Msg::Predict);
        assert_eq!(capacity(&app).as_deref(), Some("93.65%"));

        app.update(key(KeyCode::Up));
        assert!(!app.shows_result());
        assert_eq!(POROSITY.format(app.form().values().porosity), "0.366");
    }

    #[test]
    fn button_press_via_keyboard() {
        let mut app = dashboard();
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        assert_eq!(app.form().focus(), Focus::Button);
        app.update(key(KeyCode::Enter));
        assert!(app.shows_result());
    }

    #[test]
    fn focus_and_panels_keep_the_result() {
        let mut app = dashboard();
        app.update(Msg::Predict);
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Char('u')));
        app.update(key(KeyCode::Char('i')));
        assert!(app.shows_result());
        assert!(app.panels().usage_open && app.panels().model_info_open);
    }

    #[test]
    fn typed_value_commits_on_enter() {
        let mut app = dashboard();
        for ch in "0.4".chars() {
            app.update(key(KeyCode::Char(ch)));
        }
        assert!(app.form().input(FieldId::Porosity).is_editing());
        app.update(key(KeyCode::Char('q')));
        assert!(app.form().is_editing(), "q is typed, not quit, while editing");
        app.update(key(KeyCode::Escape));
        assert_eq!(app.form().values().porosity, 0.365);

        for ch in "0.4".chars() {
            app.update(key(KeyCode::Char(ch)));
        }
        app.update(key(KeyCode::Enter));
        assert_eq!(app.form().values().porosity, 0.4);
    }

    #[test]
    fn quit_keys() {
        let mut app = dashboard();
        assert!(matches!(app.update(key(KeyCode::Char('q'))), Cmd::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(bcap_runtime::Modifiers::CTRL);
        assert!(matches!(app.update(Msg::Key(ctrl_c)), Cmd::Quit));
    }

    #[test]
    fn locale_switch_keeps_the_result() {
        let mut app = dashboard();
        app.update(Msg::Predict);
        app.update(key(KeyCode::Char('L')));
        assert_eq!(app.locale(), "ko");
        assert!(app.shows_result());
        assert_eq!(app.page().title, "배터리 용량 예측기");
        app.update(key(KeyCode::Char('L')));
        assert_eq!(app.locale(), "en");
    }

    #[test]
    fn unavailable_model_ignores_form_keys() {
        use crate::page::{FailureKind, LoadFailure};
        let mut app = Dashboard::new(
            ModelStatus::Unavailable(LoadFailure {
                kind: FailureKind::NotFound,
                path: "battery_model.json".into(),
                detail: String::new(),
            }),
            "en",
        );
        app.update(Msg::Predict);
        app.update(key(KeyCode::Up));
        assert!(app.page().body.is_none());
        assert_eq!(app.page().notices.len(), 2);
    }
}

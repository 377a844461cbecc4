#![forbid(unsafe_code)]

//! Draws a [`PageDescription`] into a frame.
//!
//! ```text
//! Title
//! subtitle
//! ──────────────────────────────────────────────
//! ✔ Model loaded successfully!
//! Input parameters │ result or example │ materials
//! [porosity]       │                   │
//! [diffusivity]    │ ────────────────────────────
//! [ Predict ]      │ ▸ How to use
//!                  │ ▸ Model information
//!                  │ ────────────────────────────
//!                  │          footer
//! key hints
//! ```
//!
//! When the materials column would truncate, it moves below the main
//! panel instead. Everything is clipped to the frame; small terminals lose
//! the bottom of the page rather than failing.

use bcap_render::{Color, Frame, Rect, Sides, Style};
use bcap_widgets::block::{Alignment, Block, BorderType, Borders};
use bcap_widgets::button::Button;
use bcap_widgets::expander::Expander;
use bcap_widgets::metric::Metric;
use bcap_widgets::notice::{Notice, NoticeKind};
use bcap_widgets::number_input::NumberInput;
use bcap_widgets::paragraph::Paragraph;
use bcap_widgets::rule::Rule;
use bcap_widgets::table::Table;
use bcap_widgets::text::{MarkupStyles, Text};
use bcap_widgets::{Constraint, Flex, Widget};

use crate::form::{FieldId, Focus, FormState};
use crate::page::{InfoPanel, MainPanel, NoticeSpec, PageBody, PageDescription, Sidebar};

const SIDEBAR_MIN: u16 = 24;
const SIDEBAR_MAX: u16 = 36;

/// Which collapsible sections are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    pub usage_open: bool,
    pub model_info_open: bool,
}

fn markup_styles() -> MarkupStyles {
    MarkupStyles {
        body: Style::new(),
        heading: Style::new().bold().fg(Color::Cyan),
        strong: Style::new().bold(),
    }
}

fn heading_style() -> Style {
    Style::new().bold()
}

fn rule_style() -> Style {
    Style::new().fg(Color::DarkGray)
}

/// Fixed-height rows stacked top to bottom inside `area`.
fn stack(area: Rect, heights: &[u16]) -> Vec<Rect> {
    Flex::vertical()
        .constraints(heights.iter().map(|&h| Constraint::Fixed(h)))
        .split(area)
}

fn notice<'a>(spec: &'a NoticeSpec) -> Notice<'a> {
    Notice::new(spec.kind, &spec.message)
}

pub fn render(page: &PageDescription, form: &FormState, panels: Panels, frame: &mut Frame) {
    let area = frame.area().inner(Sides::horizontal(1));
    if area.is_empty() {
        return;
    }
    let width = area.width;

    let title = Paragraph::new(Text::from(page.title.as_str()))
        .style(heading_style().fg(Color::Cyan))
        .wrap(true);
    let subtitle = Paragraph::new(Text::from_markup(&page.subtitle, markup_styles())).wrap(true);
    let notices: Vec<Notice<'_>> = page.notices.iter().map(notice).collect();

    let mut heights = vec![title.height(width), subtitle.height(width), 1];
    heights.extend(notices.iter().map(|n| n.height(width)));
    let header_height: u16 = heights.iter().fold(0u16, |acc, &h| acc.saturating_add(h));
    let rows = stack(area, &heights);

    title.render(rows[0], frame);
    subtitle.render(rows[1], frame);
    Rule::new().style(rule_style()).render(rows[2], frame);
    for (notice, row) in notices.iter().zip(&rows[3..]) {
        notice.render(*row, frame);
    }

    let Some(body) = &page.body else {
        return;
    };
    let top = area.y.saturating_add(header_height).min(area.bottom());
    let rest = Rect::new(area.x, top, area.width, area.bottom() - top);
    if rest.height < 2 {
        return;
    }
    let [content, hints] = split_last_row(rest);
    render_body(body, form, panels, content, frame);
    Paragraph::new(Text::from(body.key_hints.as_str()))
        .style(Style::new().dim())
        .render(hints, frame);
}

fn split_last_row(area: Rect) -> [Rect; 2] {
    let content = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let last = Rect::new(area.x, content.bottom(), area.width, area.height - content.height);
    [content, last]
}

fn render_body(body: &PageBody, form: &FormState, panels: Panels, area: Rect, frame: &mut Frame) {
    let sidebar_width = (area.width / 3).clamp(SIDEBAR_MIN, SIDEBAR_MAX).min(area.width);
    let columns = Flex::horizontal()
        .constraints([Constraint::Fixed(sidebar_width), Constraint::Min(0)])
        .gap(1)
        .split(area);

    let sidebar_block = Block::new()
        .borders(Borders::RIGHT)
        .border_style(rule_style());
    let sidebar_inner = sidebar_block.inner(columns[0]);
    sidebar_block.render(columns[0], frame);
    render_sidebar(&body.sidebar, form, sidebar_inner.inner(Sides::new(1, 1, 0, 0)), frame);

    render_main(body, panels, columns[1].inner(Sides::new(1, 0, 0, 1)), frame);
}

fn render_sidebar(sidebar: &Sidebar, form: &FormState, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let width = area.width;
    let focus = form.focus();
    let prompt = Paragraph::new(Text::from(sidebar.prompt.as_str()))
        .style(Style::new().dim())
        .wrap(true);
    let inputs: Vec<NumberInput<'_>> = [FieldId::Porosity, FieldId::Diffusivity]
        .iter()
        .zip(&sidebar.fields)
        .map(|(&id, text)| {
            NumberInput::new(&text.label, form.input(id))
                .help(&text.help)
                .warning(text.warning.as_deref())
                .focused(focus.field() == Some(id))
        })
        .collect();
    let button = Button::new(&sidebar.button).focused(focus == Focus::Button);

    let mut heights = vec![1, prompt.height(width), 1];
    for input in &inputs {
        heights.push(input.height(width));
        heights.push(1);
    }
    heights.push(1);
    let rows = stack(area, &heights);

    Paragraph::new(Text::from(sidebar.header.as_str()))
        .style(heading_style())
        .render(rows[0], frame);
    prompt.render(rows[1], frame);
    for (i, input) in inputs.iter().enumerate() {
        input.render(rows[3 + 2 * i], frame);
    }
    button.render(rows[rows.len() - 1], frame);
}

const MAIN_GAP: u16 = 2;

/// Where the main panel and the info panel go, plus the rows they use.
///
/// The two sit side by side when both fit without truncation, the main
/// panel taking up to two thirds. Otherwise the info panel moves below.
fn main_layout(body: &PageBody, area: Rect) -> (Rect, Rect, u16) {
    let main_needed = main_panel_min_width(&body.main);
    let info_needed = info_panel_min_width(&body.info);
    let fits = main_needed
        .checked_add(MAIN_GAP)
        .and_then(|w| w.checked_add(info_needed))
        .is_some_and(|w| w <= area.width);

    if fits {
        let share = area.width.saturating_sub(MAIN_GAP) / 3 * 2;
        let left = share
            .min(area.width - MAIN_GAP - info_needed)
            .max(main_needed);
        let columns = Flex::horizontal()
            .constraints([Constraint::Fixed(left), Constraint::Min(0)])
            .gap(MAIN_GAP)
            .split(area);
        let height = main_panel_height(&body.main, columns[0].width)
            .max(info_panel_height(&body.info, columns[1].width))
            .min(area.height);
        let main = Rect::new(columns[0].x, area.y, columns[0].width, height);
        let info = Rect::new(columns[1].x, area.y, columns[1].width, height);
        (main, info, height)
    } else {
        let main_height = main_panel_height(&body.main, area.width).min(area.height);
        let info_top = area.y + main_height;
        let info_height = info_panel_height(&body.info, area.width)
            .saturating_add(1)
            .min(area.bottom() - info_top);
        let main = Rect::new(area.x, area.y, area.width, main_height);
        // one blank row between the panels
        let info = Rect::new(
            area.x,
            (info_top + 1).min(area.bottom()),
            area.width,
            info_height.saturating_sub(1),
        );
        (main, info, main_height + info_height)
    }
}

fn render_main(body: &PageBody, panels: Panels, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let (main, info, top_height) = main_layout(body, area);
    render_main_panel(&body.main, main, frame);
    render_info_panel(&body.info, info, frame);

    let usage = Expander::new(&body.usage.title, Text::from_markup(&body.usage.markup, markup_styles()))
        .expanded(panels.usage_open);
    let model_info = Expander::new(
        &body.model_info.title,
        Text::from_markup(&body.model_info.markup, markup_styles()),
    )
    .expanded(panels.model_info_open);
    let footer = Paragraph::new(Text::from(body.footer.as_str()))
        .style(Style::new().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(true);

    let below = Rect::new(area.x, area.y + top_height, area.width, area.height - top_height);
    let width = below.width;
    let rows = stack(
        below,
        &[
            1,
            1,
            usage.height(width),
            model_info.height(width),
            1,
            footer.height(width),
        ],
    );
    Rule::new().style(rule_style()).render(rows[1], frame);
    usage.render(rows[2], frame);
    model_info.render(rows[3], frame);
    Rule::new().style(rule_style()).render(rows[4], frame);
    footer.render(rows[5], frame);
}

fn example_table(columns: &[String], rows: &[Vec<String>]) -> Table {
    let table = Table::new(rows.to_vec(), [])
        .header(columns.to_vec())
        .header_style(Style::new().bold())
        .separator_style(rule_style());
    let widths: Vec<Constraint> = table.content_widths().into_iter().map(Constraint::Min).collect();
    table.widths(widths)
}

const CAPACITY_BOX_HEIGHT: u16 = 3;

fn main_panel_min_width(panel: &MainPanel) -> u16 {
    match panel {
        MainPanel::Example { columns, rows, .. } => example_table(columns, rows).content_width(),
        MainPanel::Result { .. } | MainPanel::Failed { .. } => 0,
    }
}

fn echo_height(echo: &[(String, String); 2], width: u16) -> u16 {
    let half = width.saturating_sub(MAIN_GAP) / 2;
    echo.iter()
        .map(|(label, value)| Metric::new(label, value).height(half))
        .max()
        .unwrap_or(0)
}

fn main_panel_height(panel: &MainPanel, width: u16) -> u16 {
    match panel {
        MainPanel::Example {
            hint,
            columns,
            rows,
            ..
        } => Notice::info(hint)
            .height(width)
            .saturating_add(2)
            .saturating_add(example_table(columns, rows).height()),
        MainPanel::Result { echo, .. } => {
            (1 + CAPACITY_BOX_HEIGHT + 1 + 1u16).saturating_add(echo_height(echo, width))
        }
        MainPanel::Failed { message } => Notice::error(message).height(width),
    }
}

fn render_main_panel(panel: &MainPanel, area: Rect, frame: &mut Frame) {
    let width = area.width;
    match panel {
        MainPanel::Example {
            hint,
            header,
            columns,
            rows,
        } => {
            let hint = Notice::info(hint);
            let table = example_table(columns, rows);
            let rects = stack(area, &[hint.height(width), 1, 1, table.height()]);
            hint.render(rects[0], frame);
            Paragraph::new(Text::from(header.as_str()))
                .style(heading_style())
                .render(rects[2], frame);
            table.render(rects[3], frame);
        }
        MainPanel::Result {
            header,
            capacity_label,
            capacity,
            inputs_header,
            echo,
        } => {
            let rects = stack(area, &[1, CAPACITY_BOX_HEIGHT, 1, 1, echo_height(echo, width)]);
            Paragraph::new(Text::from(header.as_str()))
                .style(heading_style())
                .render(rects[0], frame);

            let card = Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::new().fg(Color::Green))
                .title(capacity_label)
                .title_style(Style::new().fg(Color::Green).bold());
            let inner = card.inner(rects[1]);
            card.render(rects[1], frame);
            Paragraph::new(Text::from(capacity.as_str()))
                .style(Style::new().fg(Color::Green).bold())
                .alignment(Alignment::Center)
                .render(inner, frame);

            Paragraph::new(Text::from(inputs_header.as_str()))
                .style(heading_style())
                .render(rects[3], frame);
            let metric_columns = Flex::horizontal()
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .gap(MAIN_GAP)
                .split(rects[4]);
            for ((label, value), rect) in echo.iter().zip(metric_columns) {
                Metric::new(label, value).render(rect, frame);
            }
        }
        MainPanel::Failed { message } => {
            Notice::new(NoticeKind::Error, message).render(area, frame);
        }
    }
}

fn info_panel_min_width(info: &InfoPanel) -> u16 {
    let widest = info
        .metrics
        .iter()
        .flat_map(|(label, value)| [label, value])
        .chain(std::iter::once(&info.header))
        .map(|text| bcap_render::display_width(text))
        .max()
        .unwrap_or(0);
    u16::try_from(widest).unwrap_or(u16::MAX)
}

fn info_metrics(info: &InfoPanel) -> impl Iterator<Item = Metric<'_>> {
    info.metrics.iter().map(|(label, value)| Metric::new(label, value))
}

fn info_panel_height(info: &InfoPanel, width: u16) -> u16 {
    info_metrics(info).fold(1u16, |acc, metric| acc.saturating_add(metric.height(width)))
}

fn render_info_panel(info: &InfoPanel, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let metrics: Vec<Metric<'_>> = info_metrics(info).collect();
    let mut heights = vec![1];
    heights.extend(metrics.iter().map(|m| m.height(area.width)));
    let rects = stack(area, &heights);
    Paragraph::new(Text::from(info.header.as_str()))
        .style(heading_style())
        .render(rects[0], frame);
    for (metric, rect) in metrics.iter().zip(&rects[1..]) {
        metric.render(*rect, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Strings, catalog};
    use crate::form::FormValues;
    use crate::page::{FailureKind, LoadFailure, ModelStatus, describe_page};

    #[test]
    fn unavailable_model_draws_only_header_and_errors() {
        let catalog = catalog();
        let status = ModelStatus::Unavailable(LoadFailure {
            kind: FailureKind::NotFound,
            path: "battery_model.json".into(),
            detail: String::new(),
        });
        let page = describe_page(&status, FormValues::default(), false, &Strings::new(&catalog, "en"));
        let mut frame = Frame::new(60, 12);
        render(&page, &FormState::new(), Panels::default(), &mut frame);
        let text = frame.buffer.to_text();
        assert!(text.contains("Battery Capacity Predictor"));
        assert!(text.contains("✖ battery_model.json could not be found!"));
        assert!(text.contains("✖ Train and save the model first."));
        assert!(!text.contains("Porosity"));
        assert!(!text.contains("Predict ]"));
    }

    #[test]
    fn materials_column_moves_below_when_it_would_truncate() {
        use std::sync::Arc;

        use bcap_model::{FeatureRow, InferenceError, ModelSummary, Regressor};

        struct Stub(Vec<String>);
        impl Regressor for Stub {
            fn feature_names(&self) -> &[String] {
                &self.0
            }
            fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
                Ok(vec![95.0; rows.len()])
            }
            fn describe(&self) -> ModelSummary {
                ModelSummary {
                    algorithm: "stub".into(),
                    objective: String::new(),
                    num_trees: 0,
                    feature_names: self.0.clone(),
                    importance: None,
                }
            }
        }

        let catalog = catalog();
        let status = ModelStatus::Ready(Arc::new(Stub(Vec::new())));
        let page = describe_page(&status, FormValues::default(), false, &Strings::new(&catalog, "en"));
        let body = page.body.as_ref().expect("form shown");

        let (main, info, height) = main_layout(body, Rect::new(0, 0, 64, 30));
        assert_eq!(main.width, 64);
        assert_eq!(info.width, 64);
        assert!(info.y > main.bottom());
        assert!(height <= 30);

        let (main, info, _) = main_layout(body, Rect::new(0, 0, 100, 30));
        assert_eq!(main.y, info.y);
        assert!(main.width >= 43, "{main:?}");
        assert!(info.width >= 46, "{info:?}");
        assert!(main.right() + MAIN_GAP <= info.x);
    }

    #[test]
    fn tiny_frames_do_not_panic() {
        let catalog = catalog();
        let status = ModelStatus::Unavailable(LoadFailure {
            kind: FailureKind::Corrupt,
            path: "m.json".into(),
            detail: "broken".into(),
        });
        let page = describe_page(&status, FormValues::default(), false, &Strings::new(&catalog, "ko"));
        for (w, h) in [(1, 1), (2, 2), (3, 40), (120, 1)] {
            let mut frame = Frame::new(w, h);
            render(&page, &FormState::new(), Panels::default(), &mut frame);
        }
    }
}

//! Property-based invariants for layout and number inputs.
//!
//! 1. `Flex::split` never produces rects outside the parent area
//! 2. Split rects along the main axis never overlap
//! 3. A number input's value stays within bounds under any key sequence
//! 4. Wrapped text never exceeds the wrap width

use bcap_render::Rect;
use bcap_widgets::number_input::{NumberField, NumberFormat, NumberInputState};
use bcap_widgets::text::wrap_line;
use bcap_widgets::{Constraint, Flex, Line};
use proptest::prelude::*;

fn constraint_strategy() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        (0u16..30).prop_map(Constraint::Fixed),
        (0.0f32..100.0).prop_map(Constraint::Percentage),
        (0u16..20).prop_map(Constraint::Min),
        (0u16..20).prop_map(Constraint::Max),
        (1u32..5, 1u32..5).prop_map(|(n, d)| Constraint::Ratio(n, d)),
    ]
}

#[derive(Debug, Clone)]
enum Key {
    Up,
    Down,
    Char(char),
    Backspace,
    Commit,
    Cancel,
}

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Up),
        Just(Key::Down),
        Just(Key::Backspace),
        Just(Key::Commit),
        Just(Key::Cancel),
        prop::sample::select(vec!['0', '1', '5', '9', '.', 'e', '-', '+', 'x'])
            .prop_map(Key::Char),
    ]
}

proptest! {
    #[test]
    fn split_stays_inside_area(
        x in 0u16..20,
        y in 0u16..20,
        width in 0u16..120,
        height in 0u16..60,
        gap in 0u16..3,
        horizontal in any::<bool>(),
        constraints in prop::collection::vec(constraint_strategy(), 1..6),
    ) {
        let area = Rect::new(x, y, width, height);
        let flex = if horizontal { Flex::horizontal() } else { Flex::vertical() };
        let rects = flex.gap(gap).constraints(constraints.clone()).split(area);
        prop_assert_eq!(rects.len(), constraints.len());

        let mut previous_end = if horizontal { area.x } else { area.y };
        for rect in &rects {
            prop_assert!(rect.x >= area.x && rect.right() <= area.right());
            prop_assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
            let (start, end) = if horizontal {
                (rect.x, rect.right())
            } else {
                (rect.y, rect.bottom())
            };
            prop_assert!(start >= previous_end);
            previous_end = end;
        }
    }

    #[test]
    fn number_input_value_stays_in_bounds(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let field = NumberField {
            min: 0.0,
            max: 1.0,
            default: 0.365,
            step: 0.001,
            format: NumberFormat::Fixed(3),
        };
        let mut state = NumberInputState::new(field);
        for key in keys {
            match key {
                Key::Up => { state.step_up(); }
                Key::Down => { state.step_down(); }
                Key::Char(ch) => { state.insert_char(ch); }
                Key::Backspace => state.backspace(),
                Key::Commit => { state.commit(); }
                Key::Cancel => state.cancel(),
            }
            prop_assert!(state.value() >= field.min && state.value() <= field.max);
        }
    }

    #[test]
    fn wrapped_rows_fit_width(words in prop::collection::vec("[a-z]{0,12}", 0..12), width in 1usize..20) {
        let line = Line::raw(words.join(" "));
        for row in wrap_line(&line, width) {
            prop_assert!(row.width() <= width);
        }
    }
}

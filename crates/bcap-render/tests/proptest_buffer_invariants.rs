//! Property-based invariants for buffer writes.
//!
//! 1. `set_string` never writes past `max_x` or the buffer width
//! 2. The dumped row text never exceeds the buffer width in columns
//! 3. Continuation cells always follow a wide head cell

use bcap_render::{Buffer, Style, display_width};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("a"),
            Just("Z"),
            Just(" "),
            Just("배"),
            Just("터"),
            Just("%"),
            Just("\t"),
            Just("e\u{0301}"),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn set_string_respects_bounds(
        width in 1u16..40,
        x in 0u16..45,
        max_x in 0u16..50,
        text in text_strategy(),
    ) {
        let mut buf = Buffer::new(width, 1);
        let end = buf.set_string(x, 0, &text, Style::new(), max_x);
        prop_assert!(end == x || end <= max_x.min(width));
        prop_assert!(display_width(&buf.row_text(0)) <= width as usize);
    }

    #[test]
    fn continuation_cells_follow_heads(
        first in text_strategy(),
        second in text_strategy(),
        offset in 0u16..12,
    ) {
        let mut buf = Buffer::new(16, 1);
        buf.set_string(0, 0, &first, Style::new(), 16);
        buf.set_string(offset, 0, &second, Style::new(), 16);
        for x in 0..16u16 {
            let cell = buf.get(x, 0).expect("in bounds");
            if cell.is_continuation() {
                prop_assert!(x > 0, "continuation at column 0");
                let head = buf.get(x - 1, 0).expect("in bounds");
                prop_assert!(
                    !head.is_continuation() && display_width(head.symbol()) == 2,
                    "orphan continuation at {x}: {:?}",
                    buf.row_text(0)
                );
            }
        }
    }
}

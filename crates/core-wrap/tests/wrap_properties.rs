//! Property tests for wrapped coordinate mapping.

use core_state::{EditBuffer, TextBuffer};
use core_text::{Position, WrapPosition, grapheme};
use core_wrap::{WrapInfo, WrapMetrics};
use proptest::prelude::*;

fn doc() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z \t漢😀]{0,40}", 1..6).prop_map(|lines| lines.join("\n"))
}

proptest! {
    // logical -> (sub_line, col) -> logical is the identity on grapheme boundaries
    #[test]
    fn logical_wrapped_round_trip(content in doc(), width in 1usize..24, tab in 1usize..9) {
        let text = EditBuffer::from_str("p", &content);
        let wrap = WrapInfo::new(width, tab);
        for line in 0..text.line_count() {
            let s = text.line_text(line);
            let mut byte = 0;
            loop {
                let pos = Position::new(line, byte);
                let wp = wrap.to_wrapped(&text, pos);
                let col = wrap.screen_col(&text, pos);
                prop_assert_eq!(wrap.line_pos(&text, line, col, wp.sub_line), byte);
                if byte >= s.len() {
                    break;
                }
                byte = grapheme::next_boundary(&s, byte);
            }
        }
    }

    // every sub-line fits the width unless it holds a single oversized grapheme
    #[test]
    fn sub_lines_fit_width(line in "[a-z \t漢😀]{0,60}", width in 1usize..24, tab in 1usize..9) {
        let wrap = WrapInfo::new(width, tab);
        let starts = wrap.breaks(&line);
        for (i, start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(line.len());
            let piece = &line[*start..end];
            let cols = grapheme::screen_col(piece, piece.len(), tab);
            prop_assert!(cols <= width || grapheme::iter(piece).count() == 1);
            prop_assert!(end > *start || line.is_empty());
        }
    }

    // moving down then up by the same amount returns to the start when nothing overflowed
    #[test]
    fn add_then_sub_is_identity(content in doc(), width in 1usize..24, n in 0usize..30) {
        let text = EditBuffer::from_str("p", &content);
        let wrap = WrapInfo::new(width, 4);
        let mut p = WrapPosition::new(0, 0);
        let overflow = wrap.add_lines(&text, &mut p, n);
        if !overflow {
            prop_assert!(!wrap.sub_lines(&text, &mut p, n));
            prop_assert_eq!(p, WrapPosition::new(0, 0));
        } else {
            prop_assert_eq!(p, wrap.end(&text));
        }
    }
}

//! Horizontal cursor motion over a [`Buffer`].
//!
//! Vertical movement is not here: it depends on tab size and wrapping, which the
//! view layer owns.

use crate::{Buffer, Position, grapheme};

/// One grapheme left. No-op at line start.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.byte > 0 {
        pos.byte = grapheme::prev_boundary(&buf.line_content(pos.line), pos.byte);
    }
}

/// One grapheme right. No-op at line end.
pub fn right(buf: &Buffer, pos: &mut Position) {
    let content = buf.line_content(pos.line);
    pos.byte = grapheme::next_boundary(&content, pos.byte).max(pos.byte);
}

fn word_at(line: &str, byte: usize) -> bool {
    grapheme::is_word(&line[byte..grapheme::next_boundary(line, byte)])
}

fn word_before(line: &str, byte: usize) -> bool {
    grapheme::is_word(&line[grapheme::prev_boundary(line, byte)..byte])
}

/// Start of the next word on the line, or the line end when there is none.
/// From the line end, the start of the next line.
pub fn word_forward(buf: &Buffer, pos: &mut Position) {
    let line = buf.line_content(pos.line);
    let mut byte = pos.byte.min(line.len());
    if byte == line.len() {
        if pos.line + 1 < buf.line_count() {
            *pos = Position::new(pos.line + 1, 0);
        }
        return;
    }
    while byte < line.len() && word_at(&line, byte) {
        byte = grapheme::next_boundary(&line, byte);
    }
    while byte < line.len() && !word_at(&line, byte) {
        byte = grapheme::next_boundary(&line, byte);
    }
    pos.byte = byte;
}

/// Start of the word the cursor is in or after. From the line start, the end
/// of the previous line.
pub fn word_backward(buf: &Buffer, pos: &mut Position) {
    if pos.byte == 0 {
        if pos.line > 0 {
            pos.line -= 1;
            pos.byte = buf.line_byte_len(pos.line);
        }
        return;
    }
    let line = buf.line_content(pos.line);
    let mut byte = pos.byte.min(line.len());
    while byte > 0 && !word_before(&line, byte) {
        byte = grapheme::prev_boundary(&line, byte);
    }
    while byte > 0 && word_before(&line, byte) {
        byte = grapheme::prev_boundary(&line, byte);
    }
    pos.byte = byte;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_over_whole_clusters() {
        let buf = Buffer::from_str("t", "ab😀c");
        let mut pos = Position::origin();
        let mut stops = Vec::new();
        for _ in 0..5 {
            right(&buf, &mut pos);
            stops.push(pos.byte);
        }
        assert_eq!(stops, vec![1, 2, 6, 7, 7]);
        left(&buf, &mut pos);
        assert_eq!(pos.byte, 6);
        left(&buf, &mut pos);
        assert_eq!(pos.byte, 2);
        pos.byte = 0;
        left(&buf, &mut pos);
        assert_eq!(pos.byte, 0);
    }

    #[test]
    fn word_forward_walks_line_then_wraps() {
        let buf = Buffer::from_str("t", "foo, bar baz\nqux");
        let mut pos = Position::new(0, 0);
        let mut stops = Vec::new();
        for _ in 0..5 {
            word_forward(&buf, &mut pos);
            stops.push(pos);
        }
        assert_eq!(
            stops,
            vec![
                Position::new(0, 5),
                Position::new(0, 9),
                Position::new(0, 12),
                Position::new(1, 0),
                Position::new(1, 3),
            ]
        );
        word_forward(&buf, &mut pos);
        assert_eq!(pos, Position::new(1, 3));
    }

    #[test]
    fn word_backward_walks_line_then_wraps() {
        let buf = Buffer::from_str("t", "foo, bar\n  qux");
        let mut pos = Position::new(1, 5);
        let expected = [
            Position::new(1, 2),
            Position::new(1, 0),
            Position::new(0, 8),
            Position::new(0, 5),
            Position::new(0, 0),
            Position::new(0, 0),
        ];
        for want in expected {
            word_backward(&buf, &mut pos);
            assert_eq!(pos, want);
        }
    }
}

//! Grapheme and screen column helpers for a single line of text.
//!
//! Byte offsets handed in are expected on grapheme boundaries; out-of-range
//! offsets are clamped rather than rejected. Screen columns count terminal
//! cells with tab stops every `tabsize` columns.

use crate::egc_width;
use unicode_segmentation::UnicodeSegmentation;

pub fn iter(line: &str) -> impl Iterator<Item = &str> {
    line.graphemes(true)
}

pub fn iter_indices(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.grapheme_indices(true)
}

/// Start of the grapheme ending at `byte`; 0 at or before the first boundary.
pub fn prev_boundary(line: &str, byte: usize) -> usize {
    if byte > line.len() {
        return 0;
    }
    iter_indices(line)
        .map(|(idx, _)| idx)
        .take_while(|&idx| idx < byte)
        .last()
        .unwrap_or(0)
}

/// End of the grapheme starting at or covering `byte`; `line.len()` at the end.
pub fn next_boundary(line: &str, byte: usize) -> usize {
    iter_indices(line)
        .map(|(idx, _)| idx)
        .find(|&idx| idx > byte)
        .unwrap_or(line.len())
}

/// Cells `g` takes when drawn at screen column `col`.
pub fn cell_width(g: &str, col: usize, tabsize: usize) -> usize {
    if g == "\t" {
        let stop = tabsize.max(1);
        stop - col % stop
    } else {
        usize::from(egc_width(g))
    }
}

/// Screen column at which the grapheme at `byte` starts.
pub fn screen_col(line: &str, byte: usize, tabsize: usize) -> usize {
    iter_indices(line)
        .take_while(|&(idx, _)| idx < byte)
        .fold(0, |col, (_, g)| col + cell_width(g, col, tabsize))
}

/// Byte offset of the grapheme covering screen column `target`, or the
/// line length when the line ends before it.
pub fn byte_at_col(line: &str, target: usize, tabsize: usize) -> usize {
    let mut col = 0;
    for (idx, g) in iter_indices(line) {
        col += cell_width(g, col, tabsize);
        if col > target {
            return idx;
        }
    }
    line.len()
}

/// Cells taken by the grapheme at `byte`; 1 at (or past) the line end.
pub fn width_at(line: &str, byte: usize, tabsize: usize) -> usize {
    if byte >= line.len() {
        return 1;
    }
    let g = &line[byte..next_boundary(line, byte)];
    cell_width(g, screen_col(line, byte, tabsize), tabsize).max(1)
}

/// Word graphemes start with an alphanumeric character or underscore.
pub fn is_word(g: &str) -> bool {
    g.chars()
        .next()
        .is_some_and(|c| c == '_' || c.is_alphanumeric())
}

/// Byte length of the leading spaces and tabs.
pub fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

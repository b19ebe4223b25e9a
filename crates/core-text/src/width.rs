//! Display width of a single grapheme cluster.
//!
//! Every column computation in the editor (cursor columns, wrap break points,
//! horizontal scrolling) goes through [`egc_width`]. The function classifies
//! the cluster into a small set of kinds and maps each kind to 1 or 2 cells.
//! The classifier errs toward 2 for anything pictographic: an extra blank cell
//! is harmless while an under-estimate shifts every following glyph.
//!
//! Tabs are not handled here because their width depends on the column they
//! start at. See `grapheme::cell_width`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Narrow,
    Wide,
    /// Pictographic cluster of any shape (simple, modified, keycap, flag, ZWJ).
    Emoji,
    /// Base followed by combining marks; the flag records a wide base.
    Combining(bool),
}

const ZWJ: char = '\u{200D}';
const KEYCAP: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

// Emoji blocks plus the misc-symbol and dingbat ranges that hold legacy emoji.
fn is_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn char_is_wide(c: char) -> bool {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(1) == 2
}

fn classify(egc: &str) -> Kind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return Kind::Narrow;
    };
    if chars.next().is_none() {
        if first.is_ascii() {
            return Kind::Narrow;
        }
        if is_pictographic(first) || is_regional_indicator(first) {
            return Kind::Emoji;
        }
        return if char_is_wide(first) {
            Kind::Wide
        } else {
            Kind::Narrow
        };
    }

    let mut pictographic = 0usize;
    let mut regional = 0usize;
    let mut zwj = false;
    let mut skin = false;
    let mut combining = false;
    let mut wide = false;
    let mut keycap_base = false;
    let mut last = first;
    for c in egc.chars() {
        pictographic += usize::from(is_pictographic(c));
        regional += usize::from(is_regional_indicator(c));
        zwj |= c == ZWJ;
        skin |= is_skin_tone(c);
        combining |= is_combining(c);
        wide |= char_is_wide(c);
        keycap_base |= c.is_ascii_digit() || c == '#' || c == '*';
        last = c;
    }

    if (last == KEYCAP && keycap_base)
        || regional > 0
        || (zwj && pictographic >= 2)
        || (pictographic >= 1 && skin)
        || pictographic >= 1
    {
        return Kind::Emoji;
    }
    if combining {
        return Kind::Combining(is_pictographic(first) || char_is_wide(first));
    }
    if wide { Kind::Wide } else { Kind::Narrow }
}

/// Terminal cell width of one grapheme cluster. Empty input is 0 cells.
///
/// The caller is responsible for segmentation; `egc` is expected to hold
/// exactly one extended grapheme cluster.
#[inline]
pub fn egc_width(egc: &str) -> u16 {
    if egc.is_empty() {
        return 0;
    }
    match classify(egc) {
        Kind::Narrow | Kind::Combining(false) => 1,
        Kind::Wide | Kind::Emoji | Kind::Combining(true) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_control() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width(" "), 1);
        assert_eq!(egc_width(""), 0);
    }

    #[test]
    fn wide_cjk() {
        assert_eq!(egc_width("界"), 2);
    }

    #[test]
    fn emoji_shapes_are_double_width() {
        for seq in ["😀", "🇺🇸", "1️⃣", "2\u{20E3}", "👨‍👩‍👧‍👦", "👍🏻", "✈️", "🇺"] {
            assert_eq!(egc_width(seq), 2, "{seq:?}");
        }
    }

    #[test]
    fn combining_follows_base() {
        assert_eq!(egc_width("e\u{0301}"), 1);
        assert_eq!(egc_width("界\u{0301}"), 2);
    }
}

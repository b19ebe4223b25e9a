//! Pattern matching behind find / replace.
//!
//! A [`SearchContext`] describes what to look for (pattern, flags, optional
//! replacement). A [`Finder`] compiles it once and answers single-line match
//! queries against any [`TextBuffer`]. Literal patterns are escaped and run
//! through the same regex engine so case folding and whole-word checks behave
//! identically in both modes.

use core_state::TextBuffer;
use core_text::{Position, grapheme};
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::trace;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FindFlags: u8 {
        const BACKWARD          = 0b0000_0001;
        const ICASE             = 0b0000_0010;
        const REGEX             = 0b0000_0100;
        /// Continue from the other end of the document after a miss.
        const WRAP              = 0b0000_1000;
        const WHOLE_WORD        = 0b0001_0000;
        /// A replacement string is configured.
        const REPLACEMENT_VALID = 0b0010_0000;
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What the user asked to search for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchContext {
    pub pattern: String,
    pub replacement: String,
    pub flags: FindFlags,
}

impl SearchContext {
    pub fn new(pattern: impl Into<String>, flags: FindFlags) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: String::new(),
            flags: flags - FindFlags::REPLACEMENT_VALID,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self.flags |= FindFlags::REPLACEMENT_VALID;
        self
    }

    pub fn has_replacement(&self) -> bool {
        self.flags.contains(FindFlags::REPLACEMENT_VALID)
    }
}

/// A match on a single line, `start.line == end.line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: Position,
    pub end: Position,
}

/// Match engine consumed by the search orchestrator.
pub trait Matcher {
    /// Next match from `from` in the given direction.
    ///
    /// Forward matches start at or after `from`; backward matches end at or
    /// before it. With [`FindFlags::WRAP`] the search continues from the other
    /// end of the document.
    fn find(&self, text: &dyn TextBuffer, from: Position, backward: bool) -> Option<MatchRange>;
    /// Replacement text for a match returned by [`Matcher::find`], `None` when no
    /// replacement is configured.
    fn replacement(&self, text: &dyn TextBuffer, found: &MatchRange) -> Option<String>;
    fn flags(&self) -> FindFlags;
}

/// Regex-backed [`Matcher`].
#[derive(Debug, Clone, Default)]
pub struct Finder {
    context: SearchContext,
    regex: Option<Regex>,
}

impl Finder {
    pub fn new(context: SearchContext) -> Result<Self, SearchError> {
        let regex = compile(&context)?;
        Ok(Self { context, regex })
    }

    /// Replace the active context. On error the previous context stays in effect.
    pub fn set_context(&mut self, context: SearchContext) -> Result<(), SearchError> {
        self.regex = compile(&context)?;
        self.context = context;
        Ok(())
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// True once a non-empty pattern has been configured.
    pub fn is_armed(&self) -> bool {
        self.regex.is_some()
    }

    fn accept(&self, line: &str, start: usize, end: usize) -> bool {
        if start == end {
            return false;
        }
        if !self.context.flags.contains(FindFlags::WHOLE_WORD) {
            return true;
        }
        let before = grapheme::prev_boundary(line, start);
        let after = grapheme::next_boundary(line, end);
        let word_before = start > 0 && grapheme::is_word(&line[before..start]);
        let word_after = end < line.len() && grapheme::is_word(&line[end..after]);
        !word_before && !word_after
    }

    fn first_in_line(&self, re: &Regex, line: &str, from: usize, limit: usize) -> Option<(usize, usize)> {
        let mut at = from;
        while at <= line.len() {
            let m = re.find_at(line, at)?;
            if m.start() >= limit {
                return None;
            }
            if self.accept(line, m.start(), m.end()) {
                return Some((m.start(), m.end()));
            }
            at = next_char(line, m.start());
        }
        None
    }

    fn last_in_line(&self, re: &Regex, line: &str, min_start: usize, limit: usize) -> Option<(usize, usize)> {
        let mut best = None;
        let mut at = 0;
        while at <= line.len() {
            let Some(m) = re.find_at(line, at) else { break };
            if m.end() > limit {
                // later starts may still end in range for variable-length patterns
                at = next_char(line, m.start());
                if m.start() >= limit {
                    break;
                }
                continue;
            }
            if m.start() >= min_start && self.accept(line, m.start(), m.end()) {
                best = Some((m.start(), m.end()));
            }
            at = next_char(line, m.start());
        }
        best
    }
}

fn next_char(line: &str, byte: usize) -> usize {
    line[byte..]
        .chars()
        .next()
        .map(|c| byte + c.len_utf8())
        .unwrap_or(line.len() + 1)
}

fn compile(context: &SearchContext) -> Result<Option<Regex>, SearchError> {
    if context.pattern.is_empty() {
        return Ok(None);
    }
    let source = if context.flags.contains(FindFlags::REGEX) {
        context.pattern.clone()
    } else {
        regex::escape(&context.pattern)
    };
    RegexBuilder::new(&source)
        .case_insensitive(context.flags.contains(FindFlags::ICASE))
        .build()
        .map(Some)
        .map_err(|source| SearchError::InvalidPattern {
            pattern: context.pattern.clone(),
            source,
        })
}

impl Matcher for Finder {
    fn find(&self, text: &dyn TextBuffer, from: Position, backward: bool) -> Option<MatchRange> {
        let re = self.regex.as_ref()?;
        let lines = text.line_count();
        let wrap = self.context.flags.contains(FindFlags::WRAP);
        let hit = |line: usize, (s, e): (usize, usize)| MatchRange {
            start: Position::new(line, s),
            end: Position::new(line, e),
        };
        let found = if !backward {
            let mut found = None;
            for step in 0..=lines {
                if step == lines && !wrap {
                    break;
                }
                let line = (from.line + step) % lines;
                if step > 0 && line == 0 && !wrap {
                    break;
                }
                let content = text.line_text(line);
                let (start, limit) = match step {
                    0 => (from.byte, usize::MAX),
                    s if s == lines => (0, from.byte),
                    _ => (0, usize::MAX),
                };
                if let Some(m) = self.first_in_line(re, &content, start, limit) {
                    found = Some(hit(line, m));
                    break;
                }
            }
            found
        } else {
            let mut found = None;
            for step in 0..=lines {
                if step == lines && !wrap {
                    break;
                }
                let line = (from.line + lines - step % lines) % lines;
                if step > 0 && line == lines - 1 && !wrap {
                    break;
                }
                let content = text.line_text(line);
                let (min_start, limit) = match step {
                    0 => (0, from.byte),
                    s if s == lines => (from.byte, usize::MAX),
                    _ => (0, usize::MAX),
                };
                if let Some(m) = self.last_in_line(re, &content, min_start, limit) {
                    found = Some(hit(line, m));
                    break;
                }
            }
            found
        };
        trace!(target: "search", backward, found = found.is_some(), "find");
        found
    }

    fn replacement(&self, text: &dyn TextBuffer, found: &MatchRange) -> Option<String> {
        if !self.context.has_replacement() {
            return None;
        }
        if !self.context.flags.contains(FindFlags::REGEX) {
            return Some(self.context.replacement.clone());
        }
        let re = self.regex.as_ref()?;
        let line = text.line_text(found.start.line);
        let caps = re.captures_at(&line, found.start.byte)?;
        let mut out = String::new();
        caps.expand(&self.context.replacement, &mut out);
        Some(out)
    }

    fn flags(&self) -> FindFlags {
        self.context.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditBuffer;

    fn finder(pattern: &str, flags: FindFlags) -> Finder {
        Finder::new(SearchContext::new(pattern, flags)).unwrap()
    }

    fn range(l: usize, s: usize, e: usize) -> MatchRange {
        MatchRange {
            start: Position::new(l, s),
            end: Position::new(l, e),
        }
    }

    #[test]
    fn forward_literal_across_lines() {
        let t = EditBuffer::from_str("t", "alpha\nbeta alpha\ngamma");
        let f = finder("alpha", FindFlags::empty());
        assert_eq!(f.find(&t, Position::new(0, 0), false), Some(range(0, 0, 5)));
        assert_eq!(f.find(&t, Position::new(0, 1), false), Some(range(1, 5, 10)));
        assert_eq!(f.find(&t, Position::new(1, 10), false), None);
    }

    #[test]
    fn forward_wraps_only_with_flag() {
        let t = EditBuffer::from_str("t", "needle\nhay\nhay");
        let plain = finder("needle", FindFlags::empty());
        assert_eq!(plain.find(&t, Position::new(1, 0), false), None);
        let wrapping = finder("needle", FindFlags::WRAP);
        assert_eq!(wrapping.find(&t, Position::new(1, 0), false), Some(range(0, 0, 6)));
    }

    #[test]
    fn wrap_revisits_start_line_before_origin() {
        let t = EditBuffer::from_str("t", "x needle y");
        let f = finder("needle", FindFlags::WRAP);
        assert_eq!(f.find(&t, Position::new(0, 5), false), Some(range(0, 2, 8)));
    }

    #[test]
    fn backward_finds_last_match_before_origin() {
        let t = EditBuffer::from_str("t", "ab ab\nab");
        let f = finder("ab", FindFlags::empty());
        assert_eq!(f.find(&t, Position::new(1, 0), true), Some(range(0, 3, 5)));
        assert_eq!(f.find(&t, Position::new(0, 3), true), Some(range(0, 0, 2)));
        assert_eq!(f.find(&t, Position::new(0, 0), true), None);
        let w = finder("ab", FindFlags::WRAP);
        assert_eq!(w.find(&t, Position::new(0, 0), true), Some(range(1, 0, 2)));
    }

    #[test]
    fn case_and_whole_word() {
        let t = EditBuffer::from_str("t", "Foobar foo FOO");
        let icase = finder("foo", FindFlags::ICASE);
        assert_eq!(icase.find(&t, Position::origin(), false), Some(range(0, 0, 3)));
        let word = finder("foo", FindFlags::ICASE | FindFlags::WHOLE_WORD);
        assert_eq!(word.find(&t, Position::origin(), false), Some(range(0, 7, 10)));
        assert_eq!(word.find(&t, Position::new(0, 10), false), Some(range(0, 11, 14)));
        let exact = finder("FOO", FindFlags::empty());
        assert_eq!(exact.find(&t, Position::origin(), false), Some(range(0, 11, 14)));
    }

    #[test]
    fn literal_mode_escapes_metacharacters() {
        let t = EditBuffer::from_str("t", "a.c abc");
        let f = finder("a.c", FindFlags::empty());
        assert_eq!(f.find(&t, Position::new(0, 1), false), None);
        let r = finder("a.c", FindFlags::REGEX);
        assert_eq!(r.find(&t, Position::new(0, 1), false), Some(range(0, 4, 7)));
    }

    #[test]
    fn regex_replacement_expands_captures() {
        let t = EditBuffer::from_str("t", "key=value");
        let ctx = SearchContext::new(r"(\w+)=(\w+)", FindFlags::REGEX).with_replacement("$2=$1");
        let f = Finder::new(ctx).unwrap();
        let m = f.find(&t, Position::origin(), false).unwrap();
        assert_eq!(f.replacement(&t, &m).as_deref(), Some("value=key"));
        assert!(f.flags().contains(FindFlags::REPLACEMENT_VALID));
    }

    #[test]
    fn literal_replacement_is_verbatim_and_absent_without_flag() {
        let t = EditBuffer::from_str("t", "x");
        let f = Finder::new(SearchContext::new("x", FindFlags::empty()).with_replacement("$1")).unwrap();
        let m = f.find(&t, Position::origin(), false).unwrap();
        assert_eq!(f.replacement(&t, &m).as_deref(), Some("$1"));
        let plain = finder("x", FindFlags::REPLACEMENT_VALID);
        assert!(!plain.flags().contains(FindFlags::REPLACEMENT_VALID));
        assert_eq!(plain.replacement(&t, &m), None);
    }

    #[test]
    fn invalid_regex_is_reported_and_keeps_old_context() {
        let mut f = finder("ok", FindFlags::empty());
        let err = f
            .set_context(SearchContext::new("(", FindFlags::REGEX))
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { ref pattern, .. } if pattern == "("));
        assert_eq!(f.context().pattern, "ok");
    }

    #[test]
    fn empty_pattern_never_matches() {
        let t = EditBuffer::from_str("t", "anything");
        let f = Finder::default();
        assert!(!f.is_armed());
        assert_eq!(f.find(&t, Position::origin(), false), None);
        let empty_hits = finder("x*", FindFlags::REGEX);
        assert_eq!(empty_hits.find(&t, Position::origin(), false), None);
    }
}

//! Key script parsing.
//!
//! A script is a whitespace separated list of key names in the notation
//! accepted by [`KeyEvent`]'s `FromStr` (`Right`, `S-Down`, `C-End`, `F3`)
//! and double-quoted text that is typed literally. A quote also ends a key
//! name. Inside quotes `\"`, `\\`, `\n` and `\t` are recognised.

use anyhow::{Context, Result, bail};
use core_events::{KeyEvent, keys_for_text};

/// Parse `src` into the keys to replay, in order.
pub fn parse_script(src: &str) -> Result<Vec<KeyEvent>> {
    let mut keys = Vec::new();
    let mut chars = src.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some((_, 'n')) => text.push('\n'),
                        Some((_, 't')) => text.push('\t'),
                        Some((_, other)) => text.push(other),
                        None => break,
                    },
                    other => text.push(other),
                }
            }
            if !closed {
                bail!("unterminated quote starting at byte {start}");
            }
            keys.extend(keys_for_text(&text));
            continue;
        }
        let mut end = src.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || c == '"' {
                end = i;
                break;
            }
            chars.next();
        }
        let token = &src[start..end];
        let key = token
            .parse::<KeyEvent>()
            .with_context(|| format!("bad key {token:?} at byte {start}"))?;
        keys.push(key);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn mixes_keys_and_quoted_text() {
        let keys = parse_script(r#"C-End "a b" S-Left"#).unwrap();
        assert_eq!(
            keys,
            vec![
                KeyEvent::ctrl(KeyCode::End),
                KeyEvent::char('a'),
                KeyEvent::char(' '),
                KeyEvent::char('b'),
                KeyEvent::shift(KeyCode::Left),
            ]
        );
    }

    #[test]
    fn quoted_escapes() {
        let keys = parse_script(r#""x\n\t\"\\""#).unwrap();
        assert_eq!(
            keys,
            vec![
                KeyEvent::char('x'),
                KeyEvent::plain(KeyCode::Enter),
                KeyEvent::plain(KeyCode::Tab),
                KeyEvent::char('"'),
                KeyEvent::char('\\'),
            ]
        );
    }

    #[test]
    fn quotes_need_no_surrounding_space() {
        let keys = parse_script("Home\"z\"End").unwrap();
        assert_eq!(keys.len(), 1 + 1 + 1);
        assert_eq!(keys[2], KeyEvent::plain(KeyCode::End));
    }

    #[test]
    fn errors_name_the_offending_token() {
        let err = parse_script("Right Hyper").unwrap_err();
        assert!(format!("{err:#}").contains("\"Hyper\" at byte 6"));
        assert!(parse_script("\"open").is_err());
        assert!(parse_script("").unwrap().is_empty());
    }
}

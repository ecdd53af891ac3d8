//! Minimal reader for Java `.properties` files.
//!
//! Handles the subset that `key.properties` files use in practice: comments,
//! `=`/`:`/whitespace separators, line continuations and backslash escapes.
//! Only space, tab and form feed count as whitespace.

use std::collections::HashMap;
use std::str::Chars;

/// Decodes raw file bytes. UTF-8 is tried first; anything else is read as
/// ISO-8859-1, the historical encoding of `.properties` files.
pub fn decode_properties(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Properties file is not UTF-8; decoding as ISO-8859-1");
            e.into_bytes().iter().map(|&b| b as char).collect()
        }
    }
}

/// Parses properties text into a key/value map. Later keys win.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();

    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        properties.insert(unescape(key), unescape(value));
    }

    properties
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Joins continuation lines and drops blanks and comments.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in content.lines() {
        let trimmed = raw.trim_start_matches(is_blank);

        let line = match current.take() {
            Some(mut pending) => {
                pending.push_str(trimmed);
                pending
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if ends_with_continuation(&line) {
            let mut pending = line;
            pending.pop();
            current = Some(pending);
        } else {
            lines.push(line);
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }

    lines
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped separator.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                return (
                    line[..i].trim_end_matches(is_blank),
                    line[i + 1..].trim_start_matches(is_blank),
                );
            }
            c if is_blank(c) => {
                let key = &line[..i];
                let rest = line[i..].trim_start_matches(is_blank);
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (key, rest.trim_start_matches(is_blank));
            }
            _ => {}
        }
    }

    (line, "")
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => match read_code_unit(&mut chars) {
                Ok(high @ 0xD800..=0xDBFF) => {
                    // A high surrogate pairs with an immediately following `\uDC00..\uDFFF`.
                    let mut lookahead = chars.clone();
                    let low = match (lookahead.next(), lookahead.next()) {
                        (Some('\\'), Some('u')) => read_code_unit(&mut lookahead)
                            .ok()
                            .filter(|unit| (0xDC00..=0xDFFF).contains(unit)),
                        _ => None,
                    };
                    match low {
                        Some(low) => {
                            chars = lookahead;
                            out.extend(char::decode_utf16([high, low]).filter_map(|r| r.ok()));
                        }
                        None => out.push(char::REPLACEMENT_CHARACTER),
                    }
                }
                Ok(unit) => {
                    out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
                }
                Err(hex) => {
                    out.push_str("\\u");
                    out.push_str(&hex);
                }
            },
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

/// Reads the four hex digits of a `\uXXXX` escape. Returns the consumed text
/// when they are not valid hex.
fn read_code_unit(chars: &mut Chars<'_>) -> Result<u16, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        u16::from_str_radix(&hex, 16).map_err(|_| hex)
    } else {
        Err(hex)
    }
}

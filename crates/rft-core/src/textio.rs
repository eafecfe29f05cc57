use std::fs;
use std::path::Path;

use crate::error::{Result, ScnError};

/// Read a .gen/.scn file as Latin-1 text.
///
/// Every byte maps to the code point of the same value, so any file decodes
/// and re-encodes to the same bytes.
pub fn read_scn_text(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|e| ScnError::io(path, e))?;
    Ok(decode_scn_bytes(&data))
}

pub fn decode_scn_bytes(data: &[u8]) -> String {
    data.iter().map(|&b| b as char).collect()
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Lines split on `\r\n` and on each single line-break character (`\n`,
/// `\r`, vertical tab, form feed, `\x1c`..`\x1e`, NEL, U+2028, U+2029).
/// A final terminator does not produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        out.push(&text[start..i]);
        let mut end = i + ch.len_utf8();
        if ch == '\r' && chars.next_if(|&(_, c)| c == '\n').is_some() {
            end += 1;
        }
        start = end;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Latin-1 bytes with CRLF line endings. Characters outside Latin-1 become `?`.
pub fn encode_scn_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + text.len() / 16);
    for ch in text.chars() {
        match ch {
            '\n' => out.extend_from_slice(b"\r\n"),
            c if (c as u32) <= 0xFF => out.push(c as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Persist rewritten text in one write.
pub fn write_scn_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, encode_scn_text(text)).map_err(|e| ScnError::io(path, e))
}

// Line shapes of the .gen/.scn format. Every line falls into exactly one.

/// Classification of one line, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    KeyValue {
        key: &'a str,
        value: &'a str,
        comment: Option<&'a str>,
    },
    SectionStart {
        comment: Option<&'a str>,
    },
    SectionEnd {
        comment: Option<&'a str>,
    },
    Unknown,
}

/// A raw line together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        Self {
            raw,
            kind: classify(raw),
        }
    }
}

/// Split off a trailing `//` comment. Returns the text before it and the
/// comment including the slashes.
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find("//") {
        Some(i) => (&line[..i], Some(&line[i..])),
        None => (line, None),
    }
}

/// `Key = Value`: at least one character before the first `=`.
pub fn parse_key_value(text: &str) -> Option<(&str, &str)> {
    let eq = text.find('=')?;
    if eq == 0 {
        return None;
    }
    Some((text[..eq].trim(), text[eq + 1..].trim()))
}

pub fn is_section_start(text: &str) -> bool {
    text.trim_start().starts_with('{')
}

pub fn is_section_end(text: &str) -> bool {
    text.trim_start().starts_with('}')
}

pub fn classify(line: &str) -> LineKind<'_> {
    let (text, comment) = split_comment(line);
    if let Some((key, value)) = parse_key_value(text) {
        LineKind::KeyValue {
            key,
            value,
            comment,
        }
    } else if is_section_start(text) {
        LineKind::SectionStart { comment }
    } else if is_section_end(text) {
        LineKind::SectionEnd { comment }
    } else {
        LineKind::Unknown
    }
}

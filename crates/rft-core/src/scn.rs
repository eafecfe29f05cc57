use std::path::Path;

use crate::error::Result;
use crate::line::{Line, LineKind};
use crate::textio::{read_scn_text, split_lines};

/// Callbacks driven by [`process_scn_str`], one per line in file order.
///
/// `orig` is always the untouched source line.
pub trait ScnVisitor {
    fn on_key_value(&mut self, _key: &str, _value: &str, _comment: Option<&str>, _orig: &str) {}
    fn on_section_start(&mut self, _comment: Option<&str>, _orig: &str) {}
    fn on_section_end(&mut self, _comment: Option<&str>, _orig: &str) {}
    fn on_unknown(&mut self, _orig: &str) {}
}

pub fn dispatch_line<V: ScnVisitor + ?Sized>(line: &Line<'_>, visitor: &mut V) {
    match line.kind {
        LineKind::KeyValue {
            key,
            value,
            comment,
        } => visitor.on_key_value(key, value, comment, line.raw),
        LineKind::SectionStart { comment } => visitor.on_section_start(comment, line.raw),
        LineKind::SectionEnd { comment } => visitor.on_section_end(comment, line.raw),
        LineKind::Unknown => visitor.on_unknown(line.raw),
    }
}

/// Single pass over already loaded text.
pub fn process_scn_str<V: ScnVisitor + ?Sized>(text: &str, visitor: &mut V) -> usize {
    let lines = split_lines(text);
    for raw in &lines {
        dispatch_line(&Line::classify(raw), visitor);
    }
    lines.len()
}

pub fn process_scn_file<V: ScnVisitor + ?Sized>(path: &Path, visitor: &mut V) -> Result<()> {
    let text = read_scn_text(path)?;
    let count = process_scn_str(&text, visitor);
    tracing::debug!(path = %path.display(), lines = count, "processed scn file");
    Ok(())
}

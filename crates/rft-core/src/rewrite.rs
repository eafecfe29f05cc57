use std::path::Path;

use crate::error::Result;
use crate::info::SKYBOX_INSTANCE;
use crate::path::to_native;
use crate::scn::{ScnVisitor, process_scn_file, process_scn_str};
use crate::textio::write_scn_file;

/// Replacement policy for one top-level directive.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Substitution {
    /// No replacement requested; originals pass through.
    Keep,
    /// Replacement waits for the first occurrence.
    Pending(Vec<String>),
    /// Replacement was injected; later occurrences are dropped.
    Consumed,
}

impl Substitution {
    fn new(paths: Option<Vec<String>>) -> Self {
        paths.map_or(Self::Keep, Self::Pending)
    }

    // Lines to emit for one occurrence of the directive.
    fn apply(&mut self, directive: &str, orig: &str, out: &mut Vec<String>) {
        match std::mem::replace(self, Self::Consumed) {
            Self::Pending(paths) => {
                tracing::debug!(directive, count = paths.len(), "injecting replacement");
                out.extend(paths.iter().map(|p| format!("{directive}={}", to_native(p))));
            }
            Self::Consumed => {}
            Self::Keep => {
                *self = Self::Keep;
                out.push(orig.to_string());
            }
        }
    }
}

/// Nesting depth plus the delete-window flag.
///
/// The window opens on the skybox directive and closes when the depth comes
/// back to zero on a section end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionState {
    depth: i32,
    deleting: bool,
}

impl SectionState {
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    fn begin_delete(&mut self) {
        self.deleting = true;
    }

    /// Returns whether the opening line is kept.
    fn open(&mut self) -> bool {
        self.depth += 1;
        !self.deleting
    }

    /// Returns whether the closing line is kept.
    fn close(&mut self) -> bool {
        self.depth -= 1;
        if !self.deleting {
            return true;
        }
        if self.depth == 0 {
            self.deleting = false;
            tracing::debug!("delete window closed");
        }
        false
    }

    fn drops_nested_line(&self) -> bool {
        self.deleting && self.depth > 0
    }
}

/// Output-producing visitor. Every line not touched by a substitution or the
/// delete window is copied as is.
#[derive(Debug)]
pub struct RewriteEngine {
    state: SectionState,
    search_paths: Substitution,
    mas_files: Substitution,
    out: Vec<String>,
}

impl RewriteEngine {
    /// `None` leaves the directive alone; paths are in portable form.
    pub fn new(search_paths: Option<Vec<String>>, mas_files: Option<Vec<String>>) -> Self {
        Self {
            state: SectionState::default(),
            search_paths: Substitution::new(search_paths),
            mas_files: Substitution::new(mas_files),
            out: Vec::new(),
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn lines(&self) -> &[String] {
        &self.out
    }

    /// Output text, each line terminated by `\n`.
    pub fn finish(self) -> String {
        let mut text = String::with_capacity(self.out.iter().map(|l| l.len() + 1).sum());
        for line in &self.out {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

impl ScnVisitor for RewriteEngine {
    fn on_key_value(&mut self, key: &str, value: &str, _comment: Option<&str>, orig: &str) {
        if self.state.depth() != 0 {
            if !self.state.drops_nested_line() {
                self.out.push(orig.to_string());
            }
            return;
        }
        if key.eq_ignore_ascii_case("instance") && value.eq_ignore_ascii_case(SKYBOX_INSTANCE) {
            tracing::debug!("delete window opened");
            self.state.begin_delete();
        } else if key.eq_ignore_ascii_case("masfile") {
            self.mas_files.apply("MASFile", orig, &mut self.out);
        } else if key.eq_ignore_ascii_case("searchpath") {
            self.search_paths.apply("SearchPath", orig, &mut self.out);
        } else {
            self.out.push(orig.to_string());
        }
    }

    fn on_section_start(&mut self, _comment: Option<&str>, orig: &str) {
        if self.state.open() {
            self.out.push(orig.to_string());
        }
    }

    fn on_section_end(&mut self, _comment: Option<&str>, orig: &str) {
        if self.state.close() {
            self.out.push(orig.to_string());
        }
    }

    // Emitted even inside a delete window.
    fn on_unknown(&mut self, orig: &str) {
        self.out.push(orig.to_string());
    }
}

pub fn rewrite(
    path: &Path,
    search_paths: Option<Vec<String>>,
    mas_files: Option<Vec<String>>,
) -> Result<String> {
    let mut engine = RewriteEngine::new(search_paths, mas_files);
    process_scn_file(path, &mut engine)?;
    let state = engine.state();
    if state.depth() != 0 || state.is_deleting() {
        tracing::debug!(path = %path.display(), depth = state.depth(), "unbalanced sections");
    }
    Ok(engine.finish())
}

pub fn rewrite_str(
    text: &str,
    search_paths: Option<Vec<String>>,
    mas_files: Option<Vec<String>>,
) -> String {
    let mut engine = RewriteEngine::new(search_paths, mas_files);
    process_scn_str(text, &mut engine);
    engine.finish()
}

/// Rewrite a file and store the result over it (Latin-1, CRLF).
pub fn modify_scn_file(
    path: &Path,
    search_paths: Option<Vec<String>>,
    mas_files: Option<Vec<String>>,
) -> Result<()> {
    let text = rewrite(path, search_paths, mas_files)?;
    write_scn_file(path, &text)?;
    tracing::info!(path = %path.display(), "rewrote file");
    Ok(())
}

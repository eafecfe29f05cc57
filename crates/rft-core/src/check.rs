use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CheckOpts {
    /// Directory substituted for `<VEHDIR>`.
    pub vehdir: PathBuf,
    /// Directory substituted for `<TEAMDIR>`.
    pub teamdir: PathBuf,
    /// MAS files the game ships itself; never reported missing.
    pub default_mas_files: Vec<String>,
}

impl Default for CheckOpts {
    fn default() -> Self {
        Self {
            vehdir: PathBuf::from("."),
            teamdir: PathBuf::from("."),
            default_mas_files: vec!["cmaps.mas".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RefReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

fn placeholder_dir(dir: &Path) -> String {
    format!("{}/", dir.to_string_lossy().replace('\\', "/"))
}

/// Substitute `<VEHDIR>` and `<TEAMDIR>` in a portable path.
pub fn expand_path(path: &str, opts: &CheckOpts) -> String {
    path.replace("<VEHDIR>", &placeholder_dir(&opts.vehdir))
        .replace("<TEAMDIR>", &placeholder_dir(&opts.teamdir))
}

/// Verify that every search path exists and every MAS file is found in one
/// of them. Paths are in portable form, as returned by the info extractor.
pub fn check_references(search_paths: &[String], mas_files: &[String], opts: &CheckOpts) -> RefReport {
    let expanded: Vec<String> = search_paths.iter().map(|p| expand_path(p, opts)).collect();
    let mut report = RefReport::default();

    for (orig, dir) in search_paths.iter().zip(&expanded) {
        if dir != "." && !Path::new(dir).is_dir() {
            tracing::warn!(search_path = %orig, "couldn't locate SearchPath");
            report
                .warnings
                .push(format!("couldn't locate SearchPath {orig}"));
        }
    }

    for mas in mas_files {
        let found = expanded.iter().any(|d| Path::new(d).join(mas).is_file());
        let is_default = opts
            .default_mas_files
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mas));
        if !found && !is_default {
            tracing::warn!(mas_file = %mas, "couldn't locate MAS file");
            report.errors.push(format!("couldn't locate {mas}"));
        }
    }
    report
}

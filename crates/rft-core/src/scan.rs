use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Files of interest below a mod directory, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFiles {
    pub gen_files: Vec<PathBuf>,
    pub veh_files: Vec<PathBuf>,
    pub scn_files: Vec<PathBuf>,
    pub gdb_files: Vec<PathBuf>,
    pub mas_files: Vec<PathBuf>,
}

impl ModFiles {
    /// `.gen` and `.scn` files, the ones the scene parser understands.
    pub fn scene_files(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self
            .gen_files
            .iter()
            .chain(&self.scn_files)
            .cloned()
            .collect();
        out.sort();
        out
    }
}

pub fn scan_mod_dir(root: &Path) -> Result<ModFiles> {
    let mut files = ModFiles::default();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        let bucket = match ext.as_deref() {
            Some("gen") => &mut files.gen_files,
            Some("veh") => &mut files.veh_files,
            Some("scn") => &mut files.scn_files,
            Some("gdb") => &mut files.gdb_files,
            Some("mas") => &mut files.mas_files,
            _ => continue,
        };
        bucket.push(path);
    }
    for list in [
        &mut files.gen_files,
        &mut files.veh_files,
        &mut files.scn_files,
        &mut files.gdb_files,
        &mut files.mas_files,
    ] {
        list.sort();
    }
    tracing::info!(
        root = %root.display(),
        gen_files = files.gen_files.len(),
        scn_files = files.scn_files.len(),
        mas_files = files.mas_files.len(),
        "scanned mod directory"
    );
    Ok(files)
}

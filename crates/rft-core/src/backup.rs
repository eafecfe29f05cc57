use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::{Result, ScnError};

// Zip the given files (stored relative to `root`) next to `root` before they
// are rewritten in place.
pub fn zip_backup_files(root: &Path, files: &[PathBuf]) -> Result<PathBuf> {
    let base = if root.is_dir() {
        root
    } else {
        root.parent().unwrap_or(Path::new("."))
    };
    let parent = root.parent().unwrap_or(Path::new("."));
    let name = root.file_name().and_then(|s| s.to_str()).unwrap_or("backup");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = parent.join(format!("{}_{}.zip", name, ts));

    let file = fs::File::create(&dest).map_err(|e| ScnError::io(&dest, e))?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    for path in files {
        let rel = path.strip_prefix(base).unwrap_or(path);
        let entry_name = rel.to_string_lossy().replace('\\', "/");
        zip.start_file(entry_name, options)?;
        let data = fs::read(path).map_err(|e| ScnError::io(path, e))?;
        zip.write_all(&data).map_err(|e| ScnError::io(&dest, e))?;
    }
    zip.finish()?;
    tracing::info!(archive = %dest.display(), files = files.len(), "wrote backup");
    Ok(dest)
}

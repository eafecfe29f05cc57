use std::path::PathBuf;

/// Failures at the file boundary. Parsing and rewriting themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum ScnError {
    /// Reading or writing a file failed.
    #[error("I/O failed for {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk failed")]
    Walk(#[from] walkdir::Error),

    /// Writing a backup archive failed.
    #[error("zip backup failed")]
    Zip(#[from] zip::result::ZipError),
}

impl ScnError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScnError>;

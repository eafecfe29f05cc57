//! rft-core: Parsing, rewriting and checking of rFactor .gen/.scn files
//!
//! This crate focuses on a small, well-factored surface:
//! - Line classifier and single-pass event dispatcher driving a visitor
//! - Info extraction (SearchPath, MASFile, skybox instance) for inspection
//! - Formatting-preserving rewriter for SearchPath/MASFile lists
//! - Reference checking, mod directory scanning and zip backup for batch use
//!
pub mod backup;
pub mod check;
pub mod error;
pub mod info;
pub mod line;
pub mod path;
pub mod rewrite;
pub mod scan;
pub mod scn;
pub mod textio;

pub use backup::zip_backup_files;
pub use check::{CheckOpts, RefReport, check_references, expand_path};
pub use error::{Result, ScnError};
pub use info::{InfoExtractor, SKYBOX_INSTANCE, ScnInfo, extract_info, extract_info_str};
pub use line::{Line, LineKind, classify};
pub use path::{to_native, to_portable};
pub use rewrite::{RewriteEngine, SectionState, modify_scn_file, rewrite, rewrite_str};
pub use scan::{ModFiles, scan_mod_dir};
pub use scn::{ScnVisitor, process_scn_file, process_scn_str};
pub use textio::{encode_scn_text, read_scn_text, split_lines, write_scn_file};

use std::path::Path;

use serde_json::json;

use crate::error::Result;
use crate::path::{strip_root, to_portable};
use crate::scn::{ScnVisitor, process_scn_file, process_scn_str};

/// `Instance=` value that marks the skybox block.
pub const SKYBOX_INSTANCE: &str = "SkyboxI";

/// Top-level references harvested from one file. Paths are in portable form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScnInfo {
    pub search_paths: Vec<String>,
    pub mas_files: Vec<String>,
    pub has_skyboxi: bool,
}

impl ScnInfo {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "search_paths": self.search_paths,
            "mas_files": self.mas_files,
            "has_skyboxi": self.has_skyboxi,
        })
    }
}

/// Read-only visitor. Anything it doesn't know is ignored.
#[derive(Debug, Default)]
pub struct InfoExtractor {
    depth: i32,
    info: ScnInfo,
}

impl InfoExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn info(&self) -> &ScnInfo {
        &self.info
    }

    pub fn into_info(self) -> ScnInfo {
        self.info
    }
}

impl ScnVisitor for InfoExtractor {
    fn on_key_value(&mut self, key: &str, value: &str, _comment: Option<&str>, _orig: &str) {
        if self.depth != 0 {
            return;
        }
        if key.eq_ignore_ascii_case("masfile") {
            let p = to_portable(value);
            self.info.mas_files.push(strip_root(&p).to_string());
        } else if key.eq_ignore_ascii_case("searchpath") {
            self.info.search_paths.push(to_portable(value));
        } else if key.eq_ignore_ascii_case("instance") && value.eq_ignore_ascii_case(SKYBOX_INSTANCE)
        {
            self.info.has_skyboxi = true;
        }
    }

    fn on_section_start(&mut self, _comment: Option<&str>, _orig: &str) {
        self.depth += 1;
    }

    fn on_section_end(&mut self, _comment: Option<&str>, _orig: &str) {
        self.depth -= 1;
    }
}

pub fn extract_info(path: &Path) -> Result<ScnInfo> {
    let mut extractor = InfoExtractor::new();
    process_scn_file(path, &mut extractor)?;
    Ok(extractor.into_info())
}

pub fn extract_info_str(text: &str) -> ScnInfo {
    let mut extractor = InfoExtractor::new();
    process_scn_str(text, &mut extractor);
    extractor.into_info()
}

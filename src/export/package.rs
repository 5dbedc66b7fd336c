// src/export/package.rs

use crate::errors::AppResult;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub const HTML_ENTRY: &str = "report.html";
pub const CSS_ENTRY: &str = "style.css";

pub const BUNDLED_STYLESHEET: &[u8] = include_bytes!("../../assets/style.css");

/// A finished report bundle, ready to be handed to a share action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    pub path: PathBuf,
}

impl ArchiveHandle {
    pub fn mime_type(&self) -> &'static str {
        "application/zip"
    }
}

/// Write `html` and `stylesheet` as the only two entries of a new archive at
/// `dest`. An existing file is truncated, never appended to.
pub fn package(html: &str, stylesheet: &[u8], dest: &Path) -> AppResult<ArchiveHandle> {
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(HTML_ENTRY, options)?;
    zip.write_all(html.as_bytes())?;

    zip.start_file(CSS_ENTRY, options)?;
    zip.write_all(stylesheet)?;

    zip.finish()?;

    Ok(ArchiveHandle {
        path: dest.to_path_buf(),
    })
}

/// Stylesheet to bundle: the configured file, or the built-in one.
pub fn load_stylesheet(custom: Option<&Path>) -> AppResult<Vec<u8>> {
    match custom {
        Some(path) => Ok(fs::read(path)?),
        None => Ok(BUNDLED_STYLESHEET.to_vec()),
    }
}

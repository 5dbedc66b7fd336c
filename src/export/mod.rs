// src/export/mod.rs

pub(crate) mod fs_utils;
pub mod html;
pub mod package;
pub mod range;
pub mod stats;

pub use html::{HtmlGenerator, TemplateSource};
pub use package::{ArchiveHandle, package};
pub use stats::StatsFormat;

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

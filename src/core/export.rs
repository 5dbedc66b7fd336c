use crate::config::Config;
use crate::core::aggregate::Aggregator;
use crate::db::Store;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::package::{load_stylesheet, package};
use crate::export::range::parse_range;
use crate::export::{ArchiveHandle, HtmlGenerator, notify_export_success};
use crate::ui::messages::{info, warning};
use crate::utils::date::{day_bounds, format_millis, local_millis};
use chrono::{NaiveDate, NaiveTime};
use std::path::{Path, PathBuf};

/// What to export.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub group_ids: Vec<i64>,
    pub file: Option<PathBuf>,
    pub force: bool,
}

impl ExportRequest {
    pub fn from_range(range: &str, group_ids: Vec<i64>) -> AppResult<Self> {
        let (start, end) = parse_range(range)?;
        Ok(Self {
            start,
            end,
            group_ids,
            file: None,
            force: false,
        })
    }
}

/// Human readable period, e.g. `2025/03/01 to 2025/03/31`.
pub fn date_range_label(start: NaiveDate, end: NaiveDate, date_format: &str) -> AppResult<String> {
    // Formatted through a local datetime so that time specifiers stay valid
    let from = local_millis(start.and_time(NaiveTime::MIN))?;
    let to = local_millis(end.and_time(NaiveTime::MIN))?;

    Ok(format!(
        "{} to {}",
        format_millis(from, date_format),
        format_millis(to, date_format)
    ))
}

pub struct ExportLogic;

impl ExportLogic {
    /// Aggregate, render and package the reports of a period.
    ///
    /// Returns `Ok(None)` when no report matches; no archive is written then.
    pub fn export(store: &Store, cfg: &Config, req: &ExportRequest) -> AppResult<Option<ArchiveHandle>> {
        let dest = req
            .file
            .clone()
            .unwrap_or_else(|| cfg.export_dir_path().join("report.zip"));

        let (start_ms, end_ms) = day_bounds(req.start, req.end)?;
        let reports = Aggregator::reports_with_details(store, start_ms, end_ms, &req.group_ids)?;

        if reports.is_empty() {
            warning("No reports found for the selected period and groups.");
            return Ok(None);
        }

        ensure_writable(&dest, req.force)?;

        info(format!(
            "Exporting {} report(s) to {}",
            reports.len(),
            dest.display()
        ));

        let label = date_range_label(req.start, req.end, &cfg.date_format)?;
        let html = HtmlGenerator::from_config(cfg).generate(&reports, &label);
        let css = load_stylesheet(cfg.stylesheet_path().as_deref())?;

        let handle = package(&html, &css, &dest)?;

        log_export(store, &handle.path, reports.len(), &label);
        notify_export_success("Report", &handle.path);

        Ok(Some(handle))
    }
}

fn log_export(store: &Store, path: &Path, count: usize, label: &str) {
    if let Err(e) = ttlog(
        store.conn(),
        "export",
        &path.to_string_lossy(),
        &format!("{count} report(s), {label}"),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }
}

// src/export/html.rs

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{DrawingWithWorkers, ReportWithDetails, Worker};
use crate::utils::date::format_millis;
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

pub const DATE_RANGE_TOKEN: &str = "{{date_range}}";
pub const REPORT_ITEMS_TOKEN: &str = "{{report_items}}";

/// Shown in place of a drawing address that was never resolved.
pub const NOT_RECORDED: &str = "Not recorded";

pub const BUNDLED_TEMPLATE: &str = include_str!("../../assets/report_template.html");

/// Where the HTML template comes from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Bundled,
    File(PathBuf),
    Inline(String),
}

impl TemplateSource {
    /// Read the template and check that both placeholders occur exactly once.
    pub fn load(&self) -> AppResult<String> {
        let text = match self {
            TemplateSource::Bundled => BUNDLED_TEMPLATE.to_string(),
            TemplateSource::Inline(s) => s.clone(),
            TemplateSource::File(path) => fs::read_to_string(path)
                .map_err(|e| AppError::TemplateLoad(format!("{}: {e}", path.display())))?,
        };

        for token in [DATE_RANGE_TOKEN, REPORT_ITEMS_TOKEN] {
            let n = text.matches(token).count();
            if n != 1 {
                return Err(AppError::TemplateLoad(format!(
                    "placeholder {token} must appear exactly once (found {n})"
                )));
            }
        }

        Ok(text)
    }
}

/// Escape text for safe interpolation into HTML element content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders matched reports into a single self-contained HTML page.
#[derive(Debug, Clone)]
pub struct HtmlGenerator {
    template: TemplateSource,
    date_format: String,
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new(TemplateSource::Bundled, "%Y/%m/%d")
    }
}

impl HtmlGenerator {
    pub fn new(template: TemplateSource, date_format: impl Into<String>) -> Self {
        Self {
            template,
            date_format: date_format.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let template = match cfg.template_path() {
            Some(p) => TemplateSource::File(p),
            None => TemplateSource::Bundled,
        };
        Self::new(template, cfg.date_format.clone())
    }

    /// Render the page, or fall back to a minimal error page when the
    /// template cannot be loaded.
    pub fn generate(&self, reports: &[ReportWithDetails], date_range: &str) -> String {
        match self.try_generate(reports, date_range) {
            Ok(html) => html,
            Err(e) => error_page(&e.to_string()),
        }
    }

    pub fn try_generate(&self, reports: &[ReportWithDetails], date_range: &str) -> AppResult<String> {
        let template = self.template.load()?;

        let items: String = reports.iter().map(|r| self.report_item(r)).collect();

        // Substitute inside the template pieces only, so that placeholder-like
        // text in the label or in user data is never expanded.
        let (head, tail) = template
            .split_once(DATE_RANGE_TOKEN)
            .ok_or_else(|| AppError::TemplateLoad(format!("missing {DATE_RANGE_TOKEN}")))?;

        Ok(format!(
            "{}{}{}",
            head.replace(REPORT_ITEMS_TOKEN, &items),
            escape_html(date_range),
            tail.replace(REPORT_ITEMS_TOKEN, &items)
        ))
    }

    fn report_item(&self, rwd: &ReportWithDetails) -> String {
        let date = format_millis(rwd.report.date, &self.date_format);
        let drawings: String = rwd.drawings.iter().map(drawing_section).collect();

        format!(
            r#"
        <div class="report-item">
            <h2>Report date: {}</h2>
            <p><strong>Summary:</strong> {}</p>
{}        </div>
"#,
            escape_html(&date),
            escape_html(&rwd.report.description),
            drawings
        )
    }
}

fn drawing_section(dw: &DrawingWithWorkers) -> String {
    let d = &dw.drawing;
    let address = d.address.as_deref().unwrap_or(NOT_RECORDED);
    let point_count = d.points.split(';').filter(|p| !p.trim().is_empty()).count();

    format!(
        r#"            <div class="drawing-section">
                <h3>Task: {}</h3>
                <p><strong>Address:</strong> {}</p>
                <p><strong>Description:</strong> {}</p>
                <p><strong>Hours worked:</strong> {}</p>
                <p class="geometry">{} with {} point(s)</p>
                <h4>Workers</h4>
{}            </div>
"#,
        escape_html(&d.task_type),
        escape_html(address),
        escape_html(&d.description),
        d.hours,
        d.kind.label(),
        point_count,
        workers_table(&dw.workers)
    )
}

fn workers_table(workers: &[Worker]) -> String {
    let mut rows = String::new();
    for w in workers {
        // Writing into a String cannot fail
        let _ = writeln!(
            rows,
            "                        <tr><td>{}</td><td>{}</td></tr>",
            escape_html(&w.name),
            escape_html(&w.phone_number)
        );
    }

    format!(
        r#"                <table>
                    <thead>
                        <tr><th>Name</th><th>Phone</th></tr>
                    </thead>
                    <tbody>
{}                    </tbody>
                </table>
"#,
        rows
    )
}

/// Minimal page embedding the failure message.
pub fn error_page(message: &str) -> String {
    format!(
        "<html><body><h1>Report generation failed</h1><p>{}</p></body></html>",
        escape_html(message)
    )
}

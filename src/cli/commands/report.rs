use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::aggregate::Aggregator;
use crate::core::geocode::NoGeocoder;
use crate::core::record::{NewTask, ReportLogic};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::{DrawingType, GeoPoint, ReportWithDetails};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{CYAN, GREY, RESET, colorize_optional};
use crate::utils::date::{day_bounds, format_millis, local_millis, now_millis, parse_datetime, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            ReportAction::Add {
                task,
                kind,
                points,
                description,
                hours,
                workers,
                date,
                address,
            } => {
                let kind = DrawingType::from_code(kind)
                    .ok_or_else(|| AppError::InvalidDrawingType(kind.clone()))?;
                let points = GeoPoint::parse_list(points)?;

                let timestamp = match date {
                    Some(d) => {
                        let ndt = parse_datetime(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
                        local_millis(ndt)?
                    }
                    None => now_millis(),
                };

                let new_task = NewTask {
                    kind,
                    points,
                    task_type: task.trim().to_string(),
                    description: description.clone(),
                    address: address.clone(),
                    timestamp,
                    hours: *hours,
                    worker_ids: workers.clone(),
                };

                ReportLogic::record(&mut store, &NoGeocoder, new_task)?;
            }
            ReportAction::List { range, groups } => {
                let range = range
                    .clone()
                    .unwrap_or_else(|| today().format("%Y-%m").to_string());
                let (start, end) = parse_range(&range)?;
                let (from, to) = day_bounds(start, end)?;

                let reports = Aggregator::reports_with_details(&store, from, to, groups)?;
                if reports.is_empty() {
                    info(format!("No reports for {range}."));
                } else {
                    header(format!("Reports for {range}"));
                    for r in &reports {
                        print_report(r, &cfg.date_format);
                    }
                }
            }
            ReportAction::Del { id } => {
                if store.delete_report(*id)? == 0 {
                    return Err(AppError::NotFound(format!("Report #{id}")));
                }
                if let Err(e) = ttlog(store.conn(), "delete", &format!("report #{id}"), "Deleted report") {
                    warning(format!("Failed to write internal log: {e}"));
                }
                success(format!("Report #{id} deleted."));
            }
        }

        store.close()?;
    }

    Ok(())
}

fn print_report(r: &ReportWithDetails, date_format: &str) {
    println!(
        "{CYAN}#{}{RESET} {} | {} | {}h",
        r.report.id,
        format_millis(r.report.date, &format!("{date_format} %H:%M")),
        r.report.description,
        r.total_hours()
    );

    for d in &r.drawings {
        let names: Vec<&str> = d.workers.iter().map(|w| w.name.as_str()).collect();
        let crew = if names.is_empty() {
            format!("{GREY}no workers{RESET}")
        } else {
            names.join(", ")
        };

        println!(
            "   - {} [{}] {} | {}h | {}",
            d.drawing.task_type,
            d.drawing.kind.label(),
            colorize_optional(d.drawing.address.as_deref(), "no address"),
            d.drawing.hours,
            crew
        );
    }
    println!();
}

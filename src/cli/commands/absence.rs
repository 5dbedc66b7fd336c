use crate::cli::commands::open_store;
use crate::cli::parser::{AbsenceAction, Commands};
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::{format_millis, local_millis, parse_date};
use crate::utils::table::Table;
use chrono::NaiveTime;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Absence { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            AbsenceAction::Add {
                worker_id,
                date,
                reason,
            } => {
                let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
                let ms = local_millis(day.and_time(NaiveTime::MIN))?;
                let id = RosterLogic::add_absence(&mut store, *worker_id, ms, reason)?;
                success(format!("Absence #{id} recorded for worker #{worker_id}."));
            }
            AbsenceAction::List { worker_id } => {
                let absences = store.absences_for_worker(*worker_id)?;
                if absences.is_empty() {
                    info(format!("No absences for worker #{worker_id}."));
                } else {
                    let mut table = Table::new(vec!["ID", "Date", "Reason"]);
                    for a in absences {
                        table.add_row(vec![
                            a.id.to_string(),
                            format_millis(a.date, &cfg.date_format),
                            a.reason,
                        ]);
                    }
                    print!("{}", table.render());
                }
            }
        }

        store.close()?;
    }

    Ok(())
}

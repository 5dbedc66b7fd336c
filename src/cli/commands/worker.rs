use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, WorkerAction};
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::models::{NewWorker, Worker};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_counter;
use crate::utils::table::Table;

fn worker_table(workers: &[Worker]) -> Table {
    let mut table = Table::new(vec!["ID", "Name", "Phone", "Overtime", "Leave (d)", "Leave (h)"]);
    for w in workers {
        table.add_row(vec![
            w.id.to_string(),
            w.name.clone(),
            w.phone_number.clone(),
            colorize_counter(w.overtime_hours),
            colorize_counter(w.daily_leave),
            colorize_counter(w.hourly_leave),
        ]);
    }
    table
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Worker { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            WorkerAction::Add { name, phone, group } => {
                let mut new = NewWorker::new(name.trim(), phone.trim());
                if let Some(g) = group {
                    new = new.in_group(*g);
                }
                let id = RosterLogic::add_worker(&mut store, &new)?;
                success(format!("Worker #{id} '{}' added.", new.name));
            }
            WorkerAction::List { search, grouped } => {
                if *grouped {
                    let by_group = RosterLogic::grouped(&store, &cfg.default_group_label)?;
                    if by_group.is_empty() {
                        info("No workers found.");
                    }
                    for (label, workers) in by_group {
                        header(label);
                        println!("{}", worker_table(&workers).render());
                    }
                } else {
                    let workers = RosterLogic::search(&store, search.as_deref().unwrap_or(""))?;
                    if workers.is_empty() {
                        info("No workers found.");
                    } else {
                        print!("{}", worker_table(&workers).render());
                    }
                }
            }
            WorkerAction::Del { id } => {
                RosterLogic::delete_worker(&mut store, *id)?;
                success(format!("Worker #{id} deleted."));
            }
            WorkerAction::SetGroup { id, group } => {
                RosterLogic::set_group(&mut store, *id, *group)?;
                match group {
                    Some(g) => success(format!("Worker #{id} moved to group #{g}.")),
                    None => success(format!("Worker #{id} is now unassigned.")),
                }
            }
            WorkerAction::Overtime { id, hours } => {
                let total = RosterLogic::add_overtime(&mut store, *id, *hours)?;
                success(format!("Worker #{id} overtime: {total}h"));
            }
            WorkerAction::Leave { id, days, hours } => {
                let w = RosterLogic::add_leave(&mut store, *id, *days, *hours)?;
                success(format!(
                    "Worker #{id} leave: {}d {}h",
                    w.daily_leave, w.hourly_leave
                ));
            }
        }

        store.close()?;
    }

    Ok(())
}

use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, GroupAction};
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Group { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            GroupAction::Add { name } => {
                let id = RosterLogic::add_group(&mut store, name)?;
                success(format!("Group #{id} '{}' created.", name.trim()));
            }
            GroupAction::List => {
                let groups = store.groups()?;
                if groups.is_empty() {
                    info("No groups defined.");
                } else {
                    let mut table = Table::new(vec!["ID", "Name"]);
                    for g in groups {
                        table.add_row(vec![g.id.to_string(), g.name]);
                    }
                    print!("{}", table.render());
                }
            }
            GroupAction::Rename { id, name } => {
                store.rename_group(*id, name)?;
                success(format!("Group #{id} renamed to '{name}'."));
            }
            GroupAction::Del { id } => {
                RosterLogic::delete_group(&mut store, *id)?;
                success(format!("Group #{id} deleted; its workers are now unassigned."));
            }
        }

        store.close()?;
    }

    Ok(())
}

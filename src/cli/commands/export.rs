use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::{ExportLogic, ExportRequest};
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        range,
        groups,
        file,
        force,
    } = cmd
    {
        let mut req = ExportRequest::from_range(range, groups.clone())?;
        req.file = file.as_deref().map(expand_tilde);
        req.force = *force;

        let store = open_store(cfg)?;
        let handle = ExportLogic::export(&store, cfg, &req)?;
        store.close()?;

        if let Some(h) = handle {
            println!("📦 {} ({})", h.path.display(), h.mime_type());
        }
    }
    Ok(())
}

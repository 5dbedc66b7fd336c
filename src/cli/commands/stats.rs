use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::Aggregator;
use crate::errors::AppResult;
use crate::export::StatsFormat;
use crate::export::stats::{merge_daily, write_stats};
use crate::ui::messages::info;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { format } = cmd {
        let store = open_store(cfg)?;
        let counts = Aggregator::daily_report_counts(&store)?;
        let hours = Aggregator::daily_work_hours(&store)?;
        store.close()?;

        let rows = merge_daily(&counts, &hours);
        if rows.is_empty() && *format == StatsFormat::Text {
            info("No reports recorded yet.");
            return Ok(());
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_stats(&rows, *format, &mut out)?;
    }
    Ok(())
}

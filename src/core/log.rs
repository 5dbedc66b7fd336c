use crate::db::Store;
use crate::db::log::load_entries;
use crate::errors::AppResult;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// Color per logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "report" => Colour::Green,
        "worker" | "group" | "absence" => Colour::Cyan,
        "delete" => Colour::Red,
        "overtime" | "leave" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Truncate on visible characters, keeping room for an ellipsis.
fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
    t.push_str("...");
    t
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &Store) -> AppResult<()> {
        let entries = load_entries(store.conn())?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        let rows: Vec<(String, String)> = entries
            .iter()
            .map(|e| {
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (e.operation.clone(), truncate_visible(&op_target, MAX_OP_WIDTH))
            })
            .collect();

        let op_w = rows
            .iter()
            .map(|(_, t)| t.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");

        for (entry, (operation, op_target)) in entries.iter().zip(rows) {
            let color = color_for_operation(&operation);

            // Only the operation word is colored
            let colored = match op_target.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(op_target.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey placeholder for a missing value, the value itself otherwise.
pub fn colorize_optional(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}{placeholder}{RESET}"),
    }
}

/// Positive counters in green, negative in red, zero untouched.
pub fn colorize_counter(value: i64) -> String {
    if value > 0 {
        format!("{GREEN}{value}{RESET}")
    } else if value < 0 {
        format!("{RED}{value}{RESET}")
    } else {
        value.to_string()
    }
}

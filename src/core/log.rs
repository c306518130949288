use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{BLUE, CYAN, GREEN, MAGENTA, RED, RESET, YELLOW};
use unicode_width::UnicodeWidthStr;

/// ANSI colour by operation
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "clock_in" => GREEN,
        "clock_out" => RED,
        "login" | "logout" => CYAN,
        "user_add" => YELLOW,
        "export" => BLUE,
        "migration_applied" => MAGENTA,
        _ => RESET,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(pool)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_target: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(2);
        let date_w = entries
            .iter()
            .map(|e| UnicodeWidthStr::width(e.date.as_str()))
            .max()
            .unwrap_or(10);
        let op_w = op_target
            .iter()
            .map(|s| UnicodeWidthStr::width(s.as_str()))
            .max()
            .unwrap_or(10)
            .min(40);

        println!("📜 Internal log:\n");

        for (e, op) in entries.iter().zip(op_target.iter()) {
            let color = color_for_operation(&e.operation);
            let pad = op_w.saturating_sub(UnicodeWidthStr::width(op.as_str()));
            println!(
                "{:>id_w$}  {:<date_w$}  {}{}{}{}  {}",
                e.id,
                e.date,
                color,
                op,
                RESET,
                " ".repeat(pad),
                e.message,
                id_w = id_w,
                date_w = date_w,
            );
        }

        Ok(())
    }
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator::format_duration_hhmm;
use crate::core::month::MonthBounds;
use crate::core::session::SessionLogic;
use crate::core::summary::SummaryLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Summary { month } = cmd else {
        return Ok(());
    };

    let month = resolve_month(month.as_deref())?;

    let mut pool = open_db(&cfg.database)?;
    SessionLogic::require_admin(&mut pool)?;

    let report = SummaryLogic::build(&mut pool, &month, cfg.quantum_minutes)?;

    header(format!(
        "Attendance {} (rounded down to {} min per shift)",
        report.month, report.quantum_minutes
    ));

    if report.rows.is_empty() {
        info("No users registered.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Name"),
        Column::right("Shifts"),
        Column::right("Worked (raw)"),
        Column::right(&format!("Worked ({}m)", report.quantum_minutes)),
    ]);

    for row in &report.rows {
        table.add_row(vec![
            row.full_name.clone(),
            row.summary.interval_count.to_string(),
            format_duration_hhmm(row.summary.raw_duration_ms),
            format_duration_hhmm(row.summary.rounded_duration_ms),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

/// `--month` value, or the current UTC month.
pub(crate) fn resolve_month(month: Option<&str>) -> AppResult<MonthBounds> {
    match month {
        Some(m) => MonthBounds::parse(m),
        None => Ok(MonthBounds::current()),
    }
}

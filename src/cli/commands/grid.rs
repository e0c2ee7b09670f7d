use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, colorize_cell};
use crate::utils::date;
use crate::utils::formatting::mins2readable;
use crate::utils::table::{Column, Table};
use chrono::Datelike;

fn minutes_cell(m: u32) -> String {
    colorize_cell(&m.to_string())
}

fn render(rows: &[AttendanceRecord]) -> String {
    let mut table = Table::new(vec![
        Column::left("DATE"),
        Column::left("DAY"),
        Column::left("SHIFT"),
        Column::left("IN"),
        Column::left("OUT"),
        Column::right("LATE"),
        Column::right("EARLY"),
        Column::right("OT"),
        Column::left("STATUS"),
        Column::left("NOTES"),
    ]);

    for r in rows {
        let shift = if r.is_placeholder() {
            format!("{GREY}-{RESET}")
        } else {
            r.shift.to_string()
        };

        table.add_row(vec![
            r.date_str(),
            r.date.weekday().to_string(),
            shift,
            colorize_cell(&r.check_in_str()),
            colorize_cell(&r.check_out_str()),
            minutes_cell(r.lateness_minutes),
            minutes_cell(r.early_arrival_minutes),
            minutes_cell(r.overtime_minutes),
            colorize_cell(&r.status.to_string()),
            r.notes.clone(),
        ]);
    }

    table.render()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Grid { employee, period } = cmd {
        let (from, to) = match period {
            Some(p) => date::parse_period(p)?,
            None => {
                let m = date::current_month()?;
                (m.first_day(), m.last_day())
            }
        };

        let pool = DbPool::open(&cfg.database)?;
        let rows = AttendanceLogic::grid(&pool, employee, from, to)?;

        header(format!("Attendance of '{}' from {} to {}", employee, from, to));
        print!("{}", render(&rows));

        let recorded = rows.iter().filter(|r| r.has_data()).count();
        let late: i64 = rows.iter().map(|r| r.lateness_minutes as i64).sum();
        let early: i64 = rows.iter().map(|r| r.early_arrival_minutes as i64).sum();
        let ot: i64 = rows.iter().map(|r| r.overtime_minutes as i64).sum();

        println!(
            "\n{} day(s), {} recorded | late {} | early {} | overtime {}",
            rows.len(),
            recorded,
            mins2readable(late, false),
            mins2readable(early, false),
            mins2readable(ot, false)
        );
    }

    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::ShiftWindow;
use crate::models::shift::ShiftKey;
use crate::ui::messages::success;
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_time;

fn require_time(label: &str, raw: Option<&String>) -> AppResult<chrono::NaiveTime> {
    let raw = raw.ok_or_else(|| AppError::InvalidTime(format!("missing --{label}")))?;
    parse_time(raw).ok_or_else(|| AppError::InvalidTime(raw.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule {
        set,
        show: _,
        store,
        shift,
        start,
        end,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;

        if *set {
            let store_id = store
                .as_deref()
                .ok_or_else(|| AppError::Other("--store is required with --set".into()))?;
            let key: ShiftKey = shift
                .as_deref()
                .ok_or_else(|| AppError::InvalidShift("missing --shift".into()))?
                .parse()?;
            let window = ShiftWindow::new(
                require_time("start", start.as_ref())?,
                require_time("end", end.as_ref())?,
            );

            ScheduleLogic::set(&pool, store_id, key, window)?;
            success(format!(
                "Store '{}': {} set to {} - {}{}",
                store_id,
                key.label(),
                window.start.format("%H:%M"),
                window.end.format("%H:%M"),
                if window.crosses_midnight() { " (+1 day)" } else { "" }
            ));
            return Ok(());
        }

        let (resolved, custom) = ScheduleLogic::show(&pool, cfg, store.as_deref())?;

        match store {
            Some(s) => println!("🕒 Shift schedule of store '{}':\n", s),
            None => println!("🕒 Default shift schedule:\n"),
        }

        let mut table = Table::new(vec![
            Column::left("SHIFT"),
            Column::left("START"),
            Column::left("END"),
            Column::left("SOURCE"),
        ]);
        for key in ShiftKey::ALL {
            let w = resolved.window(key);
            let source = match &custom {
                Some(c) if c.get(key).is_some() => "store".to_string(),
                _ => format!("{GREY}default{RESET}"),
            };
            table.add_row(vec![
                key.label().to_string(),
                w.start.format("%H:%M").to_string(),
                format!(
                    "{}{}",
                    w.end.format("%H:%M"),
                    if w.crosses_midnight() { " (+1)" } else { "" }
                ),
                source,
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}

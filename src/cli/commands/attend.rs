use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceEdit;
use crate::models::attendance_status::AttendanceStatus;
use crate::models::shift::ShiftKey;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::parse_time_edit;

/// Record or edit one attendance row.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attend {
        employee,
        date,
        shift,
        check_in,
        check_out,
        status,
        notes,
    } = cmd
    {
        //
        // 1. Parse and validate every argument before touching the DB
        //
        let d = date::require_date(date)?;

        let edit = AttendanceEdit {
            shift: shift.as_deref().map(str::parse::<ShiftKey>).transpose()?,
            check_in: parse_time_edit(check_in.as_ref())?,
            check_out: parse_time_edit(check_out.as_ref())?,
            status: status
                .as_deref()
                .map(str::parse::<AttendanceStatus>)
                .transpose()?,
            notes: notes.clone(),
        };

        //
        // 2. Apply + save
        //
        let pool = DbPool::open(&cfg.database)?;
        let row = AttendanceLogic::record(&pool, cfg, employee, d, &edit)?;

        success(format!(
            "{} {}: {} {} → {} [{}]",
            row.employee_id,
            row.date_str(),
            row.shift.label(),
            row.check_in_str(),
            row.check_out_str(),
            row.status
        ));
        println!(
            "   late {} min | early {} min | overtime {} min",
            row.lateness_minutes, row.early_arrival_minutes, row.overtime_minutes
        );
    }

    Ok(())
}

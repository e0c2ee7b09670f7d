use crate::config::Config;
use crate::core::logic::Core;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{load_store_schedule, set_store_shift};
use crate::errors::AppResult;
use crate::models::schedule::{ShiftSchedule, ShiftWindow};
use crate::models::shift::ShiftKey;

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Store a custom window for one shift of one store.
    pub fn set(pool: &DbPool, store_id: &str, shift: ShiftKey, window: ShiftWindow) -> AppResult<()> {
        set_store_shift(&pool.conn, store_id, shift, &window)?;

        ttlog_soft(
            &pool.conn,
            "schedule_set",
            &format!("{store_id}/{shift}"),
            &format!(
                "{} - {}",
                window.start.format("%H:%M"),
                window.end.format("%H:%M")
            ),
        );
        Ok(())
    }

    /// Resolved schedule of a store plus its custom part (`None` when the
    /// store only uses the defaults).
    pub fn show(
        pool: &DbPool,
        cfg: &Config,
        store_id: Option<&str>,
    ) -> AppResult<(ShiftSchedule, Option<ShiftSchedule>)> {
        let custom = match store_id {
            Some(id) => load_store_schedule(&pool.conn, id)?,
            None => None,
        };
        let resolved = Core::schedule_for_store(&pool.conn, store_id, cfg)?;
        Ok((resolved, custom))
    }
}

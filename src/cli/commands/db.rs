use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::db_utils::recompute_all;
use crate::db::log::ttlog_soft;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
        recompute,
    } = cmd
    {
        // Raw connection: --migrate must be able to report what it applies.
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            println!(
                "{}✔ Migration completed ({} applied).{}\n",
                GREEN, applied, RESET
            );
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) RECOMPUTE
        //
        if *recompute {
            run_pending_migrations(&pool.conn)?;
            println!("{}▶ Recomputing attendance minutes…{}", CYAN, RESET);

            let changed = recompute_all(&pool, cfg)?;
            ttlog_soft(
                &pool.conn,
                "recompute",
                "attendance",
                &format!("{} row(s) updated", changed),
            );

            println!(
                "{}✔ Recompute completed: {} row(s) updated.{}\n",
                GREEN, changed, RESET
            );
        }

        //
        // 5) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}

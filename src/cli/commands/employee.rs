use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::employee::{EmployeeInput, EmployeeLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::colorize_cell;
use crate::utils::formatting::format_amount;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee {
        add,
        list,
        id,
        name,
        role,
        store,
        salary,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;

        if *add {
            let emp = EmployeeLogic::save(
                &pool,
                EmployeeInput {
                    id: id.clone().unwrap_or_default(),
                    name: name.clone(),
                    role: role.clone(),
                    store_id: store.clone(),
                    base_salary: *salary,
                },
            )?;
            success(format!("Employee '{}' ({}) saved.", emp.id, emp.name));
            if emp.store_id.is_none() {
                warning("No store assigned: payroll generation will skip this employee.");
            }
        }

        if *list || !*add {
            let employees = EmployeeLogic::list(&pool)?;
            if employees.is_empty() {
                info("No employees registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("NAME"),
                Column::left("ROLE"),
                Column::left("STORE"),
                Column::right("BASE SALARY"),
            ]);
            for e in employees {
                table.add_row(vec![
                    e.id.clone(),
                    e.name.clone(),
                    colorize_cell(if e.role.is_empty() { "-" } else { &e.role }),
                    colorize_cell(e.store_id.as_deref().unwrap_or("-")),
                    colorize_cell(
                        &e.base_salary
                            .map(format_amount)
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::core::payroll::{PayrollEdit, PayrollLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::month::PayrollMonth;
use crate::models::payroll::{LineItem, PayrollRecord};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREEN, RED, RESET, YELLOW};
use crate::utils::formatting::format_amount;
use crate::utils::table::{Column, Table};

fn render_list(records: &[PayrollRecord]) -> String {
    let mut table = Table::new(vec![
        Column::left("EMPLOYEE"),
        Column::left("STORE"),
        Column::right("BASE"),
        Column::right("OVERTIME"),
        Column::right("BONUSES"),
        Column::right("DEDUCTIONS"),
        Column::right("TOTAL"),
        Column::left("STATUS"),
    ]);

    for r in records {
        let b: i64 = r.bonuses.iter().map(|l| l.amount).sum();
        let d: i64 = r.deductions.iter().map(|l| l.amount).sum();
        let status = if r.is_paid() {
            format!("{GREEN}paid{RESET}")
        } else {
            format!("{YELLOW}pending{RESET}")
        };
        table.add_row(vec![
            r.employee_id.clone(),
            r.store_id.clone(),
            format_amount(r.base_salary),
            format_amount(r.overtime_pay),
            format_amount(b),
            format_amount(d),
            format_amount(r.total_amount),
            status,
        ]);
    }

    table.render()
}

fn print_detail(r: &PayrollRecord) {
    println!("\n💰 Payroll {} [{}]", r.key(), r.status);
    println!("   base salary  : {:>15}", format_amount(r.base_salary));
    println!("   overtime pay : {:>15}", format_amount(r.overtime_pay));

    for (i, l) in r.bonuses.iter().enumerate() {
        println!(
            "   {GREEN}+ [{i}]{RESET} {:<40} {:>12}",
            l.name,
            format_amount(l.amount)
        );
    }
    for (i, l) in r.deductions.iter().enumerate() {
        println!(
            "   {RED}- [{i}]{RESET} {:<40} {:>12}",
            l.name,
            format_amount(l.amount)
        );
    }

    println!("   total        : {:>15}", format_amount(r.total_amount));
    if let Some(at) = &r.paid_at {
        println!("   paid at      : {}", at);
    }
}

fn parse_items(raw: &[String]) -> AppResult<Vec<LineItem>> {
    raw.iter().map(|s| LineItem::parse_pair(s)).collect()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Payroll {
        month,
        generate,
        list,
        employee,
        store,
        base,
        overtime_pay,
        add_bonus,
        add_deduction,
        remove_bonus,
        remove_deduction,
        pay,
    } = cmd
    {
        let month = PayrollMonth::parse(month)?;

        let edit = PayrollEdit {
            base_salary: *base,
            overtime_pay: *overtime_pay,
            add_bonuses: parse_items(add_bonus)?,
            add_deductions: parse_items(add_deduction)?,
            remove_bonus: *remove_bonus,
            remove_deduction: *remove_deduction,
            pay: *pay,
        };

        let pool = DbPool::open(&cfg.database)?;

        //
        // 1) GENERATE
        //
        if *generate {
            let report = PayrollLogic::generate(&pool, month)?;
            success(format!(
                "Payroll {}: {} created, {} refreshed, {} paid left untouched",
                month, report.created, report.refreshed, report.skipped_paid
            ));
            if !report.unassigned.is_empty() {
                warning(format!(
                    "Skipped (no store assigned): {}",
                    report.unassigned.join(", ")
                ));
            }
        }

        //
        // 2) EDIT
        //
        if !edit.is_empty() {
            let emp_id = employee.as_deref().ok_or_else(|| {
                AppError::Other("--employee is required to edit a payroll record".into())
            })?;
            let emp = Core::require_employee(&pool.conn, emp_id)?;
            let store_id = Core::store_of(&emp, store.as_deref())?;

            let rec = PayrollLogic::edit(&pool, emp_id, &store_id, month, &edit)?;
            success(format!(
                "Payroll {} updated: total {}",
                rec.key(),
                format_amount(rec.total_amount)
            ));
            print_detail(&rec);
        }

        //
        // 3) LIST (also the default action)
        //
        if *list || (!*generate && edit.is_empty()) {
            let records =
                PayrollLogic::list(&pool, month, employee.as_deref(), store.as_deref())?;
            if records.is_empty() {
                info(format!("No payroll records for {}.", month));
                return Ok(());
            }

            header(format!("Payroll {}", month));
            print!("{}", render_list(&records));

            if employee.is_some() {
                for r in &records {
                    print_detail(r);
                }
            }
        }
    }

    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::suggestions::{Selection, SuggestionSet, SuggestionTotals};
use crate::core::payroll::PayrollLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::month::PayrollMonth;
use crate::models::suggestion::SuggestionItem;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREEN, RED, RESET, color_for_amount};
use crate::utils::formatting::format_amount;
use crate::utils::table::{Column, Table};
use serde::Serialize;

#[derive(Serialize)]
struct SuggestionReport<'a> {
    employee_id: &'a str,
    month: PayrollMonth,
    no_data: bool,
    items: &'a [SuggestionItem],
    totals: SuggestionTotals,
}

fn render(set: &SuggestionSet, selection: &Selection) -> String {
    let mut table = Table::new(vec![
        Column::left(" "),
        Column::left("ID"),
        Column::left("KIND"),
        Column::right("MIN"),
        Column::right("AMOUNT"),
        Column::left("REASON"),
    ]);

    for it in &set.items {
        let (color, sign) = if it.is_bonus() { (GREEN, "+") } else { (RED, "-") };
        table.add_row(vec![
            if selection.contains(&it.id) { "x" } else { " " }.to_string(),
            it.id.clone(),
            format!("{:?}", it.kind).to_lowercase(),
            it.minutes.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
            format!("{color}{sign}{}{RESET}", format_amount(it.amount)),
            it.reason.clone(),
        ]);
    }

    table.render()
}

fn print_totals(t: &SuggestionTotals) {
    println!(
        "\nSelected {} | bonuses {}+{}{} | deductions {}-{}{} | net {}{}{}",
        t.selected,
        GREEN,
        format_amount(t.bonus_total),
        RESET,
        RED,
        format_amount(t.deduction_total),
        RESET,
        color_for_amount(t.net),
        format_amount(t.net),
        RESET
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Suggest {
        employee,
        month,
        json,
        apply,
        select,
        store,
    } = cmd
    {
        let month = PayrollMonth::parse(month)?;
        let mut pool = DbPool::open(&cfg.database)?;

        let set = PayrollLogic::derive(&pool, cfg, employee, month)?;
        let selection = match select {
            Some(ids) => Selection::from_ids(ids.iter().map(|s| s.trim().to_string())),
            None => set.default_selection(),
        };
        let totals = set.totals(&selection);

        if *json {
            let report = SuggestionReport {
                employee_id: employee,
                month,
                no_data: set.is_no_data(),
                items: &set.items,
                totals,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if set.is_no_data() {
            info(format!("No attendance data for '{}' in {}.", employee, month));
        } else if set.is_empty() {
            info(format!(
                "No anomalies for '{}' in {}: nothing to suggest.",
                employee, month
            ));
        } else {
            header(format!("Suggestions for '{}' in {}", employee, month));
            print!("{}", render(&set, &selection));
            print_totals(&totals);
        }

        if !*apply {
            return Ok(());
        }

        if selection.is_empty() || set.is_empty() {
            info("Nothing selected: payroll left unchanged.");
            return Ok(());
        }

        let (rec, outcome) =
            PayrollLogic::apply(&mut pool, cfg, employee, store.as_deref(), month, &selection)?;

        for id in &outcome.skipped {
            warning(format!("Skipped '{}': zero amount (no base salary?)", id));
        }
        success(format!(
            "Applied {} bonus(es) and {} deduction(s) to {}: total {}",
            outcome.bonuses_added,
            outcome.deductions_added,
            rec.key(),
            format_amount(rec.total_amount)
        ));
    }

    Ok(())
}

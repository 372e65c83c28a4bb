use colored::{ColoredString, Colorize};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::money;

fn colored_money(value: f64) -> ColoredString {
    if value < 0.0 {
        money(value).red().bold()
    } else {
        money(value).green().bold()
    }
}

pub fn run() -> Result<()> {
    let ledger = open_ledger()?;
    let snapshot = ledger.snapshot();
    let totals = snapshot.totals;

    println!("{}", format!("Summary for {}", snapshot.period).bold());
    println!("Income:          {}", colored_money(totals.total_income));
    println!("Total Expenses:  {}", colored_money(totals.total_expenses));
    println!("Savings:         {}", colored_money(totals.savings()));
    Ok(())
}

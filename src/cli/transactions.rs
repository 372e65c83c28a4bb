use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_ledger, parse_date};
use crate::db::find_category;
use crate::error::{BudgetError, Result};
use crate::fmt::{date, money};
use crate::models::{NewTransaction, TransactionType};

pub fn list() -> Result<()> {
    let ledger = open_ledger()?;
    let snapshot = ledger.snapshot();
    if snapshot.transactions.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Description", "Type", "Amount"]);
    for txn in &snapshot.transactions {
        let amount = money(txn.signed_amount());
        let amount = match txn.kind {
            TransactionType::Expense => amount.red().to_string(),
            TransactionType::Income => amount.green().to_string(),
        };
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(date(txn.date)),
            Cell::new(ledger.category_name(txn.category_id)),
            Cell::new(&txn.description),
            Cell::new(txn.kind),
            Cell::new(amount),
        ]);
    }
    println!("Recent transactions\n{table}");
    Ok(())
}

pub fn add(
    amount: f64,
    category: &str,
    kind: &str,
    description: &str,
    on: Option<&str>,
) -> Result<()> {
    let kind: TransactionType = kind.parse()?;
    let mut ledger = open_ledger()?;
    let category = find_category(ledger.connection(), category)?;
    let when = match on {
        Some(d) => parse_date(d)?,
        None => ledger.now().timestamp(),
    };

    let id = ledger.insert_transaction(NewTransaction {
        category_id: Some(category.id),
        amount,
        date: when,
        description: description.to_string(),
        kind,
    })?;
    println!(
        "Added {} {} ({}) as #{id}",
        kind.as_str().to_lowercase(),
        money(amount),
        category.name
    );
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let mut ledger = open_ledger()?;
    if !ledger.delete_transaction(id)? {
        return Err(BudgetError::TransactionNotFound(id));
    }
    println!("Deleted transaction #{id}");
    Ok(())
}

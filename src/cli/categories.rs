use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;

pub fn list() -> Result<()> {
    let ledger = open_ledger()?;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type"]);
    for cat in &ledger.snapshot().categories {
        table.add_row(vec![
            Cell::new(cat.id),
            Cell::new(&cat.name),
            Cell::new(cat.kind.map(|k| k.as_str()).unwrap_or("")),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}

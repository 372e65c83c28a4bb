use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{BudgetError, Result};
use crate::models::{Category, MonthlyTotals, NewTransaction, Transaction, TransactionType};
use crate::window::MonthWindow;

/// How many transactions the recent list shows.
pub const RECENT_LIMIT: usize = 30;

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// The seed file defines the schema; fail early if it is not the one we expect.
pub fn check_schema(conn: &Connection) -> Result<()> {
    for table in ["Categories", "Transactions"] {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [table],
            |r| r.get(0),
        )?;
        if !exists {
            return Err(BudgetError::MissingTable(table));
        }
    }
    Ok(())
}

/// Run `f` inside a transaction: committed on `Ok`, rolled back on `Err`.
pub fn with_transaction<T>(conn: &Connection, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    let tx = conn.unchecked_transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

pub fn recent_transactions(conn: &Connection, limit: usize) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, category_id, amount, date, description, type FROM Transactions \
         ORDER BY date DESC LIMIT ?1",
    )?;
    let rows = stmt
        .query_map([limit as i64], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                category_id: row.get(1)?,
                amount: row.get(2)?,
                // Outside seeds may store fractional seconds as REAL.
                date: row.get::<_, f64>(3)?.floor() as i64,
                description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                kind: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT * FROM Categories ORDER BY id")?;
    let id_idx = stmt.column_index("id")?;
    let name_idx = stmt.column_index("name")?;
    // Older seeds carry only id and name.
    let type_idx = stmt.column_index("type").ok();
    let rows = stmt
        .query_map([], |row| {
            let kind = match type_idx {
                Some(i) => row.get::<_, Option<TransactionType>>(i)?,
                None => None,
            };
            Ok(Category {
                id: row.get(id_idx)?,
                name: row.get(name_idx)?,
                kind,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn monthly_totals(conn: &Connection, window: &MonthWindow) -> Result<MonthlyTotals> {
    let totals = conn.query_row(
        "SELECT \
           COALESCE(SUM(CASE WHEN type = 'Expense' THEN amount ELSE 0 END), 0) AS totalExpenses, \
           COALESCE(SUM(CASE WHEN type = 'Income' THEN amount ELSE 0 END), 0) AS totalIncome \
         FROM Transactions \
         WHERE date >= ?1 AND date <= ?2",
        params![window.start, window.end],
        |row| {
            Ok(MonthlyTotals {
                total_expenses: row.get(0)?,
                total_income: row.get(1)?,
            })
        },
    )?;
    Ok(totals)
}

pub fn insert_transaction(conn: &Connection, txn: &NewTransaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO Transactions (category_id, amount, date, description, type) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![txn.category_id, txn.amount, txn.date, txn.description, txn.kind],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns whether a row was removed.
pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let removed = conn.execute("DELETE FROM Transactions WHERE id = ?1", [id])?;
    Ok(removed > 0)
}

/// Resolve a category given either its id or its (case-insensitive) name.
pub fn find_category(conn: &Connection, key: &str) -> Result<Category> {
    let key = key.trim();
    let by_id = key.parse::<i64>().ok();
    categories(conn)?
        .into_iter()
        .find(|c| Some(c.id) == by_id || c.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| BudgetError::UnknownCategory(key.to_string()))
}

pub fn count(conn: &Connection, table: &str) -> Result<i64> {
    let n = conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(n)
}

use chrono::{DateTime, Datelike, Local, TimeZone};
use rusqlite::Connection;

use crate::cli::open_ledger;
use crate::db::find_category;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{NewTransaction, TransactionType};

// (day of month, category, amount, description, type)
const SAMPLES: &[(u32, &str, f64, &str, TransactionType)] = &[
    (1, "Salary", 3400.00, "Monthly salary", TransactionType::Income),
    (1, "Rent", 1200.00, "Apartment rent", TransactionType::Expense),
    (3, "Groceries", 76.45, "Farmers market", TransactionType::Expense),
    (5, "Utilities", 58.20, "Electricity bill", TransactionType::Expense),
    (8, "Transportation", 40.00, "Transit pass", TransactionType::Expense),
    (10, "Dining Out", 32.80, "Ramen night", TransactionType::Expense),
    (12, "Freelancing", 600.00, "Website refresh", TransactionType::Income),
    (15, "Groceries", 91.13, "Weekly groceries", TransactionType::Expense),
    (18, "Entertainment", 14.99, "Movie tickets", TransactionType::Expense),
    (22, "Health", 45.00, "Yoga class pack", TransactionType::Expense),
];

/// Sample rows dated inside the month of `now`, clamped to days that have
/// already happened.
fn sample_transactions(conn: &Connection, now: &DateTime<Local>) -> Result<Vec<NewTransaction>> {
    let mut rows = Vec::with_capacity(SAMPLES.len());
    for (day, category, amount, description, kind) in SAMPLES {
        let day = (*day).min(now.day());
        let date = Local
            .with_ymd_and_hms(now.year(), now.month(), day, 12, 0, 0)
            .earliest()
            .map(|dt| dt.timestamp())
            .unwrap_or_else(|| now.timestamp());
        let category_id = find_category(conn, category).ok().map(|c| c.id);
        rows.push(NewTransaction {
            category_id,
            amount: *amount,
            date,
            description: description.to_string(),
            kind: *kind,
        });
    }
    Ok(rows)
}

fn already_loaded(ledger: &Ledger) -> Result<bool> {
    let window = ledger.snapshot().window;
    let exists: bool = ledger.connection().query_row(
        "SELECT EXISTS(SELECT 1 FROM Transactions WHERE description = ?1 AND date >= ?2 AND date <= ?3)",
        rusqlite::params![SAMPLES[0].3, window.start, window.end],
        |r| r.get(0),
    )?;
    Ok(exists)
}

pub(crate) fn insert_demo_data(ledger: &mut Ledger, now: &DateTime<Local>) -> Result<usize> {
    if already_loaded(ledger)? {
        return Ok(0);
    }
    let rows = sample_transactions(ledger.connection(), now)?;
    Ok(ledger.insert_transactions(&rows)?.len())
}

pub fn run() -> Result<()> {
    let mut ledger = open_ledger()?;
    let now = ledger.now();
    let inserted = insert_demo_data(&mut ledger, &now)?;
    if inserted == 0 {
        println!("Sample transactions are already loaded for this month.");
    } else {
        println!("Loaded {inserted} sample transactions for {}.", ledger.snapshot().period);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::get_connection;
    use crate::ledger::Clock;

    const SCHEMA: &str = include_str!("../../assets/schema.sql");
    const SEED: &str = include_str!("../../assets/seed.sql");

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn test_ledger(now: DateTime<Local>) -> (tempfile::TempDir, Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(SEED).unwrap();
        let ledger = Ledger::with_clock(conn, Box::new(FixedClock(now))).unwrap();
        (dir, ledger)
    }

    #[test]
    fn test_demo_fills_current_month() {
        let now = Local.with_ymd_and_hms(2026, 10, 25, 9, 0, 0).unwrap();
        let (_dir, mut ledger) = test_ledger(now);
        let inserted = insert_demo_data(&mut ledger, &now).unwrap();
        assert_eq!(inserted, SAMPLES.len());

        let totals = ledger.snapshot().totals;
        assert_eq!(totals.total_income, 4000.0);
        assert!((totals.total_expenses - 1558.57).abs() < 1e-9);
    }

    #[test]
    fn test_demo_early_in_month_stays_in_window() {
        let now = Local.with_ymd_and_hms(2026, 11, 2, 18, 0, 0).unwrap();
        let (_dir, mut ledger) = test_ledger(now);
        insert_demo_data(&mut ledger, &now).unwrap();
        let window = ledger.snapshot().window;
        let in_window = ledger
            .snapshot()
            .transactions
            .iter()
            .filter(|t| window.contains(t.date))
            .count();
        assert_eq!(in_window, SAMPLES.len());
    }

    #[test]
    fn test_demo_idempotent() {
        let now = Local.with_ymd_and_hms(2026, 10, 25, 9, 0, 0).unwrap();
        let (_dir, mut ledger) = test_ledger(now);
        insert_demo_data(&mut ledger, &now).unwrap();
        assert_eq!(insert_demo_data(&mut ledger, &now).unwrap(), 0);
        assert_eq!(
            crate::db::count(ledger.connection(), "Transactions").unwrap(),
            14 + SAMPLES.len() as i64
        );
    }

    #[test]
    fn test_demo_notifies_once() {
        let now = Local.with_ymd_and_hms(2026, 10, 25, 9, 0, 0).unwrap();
        let (_dir, mut ledger) = test_ledger(now);
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let seen = calls.clone();
        ledger.subscribe(move |_| seen.set(seen.get() + 1));
        insert_demo_data(&mut ledger, &now).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_demo_categories_resolve() {
        let now = Local.with_ymd_and_hms(2026, 10, 25, 9, 0, 0).unwrap();
        let (_dir, ledger) = test_ledger(now);
        let rows = sample_transactions(ledger.connection(), &now).unwrap();
        assert!(rows.iter().all(|r| r.category_id.is_some()));
    }
}

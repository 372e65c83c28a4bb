use chrono::{DateTime, Local};
use rusqlite::Connection;

use crate::db::{self, with_transaction, RECENT_LIMIT};
use crate::error::{BudgetError, Result};
use crate::models::{Category, MonthlyTotals, NewTransaction, Transaction};
use crate::window::{month_window, period_label, MonthWindow};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Source of "now" for the monthly window.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Everything a screen renders, read in one pass against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub totals: MonthlyTotals,
    pub window: MonthWindow,
    /// "October 2026"
    pub period: String,
}

impl Snapshot {
    fn load(conn: &Connection, now: &DateTime<Local>) -> Result<Self> {
        let window = month_window(now);
        Ok(Self {
            transactions: db::recent_transactions(conn, RECENT_LIMIT)?,
            categories: db::categories(conn)?,
            totals: db::monthly_totals(conn, &window)?,
            window,
            period: period_label(now),
        })
    }
}

type Listener = Box<dyn FnMut(&Snapshot)>;

/// The type carries the side, so amounts are always positive.
fn check_amount(txn: &NewTransaction) -> Result<()> {
    if txn.amount.is_finite() && txn.amount > 0.0 {
        return Ok(());
    }
    let err = BudgetError::InvalidAmount(txn.amount.to_string());
    tracing::debug!("insert transaction failed: {err}");
    Err(err)
}

/// State store between the database and whatever draws it.
///
/// Every write runs in a transaction together with the refresh that follows
/// it, so the snapshot always matches the store after a call returns. A failed
/// call is logged at debug level, leaves the previous snapshot in place and
/// notifies nobody. Callers surface the returned error themselves.
pub struct Ledger {
    conn: Connection,
    clock: Box<dyn Clock>,
    snapshot: Snapshot,
    listeners: Vec<Listener>,
}

impl Ledger {
    pub fn open(conn: Connection) -> Result<Self> {
        Self::with_clock(conn, Box::new(SystemClock))
    }

    pub fn with_clock(conn: Connection, clock: Box<dyn Clock>) -> Result<Self> {
        db::check_schema(&conn)?;
        let now = clock.now();
        let snapshot = with_transaction(&conn, |tx| Snapshot::load(tx, &now))?;
        Ok(Self {
            conn,
            clock,
            snapshot,
            listeners: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The moment new transactions are stamped with.
    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Called with the fresh snapshot after every successful refresh.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Re-read all projections, re-deriving the monthly window from the clock.
    pub fn get_data(&mut self) -> Result<()> {
        self.apply("refresh", |_| Ok(()))
    }

    pub fn insert_transaction(&mut self, txn: NewTransaction) -> Result<i64> {
        check_amount(&txn)?;
        self.apply("insert transaction", |tx| db::insert_transaction(tx, &txn))
    }

    /// Insert every row or none of them, with a single refresh afterwards.
    pub fn insert_transactions(&mut self, txns: &[NewTransaction]) -> Result<Vec<i64>> {
        for txn in txns {
            check_amount(txn)?;
        }
        self.apply("insert transactions", |tx| {
            txns.iter().map(|txn| db::insert_transaction(tx, txn)).collect()
        })
    }

    /// Returns whether a row was removed.
    pub fn delete_transaction(&mut self, id: i64) -> Result<bool> {
        self.apply("delete transaction", |tx| db::delete_transaction(tx, id))
    }

    pub fn category_name(&self, category_id: Option<i64>) -> &str {
        category_id
            .and_then(|id| self.snapshot.categories.iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    fn apply<T>(&mut self, action: &str, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let now = self.clock.now();
        let outcome = with_transaction(&self.conn, |tx| {
            let value = op(tx)?;
            let snapshot = Snapshot::load(tx, &now)?;
            Ok((value, snapshot))
        });
        match outcome {
            Ok((value, snapshot)) => {
                self.snapshot = snapshot;
                for listener in &mut self.listeners {
                    listener(&self.snapshot);
                }
                Ok(value)
            }
            Err(e) => {
                tracing::debug!("{action} failed: {e}");
                Err(e)
            }
        }
    }
}

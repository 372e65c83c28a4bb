pub mod categories;
pub mod demo;
pub mod home;
pub mod init;
pub mod status;
pub mod summary;
pub mod transactions;

use chrono::{Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};

use crate::bootstrap::{database_path, provision, BUNDLED_SEED};
use crate::db::get_connection;
use crate::error::{BudgetError, Result};
use crate::ledger::Ledger;
use crate::settings::get_data_dir;

/// Provision the seed on first launch, then open the ledger over it.
pub(crate) fn open_ledger() -> Result<Ledger> {
    let db_path = database_path(&get_data_dir());
    provision(&db_path, BUNDLED_SEED)?;
    let conn = get_connection(&db_path)?;
    Ledger::open(conn)
}

/// YYYY-MM-DD at local midnight, as Unix seconds.
pub(crate) fn parse_date(input: &str) -> Result<i64> {
    let day = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| BudgetError::InvalidDate(input.to_string()))?;
    let naive = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| BudgetError::InvalidDate(input.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| day.and_hms_opt(12, 0, 0).and_then(|n| Local.from_local_datetime(&n).earliest()))
        .map(|dt| dt.timestamp())
        .ok_or_else(|| BudgetError::InvalidDate(input.to_string()))
}

#[derive(Parser)]
#[command(name = "budget-buddy", about = "Track monthly income, expenses and savings.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and seed the database.
    Init {
        /// Path for Budget Buddy data (default: ~/Documents/budget-buddy)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Seed from this SQLite file instead of the bundled one
        #[arg(long)]
        seed: Option<String>,
    },
    /// List the 30 most recent transactions.
    List,
    /// List categories.
    Categories,
    /// Income, expenses and savings for the current month.
    Summary,
    /// Record a transaction.
    Add {
        /// Amount greater than zero, e.g. 12.50; --type decides the side
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Category name or ID
        #[arg(long)]
        category: String,
        /// expense or income
        #[arg(long = "type", default_value = "expense")]
        kind: String,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
        /// Date: YYYY-MM-DD (default: now)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID (shown in `budget-buddy list`)
        id: i64,
    },
    /// Load sample transactions for the current month.
    Demo,
    /// Show current database and counts.
    Status,
}

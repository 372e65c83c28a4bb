use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Invalid transaction type: {0} (expected Expense or Income)")]
    InvalidType(String),

    #[error("Invalid amount: {0} (expected a number greater than zero)")]
    InvalidAmount(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("No transaction with id {0}")]
    TransactionNotFound(i64),

    #[error("Database is missing the {0} table")]
    MissingTable(&'static str),

    #[error("Seed database not found: {0}")]
    SeedNotFound(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;

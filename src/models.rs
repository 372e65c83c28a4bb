use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::error::BudgetError;

/// Which side of the monthly aggregate a transaction lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TransactionType::Expense => TransactionType::Income,
            TransactionType::Income => TransactionType::Expense,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            _ => Err(BudgetError::InvalidType(s.to_string())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

// Stored values are canonical, so anything but the exact tag is rejected.
impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Expense" => Ok(TransactionType::Expense),
            "Income" => Ok(TransactionType::Income),
            other => Err(FromSqlError::Other(Box::new(BudgetError::InvalidType(
                other.to_string(),
            )))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Side the category is meant for, when the seed records one.
    pub kind: Option<TransactionType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub category_id: Option<i64>,
    pub amount: f64,
    /// Unix timestamp, seconds.
    pub date: i64,
    pub description: String,
    pub kind: TransactionType,
}

impl Transaction {
    /// Amount as it affects savings: expenses count against, income for.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Expense => -self.amount,
            TransactionType::Income => self.amount,
        }
    }
}

/// Insert input; the id is assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub category_id: Option<i64>,
    pub amount: f64,
    pub date: i64,
    pub description: String,
    pub kind: TransactionType,
}

/// Income and expense totals for one monthly window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyTotals {
    pub total_expenses: f64,
    pub total_income: f64,
}

impl MonthlyTotals {
    pub fn savings(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parses_case_insensitively() {
        assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert_eq!(" INCOME ".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_type_display_is_canonical() {
        assert_eq!(TransactionType::Expense.to_string(), "Expense");
        assert_eq!(TransactionType::Income.to_string(), "Income");
        assert_eq!(TransactionType::Income.toggled(), TransactionType::Expense);
    }

    #[test]
    fn test_savings_is_income_minus_expenses() {
        let samples = [(0.0, 0.0), (100.0, 250.5), (1200.0, 300.25), (0.0, 19.99)];
        for (income, expenses) in samples {
            let totals = MonthlyTotals {
                total_income: income,
                total_expenses: expenses,
            };
            assert_eq!(totals.savings(), income - expenses);
        }
        let negative = MonthlyTotals {
            total_income: 10.0,
            total_expenses: 22.5,
        };
        assert_eq!(negative.savings(), -12.5);
    }

    #[test]
    fn test_signed_amount_follows_type() {
        let mut t = Transaction {
            id: 1,
            category_id: None,
            amount: 25.0,
            date: 0,
            description: String::new(),
            kind: TransactionType::Expense,
        };
        assert_eq!(t.signed_amount(), -25.0);
        t.kind = TransactionType::Income;
        assert_eq!(t.signed_amount(), 25.0);
    }

    #[test]
    fn test_type_round_trips_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let kind: TransactionType = conn
            .query_row("SELECT ?1", [TransactionType::Income], |r| r.get(0))
            .unwrap();
        assert_eq!(kind, TransactionType::Income);
        let bad: rusqlite::Result<TransactionType> =
            conn.query_row("SELECT 'income'", [], |r| r.get(0));
        assert!(bad.is_err());
    }
}

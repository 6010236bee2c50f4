//! Validation of inbound request bodies.
//!
//! Bodies arrive as loosely typed JSON; this module turns them into
//! [`AdviceRequest`]s or reports every problem found at once.

use serde_json::Value;

use crate::{AdvisorError, ResultAdvisor};

/// One transaction of an advice request.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    pub category: String,
    pub date: String,
}

/// A validated financial advice request.
///
/// Always holds at least one transaction and three real numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct AdviceRequest {
    pub transactions: Vec<Transaction>,
    pub total_balance: f64,
    pub income: f64,
    pub expenses: f64,
}

/// What to do when `totalBalance`, `income` or `expenses` are absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingTotals {
    /// Absent totals are validation errors.
    #[default]
    Reject,
    /// Absent totals are derived from the transactions.
    Derive,
}

/// Totals derived from a transaction list, the way the dashboard shows them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub balance: f64,
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (balance, income, spent) =
            transactions
                .iter()
                .fold((0.0, 0.0, 0.0), |(balance, income, spent), t| {
                    if t.amount > 0.0 {
                        (balance + t.amount, income + t.amount, spent)
                    } else {
                        (balance + t.amount, income, spent + t.amount)
                    }
                });

        Self {
            balance,
            income,
            expenses: f64::abs(spent),
        }
    }
}

/// Returns the trimmed chat message or fails when it is missing or blank.
pub fn validate_message(body: &Value) -> ResultAdvisor<&str> {
    match body.get("message").and_then(Value::as_str).map(str::trim) {
        Some(message) if !message.is_empty() => Ok(message),
        _ => Err(AdvisorError::Validation("Message is required".to_string())),
    }
}

impl AdviceRequest {
    /// Validates a financial advice body.
    ///
    /// Problems are collected and reported together, separated by `", "`.
    pub fn from_json(body: &Value, missing: MissingTotals) -> ResultAdvisor<Self> {
        let mut problems = Vec::new();

        let transactions = match body.get("transactions").and_then(Value::as_array) {
            None => {
                problems.push("Transactions must be an array");
                None
            }
            Some(items) if items.is_empty() => {
                problems.push("At least one transaction is required");
                None
            }
            Some(items) => {
                let parsed: Option<Vec<_>> = items.iter().map(parse_transaction).collect();
                if parsed.is_none() {
                    problems.push("All transactions must have valid amount, category, and date");
                }
                parsed
            }
        };

        let derived = match (&transactions, missing) {
            (Some(transactions), MissingTotals::Derive) => {
                Some(Totals::from_transactions(transactions))
            }
            _ => None,
        };

        let mut number = |key: &str, fallback: Option<f64>, problem: &'static str| {
            let value = match body.get(key) {
                Some(value) => value.as_f64(),
                None => fallback,
            };
            if value.is_none() {
                problems.push(problem);
            }
            value
        };

        let total_balance = number(
            "totalBalance",
            derived.map(|t| t.balance),
            "Total balance must be a number",
        );
        let income = number(
            "income",
            derived.map(|t| t.income),
            "Income must be a number",
        );
        let expenses = number(
            "expenses",
            derived.map(|t| t.expenses),
            "Expenses must be a number",
        );

        match (transactions, total_balance, income, expenses) {
            (Some(transactions), Some(total_balance), Some(income), Some(expenses))
                if problems.is_empty() =>
            {
                Ok(Self {
                    transactions,
                    total_balance,
                    income,
                    expenses,
                })
            }
            _ => Err(AdvisorError::from_problems(&problems)),
        }
    }
}

fn parse_transaction(value: &Value) -> Option<Transaction> {
    let amount = value.get("amount")?.as_f64()?;
    let category = value.get("category")?.as_str()?.trim();
    let date = value.get("date")?.as_str()?.trim();
    if category.is_empty() || date.is_empty() {
        return None;
    }

    Some(Transaction {
        amount,
        category: category.to_string(),
        date: date.to_string(),
    })
}

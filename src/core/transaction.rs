use serde::{Serialize, Deserialize};

use crate::core::error::{LedgerError, LedgerResult};

pub type Amount = f64;
pub type TransactionId = u64;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
    Income,
    Expense
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = match self {
            Self::Income => "income",
            Self::Expense => "expense"
        };
        write!(f, "{}", disp)
    }
}

/// Renders an amount with two decimals and the sign in front of the
/// currency symbol: `$12.50`, `-$12.50`.
pub fn format_currency(amount: Amount) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, amount.abs())
}

/// Parses the text of an amount input, rejecting anything that is not a
/// plain finite number.
pub fn parse_amount(text: &str) -> LedgerResult<Amount> {
    let trimmed = text.trim();
    let amount: Amount = trimmed.parse()
        .map_err(|_| LedgerError::InvalidAmount(trimmed.to_owned()))?;
    return validate_amount(amount);
}

pub(crate) fn validate_amount(amount: Amount) -> LedgerResult<Amount> {
    if !amount.is_finite() {
        return Err(LedgerError::NonFiniteAmount(amount));
    }
    return Ok(amount);
}

/// One income (positive amount) or expense (negative amount) entry.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: Amount
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.description, format_currency(self.amount))
    }
}

impl Transaction {
    /// Builds a transaction, enforcing the non-empty description and finite
    /// amount rules. The description is stored trimmed.
    pub fn new(id: TransactionId, description: &str, amount: Amount) -> LedgerResult<Transaction> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        let amount = validate_amount(amount)?;
        return Ok(Transaction { id, description: description.to_owned(), amount });
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Zero amounts are listed as expenses but count towards neither total.
    pub fn kind(&self) -> Kind {
        if self.is_income() { Kind::Income } else { Kind::Expense }
    }
}

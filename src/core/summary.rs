use serde::Serialize;

use crate::core::transaction::{format_currency, Amount, Transaction};

/// Totals derived from a ledger. Never stored, always recomputed.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Amount,
    /// Sum of the negative amounts, so never above zero.
    pub total_expense: Amount,
    pub balance: Amount
}

impl Summary {
    pub fn of(transactions: &[Transaction]) -> Summary {
        let total_income: Amount = transactions.iter()
            .filter(|t| t.is_income())
            .fold(0.0, |acc, t| acc + t.amount);

        let total_expense: Amount = transactions.iter()
            .filter(|t| t.is_expense())
            .fold(0.0, |acc, t| acc + t.amount);

        return Summary { total_income, total_expense, balance: total_income + total_expense };
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Balance: {}; Income: {}; Expense: {}",
            format_currency(self.balance),
            format_currency(self.total_income),
            format_currency(self.total_expense.abs()))
    }
}

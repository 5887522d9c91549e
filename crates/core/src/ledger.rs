//! Balance arithmetic for the transaction desk. The backend owns the real
//! balance; these helpers only describe what a pending transaction would do.

use crate::models::{
    transaction::{Transaction, TransactionType},
    user::User,
};

/// `$1,234.50` style formatting with two decimals.
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// `+$5.00` / `-$5.00`
pub fn signed_amount(kind: TransactionType, amount: f64) -> String {
    format!("{}{}", kind.sign(), format_money(amount.abs()))
}

pub fn describe(transaction: &Transaction) -> String {
    signed_amount(transaction.transaction_type, transaction.amount)
}

pub fn apply(current: f64, kind: TransactionType, amount: f64) -> f64 {
    match kind {
        TransactionType::Add => current + amount,
        TransactionType::Subtract => current - amount,
    }
}

/// What the selected user's balance would become.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancePreview {
    pub current: f64,
    pub kind: TransactionType,
    pub amount: f64,
    pub resulting: f64,
}

impl BalancePreview {
    /// A missing balance counts as zero.
    pub fn for_user(user: &User, kind: TransactionType, amount: f64) -> Self {
        let current = user.balance_or_zero();
        Self {
            current,
            kind,
            amount,
            resulting: apply(current, kind, amount),
        }
    }

    pub fn goes_negative(&self) -> bool {
        self.resulting < 0.0
    }
}

/// Net effect of a transaction history on a balance.
pub fn net_change(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .fold(0.0, |total, tx| apply(total, tx.transaction_type, tx.amount))
}

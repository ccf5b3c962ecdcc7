// 🧾 Transaction Record - One immutable entry in an account's ledger
//
// Recorded only by Account::deposit / Account::withdraw. Once pushed onto the
// log it is never edited or reordered.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TRANSACTION KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money added to the account
    Deposit,

    /// Money taken out of the account
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// A single ledger entry
///
/// `amount` is always positive; the direction lives in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identity (UUID)
    pub id: String,

    pub kind: TransactionKind,

    pub amount: Decimal,

    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with a fresh UUID
    pub fn new(kind: TransactionKind, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            amount,
            timestamp,
        }
    }

    pub fn deposit(amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Transaction::new(TransactionKind::Deposit, amount, timestamp)
    }

    pub fn withdrawal(amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Transaction::new(TransactionKind::Withdrawal, amount, timestamp)
    }

    /// Amount with sign applied: deposits positive, withdrawals negative
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionKind::Withdrawal
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let now = Utc::now();
        let deposit = Transaction::deposit(Decimal::from(250), now);
        let withdrawal = Transaction::withdrawal(Decimal::from(40), now);

        assert_eq!(deposit.signed_amount(), Decimal::from(250));
        assert_eq!(withdrawal.signed_amount(), Decimal::from(-40));
        assert!(deposit.is_deposit());
        assert!(withdrawal.is_withdrawal());
    }

    #[test]
    fn test_each_transaction_gets_its_own_id() {
        let now = Utc::now();
        let a = Transaction::deposit(Decimal::ONE, now);
        let b = Transaction::deposit(Decimal::ONE, now);

        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
        assert_eq!(TransactionKind::Withdrawal.as_str(), "Withdrawal");
    }
}

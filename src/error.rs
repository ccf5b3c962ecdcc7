// 🚫 Rejections - Recoverable outcomes of invalid operations
//
// Nothing here is fatal. Every rejected operation leaves the account or loan
// untouched; the Display text is the line the reporter writes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Operation a rejection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Deposit,
    Withdrawal,
    Payment,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Deposit => "deposit",
            Operation::Withdrawal => "withdrawal",
            Operation::Payment => "payment",
        }
    }

    fn invalid_amount_message(&self) -> &'static str {
        match self {
            Operation::Deposit => "Invalid deposit amount",
            // Non-positive and overdrawn withdrawals share one message
            Operation::Withdrawal => "Invalid withdrawal amount or insufficient balance",
            Operation::Payment => "Invalid payment amount",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// Amount was zero or negative where a positive amount is required
    #[error("{}", .operation.invalid_amount_message())]
    InvalidAmount { operation: Operation, amount: Decimal },

    /// Withdrawal larger than the current balance
    #[error("Invalid withdrawal amount or insufficient balance")]
    InsufficientFunds { balance: Decimal, amount: Decimal },

    /// Withdrawal would leave a savings balance under its floor
    #[error("Withdrawal failed: Insufficient balance or below minimum balance")]
    BelowMinimum {
        balance: Decimal,
        amount: Decimal,
        min_balance: Decimal,
    },

    /// Withdrawal would push a checking balance past its overdraft limit
    #[error("Withdrawal failed: Insufficient funds and overdraft limit exceeded")]
    OverdraftExceeded {
        balance: Decimal,
        amount: Decimal,
        overdraft_limit: Decimal,
    },

    /// Payment plus accrued interest is more than what is still owed
    #[error("Payment exceeds remaining loan amount")]
    PaymentExceedsRemaining {
        amount: Decimal,
        interest: Decimal,
        remaining: Decimal,
    },

    /// Result would not fit in a Decimal
    #[error("Invalid {operation} amount: result out of range")]
    OutOfRange { operation: Operation, amount: Decimal },
}

impl Rejection {
    pub fn invalid_amount(operation: Operation, amount: Decimal) -> Self {
        Rejection::InvalidAmount { operation, amount }
    }

    /// Short machine-friendly reason, used as a log field
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::InvalidAmount { .. } => "invalid_amount",
            Rejection::InsufficientFunds { .. } => "insufficient_funds",
            Rejection::BelowMinimum { .. } => "below_minimum",
            Rejection::OverdraftExceeded { .. } => "overdraft_exceeded",
            Rejection::PaymentExceedsRemaining { .. } => "payment_exceeds_remaining",
            Rejection::OutOfRange { .. } => "out_of_range",
        }
    }
}

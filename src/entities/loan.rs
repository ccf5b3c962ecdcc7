// 🏦 Loan Entity - Principal, what is still owed, and a flat interest rate
//
// Not linked to any Account: account_number is only a back-reference.
//
// Payment rule (kept exactly as the bank defined it):
//   interest = remaining * rate / 100
//   accepted iff amount > 0 && amount + interest <= remaining
//   on success remaining -= amount + interest

use crate::error::{Operation, Rejection};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// LOAN PAYMENT
// ============================================================================

/// Receipt for an accepted payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayment {
    /// Amount offered by the borrower
    pub amount: Decimal,

    /// Interest charged on the remaining amount before this payment
    pub interest: Decimal,

    /// amount + interest, what came off the remaining amount
    pub total: Decimal,

    pub remaining_after: Decimal,

    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// LOAN ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Loan {
    /// Account this loan belongs to (not validated)
    account_number: u64,

    /// Original principal, fixed at creation
    loan_amount: Decimal,

    /// Outstanding amount, starts at loan_amount
    remaining_amount: Decimal,

    /// Interest rate in percent (5 means 5%)
    interest_rate: Decimal,

    /// Accepted payments, oldest first
    payments: Vec<LoanPayment>,
}

impl Loan {
    pub fn new(account_number: u64, loan_amount: Decimal, interest_rate: Decimal) -> Self {
        Loan {
            account_number,
            loan_amount,
            remaining_amount: loan_amount,
            interest_rate,
            payments: Vec::new(),
        }
    }

    /// Interest owed right now on the remaining amount, None if it does not fit
    pub fn current_interest(&self) -> Option<Decimal> {
        let rate = self.interest_rate.checked_div(Decimal::ONE_HUNDRED)?;
        self.remaining_amount.checked_mul(rate)
    }

    /// Make a payment, stamped with the current time
    pub fn make_payment(&mut self, amount: Decimal) -> Result<LoanPayment, Rejection> {
        self.make_payment_at(amount, Utc::now())
    }

    pub fn make_payment_at(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<LoanPayment, Rejection> {
        if amount <= Decimal::ZERO {
            return Err(Rejection::invalid_amount(Operation::Payment, amount));
        }

        let out_of_range = Rejection::OutOfRange {
            operation: Operation::Payment,
            amount,
        };
        let interest = self.current_interest().ok_or(out_of_range.clone())?;
        let total = amount.checked_add(interest).ok_or(out_of_range.clone())?;
        if total > self.remaining_amount {
            return Err(Rejection::PaymentExceedsRemaining {
                amount,
                interest,
                remaining: self.remaining_amount,
            });
        }

        // A negative rate makes total negative, so this can still overflow
        self.remaining_amount = self.remaining_amount.checked_sub(total).ok_or(out_of_range)?;
        let payment = LoanPayment {
            amount,
            interest,
            total,
            remaining_after: self.remaining_amount,
            timestamp: at,
        };
        self.payments.push(payment.clone());
        Ok(payment)
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn loan_amount(&self) -> Decimal {
        self.loan_amount
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.remaining_amount
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn payments(&self) -> &[LoanPayment] {
        &self.payments
    }

    /// How much of the principal has come off so far
    pub fn amount_repaid(&self) -> Decimal {
        self.loan_amount.saturating_sub(self.remaining_amount)
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining_amount <= Decimal::ZERO
    }
}

// ============================================================================
// TESTS
// ============================================================================

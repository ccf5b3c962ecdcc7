// 🏷️ Withdrawal Rules - Who may take money out, and how much
//
// Every account kind has a variant guard. Passing it is not enough: the base
// guard (0 < amount <= balance) must pass too. The two are checked in that
// order, so the variant's rejection wins when both would fail.

use crate::entities::AccountKind;
use crate::error::{Operation, Rejection};
use rust_decimal::Decimal;

// ============================================================================
// BASE GUARD
// ============================================================================

/// Rule shared by every account: positive amount, no more than the balance
pub fn base_guard(balance: Decimal, amount: Decimal) -> Result<(), Rejection> {
    if amount <= Decimal::ZERO {
        return Err(Rejection::invalid_amount(Operation::Withdrawal, amount));
    }
    if amount > balance {
        return Err(Rejection::InsufficientFunds { balance, amount });
    }
    Ok(())
}

/// balance - amount >= floor, decided without overflowing
fn stays_at_or_above(balance: Decimal, amount: Decimal, floor: Decimal) -> bool {
    match balance.checked_sub(amount) {
        Some(remaining) => remaining >= floor,
        // Past MAX only when amount < 0 (above any floor), past MIN only when amount > 0
        None => amount < Decimal::ZERO,
    }
}

// ============================================================================
// WITHDRAWAL POLICY
// ============================================================================

/// Strategy deciding whether a withdrawal is authorized
pub trait WithdrawalPolicy {
    /// Kind-specific check, run before the base guard
    fn variant_guard(&self, balance: Decimal, amount: Decimal) -> Result<(), Rejection>;

    /// Variant guard AND base guard
    fn authorize(&self, balance: Decimal, amount: Decimal) -> Result<(), Rejection> {
        self.variant_guard(balance, amount)?;
        base_guard(balance, amount)
    }
}

impl WithdrawalPolicy for AccountKind {
    fn variant_guard(&self, balance: Decimal, amount: Decimal) -> Result<(), Rejection> {
        match self {
            AccountKind::Basic => Ok(()),

            // Registered savings inherit the savings floor unchanged
            AccountKind::Savings { min_balance }
            | AccountKind::RegisteredSavings { min_balance, .. } => {
                if stays_at_or_above(balance, amount, *min_balance) {
                    Ok(())
                } else {
                    Err(Rejection::BelowMinimum {
                        balance,
                        amount,
                        min_balance: *min_balance,
                    })
                }
            }

            AccountKind::Checking { overdraft_limit } => {
                if stays_at_or_above(balance, amount, -*overdraft_limit) {
                    Ok(())
                } else {
                    Err(Rejection::OverdraftExceeded {
                        balance,
                        amount,
                        overdraft_limit: *overdraft_limit,
                    })
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

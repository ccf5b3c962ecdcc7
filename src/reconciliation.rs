// ⚖️ Reconciliation - Check that the balance matches the ledger
//
//   opening_balance + total_credits - total_debits = balance
//
// Deposit and withdraw keep this true by construction. Reconciling is how a
// caller (or the demo driver) confirms it at runtime.

use crate::entities::Account;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// RECONCILIATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReconciliationResult {
    /// Ledger and balance agree
    Balanced { balance: Decimal },

    /// Ledger and balance disagree
    Discrepancy {
        /// What the ledger says the balance should be
        expected_balance: Decimal,
        /// What the account actually holds
        actual_balance: Decimal,
        difference: Decimal,
    },
}

impl ReconciliationResult {
    pub fn is_balanced(&self) -> bool {
        matches!(self, ReconciliationResult::Balanced { .. })
    }

    pub fn difference(&self) -> Decimal {
        match self {
            ReconciliationResult::Balanced { .. } => Decimal::ZERO,
            ReconciliationResult::Discrepancy { difference, .. } => *difference,
        }
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub account_number: u64,
    pub opening_balance: Decimal,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub calculated_balance: Decimal,
    pub transaction_count: usize,
    pub result: ReconciliationResult,
    pub reconciled_at: DateTime<Utc>,
}

impl ReconciliationReport {
    pub fn is_balanced(&self) -> bool {
        self.result.is_balanced()
    }

    pub fn summary(&self) -> String {
        let status = if self.is_balanced() {
            "balanced"
        } else {
            "DISCREPANCY"
        };
        format!(
            "Reconciliation for account {}: {} transactions, opening {}, credits {}, debits {}, calculated {}, difference {} ({})",
            self.account_number,
            self.transaction_count,
            self.opening_balance.normalize(),
            self.total_credits.normalize(),
            self.total_debits.normalize(),
            self.calculated_balance.normalize(),
            self.result.difference().normalize(),
            status
        )
    }
}

// ============================================================================
// RECONCILE
// ============================================================================

/// Reconcile an account's stored balance against its ledger
pub fn reconcile(account: &Account) -> ReconciliationReport {
    reconcile_parts(
        account.number(),
        account.opening_balance(),
        account.total_deposits(),
        account.total_withdrawals(),
        account.net_change(),
        account.transactions().len(),
        account.balance(),
    )
}

fn reconcile_parts(
    account_number: u64,
    opening_balance: Decimal,
    total_credits: Decimal,
    total_debits: Decimal,
    net_change: Decimal,
    transaction_count: usize,
    actual_balance: Decimal,
) -> ReconciliationReport {
    // Net change rather than credits - debits: the totals can saturate on
    // their own while the net stays exact
    let calculated_balance = opening_balance.saturating_add(net_change);

    let result = if calculated_balance == actual_balance {
        ReconciliationResult::Balanced {
            balance: actual_balance,
        }
    } else {
        let difference = calculated_balance.saturating_sub(actual_balance).abs();
        tracing::warn!(
            account = account_number,
            expected = %calculated_balance,
            actual = %actual_balance,
            "ledger does not match balance"
        );
        ReconciliationResult::Discrepancy {
            expected_balance: calculated_balance,
            actual_balance,
            difference,
        }
    };

    ReconciliationReport {
        account_number,
        opening_balance,
        total_credits,
        total_debits,
        calculated_balance,
        transaction_count,
        result,
        reconciled_at: Utc::now(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

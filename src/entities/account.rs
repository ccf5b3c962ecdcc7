// 💳 Account Entity - Balance plus an append-only transaction log
//
// One Account type covers every kind of account; the kind is a tagged value,
// not a type hierarchy. Withdrawal authorization lives in rules.rs.
//
// Ledger invariant (holds as long as balance only moves through deposit and
// withdraw):
//   balance == opening_balance + Σ signed transaction amounts

use crate::error::{Operation, Rejection};
use crate::rules::WithdrawalPolicy;
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// ACCOUNT KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    /// Standard account, never goes negative
    Basic,

    /// Savings account with a balance floor
    Savings { min_balance: Decimal },

    /// Savings account with a registration label (TFSA, RRSP, ...)
    RegisteredSavings {
        min_balance: Decimal,
        registered_type: String,
    },

    /// Checking account with an overdraft allowance
    Checking { overdraft_limit: Decimal },
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Basic => "Basic",
            AccountKind::Savings { .. } => "Savings",
            AccountKind::RegisteredSavings { .. } => "RegisteredSavings",
            AccountKind::Checking { .. } => "Checking",
        }
    }

    /// Balance floor, if this kind has one
    pub fn min_balance(&self) -> Option<Decimal> {
        match self {
            AccountKind::Savings { min_balance }
            | AccountKind::RegisteredSavings { min_balance, .. } => Some(*min_balance),
            _ => None,
        }
    }

    pub fn overdraft_limit(&self) -> Option<Decimal> {
        match self {
            AccountKind::Checking { overdraft_limit } => Some(*overdraft_limit),
            _ => None,
        }
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// Bank account
///
/// Fields are private so that balance and log can only change together.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Account number (unique by convention only)
    number: u64,

    /// Account holder name
    name: String,

    kind: AccountKind,

    /// Balance the account was opened with (zero unless stated)
    opening_balance: Decimal,

    /// Current balance
    balance: Decimal,

    /// Ledger, oldest first
    transactions: Vec<Transaction>,
}

impl Account {
    /// Create a new account with zero balance and an empty log
    pub fn new(number: u64, name: impl Into<String>, kind: AccountKind) -> Self {
        Account::with_opening_balance(number, name, kind, Decimal::ZERO)
    }

    /// Create a new account that starts with money already in it
    ///
    /// The opening balance is not a transaction; it is kept apart so the
    /// log only ever holds what happened after opening.
    pub fn with_opening_balance(
        number: u64,
        name: impl Into<String>,
        kind: AccountKind,
        opening_balance: Decimal,
    ) -> Self {
        Account {
            number,
            name: name.into(),
            kind,
            opening_balance,
            balance: opening_balance,
            transactions: Vec::new(),
        }
    }

    pub fn basic(number: u64, name: impl Into<String>) -> Self {
        Account::new(number, name, AccountKind::Basic)
    }

    pub fn savings(number: u64, name: impl Into<String>, min_balance: Decimal) -> Self {
        Account::new(number, name, AccountKind::Savings { min_balance })
    }

    pub fn registered_savings(
        number: u64,
        name: impl Into<String>,
        min_balance: Decimal,
        registered_type: impl Into<String>,
    ) -> Self {
        Account::new(
            number,
            name,
            AccountKind::RegisteredSavings {
                min_balance,
                registered_type: registered_type.into(),
            },
        )
    }

    pub fn checking(number: u64, name: impl Into<String>, overdraft_limit: Decimal) -> Self {
        Account::new(number, name, AccountKind::Checking { overdraft_limit })
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Deposit a positive amount, stamped with the current time
    pub fn deposit(&mut self, amount: Decimal) -> Result<Transaction, Rejection> {
        self.deposit_at(amount, Utc::now())
    }

    /// Deposit a positive amount with an explicit timestamp
    pub fn deposit_at(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Transaction, Rejection> {
        if amount <= Decimal::ZERO {
            return Err(Rejection::invalid_amount(Operation::Deposit, amount));
        }

        let balance = self.balance.checked_add(amount).ok_or(Rejection::OutOfRange {
            operation: Operation::Deposit,
            amount,
        })?;

        let transaction = Transaction::deposit(amount, at);
        self.balance = balance;
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Withdraw if this account's kind authorizes it
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Transaction, Rejection> {
        self.withdraw_at(amount, Utc::now())
    }

    pub fn withdraw_at(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Transaction, Rejection> {
        self.kind.authorize(self.balance, amount)?;

        let balance = self.balance.checked_sub(amount).ok_or(Rejection::OutOfRange {
            operation: Operation::Withdrawal,
            amount,
        })?;

        let transaction = Transaction::withdrawal(amount, at);
        self.balance = balance;
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Transaction log in recorded order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    // Sums saturate at the Decimal limits instead of panicking

    /// Net effect of the log (sum of signed amounts)
    pub fn net_change(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.signed_amount()))
    }

    pub fn total_deposits(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.is_deposit())
            .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount))
    }

    pub fn total_withdrawals(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.is_withdrawal())
            .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionKind;
    use proptest::prelude::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn kinds(log: &[Transaction]) -> Vec<(TransactionKind, Decimal)> {
        log.iter().map(|tx| (tx.kind, tx.amount)).collect()
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = Account::basic(1001, "Elon Musk");

        assert_eq!(account.number(), 1001);
        assert_eq!(account.name(), "Elon Musk");
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_basic_deposit_then_withdraw() {
        let mut account = Account::basic(1001, "Elon Musk");

        account.deposit(dec(1000)).unwrap();
        assert_eq!(account.balance(), dec(1000));
        assert_eq!(
            kinds(account.transactions()),
            vec![(TransactionKind::Deposit, dec(1000))]
        );

        account.withdraw(dec(500)).unwrap();
        assert_eq!(account.balance(), dec(500));
        assert_eq!(
            kinds(account.transactions()),
            vec![
                (TransactionKind::Deposit, dec(1000)),
                (TransactionKind::Withdrawal, dec(500)),
            ]
        );
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = Account::basic(1001, "Elon Musk");

        assert_eq!(
            account.deposit(Decimal::ZERO),
            Err(Rejection::invalid_amount(Operation::Deposit, Decimal::ZERO))
        );
        assert!(account.deposit(dec(-10)).is_err());
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_savings_withdraw_above_floor() {
        let mut account = Account::savings(2001, "Bill Gates", dec(100));
        account.deposit(dec(2000)).unwrap();

        account.withdraw(dec(150)).unwrap();
        assert_eq!(account.balance(), dec(1850));
    }

    #[test]
    fn test_registered_savings_withdraw() {
        let mut account = Account::registered_savings(3001, "Steve Jobs", dec(500), "TFSA");
        account.deposit(dec(3000)).unwrap();

        account.withdraw(dec(400)).unwrap();
        assert_eq!(account.balance(), dec(2600));
        assert_eq!(account.kind().min_balance(), Some(dec(500)));
    }

    #[test]
    fn test_checking_overdraft_rejected_without_state_change() {
        let mut account = Account::checking(4001, "Jeff Bezos", dec(200));
        account.deposit(dec(3000)).unwrap();

        let result = account.withdraw(dec(3500));
        assert!(matches!(result, Err(Rejection::OverdraftExceeded { .. })));
        assert_eq!(account.balance(), dec(3000));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_deposit_past_decimal_max_rejected() {
        let mut account = Account::basic(1, "Max");
        account.deposit(Decimal::MAX).unwrap();

        assert_eq!(
            account.deposit(Decimal::ONE),
            Err(Rejection::OutOfRange {
                operation: Operation::Deposit,
                amount: Decimal::ONE,
            })
        );
        assert_eq!(account.balance(), Decimal::MAX);
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_savings_negative_max_withdrawal_rejected() {
        let mut account = Account::savings(1, "Max", Decimal::ZERO);
        account.deposit(Decimal::MAX).unwrap();

        let result = account.withdraw(-Decimal::MAX);
        assert!(matches!(result, Err(Rejection::InvalidAmount { .. })));
        assert_eq!(account.balance(), Decimal::MAX);
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_checking_withdraw_from_decimal_min_rejected() {
        let mut account = Account::with_opening_balance(
            1,
            "Min",
            AccountKind::Checking { overdraft_limit: dec(200) },
            Decimal::MIN,
        );

        assert!(matches!(
            account.withdraw(Decimal::MAX),
            Err(Rejection::OverdraftExceeded { .. })
        ));
        assert_eq!(account.balance(), Decimal::MIN);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_totals_saturate() {
        let mut account = Account::basic(1, "Max");
        account.deposit(Decimal::MAX).unwrap();
        account.withdraw(Decimal::MAX).unwrap();
        account.deposit(Decimal::MAX).unwrap();

        assert_eq!(account.total_deposits(), Decimal::MAX);
        assert_eq!(account.net_change(), Decimal::MAX);
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_opening_balance_is_not_logged() {
        let mut account =
            Account::with_opening_balance(7001, "Ada", AccountKind::Basic, dec(250));
        account.deposit(dec(50)).unwrap();

        assert_eq!(account.balance(), dec(300));
        assert_eq!(account.opening_balance(), dec(250));
        assert_eq!(account.net_change(), dec(50));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_withdraw_returns_recorded_transaction() {
        let mut account = Account::basic(1001, "Elon Musk");
        account.deposit(dec(100)).unwrap();

        let at = Utc::now();
        let tx = account.withdraw_at(dec(30), at).unwrap();

        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.timestamp, at);
        assert_eq!(account.transactions().last(), Some(&tx));
    }

    #[test]
    fn test_totals() {
        let mut account = Account::basic(1001, "Elon Musk");
        account.deposit(dec(100)).unwrap();
        account.deposit(dec(50)).unwrap();
        account.withdraw(dec(30)).unwrap();

        assert_eq!(account.total_deposits(), dec(150));
        assert_eq!(account.total_withdrawals(), dec(30));
        assert_eq!(account.net_change(), dec(120));
    }

    #[test]
    fn test_kind_serializes_tagged() {
        let kind = AccountKind::Checking {
            overdraft_limit: dec(200),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "checking");

        let parsed: AccountKind =
            serde_json::from_str(r#"{"type":"savings","min_balance":100}"#).unwrap();
        assert_eq!(parsed, AccountKind::Savings { min_balance: dec(100) });
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(i64),
        Withdraw(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-500i64..5_000).prop_map(Op::Deposit),
            (-500i64..5_000).prop_map(Op::Withdraw),
        ]
    }

    fn kind_strategy() -> impl Strategy<Value = AccountKind> {
        prop_oneof![
            Just(AccountKind::Basic),
            (0i64..1_000).prop_map(|m| AccountKind::Savings { min_balance: dec(m) }),
            (0i64..1_000).prop_map(|m| AccountKind::RegisteredSavings {
                min_balance: dec(m),
                registered_type: "RRSP".to_string(),
            }),
            (0i64..1_000).prop_map(|l| AccountKind::Checking { overdraft_limit: dec(l) }),
        ]
    }

    proptest! {
        #[test]
        fn prop_balance_matches_ledger(kind in kind_strategy(), ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut account = Account::new(1, "Prop", kind);
            for op in ops {
                let _ = match op {
                    Op::Deposit(cents) => account.deposit(Decimal::new(cents, 2)),
                    Op::Withdraw(cents) => account.withdraw(Decimal::new(cents, 2)),
                };
            }
            prop_assert_eq!(account.balance(), account.net_change());
            prop_assert!(account.transactions().iter().all(|tx| tx.amount > Decimal::ZERO));
        }

        #[test]
        fn prop_rejected_deposit_never_mutates(amount in -10_000i64..=0) {
            let mut account = Account::basic(1, "Prop");
            account.deposit(dec(100)).unwrap();
            let before = account.transactions().to_vec();

            prop_assert!(account.deposit(dec(amount)).is_err());
            prop_assert_eq!(account.balance(), dec(100));
            prop_assert_eq!(account.transactions(), before.as_slice());
        }

        #[test]
        fn prop_log_is_append_only(amounts in prop::collection::vec(1i64..1_000, 1..20)) {
            let mut account = Account::basic(1, "Prop");
            let mut seen: Vec<Transaction> = Vec::new();
            for amount in amounts {
                let tx = account.deposit(dec(amount)).unwrap();
                seen.push(tx);
                prop_assert_eq!(account.transactions(), seen.as_slice());
            }
        }
    }
}

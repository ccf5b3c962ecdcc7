// 🎬 Scenarios - Accounts, loans and operations as data
//
// A scenario is plain JSON:
//   { "accounts": [...], "loans": [...], "steps": [{ "op": "deposit", ... }] }
//
// Running one opens every account and loan, then replays the steps through a
// Reporter. Steps find accounts and loans by number (first match wins, since
// numbers are only unique by convention).

use crate::entities::{Account, AccountKind, Loan};
use crate::report::{ReportSink, Reporter};
use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// SPECS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSpec {
    pub number: u64,
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: AccountKind,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Decimal>,
}

fn default_kind() -> AccountKind {
    AccountKind::Basic
}

impl AccountSpec {
    pub fn open(&self) -> Account {
        Account::with_opening_balance(
            self.number,
            self.name.clone(),
            self.kind.clone(),
            self.opening_balance.unwrap_or(Decimal::ZERO),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSpec {
    pub account_number: u64,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
}

impl LoanSpec {
    pub fn open(&self) -> Loan {
        Loan::new(self.account_number, self.loan_amount, self.interest_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Deposit { account: u64, amount: Decimal },
    Withdraw { account: u64, amount: Decimal },
    Pay { loan: u64, amount: Decimal },
    ShowDetails { account: u64 },
    ShowTransactions { account: u64 },
    ShowLoan { loan: u64 },
    Reconcile { account: u64 },
    /// Empty separator line
    Blank,
}

// ============================================================================
// SCENARIO
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub accounts: Vec<AccountSpec>,
    #[serde(default)]
    pub loans: Vec<LoanSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Final state after a run
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub accounts: Vec<Account>,
    pub loans: Vec<Loan>,
    /// Operations that went through
    pub accepted: usize,
    /// Operations that were rejected
    pub rejected: usize,
}

impl ScenarioOutcome {
    pub fn account(&self, number: u64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    pub fn loan(&self, number: u64) -> Option<&Loan> {
        self.loans.iter().find(|l| l.account_number() == number)
    }
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read scenario file: {:?}", path.as_ref()))?;

        Scenario::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario JSON")
    }

    /// The stock demonstration: one account of each kind, then a loan
    pub fn demo() -> Self {
        let dec = |value: i64| Decimal::from(value);
        Scenario {
            accounts: vec![
                AccountSpec {
                    number: 1001,
                    name: "Elon Musk".to_string(),
                    kind: AccountKind::Basic,
                    opening_balance: None,
                },
                AccountSpec {
                    number: 2001,
                    name: "Bill Gates".to_string(),
                    kind: AccountKind::Savings { min_balance: dec(100) },
                    opening_balance: None,
                },
                AccountSpec {
                    number: 3001,
                    name: "Steve Jobs".to_string(),
                    kind: AccountKind::RegisteredSavings {
                        min_balance: dec(500),
                        registered_type: "TFSA".to_string(),
                    },
                    opening_balance: None,
                },
                AccountSpec {
                    number: 4001,
                    name: "Jeff Bezos".to_string(),
                    kind: AccountKind::Checking {
                        overdraft_limit: dec(200),
                    },
                    opening_balance: None,
                },
            ],
            loans: vec![LoanSpec {
                account_number: 5001,
                loan_amount: dec(10000),
                interest_rate: dec(5),
            }],
            steps: vec![
                Step::Deposit { account: 1001, amount: dec(1000) },
                Step::Withdraw { account: 1001, amount: dec(500) },
                Step::ShowTransactions { account: 1001 },
                Step::Blank,
                Step::Deposit { account: 2001, amount: dec(2000) },
                Step::Withdraw { account: 2001, amount: dec(150) },
                Step::ShowTransactions { account: 2001 },
                Step::Blank,
                Step::Deposit { account: 3001, amount: dec(3000) },
                Step::Withdraw { account: 3001, amount: dec(400) },
                Step::ShowTransactions { account: 3001 },
                Step::Blank,
                Step::Deposit { account: 4001, amount: dec(3000) },
                Step::Withdraw { account: 4001, amount: dec(3500) },
                Step::ShowDetails { account: 4001 },
                Step::Blank,
                Step::Pay { loan: 5001, amount: dec(1500) },
                Step::ShowLoan { loan: 5001 },
            ],
        }
    }

    /// Open everything and replay the steps, reporting to `reporter`
    ///
    /// Rejected operations are counted, not errors. A step that names an
    /// unknown account or loan is an error and stops the run.
    pub fn run<S: ReportSink>(&self, reporter: &mut Reporter<S>) -> Result<ScenarioOutcome> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(AccountSpec::open).collect();
        let mut loans: Vec<Loan> = self.loans.iter().map(LoanSpec::open).collect();
        let mut accepted = 0;
        let mut rejected = 0;

        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(index, ?step, "running step");

            let outcome = match step {
                Step::Deposit { account, amount } => Some(
                    reporter
                        .deposit(find_account(&mut accounts, *account, index)?, *amount)
                        .is_ok(),
                ),
                Step::Withdraw { account, amount } => Some(
                    reporter
                        .withdraw(find_account(&mut accounts, *account, index)?, *amount)
                        .is_ok(),
                ),
                Step::Pay { loan, amount } => {
                    Some(reporter.make_payment(find_loan(&mut loans, *loan, index)?, *amount))
                }
                Step::ShowDetails { account } => {
                    reporter.display_account_details(find_account(&mut accounts, *account, index)?);
                    None
                }
                Step::ShowTransactions { account } => {
                    reporter.display_transactions(find_account(&mut accounts, *account, index)?);
                    None
                }
                Step::ShowLoan { loan } => {
                    reporter.display_loan_details(find_loan(&mut loans, *loan, index)?);
                    None
                }
                Step::Reconcile { account } => {
                    reporter.reconcile(find_account(&mut accounts, *account, index)?);
                    None
                }
                Step::Blank => {
                    reporter.line("");
                    None
                }
            };

            match outcome {
                Some(true) => accepted += 1,
                Some(false) => rejected += 1,
                None => {}
            }
        }

        Ok(ScenarioOutcome {
            accounts,
            loans,
            accepted,
            rejected,
        })
    }
}

fn find_account(accounts: &mut [Account], number: u64, step: usize) -> Result<&mut Account> {
    accounts
        .iter_mut()
        .find(|a| a.number() == number)
        .ok_or_else(|| anyhow!("Step {}: no account with number {}", step, number))
}

fn find_loan(loans: &mut [Loan], number: u64, step: usize) -> Result<&mut Loan> {
    loans
        .iter_mut()
        .find(|l| l.account_number() == number)
        .ok_or_else(|| anyhow!("Step {}: no loan for account {}", step, number))
}

// ============================================================================
// TESTS
// ============================================================================

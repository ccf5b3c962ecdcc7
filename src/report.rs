// 📋 Reporting - Account and loan state rendered as text lines
//
// Two layers:
//   1. Pure builders: state → (label, value) pairs / lines. No I/O.
//   2. Reporter: runs an operation, writes one line per outcome to a sink.
//
// The sink is injected, so tests capture output with MemorySink instead of
// scraping stdout.

use crate::entities::{Account, AccountKind, Loan};
use crate::error::Rejection;
use crate::reconciliation::{self, ReconciliationReport};
use crate::transaction::Transaction;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

// ============================================================================
// SINKS
// ============================================================================

/// Destination for report lines
pub trait ReportSink {
    fn emit(&mut self, line: &str);
}

/// Writes each line to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Keeps every line in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

impl<F> ReportSink for F
where
    F: FnMut(&str),
{
    fn emit(&mut self, line: &str) {
        self(line)
    }
}

// ============================================================================
// PURE BUILDERS
// ============================================================================

/// Render an amount without trailing zeros (8000.00 → 8000)
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Account detail fields: base fields first, then the kind's own fields
pub fn account_details(account: &Account) -> Vec<(String, String)> {
    let mut details = vec![
        ("Account Number".to_string(), account.number().to_string()),
        ("Account Holder Name".to_string(), account.name().to_string()),
        ("Balance".to_string(), format_amount(account.balance())),
    ];

    match account.kind() {
        AccountKind::Basic => {}
        AccountKind::Savings { min_balance } => {
            details.push(("Minimum Balance".to_string(), format_amount(*min_balance)));
        }
        AccountKind::RegisteredSavings {
            min_balance,
            registered_type,
        } => {
            details.push(("Minimum Balance".to_string(), format_amount(*min_balance)));
            details.push(("Registered Type".to_string(), registered_type.clone()));
        }
        AccountKind::Checking { overdraft_limit } => {
            details.push(("Overdraft Limit".to_string(), format_amount(*overdraft_limit)));
        }
    }

    details
}

pub fn loan_details(loan: &Loan) -> Vec<(String, String)> {
    vec![
        ("Loan Account Number".to_string(), loan.account_number().to_string()),
        ("Loan Amount".to_string(), format_amount(loan.loan_amount())),
        ("Remaining Amount".to_string(), format_amount(loan.remaining_amount())),
        (
            "Interest Rate".to_string(),
            format!("{}%", format_amount(loan.interest_rate())),
        ),
    ]
}

/// `Label: value` lines
pub fn render_details(details: &[(String, String)]) -> Vec<String> {
    details
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect()
}

pub fn transaction_line(transaction: &Transaction) -> String {
    format!(
        "{}: {}, Date: {}",
        transaction.kind,
        format_amount(transaction.amount),
        format_timestamp(&transaction.timestamp)
    )
}

/// Header followed by one line per transaction, oldest first
pub fn transaction_history(account: &Account) -> Vec<String> {
    let mut lines = Vec::with_capacity(account.transactions().len() + 1);
    lines.push("Transaction History:".to_string());
    lines.extend(account.transactions().iter().map(transaction_line));
    lines
}

// ============================================================================
// REPORTER
// ============================================================================

/// Runs operations and reports each outcome as one line
pub struct Reporter<S: ReportSink> {
    sink: S,
}

impl<S: ReportSink> Reporter<S> {
    pub fn new(sink: S) -> Self {
        Reporter { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write a free-form line (used for blank separators)
    pub fn line(&mut self, line: &str) {
        self.sink.emit(line);
    }

    fn lines(&mut self, lines: &[String]) {
        for line in lines {
            self.sink.emit(line);
        }
    }

    fn reject(&mut self, subject: u64, rejection: &Rejection) {
        tracing::warn!(
            subject,
            reason = rejection.reason(),
            "{}",
            rejection
        );
        self.sink.emit(&rejection.to_string());
    }

    pub fn deposit(
        &mut self,
        account: &mut Account,
        amount: Decimal,
    ) -> Result<Transaction, Rejection> {
        match account.deposit(amount) {
            Ok(tx) => {
                tracing::info!(account = account.number(), %amount, balance = %account.balance(), "deposit");
                self.sink.emit(&format!(
                    "Deposited {} into account {}",
                    format_amount(amount),
                    account.number()
                ));
                Ok(tx)
            }
            Err(rejection) => {
                self.reject(account.number(), &rejection);
                Err(rejection)
            }
        }
    }

    pub fn withdraw(
        &mut self,
        account: &mut Account,
        amount: Decimal,
    ) -> Result<Transaction, Rejection> {
        match account.withdraw(amount) {
            Ok(tx) => {
                tracing::info!(account = account.number(), %amount, balance = %account.balance(), "withdrawal");
                self.sink.emit(&format!(
                    "Withdrew {} from account {}",
                    format_amount(amount),
                    account.number()
                ));
                Ok(tx)
            }
            Err(rejection) => {
                self.reject(account.number(), &rejection);
                Err(rejection)
            }
        }
    }

    /// Returns true when the payment was accepted
    pub fn make_payment(&mut self, loan: &mut Loan, amount: Decimal) -> bool {
        match loan.make_payment(amount) {
            Ok(payment) => {
                tracing::info!(
                    loan = loan.account_number(),
                    %amount,
                    interest = %payment.interest,
                    remaining = %payment.remaining_after,
                    "loan payment"
                );
                self.sink.emit(&format!(
                    "Payment of {} made for loan {}",
                    format_amount(amount),
                    loan.account_number()
                ));
                true
            }
            Err(rejection) => {
                self.reject(loan.account_number(), &rejection);
                false
            }
        }
    }

    pub fn display_account_details(&mut self, account: &Account) {
        self.lines(&render_details(&account_details(account)));
    }

    pub fn display_transactions(&mut self, account: &Account) {
        self.lines(&transaction_history(account));
    }

    pub fn display_loan_details(&mut self, loan: &Loan) {
        self.lines(&render_details(&loan_details(loan)));
    }

    /// Reconcile the ledger and write the one-line summary
    pub fn reconcile(&mut self, account: &Account) -> ReconciliationReport {
        let report = reconciliation::reconcile(account);
        self.sink.emit(&report.summary());
        report
    }
}

// ============================================================================
// EXPORT
// ============================================================================

#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    id: &'a str,
    date: String,
    kind: &'static str,
    amount: String,
    running_balance: String,
}

const STATEMENT_HEADER: [&str; 5] = ["id", "date", "kind", "amount", "running_balance"];

/// Write the transaction log as CSV with a running balance column
///
/// The header is always written, even for an account with no transactions.
pub fn write_statement_csv<W: Write>(account: &Account, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(STATEMENT_HEADER)
        .with_context(|| format!("Failed to write statement header for account {}", account.number()))?;

    let mut running = account.opening_balance();

    for tx in account.transactions() {
        running = running.saturating_add(tx.signed_amount());
        csv_writer
            .serialize(StatementRow {
                id: &tx.id,
                date: tx.timestamp.to_rfc3339(),
                kind: tx.kind.as_str(),
                amount: format_amount(tx.amount),
                running_balance: format_amount(running),
            })
            .with_context(|| format!("Failed to write statement row for account {}", account.number()))?;
    }

    csv_writer.flush().context("Failed to flush statement")?;
    Ok(())
}

/// Serializable view of an account: details plus full history
#[derive(Debug, Clone, Serialize)]
pub struct AccountSnapshot {
    pub number: u64,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
    pub details: Vec<(String, String)>,
    pub transactions: Vec<Transaction>,
    pub taken_at: DateTime<Utc>,
}

impl AccountSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize account snapshot")
    }
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        AccountSnapshot {
            number: account.number(),
            name: account.name().to_string(),
            kind: account.kind().clone(),
            balance: account.balance(),
            details: account_details(account),
            transactions: account.transactions().to_vec(),
            taken_at: Utc::now(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

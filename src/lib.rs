// Toy Bank - Core Library
// Accounts with kind-specific withdrawal rules, a loan calculator, and
// text reporting. Used by the demo binary and by tests.

pub mod transaction;
pub mod error;
pub mod rules;          // Withdrawal authorization per account kind
pub mod entities;       // Account + Loan
pub mod report;         // Sinks, detail builders, Reporter, CSV/JSON export
pub mod reconciliation; // Ledger vs balance check
pub mod scenario;       // Accounts, loans and steps as JSON

// Re-export commonly used types
pub use transaction::{Transaction, TransactionKind};
pub use error::{Operation, Rejection};
pub use rules::{base_guard, WithdrawalPolicy};
pub use entities::{Account, AccountKind, Loan, LoanPayment};
pub use report::{
    ReportSink, StdoutSink, MemorySink, Reporter, AccountSnapshot,
    account_details, loan_details, render_details, transaction_history, transaction_line,
    write_statement_csv,
};
pub use reconciliation::{reconcile, ReconciliationReport, ReconciliationResult};
pub use scenario::{Scenario, ScenarioOutcome, AccountSpec, LoanSpec, Step};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Entity Models
//
// Account: balance + append-only transaction log, kind-specific withdrawals
// Loan: principal, remaining amount, flat interest per payment

pub mod account;
pub mod loan;

pub use account::{Account, AccountKind};
pub use loan::{Loan, LoanPayment};

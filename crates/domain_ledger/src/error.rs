//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{MoneyError, PortError};

/// Errors that can occur while posting to the ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Debits and credits differ beyond the balance tolerance; always fatal
    /// to the posting attempt, never silently corrected
    #[error("Unbalanced entry: debits={debits}, credits={credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },

    /// A line's account could not be resolved for the tenant; aborts the
    /// whole posting so the balance invariant holds for every persisted entry
    #[error("Account could not be resolved: {reference}")]
    UnresolvedAccount { reference: String },

    /// An entry needs at least one debit and one credit line
    #[error("An entry requires at least two lines, got {0}")]
    TooFewLines(usize),

    /// Line amounts must be non-negative
    #[error("Negative amount on line {line}: {amount}")]
    NegativeAmount { line: usize, amount: Decimal },

    /// Money arithmetic failed (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The underlying store failed
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

//! Custom test assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::{PostedEntry, BALANCE_TOLERANCE};

/// Asserts that two Money values are approximately equal within a tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a posted entry balances: header totals match within the
/// posting tolerance and line sums agree with the header
pub fn assert_entry_balanced(posted: &PostedEntry) {
    assert!(
        posted.is_balanced(),
        "Entry {} is unbalanced: debits={}, credits={}",
        posted.entry.number,
        posted.entry.total_debit.amount(),
        posted.entry.total_credit.amount()
    );

    let line_debits: Decimal = posted.lines.iter().map(|l| l.debit.amount()).sum();
    let line_credits: Decimal = posted.lines.iter().map(|l| l.credit.amount()).sum();
    assert!(
        (line_debits - posted.entry.total_debit.amount()).abs() <= BALANCE_TOLERANCE,
        "Line debits {} disagree with header total {}",
        line_debits,
        posted.entry.total_debit.amount()
    );
    assert!(
        (line_credits - posted.entry.total_credit.amount()).abs() <= BALANCE_TOLERANCE,
        "Line credits {} disagree with header total {}",
        line_credits,
        posted.entry.total_credit.amount()
    );
}

/// Asserts the entry carries the expected generated number
pub fn assert_entry_number(posted: &PostedEntry, expected: &str) {
    assert_eq!(
        posted.entry.number.as_str(),
        expected,
        "Unexpected entry number"
    );
}

//! Property-based test generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_ledger::{codes, AccountRef, DraftLine};

/// Strategy for generating currencies used by the suite
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::CHF),
        Just(Currency::XOF),
        Just(Currency::MAD),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating VAT-style rates as decimals (0.0000 to 0.9999)
pub fn rate_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10000u32).prop_map(|n| Decimal::new(n as i64, 4))
}

/// Strategy for generating a balanced line set in a single currency
///
/// Produces between 1 and 5 debit lines against revenue plus one credit
/// line for their exact sum, so the set always balances.
pub fn balanced_lines_strategy() -> impl Strategy<Value = Vec<DraftLine>> {
    prop::collection::vec(1i64..10_000_000i64, 1..=5).prop_map(|amounts| {
        let currency = Currency::EUR;
        let mut lines: Vec<DraftLine> = amounts
            .iter()
            .map(|&minor| {
                DraftLine::debit(
                    AccountRef::code(codes::CLIENTS),
                    Money::from_minor(minor, currency),
                    "generated debit",
                )
            })
            .collect();

        let total: i64 = amounts.iter().sum();
        lines.push(DraftLine::credit(
            AccountRef::code(codes::SALES),
            Money::from_minor(total, currency),
            "generated credit",
        ));
        lines
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn balanced_lines_always_balance(lines in balanced_lines_strategy()) {
            let debits: Decimal = lines.iter().map(|l| l.debit.amount()).sum();
            let credits: Decimal = lines.iter().map(|l| l.credit.amount()).sum();
            prop_assert_eq!(debits, credits);
        }
    }
}

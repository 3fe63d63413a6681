//! Test fixtures
//!
//! Seeded stores and common monetary values for scenario tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money, Rate, TenantId};
use domain_ledger::{LedgerStore, MemoryLedgerStore, StandardChart};
use domain_recurring::MemoryRecurringStore;

/// The VAT rate most scenario tests use (18%)
pub fn standard_vat_rate() -> Rate {
    Rate::from_percentage(Decimal::new(18, 0))
}

/// XOF amount helper
pub fn xof(amount: i64) -> Money {
    Money::new(Decimal::new(amount, 0), Currency::XOF)
}

/// EUR amount helper (two decimal places from minor units)
pub fn eur(minor: i64) -> Money {
    Money::from_minor(minor, Currency::EUR)
}

/// Date helper
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates an in-memory ledger store seeded with the standard chart of
/// accounts for the given tenant
pub async fn seeded_ledger(tenant_id: TenantId) -> MemoryLedgerStore {
    let store = MemoryLedgerStore::new();
    store
        .insert_accounts(&StandardChart::accounts(tenant_id))
        .await
        .expect("chart seeding should not conflict");
    store
}

/// Creates the full in-memory environment for one tenant: a seeded ledger
/// store and an empty recurring store
pub async fn seeded_environment(
    tenant_id: TenantId,
) -> (MemoryLedgerStore, MemoryRecurringStore) {
    (seeded_ledger(tenant_id).await, MemoryRecurringStore::new())
}

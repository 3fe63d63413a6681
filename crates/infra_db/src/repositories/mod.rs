//! Store implementations backed by PostgreSQL

pub mod ledger;
pub mod recurring;

pub use ledger::PgLedgerStore;
pub use recurring::PgRecurringStore;

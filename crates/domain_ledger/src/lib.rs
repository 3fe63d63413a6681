//! Ledger Domain - Double-Entry Posting Engine
//!
//! This crate turns business events (invoices, payments, payroll runs, tax
//! remittances) into balanced accounting entries against a per-tenant chart
//! of accounts.
//!
//! # Double-Entry Principles
//!
//! Every posted entry is balanced: the sum of its debit lines equals the sum
//! of its credit lines within a fixed tolerance of 0.01 currency units. An
//! entry that does not balance, or references an account that cannot be
//! resolved, is rejected in full - no partial writes, ever.
//!
//! # Structure
//!
//! - [`account`] / [`chart`]: tenant-scoped chart of accounts with
//!   hierarchical numeric codes (class 1-9 by leading digit)
//! - [`journal`]: the fixed set of journals (purchases, sales, bank, cash,
//!   miscellaneous), created lazily per tenant
//! - [`entry`]: entries, lines, and the per-journal entry numbering scheme
//! - [`poster`]: the posting engine itself
//! - [`events`]: one posting rule per business event type
//! - [`ports`]: the persistence port implemented by `infra_db` and by the
//!   in-memory store in [`memory`]
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerPoster, PostingRequest, DraftLine, AccountRef};
//!
//! let poster = LedgerPoster::new(&store);
//! let posted = poster.post(PostingRequest {
//!     tenant_id,
//!     journal: JournalType::Sales,
//!     date,
//!     label: "Invoice F-2026-042".into(),
//!     external_ref: Some("F-2026-042".into()),
//!     lines: vec![
//!         DraftLine::debit(AccountRef::code("411"), total, "Client"),
//!         DraftLine::credit(AccountRef::code("701"), total, "Revenue"),
//!     ],
//! }).await?;
//! ```

pub mod account;
pub mod chart;
pub mod entry;
pub mod error;
pub mod events;
pub mod journal;
pub mod memory;
pub mod ports;
pub mod poster;
pub mod remediation;

pub use account::{Account, AccountCategory};
pub use chart::{codes, StandardChart};
pub use entry::{
    AccountRef, DraftLine, EntryNumber, LedgerEntry, LedgerLine, PostedEntry, Side,
    BALANCE_TOLERANCE,
};
pub use error::LedgerError;
pub use events::{
    ExpenseReimbursement, PaymentChannel, PostingOutcome, PostingRules, PurchaseInvoice,
    PurchasePayment, SaleInvoice, SalePayment, TaxKind, TaxRemittance,
};
pub use journal::{Journal, JournalType};
pub use memory::MemoryLedgerStore;
pub use ports::LedgerStore;
pub use poster::{LedgerPoster, PostingRequest};
pub use remediation::RemediationTicket;

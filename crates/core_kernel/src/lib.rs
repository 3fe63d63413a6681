//! Core Kernel - Foundational types for the ledger posting engine
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Calendar arithmetic for recurrence schedules
//! - Strongly-typed identifiers
//! - Port abstractions for persistence adapters

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{
    AccountId, EntryId, GenerationId, JournalId, LineId, TemplateId, TenantId, TicketId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{DomainPort, PortError};
pub use temporal::{add_months, clamp_day_of_month, last_day_of_month, TemporalError};

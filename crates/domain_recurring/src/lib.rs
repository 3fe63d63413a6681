//! Recurring Entries - Templates and Scheduler
//!
//! Recurring templates describe fixed entries (rent, insurance premiums,
//! subscriptions) posted on a monthly, quarterly, semi-annual, or annual
//! schedule. The scheduler fires due templates through the ledger posting
//! engine, advances each schedule past any missed periods, and keeps a
//! generation history that makes every period idempotent.
//!
//! Day-of-month anchors are clamped in short months: a template anchored to
//! the 31st posts on February 28th (29th in leap years) and returns to the
//! 31st in March.

pub mod error;
pub mod history;
pub mod memory;
pub mod ports;
pub mod schedule;
pub mod scheduler;
pub mod template;

pub use error::RecurringError;
pub use history::{GenerationRecord, GenerationStatus};
pub use memory::MemoryRecurringStore;
pub use ports::RecurringStore;
pub use schedule::{compute_next_date, next_occurrence, period_key, Frequency};
pub use scheduler::RecurringScheduler;
pub use template::{RecurringTemplate, TemplateLine};

//! Recurring domain errors

use thiserror::Error;

use core_kernel::{PortError, TemplateId, TemporalError};
use domain_ledger::LedgerError;

/// Errors that can occur while managing or firing templates
#[derive(Debug, Error)]
pub enum RecurringError {
    /// The template does not exist for the tenant
    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),

    /// The template is deactivated
    #[error("Template {0} is inactive")]
    InactiveTemplate(TemplateId),

    /// The template's end date has passed
    #[error("Template {0} has expired")]
    TemplateExpired(TemplateId),

    /// A successful generation already exists for the period
    #[error("Template {template} already generated for period {period}")]
    DuplicateFire {
        template: TemplateId,
        period: String,
    },

    /// The template's debits and credits no longer match; the occurrence is
    /// not posted
    #[error("Template {0} is unbalanced")]
    UnbalancedTemplate(TemplateId),

    /// Calendar arithmetic failed
    #[error("Schedule error: {0}")]
    Temporal(#[from] TemporalError),

    /// Posting the generated entry failed
    #[error("Posting failed: {0}")]
    Ledger(#[from] LedgerError),

    /// The underlying store failed
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

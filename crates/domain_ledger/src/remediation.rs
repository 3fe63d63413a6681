//! Remediation tickets for skipped postings
//!
//! When a posting rule cannot resolve the accounts it needs, the business
//! transaction that triggered it must not fail; the accounting impact is
//! simply not recorded. Each such skip produces a remediation ticket so an
//! operator can re-post the entry manually once the chart is fixed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{TenantId, TicketId};

/// An operator-queue record for a posting that was skipped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationTicket {
    /// Unique identifier
    pub id: TicketId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Description of the originating business event
    pub source: String,
    /// Why the posting was skipped
    pub reason: String,
    /// When the skip happened
    pub created_at: DateTime<Utc>,
}

impl RemediationTicket {
    /// Creates a new ticket
    pub fn new(tenant_id: TenantId, source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: TicketId::new_v7(),
            tenant_id,
            source: source.into(),
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }
}

//! Generation history
//!
//! Every fire attempt leaves exactly one history row, successful or not.
//! Successful rows carry the generated entry id and double as the dedup
//! record: a period with a successful row is never generated again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{EntryId, GenerationId, TemplateId, TenantId};

/// Outcome of one fire attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Succeeded,
    Failed,
}

impl GenerationStatus {
    /// Returns the status's storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Succeeded => "succeeded",
            GenerationStatus::Failed => "failed",
        }
    }

    /// Parses a storage name back into a status
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "succeeded" => Some(GenerationStatus::Succeeded),
            "failed" => Some(GenerationStatus::Failed),
            _ => None,
        }
    }
}

/// One row of a template's generation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Unique identifier
    pub id: GenerationId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// The template that fired
    pub template_id: TemplateId,
    /// The `YYYY-MM` period this occurrence covers
    pub period: String,
    /// Outcome
    pub status: GenerationStatus,
    /// The generated entry, when the attempt succeeded
    pub entry_id: Option<EntryId>,
    /// Failure detail, when the attempt failed
    pub detail: Option<String>,
    /// When the attempt ran
    pub fired_at: DateTime<Utc>,
}

impl GenerationRecord {
    /// Records a successful generation
    pub fn succeeded(
        tenant_id: TenantId,
        template_id: TemplateId,
        period: impl Into<String>,
        entry_id: EntryId,
    ) -> Self {
        Self {
            id: GenerationId::new_v7(),
            tenant_id,
            template_id,
            period: period.into(),
            status: GenerationStatus::Succeeded,
            entry_id: Some(entry_id),
            detail: None,
            fired_at: Utc::now(),
        }
    }

    /// Records a failed attempt with its reason
    pub fn failed(
        tenant_id: TenantId,
        template_id: TemplateId,
        period: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: GenerationId::new_v7(),
            tenant_id,
            template_id,
            period: period.into(),
            status: GenerationStatus::Failed,
            entry_id: None,
            detail: Some(detail.into()),
            fired_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeded_record_carries_entry() {
        let record = GenerationRecord::succeeded(
            TenantId::new(),
            TemplateId::new_v7(),
            "2026-03",
            EntryId::new_v7(),
        );
        assert_eq!(record.status, GenerationStatus::Succeeded);
        assert!(record.entry_id.is_some());
        assert!(record.detail.is_none());
    }

    #[test]
    fn test_failed_record_carries_detail() {
        let record = GenerationRecord::failed(
            TenantId::new(),
            TemplateId::new_v7(),
            "2026-03",
            "template is unbalanced",
        );
        assert_eq!(record.status, GenerationStatus::Failed);
        assert!(record.entry_id.is_none());
        assert_eq!(record.detail.as_deref(), Some("template is unbalanced"));
    }
}

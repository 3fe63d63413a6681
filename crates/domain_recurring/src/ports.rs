//! Persistence port for recurring templates and their history

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{DomainPort, PortError, TemplateId, TenantId};

use crate::history::GenerationRecord;
use crate::template::RecurringTemplate;

/// Store port for templates, schedules, and generation history
#[async_trait]
pub trait RecurringStore: DomainPort {
    /// Loads a template by id
    async fn template_by_id(
        &self,
        tenant_id: TenantId,
        id: TemplateId,
    ) -> Result<Option<RecurringTemplate>, PortError>;

    /// Inserts a new template
    async fn insert_template(&self, template: &RecurringTemplate) -> Result<(), PortError>;

    /// Active templates whose next occurrence is due on or before `as_of`
    async fn due_templates(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<RecurringTemplate>, PortError>;

    /// Persists a template's advanced schedule state
    async fn update_schedule(
        &self,
        tenant_id: TenantId,
        id: TemplateId,
        last_generated: Option<NaiveDate>,
        next_date: NaiveDate,
        active: bool,
    ) -> Result<(), PortError>;

    /// Returns true if the template already generated successfully for the
    /// given `YYYY-MM` period
    async fn has_successful_generation(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
        period: &str,
    ) -> Result<bool, PortError>;

    /// Appends a history row
    async fn insert_history(&self, record: &GenerationRecord) -> Result<(), PortError>;

    /// Full history for a template, newest first
    async fn history_for_template(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
    ) -> Result<Vec<GenerationRecord>, PortError>;
}

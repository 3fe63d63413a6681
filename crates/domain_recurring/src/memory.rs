//! In-memory recurring store
//!
//! Mirrors the PostgreSQL adapter's behavior for tests: tenant-scoped
//! lookups and the uniqueness of one successful generation per period.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{DomainPort, PortError, TemplateId, TenantId};

use crate::history::{GenerationRecord, GenerationStatus};
use crate::ports::RecurringStore;
use crate::template::RecurringTemplate;

#[derive(Default)]
struct State {
    templates: Vec<RecurringTemplate>,
    history: Vec<GenerationRecord>,
}

/// Thread-safe in-memory implementation of [`RecurringStore`]
#[derive(Default)]
pub struct MemoryRecurringStore {
    inner: Mutex<State>,
}

impl MemoryRecurringStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for MemoryRecurringStore {}

#[async_trait]
impl RecurringStore for MemoryRecurringStore {
    async fn template_by_id(
        &self,
        tenant_id: TenantId,
        id: TemplateId,
    ) -> Result<Option<RecurringTemplate>, PortError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .templates
            .iter()
            .find(|t| t.tenant_id == tenant_id && t.id == id)
            .cloned())
    }

    async fn insert_template(&self, template: &RecurringTemplate) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();
        if state.templates.iter().any(|t| t.id == template.id) {
            return Err(PortError::conflict(format!(
                "template {} already exists",
                template.id
            )));
        }
        state.templates.push(template.clone());
        Ok(())
    }

    async fn due_templates(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<RecurringTemplate>, PortError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .templates
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.active && t.next_date <= as_of)
            .cloned()
            .collect())
    }

    async fn update_schedule(
        &self,
        tenant_id: TenantId,
        id: TemplateId,
        last_generated: Option<NaiveDate>,
        next_date: NaiveDate,
        active: bool,
    ) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();
        let template = state
            .templates
            .iter_mut()
            .find(|t| t.tenant_id == tenant_id && t.id == id)
            .ok_or_else(|| PortError::not_found("RecurringTemplate", id))?;
        template.last_generated = last_generated;
        template.next_date = next_date;
        template.active = active;
        Ok(())
    }

    async fn has_successful_generation(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
        period: &str,
    ) -> Result<bool, PortError> {
        let state = self.inner.lock().unwrap();
        Ok(state.history.iter().any(|r| {
            r.tenant_id == tenant_id
                && r.template_id == template_id
                && r.period == period
                && r.status == GenerationStatus::Succeeded
        }))
    }

    async fn insert_history(&self, record: &GenerationRecord) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();

        // Mirrors the partial unique index on successful generations
        if record.status == GenerationStatus::Succeeded {
            let duplicate = state.history.iter().any(|r| {
                r.template_id == record.template_id
                    && r.period == record.period
                    && r.status == GenerationStatus::Succeeded
            });
            if duplicate {
                return Err(PortError::conflict(format!(
                    "period {} already generated for template {}",
                    record.period, record.template_id
                )));
            }
        }

        state.history.push(record.clone());
        Ok(())
    }

    async fn history_for_template(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
    ) -> Result<Vec<GenerationRecord>, PortError> {
        let state = self.inner.lock().unwrap();
        let mut rows: Vec<_> = state
            .history
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.template_id == template_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.fired_at.cmp(&a.fired_at));
        Ok(rows)
    }
}

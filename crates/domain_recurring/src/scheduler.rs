//! The recurring entry scheduler
//!
//! Firing a template posts the currently scheduled occurrence, records a
//! history row for the attempt, and advances the schedule to the next
//! occurrence strictly in the future of the posting date. Missed periods are
//! stepped over on advance rather than backfilled, so a template created or
//! reactivated late does not flood the ledger with backdated entries.
//!
//! Generation is deduplicated per period: a fire whose period already has a
//! successful history row is rejected and no second entry is created.

use chrono::NaiveDate;
use tracing::{info, warn};

use core_kernel::{TemplateId, TenantId};
use domain_ledger::{LedgerPoster, LedgerStore, PostingRequest};

use crate::error::RecurringError;
use crate::history::GenerationRecord;
use crate::ports::RecurringStore;
use crate::schedule::{compute_next_date, period_key};
use crate::template::RecurringTemplate;

/// Fires due templates and records their generation history
pub struct RecurringScheduler<'a, L: LedgerStore, R: RecurringStore> {
    recurring: &'a R,
    poster: LedgerPoster<'a, L>,
}

impl<'a, L: LedgerStore, R: RecurringStore> RecurringScheduler<'a, L, R> {
    /// Creates a scheduler over the given stores
    pub fn new(ledger: &'a L, recurring: &'a R) -> Self {
        Self {
            recurring,
            poster: LedgerPoster::new(ledger),
        }
    }

    /// Fires one template's scheduled occurrence, dated `posting_date`
    ///
    /// Every attempt appends exactly one history row. The schedule only
    /// advances after a successful post, so a failed attempt is retried by
    /// the next run.
    ///
    /// # Errors
    ///
    /// - [`RecurringError::TemplateNotFound`] if the id does not resolve
    /// - [`RecurringError::InactiveTemplate`] for deactivated templates
    /// - [`RecurringError::TemplateExpired`] once the end date has passed;
    ///   the template is deactivated as a side effect
    /// - [`RecurringError::DuplicateFire`] if the period already generated
    ///   successfully; no second entry is created
    /// - [`RecurringError::UnbalancedTemplate`] if the stored lines no
    ///   longer balance
    pub async fn fire(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
        posting_date: NaiveDate,
    ) -> Result<GenerationRecord, RecurringError> {
        let template = self
            .recurring
            .template_by_id(tenant_id, template_id)
            .await?
            .ok_or(RecurringError::TemplateNotFound(template_id))?;

        let period = period_key(template.next_date);

        if !template.active {
            self.record_failure(&template, &period, "template is inactive")
                .await?;
            return Err(RecurringError::InactiveTemplate(template.id));
        }

        if template.is_expired_at(template.next_date) {
            self.recurring
                .update_schedule(
                    tenant_id,
                    template.id,
                    template.last_generated,
                    template.next_date,
                    false,
                )
                .await?;
            self.record_failure(&template, &period, "template end date has passed")
                .await?;
            info!(tenant_id = %tenant_id, template = %template.name, "template expired");
            return Err(RecurringError::TemplateExpired(template.id));
        }

        if self
            .recurring
            .has_successful_generation(tenant_id, template.id, &period)
            .await?
        {
            self.record_failure(&template, &period, "period already generated")
                .await?;
            return Err(RecurringError::DuplicateFire {
                template: template.id,
                period,
            });
        }

        if !template.is_balanced() {
            self.record_failure(&template, &period, "template lines are unbalanced")
                .await?;
            return Err(RecurringError::UnbalancedTemplate(template.id));
        }

        let request = PostingRequest {
            tenant_id,
            journal: template.journal,
            date: posting_date,
            label: format!("{} {}", template.name, period),
            external_ref: Some(format!("REC-{}-{}", template.id, period)),
            lines: template.lines.iter().map(|l| l.to_draft()).collect(),
        };

        match self.poster.post(request).await {
            Ok(posted) => {
                let record = GenerationRecord::succeeded(
                    tenant_id,
                    template.id,
                    &period,
                    posted.entry.id,
                );
                self.recurring.insert_history(&record).await?;

                let next = compute_next_date(
                    template.next_date,
                    template.frequency,
                    template.day_of_month,
                    posting_date,
                )?;
                self.recurring
                    .update_schedule(
                        tenant_id,
                        template.id,
                        Some(template.next_date),
                        next,
                        true,
                    )
                    .await?;

                info!(
                    tenant_id = %tenant_id,
                    template = %template.name,
                    entry_number = %posted.entry.number,
                    period = %period,
                    "recurring entry generated"
                );
                Ok(record)
            }
            Err(e) => {
                self.record_failure(&template, &period, e.to_string()).await?;
                Err(e.into())
            }
        }
    }

    /// Fires every due template of a tenant, dated `as_of`
    ///
    /// Failures are isolated per template: a template whose fire fails is
    /// logged and left for the next run while the sweep continues. Store
    /// errors abort the sweep.
    pub async fn run_due(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<GenerationRecord>, RecurringError> {
        let due = self.recurring.due_templates(tenant_id, as_of).await?;

        let mut records = Vec::new();
        for template in due {
            match self.fire(tenant_id, template.id, as_of).await {
                Ok(record) => records.push(record),
                Err(RecurringError::Store(e)) => return Err(RecurringError::Store(e)),
                Err(e) => {
                    warn!(
                        tenant_id = %tenant_id,
                        template = %template.name,
                        error = %e,
                        "recurring generation failed"
                    );
                }
            }
        }
        Ok(records)
    }

    async fn record_failure(
        &self,
        template: &RecurringTemplate,
        period: &str,
        detail: impl Into<String>,
    ) -> Result<(), RecurringError> {
        let record =
            GenerationRecord::failed(template.tenant_id, template.id, period, detail);
        self.recurring.insert_history(&record).await?;
        Ok(())
    }
}

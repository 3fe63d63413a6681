//! PostgreSQL implementation of the recurring store
//!
//! Template lines are stored as a JSONB document: they are only ever read
//! and written as a whole, and their shape follows the domain type. The
//! one-successful-generation-per-period rule is enforced by a partial
//! unique index on the history table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{
    Currency, DomainPort, EntryId, GenerationId, Money, PortError, TemplateId, TenantId,
};
use rust_decimal::Decimal;
use domain_recurring::{
    Frequency, GenerationRecord, GenerationStatus, RecurringStore, RecurringTemplate,
    TemplateLine,
};
use domain_ledger::JournalType;

use crate::error::{classify, DatabaseError};

fn port_err(error: sqlx::Error) -> PortError {
    classify(error).into()
}

fn parse_currency(code: &str) -> Result<Currency, PortError> {
    Currency::from_code(code)
        .ok_or_else(|| PortError::from(DatabaseError::corrupt("currency", code)))
}

/// PostgreSQL adapter for the recurring store port
#[derive(Debug, Clone)]
pub struct PgRecurringStore {
    pool: PgPool,
}

impl PgRecurringStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TemplateRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    description: String,
    journal_code: String,
    frequency: String,
    day_of_month: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    last_generated: Option<NaiveDate>,
    next_date: NaiveDate,
    reference_amount: Decimal,
    reference_currency: String,
    active: bool,
    lines: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TemplateRow {
    fn into_domain(self) -> Result<RecurringTemplate, PortError> {
        let journal = JournalType::from_code(&self.journal_code).ok_or_else(|| {
            PortError::from(DatabaseError::corrupt("journal code", &self.journal_code))
        })?;
        let frequency = Frequency::parse(&self.frequency)
            .ok_or_else(|| PortError::from(DatabaseError::corrupt("frequency", &self.frequency)))?;
        let lines: Vec<TemplateLine> = serde_json::from_value(self.lines)
            .map_err(|e| PortError::from(DatabaseError::corrupt("lines", e)))?;

        let reference_amount =
            Money::new(self.reference_amount, parse_currency(&self.reference_currency)?);

        Ok(RecurringTemplate {
            id: TemplateId::from(self.id),
            tenant_id: TenantId::from(self.tenant_id),
            name: self.name,
            description: self.description,
            journal,
            frequency,
            day_of_month: self.day_of_month as u32,
            start_date: self.start_date,
            end_date: self.end_date,
            last_generated: self.last_generated,
            next_date: self.next_date,
            reference_amount,
            active: self.active,
            lines,
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct HistoryRow {
    id: Uuid,
    tenant_id: Uuid,
    template_id: Uuid,
    period: String,
    status: String,
    entry_id: Option<Uuid>,
    detail: Option<String>,
    fired_at: DateTime<Utc>,
}

impl HistoryRow {
    fn into_domain(self) -> Result<GenerationRecord, PortError> {
        let status = GenerationStatus::parse(&self.status)
            .ok_or_else(|| PortError::from(DatabaseError::corrupt("status", &self.status)))?;
        Ok(GenerationRecord {
            id: GenerationId::from(self.id),
            tenant_id: TenantId::from(self.tenant_id),
            template_id: TemplateId::from(self.template_id),
            period: self.period,
            status,
            entry_id: self.entry_id.map(EntryId::from),
            detail: self.detail,
            fired_at: self.fired_at,
        })
    }
}

impl DomainPort for PgRecurringStore {}

#[async_trait]
impl RecurringStore for PgRecurringStore {
    async fn template_by_id(
        &self,
        tenant_id: TenantId,
        id: TemplateId,
    ) -> Result<Option<RecurringTemplate>, PortError> {
        let row: Option<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, description, journal_code, frequency,
                   day_of_month, start_date, end_date, last_generated,
                   next_date, reference_amount, reference_currency, active,
                   lines, created_at
            FROM recurring_templates
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(port_err)?;

        row.map(TemplateRow::into_domain).transpose()
    }

    async fn insert_template(&self, template: &RecurringTemplate) -> Result<(), PortError> {
        let lines = serde_json::to_value(&template.lines)
            .map_err(|e| PortError::internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO recurring_templates (
                id, tenant_id, name, description, journal_code, frequency,
                day_of_month, start_date, end_date, last_generated, next_date,
                reference_amount, reference_currency, active, lines, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                      $14, $15, $16)
            "#,
        )
        .bind(template.id.as_uuid())
        .bind(template.tenant_id.as_uuid())
        .bind(&template.name)
        .bind(&template.description)
        .bind(template.journal.code())
        .bind(template.frequency.as_str())
        .bind(template.day_of_month as i32)
        .bind(template.start_date)
        .bind(template.end_date)
        .bind(template.last_generated)
        .bind(template.next_date)
        .bind(template.reference_amount.amount())
        .bind(template.reference_amount.currency().code())
        .bind(template.active)
        .bind(lines)
        .bind(template.created_at)
        .execute(&self.pool)
        .await
        .map_err(port_err)?;
        Ok(())
    }

    async fn due_templates(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<RecurringTemplate>, PortError> {
        let rows: Vec<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, description, journal_code, frequency,
                   day_of_month, start_date, end_date, last_generated,
                   next_date, reference_amount, reference_currency, active,
                   lines, created_at
            FROM recurring_templates
            WHERE tenant_id = $1 AND active = TRUE AND next_date <= $2
            ORDER BY next_date
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(as_of)
        .fetch_all(&self.pool)
        .await
        .map_err(port_err)?;

        rows.into_iter().map(TemplateRow::into_domain).collect()
    }

    async fn update_schedule(
        &self,
        tenant_id: TenantId,
        id: TemplateId,
        last_generated: Option<NaiveDate>,
        next_date: NaiveDate,
        active: bool,
    ) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE recurring_templates
            SET last_generated = $3, next_date = $4, active = $5
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .bind(last_generated)
        .bind(next_date)
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(port_err)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("RecurringTemplate", id));
        }
        Ok(())
    }

    async fn has_successful_generation(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
        period: &str,
    ) -> Result<bool, PortError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM generation_history
                WHERE tenant_id = $1 AND template_id = $2 AND period = $3
                  AND status = 'succeeded'
            )
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(template_id.as_uuid())
        .bind(period)
        .fetch_one(&self.pool)
        .await
        .map_err(port_err)?;

        Ok(exists)
    }

    async fn insert_history(&self, record: &GenerationRecord) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO generation_history (
                id, tenant_id, template_id, period, status, entry_id, detail,
                fired_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.tenant_id.as_uuid())
        .bind(record.template_id.as_uuid())
        .bind(&record.period)
        .bind(record.status.as_str())
        .bind(record.entry_id.map(|id| *id.as_uuid()))
        .bind(&record.detail)
        .bind(record.fired_at)
        .execute(&self.pool)
        .await
        .map_err(port_err)?;
        Ok(())
    }

    async fn history_for_template(
        &self,
        tenant_id: TenantId,
        template_id: TemplateId,
    ) -> Result<Vec<GenerationRecord>, PortError> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, template_id, period, status, entry_id,
                   detail, fired_at
            FROM generation_history
            WHERE tenant_id = $1 AND template_id = $2
            ORDER BY fired_at DESC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(template_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(port_err)?;

        rows.into_iter().map(HistoryRow::into_domain).collect()
    }
}

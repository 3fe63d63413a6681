//! PostgreSQL implementation of the ledger store
//!
//! Queries are bound at runtime so the crate builds without a live
//! database. Entry headers and lines are written in one transaction, and
//! sequence numbers are drawn with an atomic upsert so concurrent posters
//! never observe the same value.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{
    AccountId, Currency, DomainPort, EntryId, JournalId, LineId, Money, PortError, TenantId,
};
use domain_ledger::{
    Account, AccountCategory, Journal, JournalType, LedgerEntry, LedgerLine, LedgerStore,
    RemediationTicket,
};

use crate::error::{classify, DatabaseError};

fn port_err(error: sqlx::Error) -> PortError {
    classify(error).into()
}

fn parse_currency(code: &str) -> Result<Currency, PortError> {
    Currency::from_code(code)
        .ok_or_else(|| PortError::from(DatabaseError::corrupt("currency", code)))
}

/// PostgreSQL adapter for the ledger store port
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    tenant_id: Uuid,
    code: String,
    name: String,
    category: String,
    is_active: bool,
}

impl AccountRow {
    fn into_domain(self) -> Result<Account, PortError> {
        let category = AccountCategory::parse(&self.category)
            .ok_or_else(|| PortError::from(DatabaseError::corrupt("category", &self.category)))?;
        Ok(Account {
            id: AccountId::from(self.id),
            tenant_id: TenantId::from(self.tenant_id),
            code: self.code,
            name: self.name,
            category,
            is_active: self.is_active,
        })
    }
}

#[derive(FromRow)]
struct JournalRow {
    id: Uuid,
    tenant_id: Uuid,
    code: String,
    name: String,
    is_active: bool,
}

impl JournalRow {
    fn into_domain(self) -> Result<Journal, PortError> {
        let journal_type = JournalType::from_code(&self.code)
            .ok_or_else(|| PortError::from(DatabaseError::corrupt("journal code", &self.code)))?;
        Ok(Journal {
            id: JournalId::from(self.id),
            tenant_id: TenantId::from(self.tenant_id),
            code: self.code,
            name: self.name,
            journal_type,
            is_active: self.is_active,
        })
    }
}

#[derive(FromRow)]
struct EntryRow {
    id: Uuid,
    tenant_id: Uuid,
    journal_id: Uuid,
    number: String,
    entry_date: NaiveDate,
    label: String,
    external_ref: Option<String>,
    validated: bool,
    total_debit: Decimal,
    total_credit: Decimal,
    currency: String,
    created_at: DateTime<Utc>,
}

impl EntryRow {
    fn into_domain(self) -> Result<LedgerEntry, PortError> {
        let currency = parse_currency(&self.currency)?;
        Ok(LedgerEntry {
            id: EntryId::from(self.id),
            tenant_id: TenantId::from(self.tenant_id),
            journal_id: JournalId::from(self.journal_id),
            number: self.number.into(),
            date: self.entry_date,
            label: self.label,
            external_ref: self.external_ref,
            validated: self.validated,
            total_debit: Money::new(self.total_debit, currency),
            total_credit: Money::new(self.total_credit, currency),
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct LineRow {
    id: Uuid,
    entry_id: Uuid,
    account_id: Uuid,
    debit: Decimal,
    credit: Decimal,
    currency: String,
    label: String,
}

impl LineRow {
    fn into_domain(self) -> Result<LedgerLine, PortError> {
        let currency = parse_currency(&self.currency)?;
        Ok(LedgerLine {
            id: LineId::from(self.id),
            entry_id: EntryId::from(self.entry_id),
            account_id: AccountId::from(self.account_id),
            debit: Money::new(self.debit, currency),
            credit: Money::new(self.credit, currency),
            label: self.label,
        })
    }
}

impl DomainPort for PgLedgerStore {}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn account_by_id(
        &self,
        tenant_id: TenantId,
        id: AccountId,
    ) -> Result<Option<Account>, PortError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, code, name, category, is_active
            FROM accounts
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(port_err)?;

        row.map(AccountRow::into_domain).transpose()
    }

    async fn account_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Account>, PortError> {
        // Exact matches sort first, then the lowest code among prefix
        // matches. left() keeps the comparison literal; LIKE would let a
        // stored % or _ act as a wildcard.
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, code, name, category, is_active
            FROM accounts
            WHERE tenant_id = $1 AND is_active = TRUE
              AND left(code, length($2)) = $2
            ORDER BY (code <> $2), code
            LIMIT 1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(port_err)?;

        row.map(AccountRow::into_domain).transpose()
    }

    async fn insert_accounts(&self, accounts: &[Account]) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(port_err)?;
        for account in accounts {
            sqlx::query(
                r#"
                INSERT INTO accounts (id, tenant_id, code, name, category, is_active)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(account.id.as_uuid())
            .bind(account.tenant_id.as_uuid())
            .bind(&account.code)
            .bind(&account.name)
            .bind(account.category.as_str())
            .bind(account.is_active)
            .execute(&mut *tx)
            .await
            .map_err(port_err)?;
        }
        tx.commit().await.map_err(port_err)?;
        Ok(())
    }

    async fn journal_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Journal>, PortError> {
        let row: Option<JournalRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, code, name, is_active
            FROM journals
            WHERE tenant_id = $1 AND code = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(port_err)?;

        row.map(JournalRow::into_domain).transpose()
    }

    async fn insert_journal(&self, journal: &Journal) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO journals (id, tenant_id, code, name, is_active)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(journal.id.as_uuid())
        .bind(journal.tenant_id.as_uuid())
        .bind(&journal.code)
        .bind(&journal.name)
        .bind(journal.is_active)
        .execute(&self.pool)
        .await
        .map_err(port_err)?;
        Ok(())
    }

    async fn next_sequence(
        &self,
        tenant_id: TenantId,
        journal_code: &str,
        year: i32,
    ) -> Result<u32, PortError> {
        let (value,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO entry_sequences (tenant_id, journal_code, year, value)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (tenant_id, journal_code, year)
            DO UPDATE SET value = entry_sequences.value + 1
            RETURNING value
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(journal_code)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(port_err)?;

        Ok(value as u32)
    }

    async fn insert_entry(
        &self,
        entry: &LedgerEntry,
        lines: &[LedgerLine],
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(port_err)?;

        sqlx::query(
            r#"
            INSERT INTO entries (
                id, tenant_id, journal_id, number, entry_date, label,
                external_ref, validated, total_debit, total_credit, currency,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.tenant_id.as_uuid())
        .bind(entry.journal_id.as_uuid())
        .bind(entry.number.as_str())
        .bind(entry.date)
        .bind(&entry.label)
        .bind(&entry.external_ref)
        .bind(entry.validated)
        .bind(entry.total_debit.amount())
        .bind(entry.total_credit.amount())
        .bind(entry.total_debit.currency().code())
        .bind(entry.created_at)
        .execute(&mut *tx)
        .await
        .map_err(port_err)?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO entry_lines (
                    id, entry_id, account_id, debit, credit, currency, label
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(line.id.as_uuid())
            .bind(line.entry_id.as_uuid())
            .bind(line.account_id.as_uuid())
            .bind(line.debit.amount())
            .bind(line.credit.amount())
            .bind(line.debit.currency().code())
            .bind(&line.label)
            .execute(&mut *tx)
            .await
            .map_err(port_err)?;
        }

        tx.commit().await.map_err(port_err)?;
        Ok(())
    }

    async fn entry_by_id(
        &self,
        tenant_id: TenantId,
        id: EntryId,
    ) -> Result<Option<LedgerEntry>, PortError> {
        let row: Option<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, journal_id, number, entry_date, label,
                   external_ref, validated, total_debit, total_credit,
                   currency, created_at
            FROM entries
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(port_err)?;

        row.map(EntryRow::into_domain).transpose()
    }

    async fn lines_for_entry(
        &self,
        tenant_id: TenantId,
        entry_id: EntryId,
    ) -> Result<Vec<LedgerLine>, PortError> {
        let rows: Vec<LineRow> = sqlx::query_as(
            r#"
            SELECT l.id, l.entry_id, l.account_id, l.debit, l.credit,
                   l.currency, l.label
            FROM entry_lines l
            JOIN entries e ON e.id = l.entry_id
            WHERE e.tenant_id = $1 AND l.entry_id = $2
            ORDER BY l.id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(entry_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(port_err)?;

        rows.into_iter().map(LineRow::into_domain).collect()
    }

    async fn insert_remediation(&self, ticket: &RemediationTicket) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO remediation_tickets (id, tenant_id, source, reason, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(ticket.tenant_id.as_uuid())
        .bind(&ticket.source)
        .bind(&ticket.reason)
        .bind(ticket.created_at)
        .execute(&self.pool)
        .await
        .map_err(port_err)?;
        Ok(())
    }
}

//! Persistence port for the ledger domain
//!
//! Implemented by `infra_db::PgLedgerStore` against PostgreSQL and by
//! [`crate::memory::MemoryLedgerStore`] for tests. Every method is scoped by
//! tenant: a store must never resolve or mutate another tenant's data.

use async_trait::async_trait;

use core_kernel::{AccountId, DomainPort, EntryId, PortError, TenantId};

use crate::account::Account;
use crate::entry::{LedgerEntry, LedgerLine};
use crate::journal::Journal;
use crate::remediation::RemediationTicket;

/// Store port for accounts, journals, entries, and sequences
#[async_trait]
pub trait LedgerStore: DomainPort {
    /// Exact account lookup by id
    async fn account_by_id(
        &self,
        tenant_id: TenantId,
        id: AccountId,
    ) -> Result<Option<Account>, PortError>;

    /// Resolves an account by code: exact match first, then the first
    /// *active* account whose code starts with `code`, ordered by code
    /// ascending. The ordering is the documented tie-break when several
    /// accounts share a prefix.
    async fn account_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Account>, PortError>;

    /// Bulk-inserts accounts (chart seeding). Fails on a duplicate
    /// (tenant, code) pair.
    async fn insert_accounts(&self, accounts: &[Account]) -> Result<(), PortError>;

    /// Looks up a journal by its short code
    async fn journal_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Journal>, PortError>;

    /// Inserts a lazily-created journal
    async fn insert_journal(&self, journal: &Journal) -> Result<(), PortError>;

    /// Atomically draws the next entry sequence number for
    /// (tenant, journal code, year). Two concurrent callers never observe
    /// the same value.
    async fn next_sequence(
        &self,
        tenant_id: TenantId,
        journal_code: &str,
        year: i32,
    ) -> Result<u32, PortError>;

    /// Persists an entry header and all its lines as one atomic unit.
    /// Either everything is written or nothing is.
    async fn insert_entry(
        &self,
        entry: &LedgerEntry,
        lines: &[LedgerLine],
    ) -> Result<(), PortError>;

    /// Loads an entry header
    async fn entry_by_id(
        &self,
        tenant_id: TenantId,
        id: EntryId,
    ) -> Result<Option<LedgerEntry>, PortError>;

    /// Loads the lines of an entry
    async fn lines_for_entry(
        &self,
        tenant_id: TenantId,
        entry_id: EntryId,
    ) -> Result<Vec<LedgerLine>, PortError>;

    /// Appends a remediation ticket to the operator queue
    async fn insert_remediation(&self, ticket: &RemediationTicket) -> Result<(), PortError>;
}

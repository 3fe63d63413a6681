//! In-memory ledger store
//!
//! Backs the domain test suites and doubles as the substitutable fake for
//! callers that wire the engine without a database. Behaves like the
//! PostgreSQL adapter: tenant-scoped lookups, atomic sequences, and a
//! uniqueness check on entry numbers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{AccountId, DomainPort, EntryId, PortError, TenantId};

use crate::account::Account;
use crate::entry::{LedgerEntry, LedgerLine};
use crate::journal::Journal;
use crate::ports::LedgerStore;
use crate::remediation::RemediationTicket;

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    journals: Vec<Journal>,
    sequences: HashMap<(TenantId, String, i32), u32>,
    entries: HashMap<EntryId, LedgerEntry>,
    lines: HashMap<EntryId, Vec<LedgerLine>>,
    tickets: Vec<RemediationTicket>,
}

/// Thread-safe in-memory implementation of [`LedgerStore`]
#[derive(Default)]
pub struct MemoryLedgerStore {
    inner: Mutex<State>,
}

impl MemoryLedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries persisted for a tenant (test helper)
    pub fn entry_count(&self, tenant_id: TenantId) -> usize {
        let state = self.inner.lock().unwrap();
        state
            .entries
            .values()
            .filter(|e| e.tenant_id == tenant_id)
            .count()
    }

    /// All entries for a tenant, ordered by entry number (test helper)
    pub fn entries_for_tenant(&self, tenant_id: TenantId) -> Vec<LedgerEntry> {
        let state = self.inner.lock().unwrap();
        let mut entries: Vec<_> = state
            .entries
            .values()
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.number.as_str().cmp(b.number.as_str()));
        entries
    }

    /// Remediation tickets recorded for a tenant (test helper)
    pub fn tickets_for_tenant(&self, tenant_id: TenantId) -> Vec<RemediationTicket> {
        let state = self.inner.lock().unwrap();
        state
            .tickets
            .iter()
            .filter(|t| t.tenant_id == tenant_id)
            .cloned()
            .collect()
    }
}

impl DomainPort for MemoryLedgerStore {}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn account_by_id(
        &self,
        tenant_id: TenantId,
        id: AccountId,
    ) -> Result<Option<Account>, PortError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .find(|a| a.tenant_id == tenant_id && a.id == id)
            .cloned())
    }

    async fn account_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Account>, PortError> {
        let state = self.inner.lock().unwrap();

        if let Some(exact) = state
            .accounts
            .iter()
            .find(|a| a.tenant_id == tenant_id && a.is_active && a.code == code)
        {
            return Ok(Some(exact.clone()));
        }

        // Prefix fallback: first active account by code ascending
        Ok(state
            .accounts
            .iter()
            .filter(|a| a.tenant_id == tenant_id && a.is_active && a.code.starts_with(code))
            .min_by(|a, b| a.code.cmp(&b.code))
            .cloned())
    }

    async fn insert_accounts(&self, accounts: &[Account]) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();
        for account in accounts {
            let duplicate = state
                .accounts
                .iter()
                .any(|a| a.tenant_id == account.tenant_id && a.code == account.code);
            if duplicate {
                return Err(PortError::conflict(format!(
                    "account code {} already exists for tenant",
                    account.code
                )));
            }
            state.accounts.push(account.clone());
        }
        Ok(())
    }

    async fn journal_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Journal>, PortError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .journals
            .iter()
            .find(|j| j.tenant_id == tenant_id && j.code == code)
            .cloned())
    }

    async fn insert_journal(&self, journal: &Journal) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();
        let duplicate = state
            .journals
            .iter()
            .any(|j| j.tenant_id == journal.tenant_id && j.code == journal.code);
        if duplicate {
            return Err(PortError::conflict(format!(
                "journal {} already exists for tenant",
                journal.code
            )));
        }
        state.journals.push(journal.clone());
        Ok(())
    }

    async fn next_sequence(
        &self,
        tenant_id: TenantId,
        journal_code: &str,
        year: i32,
    ) -> Result<u32, PortError> {
        let mut state = self.inner.lock().unwrap();
        let counter = state
            .sequences
            .entry((tenant_id, journal_code.to_string(), year))
            .or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn insert_entry(
        &self,
        entry: &LedgerEntry,
        lines: &[LedgerLine],
    ) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();

        // Mirrors the database unique constraint on (tenant, journal, number)
        let duplicate = state.entries.values().any(|e| {
            e.tenant_id == entry.tenant_id
                && e.journal_id == entry.journal_id
                && e.number == entry.number
        });
        if duplicate {
            return Err(PortError::conflict(format!(
                "entry number {} already exists",
                entry.number
            )));
        }

        state.entries.insert(entry.id, entry.clone());
        state.lines.insert(entry.id, lines.to_vec());
        Ok(())
    }

    async fn entry_by_id(
        &self,
        tenant_id: TenantId,
        id: EntryId,
    ) -> Result<Option<LedgerEntry>, PortError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .entries
            .get(&id)
            .filter(|e| e.tenant_id == tenant_id)
            .cloned())
    }

    async fn lines_for_entry(
        &self,
        tenant_id: TenantId,
        entry_id: EntryId,
    ) -> Result<Vec<LedgerLine>, PortError> {
        let state = self.inner.lock().unwrap();
        let owned = state
            .entries
            .get(&entry_id)
            .map(|e| e.tenant_id == tenant_id)
            .unwrap_or(false);
        if !owned {
            return Ok(Vec::new());
        }
        Ok(state.lines.get(&entry_id).cloned().unwrap_or_default())
    }

    async fn insert_remediation(&self, ticket: &RemediationTicket) -> Result<(), PortError> {
        let mut state = self.inner.lock().unwrap();
        state.tickets.push(ticket.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountCategory;

    #[tokio::test]
    async fn test_account_by_code_prefers_exact_match() {
        let tenant = TenantId::new();
        let store = MemoryLedgerStore::new();
        store
            .insert_accounts(&[
                Account::new(tenant, "4111", "Clients - group A", AccountCategory::Asset),
                Account::new(tenant, "411", "Trade receivables", AccountCategory::Asset),
            ])
            .await
            .unwrap();

        let resolved = store.account_by_code(tenant, "411").await.unwrap().unwrap();
        assert_eq!(resolved.code, "411");
    }

    #[tokio::test]
    async fn test_account_by_code_prefix_uses_lowest_code() {
        let tenant = TenantId::new();
        let store = MemoryLedgerStore::new();
        store
            .insert_accounts(&[
                Account::new(tenant, "4452", "Deductible VAT - other", AccountCategory::Asset),
                Account::new(tenant, "4451", "Deductible VAT - goods", AccountCategory::Asset),
            ])
            .await
            .unwrap();

        let resolved = store.account_by_code(tenant, "445").await.unwrap().unwrap();
        assert_eq!(resolved.code, "4451");
    }

    #[tokio::test]
    async fn test_lookup_codes_match_literally_not_as_patterns() {
        let tenant = TenantId::new();
        let store = MemoryLedgerStore::new();
        store
            .insert_accounts(&[Account::new(
                tenant,
                "411",
                "Trade receivables",
                AccountCategory::Asset,
            )])
            .await
            .unwrap();

        // Pattern metacharacters in a lookup code are ordinary characters
        assert!(store.account_by_code(tenant, "4_1").await.unwrap().is_none());
        assert!(store.account_by_code(tenant, "4%").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inactive_accounts_are_not_resolved() {
        let tenant = TenantId::new();
        let mut account = Account::new(tenant, "411", "Trade receivables", AccountCategory::Asset);
        account.deactivate();

        let store = MemoryLedgerStore::new();
        store.insert_accounts(&[account]).await.unwrap();

        assert!(store.account_by_code(tenant, "411").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tenant_isolation_on_lookups() {
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let store = MemoryLedgerStore::new();
        store
            .insert_accounts(&[Account::new(
                tenant_a,
                "411",
                "Trade receivables",
                AccountCategory::Asset,
            )])
            .await
            .unwrap();

        assert!(store
            .account_by_code(tenant_a, "411")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .account_by_code(tenant_b, "411")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_account_code_conflicts() {
        let tenant = TenantId::new();
        let store = MemoryLedgerStore::new();
        store
            .insert_accounts(&[Account::new(
                tenant,
                "411",
                "Trade receivables",
                AccountCategory::Asset,
            )])
            .await
            .unwrap();

        let result = store
            .insert_accounts(&[Account::new(
                tenant,
                "411",
                "Duplicate",
                AccountCategory::Asset,
            )])
            .await;
        assert!(matches!(result, Err(PortError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_sequences_are_independent_per_key() {
        let tenant = TenantId::new();
        let other = TenantId::new();
        let store = MemoryLedgerStore::new();

        assert_eq!(store.next_sequence(tenant, "VT", 2026).await.unwrap(), 1);
        assert_eq!(store.next_sequence(tenant, "VT", 2026).await.unwrap(), 2);
        assert_eq!(store.next_sequence(tenant, "AC", 2026).await.unwrap(), 1);
        assert_eq!(store.next_sequence(tenant, "VT", 2027).await.unwrap(), 1);
        assert_eq!(store.next_sequence(other, "VT", 2026).await.unwrap(), 1);
    }
}

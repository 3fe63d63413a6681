//! The ledger posting engine
//!
//! Turns a set of debit/credit lines into a persisted, numbered, balanced
//! ledger entry. The poster enforces the engine's central invariant: no
//! unbalanced entry may ever be persisted. Account resolution failures abort
//! the whole posting before anything is written.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::info;

use core_kernel::{EntryId, LineId, Money, TenantId};

use crate::account::Account;
use crate::entry::{
    DraftLine, EntryNumber, LedgerEntry, LedgerLine, PostedEntry, BALANCE_TOLERANCE,
};
use crate::error::LedgerError;
use crate::journal::{Journal, JournalType};
use crate::ports::LedgerStore;

/// A request to post one entry
#[derive(Debug, Clone)]
pub struct PostingRequest {
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Target journal (created lazily if the tenant has none yet)
    pub journal: JournalType,
    /// Posting date; also selects the numbering year
    pub date: NaiveDate,
    /// Entry label
    pub label: String,
    /// External document number
    pub external_ref: Option<String>,
    /// Two or more debit/credit lines
    pub lines: Vec<DraftLine>,
}

/// The posting engine
///
/// Stateless: every call re-reads current accounts and journals through the
/// store, and delegates atomicity of the final write to the store's
/// `insert_entry`.
pub struct LedgerPoster<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> LedgerPoster<'a, S> {
    /// Creates a poster over the given store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Posts a balanced entry
    ///
    /// # Errors
    ///
    /// - [`LedgerError::TooFewLines`] if fewer than two lines are given
    /// - [`LedgerError::NegativeAmount`] if any line amount is negative
    /// - [`LedgerError::UnresolvedAccount`] if any line's account cannot be
    ///   resolved for the tenant; nothing is written in that case
    /// - [`LedgerError::Unbalanced`] if debits and credits differ by more
    ///   than [`BALANCE_TOLERANCE`]
    pub async fn post(&self, request: PostingRequest) -> Result<PostedEntry, LedgerError> {
        if request.lines.len() < 2 {
            return Err(LedgerError::TooFewLines(request.lines.len()));
        }

        // Resolve every account before writing anything: a single
        // unresolvable line aborts the whole posting.
        let mut resolved: Vec<(Account, &DraftLine)> = Vec::with_capacity(request.lines.len());
        for (index, line) in request.lines.iter().enumerate() {
            if line.debit.is_negative() {
                return Err(LedgerError::NegativeAmount {
                    line: index,
                    amount: line.debit.amount(),
                });
            }
            if line.credit.is_negative() {
                return Err(LedgerError::NegativeAmount {
                    line: index,
                    amount: line.credit.amount(),
                });
            }

            let account = match &line.account {
                crate::entry::AccountRef::Id(id) => {
                    self.store.account_by_id(request.tenant_id, *id).await?
                }
                crate::entry::AccountRef::Code(code) => {
                    self.store.account_by_code(request.tenant_id, code).await?
                }
            };
            let account = account.ok_or_else(|| LedgerError::UnresolvedAccount {
                reference: line.account.to_string(),
            })?;
            resolved.push((account, line));
        }

        let currency = request.lines[0].debit.currency();
        let mut total_debit = Money::zero(currency);
        let mut total_credit = Money::zero(currency);
        for line in &request.lines {
            total_debit = total_debit.checked_add(&line.debit)?;
            total_credit = total_credit.checked_add(&line.credit)?;
        }

        if (total_debit.amount() - total_credit.amount()).abs() > BALANCE_TOLERANCE {
            return Err(LedgerError::Unbalanced {
                debits: total_debit.amount(),
                credits: total_credit.amount(),
            });
        }

        let journal = self
            .get_or_create_journal(request.tenant_id, request.journal)
            .await?;

        let year = request.date.year();
        let sequence = self
            .store
            .next_sequence(request.tenant_id, &journal.code, year)
            .await?;
        let number = EntryNumber::compose(&journal.code, year, sequence);

        let entry_id = EntryId::new_v7();
        let entry = LedgerEntry {
            id: entry_id,
            tenant_id: request.tenant_id,
            journal_id: journal.id,
            number: number.clone(),
            date: request.date,
            label: request.label.clone(),
            external_ref: request.external_ref.clone(),
            validated: false,
            total_debit,
            total_credit,
            created_at: Utc::now(),
        };

        let lines: Vec<LedgerLine> = resolved
            .into_iter()
            .map(|(account, line)| LedgerLine {
                id: LineId::new_v7(),
                entry_id,
                account_id: account.id,
                debit: line.debit,
                credit: line.credit,
                label: line.label.clone(),
            })
            .collect();

        self.store.insert_entry(&entry, &lines).await?;

        info!(
            tenant_id = %request.tenant_id,
            entry_number = %number,
            journal = %journal.code,
            lines = lines.len(),
            "posted ledger entry"
        );

        Ok(PostedEntry { entry, lines })
    }

    /// Idempotent journal lookup: returns the tenant's journal for the code,
    /// creating it with the type's default name on first use
    async fn get_or_create_journal(
        &self,
        tenant_id: TenantId,
        journal_type: JournalType,
    ) -> Result<Journal, LedgerError> {
        if let Some(existing) = self
            .store
            .journal_by_code(tenant_id, journal_type.code())
            .await?
        {
            return Ok(existing);
        }

        let journal = Journal::new(tenant_id, journal_type);
        match self.store.insert_journal(&journal).await {
            Ok(()) => Ok(journal),
            // Lost the creation race to a concurrent poster; use theirs
            Err(e) if e.is_conflict() => self
                .store
                .journal_by_code(tenant_id, journal_type.code())
                .await?
                .ok_or_else(|| LedgerError::Store(e)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{codes, StandardChart};
    use crate::entry::AccountRef;
    use crate::memory::MemoryLedgerStore;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn xof(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::XOF)
    }

    async fn seeded_store(tenant_id: TenantId) -> MemoryLedgerStore {
        let store = MemoryLedgerStore::new();
        store
            .insert_accounts(&StandardChart::accounts(tenant_id))
            .await
            .unwrap();
        store
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_post_balanced_entry() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let posted = poster
            .post(PostingRequest {
                tenant_id,
                journal: JournalType::Sales,
                date: date(2026, 3, 10),
                label: "Invoice F-001".into(),
                external_ref: Some("F-001".into()),
                lines: vec![
                    DraftLine::debit(AccountRef::code(codes::CLIENTS), xof(dec!(1180)), "client"),
                    DraftLine::credit(AccountRef::code(codes::SALES), xof(dec!(1000)), "revenue"),
                    DraftLine::credit(AccountRef::code(codes::VAT_COLLECTED), xof(dec!(180)), "vat"),
                ],
            })
            .await
            .unwrap();

        assert!(posted.is_balanced());
        assert!(!posted.entry.validated);
        assert_eq!(posted.entry.number.as_str(), "VT-2026-0001");
        assert_eq!(posted.lines.len(), 3);
    }

    #[tokio::test]
    async fn test_unbalanced_entry_is_rejected() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let result = poster
            .post(PostingRequest {
                tenant_id,
                journal: JournalType::Sales,
                date: date(2026, 3, 10),
                label: "broken".into(),
                external_ref: None,
                lines: vec![
                    DraftLine::debit(AccountRef::code(codes::CLIENTS), xof(dec!(1000)), "client"),
                    DraftLine::credit(AccountRef::code(codes::SALES), xof(dec!(900)), "revenue"),
                ],
            })
            .await;

        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
        assert_eq!(store.entry_count(tenant_id), 0);
    }

    #[tokio::test]
    async fn test_within_tolerance_is_accepted() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let result = poster
            .post(PostingRequest {
                tenant_id,
                journal: JournalType::Miscellaneous,
                date: date(2026, 1, 31),
                label: "rounding".into(),
                external_ref: None,
                lines: vec![
                    DraftLine::debit(
                        AccountRef::code(codes::PURCHASES),
                        Money::new(dec!(100.005), Currency::EUR),
                        "goods",
                    ),
                    DraftLine::credit(
                        AccountRef::code(codes::SUPPLIERS),
                        Money::new(dec!(100.00), Currency::EUR),
                        "supplier",
                    ),
                ],
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unresolved_account_aborts_whole_posting() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let result = poster
            .post(PostingRequest {
                tenant_id,
                journal: JournalType::Sales,
                date: date(2026, 3, 10),
                label: "bad account".into(),
                external_ref: None,
                lines: vec![
                    DraftLine::debit(AccountRef::code("999"), xof(dec!(500)), "nowhere"),
                    DraftLine::credit(AccountRef::code(codes::SALES), xof(dec!(500)), "revenue"),
                ],
            })
            .await;

        assert!(matches!(result, Err(LedgerError::UnresolvedAccount { .. })));
        // Atomicity: zero rows persisted for the failed attempt
        assert_eq!(store.entry_count(tenant_id), 0);
    }

    #[tokio::test]
    async fn test_too_few_lines() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let result = poster
            .post(PostingRequest {
                tenant_id,
                journal: JournalType::Sales,
                date: date(2026, 3, 10),
                label: "single".into(),
                external_ref: None,
                lines: vec![DraftLine::debit(
                    AccountRef::code(codes::CLIENTS),
                    xof(dec!(100)),
                    "alone",
                )],
            })
            .await;

        assert!(matches!(result, Err(LedgerError::TooFewLines(1))));
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let mut line = DraftLine::debit(AccountRef::code(codes::CLIENTS), xof(dec!(100)), "bad");
        line.debit = xof(dec!(-100));

        let result = poster
            .post(PostingRequest {
                tenant_id,
                journal: JournalType::Sales,
                date: date(2026, 3, 10),
                label: "negative".into(),
                external_ref: None,
                lines: vec![
                    line,
                    DraftLine::credit(AccountRef::code(codes::SALES), xof(dec!(100)), "revenue"),
                ],
            })
            .await;

        assert!(matches!(result, Err(LedgerError::NegativeAmount { .. })));
    }

    #[tokio::test]
    async fn test_sequence_advances_per_journal_and_year() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        let request = |journal, d: NaiveDate| PostingRequest {
            tenant_id,
            journal,
            date: d,
            label: "entry".into(),
            external_ref: None,
            lines: vec![
                DraftLine::debit(AccountRef::code(codes::BANK), xof(dec!(10)), "in"),
                DraftLine::credit(AccountRef::code(codes::SALES), xof(dec!(10)), "out"),
            ],
        };

        let a = poster
            .post(request(JournalType::Bank, date(2026, 1, 5)))
            .await
            .unwrap();
        let b = poster
            .post(request(JournalType::Bank, date(2026, 2, 5)))
            .await
            .unwrap();
        let c = poster
            .post(request(JournalType::Sales, date(2026, 2, 5)))
            .await
            .unwrap();
        let d = poster
            .post(request(JournalType::Bank, date(2027, 1, 5)))
            .await
            .unwrap();

        assert_eq!(a.entry.number.as_str(), "BQ-2026-0001");
        assert_eq!(b.entry.number.as_str(), "BQ-2026-0002");
        assert_eq!(c.entry.number.as_str(), "VT-2026-0001");
        // Numbering restarts per year
        assert_eq!(d.entry.number.as_str(), "BQ-2027-0001");
    }

    #[tokio::test]
    async fn test_journal_created_lazily_and_reused() {
        let tenant_id = TenantId::new();
        let store = seeded_store(tenant_id).await;
        let poster = LedgerPoster::new(&store);

        assert!(store
            .journal_by_code(tenant_id, "CA")
            .await
            .unwrap()
            .is_none());

        let request = PostingRequest {
            tenant_id,
            journal: JournalType::Cash,
            date: date(2026, 5, 2),
            label: "cash sale".into(),
            external_ref: None,
            lines: vec![
                DraftLine::debit(AccountRef::code(codes::CASH), xof(dec!(40)), "cash"),
                DraftLine::credit(AccountRef::code(codes::SALES), xof(dec!(40)), "sale"),
            ],
        };

        let first = poster.post(request.clone()).await.unwrap();
        let second = poster.post(request).await.unwrap();

        let journal = store
            .journal_by_code(tenant_id, "CA")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.entry.journal_id, journal.id);
        assert_eq!(second.entry.journal_id, journal.id);
    }
}

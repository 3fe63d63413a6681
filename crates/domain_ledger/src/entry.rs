//! Ledger entries, lines, and entry numbering
//!
//! An entry is one balanced accounting transaction: a header tied to a
//! journal plus two or more debit/credit lines. Entries start as drafts
//! (unvalidated) and are persisted atomically with all their lines.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, EntryId, JournalId, LineId, Money, TenantId};

/// Maximum allowed difference between total debits and total credits
/// (0.01 currency units)
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Side of a ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Debit,
    Credit,
}

/// How a draft line designates its target account
///
/// Callers that already hold a specific account (a client's designated
/// receivable account) pass `Id`; posting rules that only know the class
/// pass `Code`, resolved exact-match-first then by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRef {
    /// Exact account reference
    Id(AccountId),
    /// Account code, resolved exact-first then as a prefix
    Code(String),
}

impl AccountRef {
    /// Creates a code-based reference
    pub fn code(code: impl Into<String>) -> Self {
        AccountRef::Code(code.into())
    }
}

impl std::fmt::Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRef::Id(id) => write!(f, "{}", id),
            AccountRef::Code(code) => write!(f, "code {}", code),
        }
    }
}

/// One line of a posting request, before account resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLine {
    /// Target account
    pub account: AccountRef,
    /// Debit amount (>= 0)
    pub debit: Money,
    /// Credit amount (>= 0)
    pub credit: Money,
    /// Line label
    pub label: String,
}

impl DraftLine {
    /// Creates a debit line
    pub fn debit(account: AccountRef, amount: Money, label: impl Into<String>) -> Self {
        Self {
            account,
            debit: amount,
            credit: Money::zero(amount.currency()),
            label: label.into(),
        }
    }

    /// Creates a credit line
    pub fn credit(account: AccountRef, amount: Money, label: impl Into<String>) -> Self {
        Self {
            account,
            debit: Money::zero(amount.currency()),
            credit: amount,
            label: label.into(),
        }
    }

    /// Creates a line on the given side
    pub fn on_side(side: Side, account: AccountRef, amount: Money, label: impl Into<String>) -> Self {
        match side {
            Side::Debit => Self::debit(account, amount, label),
            Side::Credit => Self::credit(account, amount, label),
        }
    }
}

/// A human-readable entry number, unique per tenant, journal, and year
///
/// Format: `<journal code>-<year>-<zero-padded sequence>`, e.g. `VT-2026-0001`.
/// Numbers are for display and reconciliation; the primary key stays the
/// entry id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryNumber(String);

impl EntryNumber {
    /// Composes an entry number from its parts
    pub fn compose(journal_code: &str, year: i32, sequence: u32) -> Self {
        Self(format!("{}-{}-{:04}", journal_code, year, sequence))
    }

    /// Returns the number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A persisted ledger entry header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: EntryId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Owning journal
    pub journal_id: JournalId,
    /// Generated entry number
    pub number: EntryNumber,
    /// Posting date
    pub date: NaiveDate,
    /// Free-text label
    pub label: String,
    /// External document number (invoice number, payment reference)
    pub external_ref: Option<String>,
    /// Entries start unvalidated (draft) and are locked by review later
    pub validated: bool,
    /// Sum of debit lines
    pub total_debit: Money,
    /// Sum of credit lines
    pub total_credit: Money,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A persisted ledger line
///
/// Amounts are fixed at creation; lines are never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Unique identifier
    pub id: LineId,
    /// Owning entry
    pub entry_id: EntryId,
    /// Resolved account
    pub account_id: AccountId,
    /// Debit amount (>= 0)
    pub debit: Money,
    /// Credit amount (>= 0)
    pub credit: Money,
    /// Line label
    pub label: String,
}

/// The result of a successful posting: the header and all its lines
#[derive(Debug, Clone)]
pub struct PostedEntry {
    pub entry: LedgerEntry,
    pub lines: Vec<LedgerLine>,
}

impl PostedEntry {
    /// Returns true if total debits equal total credits within tolerance
    pub fn is_balanced(&self) -> bool {
        (self.entry.total_debit.amount() - self.entry.total_credit.amount()).abs()
            <= BALANCE_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_tolerance_value() {
        assert_eq!(BALANCE_TOLERANCE, dec!(0.01));
    }

    #[test]
    fn test_entry_number_format() {
        let number = EntryNumber::compose("VT", 2026, 1);
        assert_eq!(number.as_str(), "VT-2026-0001");

        let number = EntryNumber::compose("OD", 2026, 123);
        assert_eq!(number.as_str(), "OD-2026-0123");
    }

    #[test]
    fn test_entry_number_widens_past_padding() {
        let number = EntryNumber::compose("BQ", 2026, 12345);
        assert_eq!(number.as_str(), "BQ-2026-12345");
    }

    #[test]
    fn test_draft_line_constructors() {
        let amount = Money::new(dec!(100), Currency::XOF);

        let debit = DraftLine::debit(AccountRef::code("411"), amount, "client");
        assert_eq!(debit.debit, amount);
        assert!(debit.credit.is_zero());

        let credit = DraftLine::credit(AccountRef::code("701"), amount, "revenue");
        assert!(credit.debit.is_zero());
        assert_eq!(credit.credit, amount);
    }

    #[test]
    fn test_draft_line_on_side() {
        let amount = Money::new(dec!(50), Currency::EUR);
        let line = DraftLine::on_side(Side::Credit, AccountRef::code("521"), amount, "bank");
        assert!(line.debit.is_zero());
        assert_eq!(line.credit, amount);
    }
}

//! Journal types
//!
//! A journal is a named subdivision of the ledger grouping entries by
//! origin. The set of journals is fixed and small; each is created lazily
//! the first time a tenant posts to it, and its code, name, and type are
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

use core_kernel::{JournalId, TenantId};

/// The fixed set of journal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    /// Purchase invoices
    Purchases,
    /// Sale invoices
    Sales,
    /// Bank movements
    Bank,
    /// Cash movements
    Cash,
    /// Miscellaneous operations (payroll, recurring entries, corrections)
    Miscellaneous,
}

impl JournalType {
    /// The short code used in entry numbers
    pub fn code(&self) -> &'static str {
        match self {
            JournalType::Purchases => "AC",
            JournalType::Sales => "VT",
            JournalType::Bank => "BQ",
            JournalType::Cash => "CA",
            JournalType::Miscellaneous => "OD",
        }
    }

    /// Display name used when the journal is lazily created
    pub fn default_name(&self) -> &'static str {
        match self {
            JournalType::Purchases => "Purchases journal",
            JournalType::Sales => "Sales journal",
            JournalType::Bank => "Bank journal",
            JournalType::Cash => "Cash journal",
            JournalType::Miscellaneous => "Miscellaneous operations journal",
        }
    }

    /// Parses a short code back into a journal type
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AC" => Some(JournalType::Purchases),
            "VT" => Some(JournalType::Sales),
            "BQ" => Some(JournalType::Bank),
            "CA" => Some(JournalType::Cash),
            "OD" => Some(JournalType::Miscellaneous),
            _ => None,
        }
    }

    /// All journal types
    pub fn all() -> [JournalType; 5] {
        [
            JournalType::Purchases,
            JournalType::Sales,
            JournalType::Bank,
            JournalType::Cash,
            JournalType::Miscellaneous,
        ]
    }
}

/// A tenant-scoped journal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// Unique identifier
    pub id: JournalId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Short code (e.g., "VT"); unique per tenant
    pub code: String,
    /// Display name
    pub name: String,
    /// Journal type
    pub journal_type: JournalType,
    /// Whether the journal is active
    pub is_active: bool,
}

impl Journal {
    /// Creates a journal with the default code and name for its type
    pub fn new(tenant_id: TenantId, journal_type: JournalType) -> Self {
        Self {
            id: JournalId::new_v7(),
            tenant_id,
            code: journal_type.code().to_string(),
            name: journal_type.default_name().to_string(),
            journal_type,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_codes() {
        assert_eq!(JournalType::Purchases.code(), "AC");
        assert_eq!(JournalType::Sales.code(), "VT");
        assert_eq!(JournalType::Bank.code(), "BQ");
        assert_eq!(JournalType::Cash.code(), "CA");
        assert_eq!(JournalType::Miscellaneous.code(), "OD");
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes: std::collections::HashSet<_> =
            JournalType::all().iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), 5);
    }

    #[test]
    fn test_journal_new_uses_type_defaults() {
        let tenant = TenantId::new();
        let journal = Journal::new(tenant, JournalType::Sales);

        assert_eq!(journal.tenant_id, tenant);
        assert_eq!(journal.code, "VT");
        assert_eq!(journal.name, "Sales journal");
        assert!(journal.is_active);
    }
}

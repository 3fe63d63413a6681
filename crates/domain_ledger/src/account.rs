//! Account types for the chart of accounts
//!
//! Accounts are tenant-scoped and carry a hierarchical numeric code: the
//! leading digit is the account class (1-9), and longer codes refine shorter
//! ones ("411" trade receivables, "4111" a specific client group).

use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, TenantId};

/// Category of an account for reporting and normal-balance rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
    /// Net result of the period
    Result,
}

impl AccountCategory {
    /// Returns true if this category has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountCategory::Asset | AccountCategory::Expense)
    }

    /// Returns the category's storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountCategory::Asset => "asset",
            AccountCategory::Liability => "liability",
            AccountCategory::Equity => "equity",
            AccountCategory::Revenue => "revenue",
            AccountCategory::Expense => "expense",
            AccountCategory::Result => "result",
        }
    }

    /// Parses a storage name back into a category
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asset" => Some(AccountCategory::Asset),
            "liability" => Some(AccountCategory::Liability),
            "equity" => Some(AccountCategory::Equity),
            "revenue" => Some(AccountCategory::Revenue),
            "expense" => Some(AccountCategory::Expense),
            "result" => Some(AccountCategory::Result),
            _ => None,
        }
    }

}

/// A tenant-scoped account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Hierarchical numeric code (e.g., "411", "4111"); unique per tenant
    pub code: String,
    /// Display name
    pub name: String,
    /// Account category
    pub category: AccountCategory,
    /// Whether the account is active (inactive accounts are never resolved)
    pub is_active: bool,
}

impl Account {
    /// Creates a new active account
    pub fn new(
        tenant_id: TenantId,
        code: impl Into<String>,
        name: impl Into<String>,
        category: AccountCategory,
    ) -> Self {
        Self {
            id: AccountId::new_v7(),
            tenant_id,
            code: code.into(),
            name: name.into(),
            category,
            is_active: true,
        }
    }

    /// Returns the account class (leading digit of the code), if numeric
    pub fn class(&self) -> Option<u8> {
        self.code
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map(|d| d as u8)
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_is_debit_normal() {
        assert!(AccountCategory::Asset.is_debit_normal());
        assert!(AccountCategory::Expense.is_debit_normal());
        assert!(!AccountCategory::Liability.is_debit_normal());
        assert!(!AccountCategory::Equity.is_debit_normal());
        assert!(!AccountCategory::Revenue.is_debit_normal());
        assert!(!AccountCategory::Result.is_debit_normal());
    }

    #[test]
    fn test_account_class_from_code() {
        let tenant = TenantId::new();
        let account = Account::new(tenant, "4111", "Clients - group A", AccountCategory::Asset);
        assert_eq!(account.class(), Some(4));
        assert!(account.is_active);
    }

    #[test]
    fn test_deactivate() {
        let mut account = Account::new(
            TenantId::new(),
            "411",
            "Trade receivables",
            AccountCategory::Asset,
        );
        account.deactivate();
        assert!(!account.is_active);
    }
}

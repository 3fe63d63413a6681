//! Standard chart of accounts
//!
//! Provides the well-known account codes the posting rules rely on and a
//! bulk seed used when a tenant is initialized. Tenants may add their own
//! accounts afterwards; the posting rules resolve by code prefix, so a more
//! specific tenant account (e.g. "4111") is picked up automatically.

use core_kernel::TenantId;

use crate::account::{Account, AccountCategory};

/// Well-known account code prefixes used by the posting rules
pub mod codes {
    /// Share capital
    pub const CAPITAL: &str = "101";
    /// Net result of the period
    pub const NET_RESULT: &str = "131";
    /// Trade payables (suppliers)
    pub const SUPPLIERS: &str = "401";
    /// Goods received, invoice pending (clearing)
    pub const SUPPLIER_INVOICES_PENDING: &str = "408";
    /// Trade receivables (clients)
    pub const CLIENTS: &str = "411";
    /// Staff advances
    pub const STAFF_ADVANCES: &str = "421";
    /// Staff remuneration payable
    pub const STAFF_PAYABLE: &str = "422";
    /// Social contributions payable
    pub const SOCIAL_CONTRIBUTIONS: &str = "431";
    /// Other taxes payable
    pub const OTHER_TAXES: &str = "442";
    /// VAT collected on sales
    pub const VAT_COLLECTED: &str = "443";
    /// VAT due for remittance
    pub const VAT_DUE: &str = "4441";
    /// Deductible VAT on purchases
    pub const VAT_DEDUCTIBLE: &str = "445";
    /// Bank accounts
    pub const BANK: &str = "521";
    /// Cash on hand
    pub const CASH: &str = "571";
    /// Purchases of goods
    pub const PURCHASES: &str = "601";
    /// Miscellaneous expenses (unfavorable price variances)
    pub const MISC_EXPENSES: &str = "659";
    /// Gross salaries
    pub const SALARIES: &str = "661";
    /// Sales of goods
    pub const SALES: &str = "701";
    /// Services sold
    pub const SERVICES_SOLD: &str = "706";
    /// Miscellaneous revenue (favorable price variances)
    pub const MISC_REVENUE: &str = "759";
}

/// Standard chart seeded for every new tenant
pub struct StandardChart;

impl StandardChart {
    /// Creates the standard accounts for a tenant
    pub fn accounts(tenant_id: TenantId) -> Vec<Account> {
        use AccountCategory::*;

        let specs: &[(&str, &str, AccountCategory)] = &[
            // Class 1 - capital and result
            (codes::CAPITAL, "Share capital", Equity),
            ("106", "Reserves", Equity),
            (codes::NET_RESULT, "Net result of the period", Result),
            // Class 2/3 - fixed assets and inventory
            ("241", "Equipment", Asset),
            ("311", "Merchandise inventory", Asset),
            // Class 4 - third parties
            (codes::SUPPLIERS, "Trade payables", Liability),
            (
                codes::SUPPLIER_INVOICES_PENDING,
                "Goods received, invoice pending",
                Liability,
            ),
            (codes::CLIENTS, "Trade receivables", Asset),
            (codes::STAFF_ADVANCES, "Staff advances", Asset),
            (codes::STAFF_PAYABLE, "Staff remuneration payable", Liability),
            (
                codes::SOCIAL_CONTRIBUTIONS,
                "Social contributions payable",
                Liability,
            ),
            (codes::OTHER_TAXES, "Other taxes payable", Liability),
            (codes::VAT_COLLECTED, "VAT collected", Liability),
            (codes::VAT_DUE, "VAT due", Liability),
            (codes::VAT_DEDUCTIBLE, "Deductible VAT", Asset),
            // Class 5 - treasury
            (codes::BANK, "Bank", Asset),
            (codes::CASH, "Cash", Asset),
            // Class 6 - expenses
            (codes::PURCHASES, "Purchases of goods", Expense),
            ("605", "Other purchases", Expense),
            ("622", "Rent", Expense),
            (codes::MISC_EXPENSES, "Miscellaneous expenses", Expense),
            (codes::SALARIES, "Gross salaries", Expense),
            ("664", "Employer social contributions", Expense),
            // Class 7 - revenue
            (codes::SALES, "Sales of goods", Revenue),
            (codes::SERVICES_SOLD, "Services sold", Revenue),
            (codes::MISC_REVENUE, "Miscellaneous revenue", Revenue),
        ];

        specs
            .iter()
            .map(|(code, name, category)| Account::new(tenant_id, *code, *name, *category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_chart_codes_are_unique() {
        let accounts = StandardChart::accounts(TenantId::new());
        let codes: HashSet<_> = accounts.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes.len(), accounts.len());
    }

    #[test]
    fn test_standard_chart_covers_posting_rule_codes() {
        let accounts = StandardChart::accounts(TenantId::new());
        let codes: HashSet<_> = accounts.iter().map(|a| a.code.clone()).collect();

        for required in [
            codes::CLIENTS,
            codes::SUPPLIERS,
            codes::SUPPLIER_INVOICES_PENDING,
            codes::VAT_COLLECTED,
            codes::VAT_DEDUCTIBLE,
            codes::VAT_DUE,
            codes::OTHER_TAXES,
            codes::STAFF_ADVANCES,
            codes::BANK,
            codes::CASH,
            codes::PURCHASES,
            codes::SALES,
            codes::MISC_EXPENSES,
            codes::MISC_REVENUE,
        ] {
            assert!(codes.contains(required), "missing {}", required);
        }
    }

    #[test]
    fn test_standard_chart_has_all_classes() {
        let accounts = StandardChart::accounts(TenantId::new());
        let classes: HashSet<_> = accounts.iter().filter_map(|a| a.class()).collect();
        for class in [1u8, 2, 3, 4, 5, 6, 7] {
            assert!(classes.contains(&class), "missing class {}", class);
        }
    }

    #[test]
    fn test_accounts_are_scoped_to_tenant() {
        let tenant = TenantId::new();
        let accounts = StandardChart::accounts(tenant);
        assert!(accounts.iter().all(|a| a.tenant_id == tenant));
        assert!(accounts.iter().all(|a| a.is_active));
    }
}

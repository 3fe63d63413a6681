//! Builders for business events and templates
//!
//! Each builder starts from a plausible default and lets a test override
//! only what it cares about. Amounts default to the 1000 + 18% VAT scenario
//! used throughout the suite.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::{Money, TenantId};
use domain_ledger::{
    codes, AccountRef, ExpenseReimbursement, JournalType, PaymentChannel, PurchaseInvoice,
    SaleInvoice, SalePayment, Side,
};
use domain_recurring::{Frequency, RecurringTemplate, TemplateLine};

use crate::fixtures::{date, standard_vat_rate, xof};

/// Builder for [`SaleInvoice`] events
pub struct SaleInvoiceBuilder {
    tenant_id: TenantId,
    invoice_number: String,
    date: NaiveDate,
    client_name: String,
    amount_excl: Money,
}

impl SaleInvoiceBuilder {
    /// Starts from a 1000 XOF invoice dated 2026-03-10
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            invoice_number: "F-0001".to_string(),
            date: date(2026, 3, 10),
            client_name: CompanyName().fake(),
            amount_excl: xof(1000),
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn amount_excl(mut self, amount: Money) -> Self {
        self.amount_excl = amount;
        self
    }

    /// Builds the event, deriving tax and total from the standard VAT rate
    pub fn build(self) -> SaleInvoice {
        let tax = standard_vat_rate().apply(&self.amount_excl);
        let amount_incl = self
            .amount_excl
            .checked_add(&tax)
            .expect("same currency by construction");
        SaleInvoice {
            tenant_id: self.tenant_id,
            invoice_number: self.invoice_number,
            date: self.date,
            client_name: self.client_name,
            client_account: None,
            amount_excl: self.amount_excl,
            tax,
            amount_incl,
        }
    }
}

/// Builder for [`SalePayment`] events
pub struct SalePaymentBuilder {
    tenant_id: TenantId,
    reference: String,
    date: NaiveDate,
    amount: Money,
    channel: PaymentChannel,
}

impl SalePaymentBuilder {
    /// Starts from a 1180 XOF bank payment (the tax-inclusive default
    /// invoice total)
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            reference: "PAY-0001".to_string(),
            date: date(2026, 3, 20),
            amount: xof(1180),
            channel: PaymentChannel::Bank,
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn via(mut self, channel: PaymentChannel) -> Self {
        self.channel = channel;
        self
    }

    pub fn build(self) -> SalePayment {
        SalePayment {
            tenant_id: self.tenant_id,
            reference: self.reference,
            date: self.date,
            client_name: CompanyName().fake(),
            client_account: None,
            amount: self.amount,
            channel: self.channel,
        }
    }
}

/// Builder for [`PurchaseInvoice`] events
pub struct PurchaseInvoiceBuilder {
    tenant_id: TenantId,
    invoice_number: String,
    date: NaiveDate,
    amount_excl: Money,
    provisioned_excl: Option<Money>,
}

impl PurchaseInvoiceBuilder {
    /// Starts from a 2000 XOF supplier invoice with no prior provision
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            invoice_number: "A-0001".to_string(),
            date: date(2026, 4, 1),
            amount_excl: xof(2000),
            provisioned_excl: None,
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn amount_excl(mut self, amount: Money) -> Self {
        self.amount_excl = amount;
        self
    }

    /// Marks the invoice as regularizing a provisional goods receipt
    pub fn provisioned(mut self, amount: Money) -> Self {
        self.provisioned_excl = Some(amount);
        self
    }

    pub fn build(self) -> PurchaseInvoice {
        let tax = standard_vat_rate().apply(&self.amount_excl);
        let amount_incl = self
            .amount_excl
            .checked_add(&tax)
            .expect("same currency by construction");
        PurchaseInvoice {
            tenant_id: self.tenant_id,
            invoice_number: self.invoice_number,
            date: self.date,
            supplier_name: CompanyName().fake(),
            supplier_account: None,
            amount_excl: self.amount_excl,
            tax,
            amount_incl,
            provisioned_excl: self.provisioned_excl,
        }
    }
}

/// Builder for [`ExpenseReimbursement`] events
pub struct ReimbursementBuilder {
    tenant_id: TenantId,
    reference: String,
    amount: Money,
    channel: PaymentChannel,
}

impl ReimbursementBuilder {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            reference: "EXP-0001".to_string(),
            amount: xof(75),
            channel: PaymentChannel::Bank,
        }
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> ExpenseReimbursement {
        ExpenseReimbursement {
            tenant_id: self.tenant_id,
            reference: self.reference,
            date: date(2026, 4, 15),
            employee_name: Name().fake(),
            amount: self.amount,
            channel: self.channel,
        }
    }
}

/// Builder for balanced two-line [`RecurringTemplate`]s
pub struct TemplateBuilder {
    tenant_id: TenantId,
    name: String,
    journal: JournalType,
    frequency: Frequency,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    amount: Money,
    debit_code: &'static str,
    credit_code: &'static str,
}

impl TemplateBuilder {
    /// Starts from a monthly 1200 XOF rent-style template beginning
    /// 2026-01-31 (an end-of-month anchor)
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            name: "Office rent".to_string(),
            journal: JournalType::Miscellaneous,
            frequency: Frequency::Monthly,
            start_date: date(2026, 1, 31),
            end_date: None,
            amount: xof(1200),
            debit_code: codes::MISC_EXPENSES,
            credit_code: codes::SUPPLIERS,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn every(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn accounts(mut self, debit_code: &'static str, credit_code: &'static str) -> Self {
        self.debit_code = debit_code;
        self.credit_code = credit_code;
        self
    }

    pub fn build(self) -> RecurringTemplate {
        let template = RecurringTemplate::new(
            self.tenant_id,
            self.name.clone(),
            self.journal,
            self.frequency,
            self.start_date,
            vec![
                TemplateLine::new(
                    AccountRef::code(self.debit_code),
                    Side::Debit,
                    self.amount,
                    self.name.clone(),
                ),
                TemplateLine::new(
                    AccountRef::code(self.credit_code),
                    Side::Credit,
                    self.amount,
                    self.name,
                ),
            ],
        );
        match self.end_date {
            Some(end) => template.with_end_date(end),
            None => template,
        }
    }
}

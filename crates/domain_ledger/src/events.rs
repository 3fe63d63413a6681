//! Event posting rules
//!
//! One rule per business event type. Each rule is a pure mapping from the
//! event payload to a set of debit/credit lines, handed to the
//! [`LedgerPoster`]. Rules are called synchronously by the invoicing,
//! payment, and payroll collaborators after they persist their own records.
//!
//! # Soft-failure policy
//!
//! Accounting completeness is secondary to operational continuity: when a
//! rule cannot resolve the accounts it needs, the originating business
//! transaction must not fail. The rule logs a warning, queues a
//! [`RemediationTicket`] for an operator, and reports
//! [`PostingOutcome::Skipped`]. Every other failure (an unbalanced line set,
//! a store error) propagates, because those must never be swallowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{AccountId, Money, TenantId};

use crate::chart::codes;
use crate::entry::{AccountRef, DraftLine, PostedEntry};
use crate::error::LedgerError;
use crate::journal::JournalType;
use crate::ports::LedgerStore;
use crate::poster::{LedgerPoster, PostingRequest};
use crate::remediation::RemediationTicket;

/// Channel through which a payment moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    Cash,
    Bank,
}

impl PaymentChannel {
    /// The treasury account code for this channel
    pub fn treasury_code(&self) -> &'static str {
        match self {
            PaymentChannel::Cash => codes::CASH,
            PaymentChannel::Bank => codes::BANK,
        }
    }

    /// The journal entries for this channel land in
    pub fn journal(&self) -> JournalType {
        match self {
            PaymentChannel::Cash => JournalType::Cash,
            PaymentChannel::Bank => JournalType::Bank,
        }
    }
}

/// Which tax liability a remittance settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxKind {
    /// VAT due
    Vat,
    /// Any other tax
    Other,
}

impl TaxKind {
    fn liability_code(&self) -> &'static str {
        match self {
            TaxKind::Vat => codes::VAT_DUE,
            TaxKind::Other => codes::OTHER_TAXES,
        }
    }
}

/// A sale invoice reaching its posted state
#[derive(Debug, Clone)]
pub struct SaleInvoice {
    pub tenant_id: TenantId,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub client_name: String,
    /// The client's designated receivable account, when one exists
    pub client_account: Option<AccountId>,
    pub amount_excl: Money,
    pub tax: Money,
    pub amount_incl: Money,
}

/// A client payment received against an invoice
#[derive(Debug, Clone)]
pub struct SalePayment {
    pub tenant_id: TenantId,
    pub reference: String,
    pub date: NaiveDate,
    pub client_name: String,
    pub client_account: Option<AccountId>,
    pub amount: Money,
    pub channel: PaymentChannel,
}

/// A supplier invoice reaching its posted state
#[derive(Debug, Clone)]
pub struct PurchaseInvoice {
    pub tenant_id: TenantId,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub supplier_name: String,
    /// The supplier's designated payable account, when one exists
    pub supplier_account: Option<AccountId>,
    pub amount_excl: Money,
    pub tax: Money,
    pub amount_incl: Money,
    /// Tax-exclusive amount previously provisioned on goods receipt; when
    /// set, this invoice regularizes the provisional entry through the
    /// clearing account and any difference books as a price variance
    pub provisioned_excl: Option<Money>,
}

/// A payment made to a supplier
#[derive(Debug, Clone)]
pub struct PurchasePayment {
    pub tenant_id: TenantId,
    pub reference: String,
    pub date: NaiveDate,
    pub supplier_name: String,
    pub supplier_account: Option<AccountId>,
    pub amount: Money,
    pub channel: PaymentChannel,
}

/// An employee expense reimbursement paid out
#[derive(Debug, Clone)]
pub struct ExpenseReimbursement {
    pub tenant_id: TenantId,
    pub reference: String,
    pub date: NaiveDate,
    pub employee_name: String,
    pub amount: Money,
    pub channel: PaymentChannel,
}

/// A tax remittance paid to the authority
#[derive(Debug, Clone)]
pub struct TaxRemittance {
    pub tenant_id: TenantId,
    pub reference: String,
    pub date: NaiveDate,
    pub kind: TaxKind,
    pub amount: Money,
    pub channel: PaymentChannel,
}

/// Result of running a posting rule
#[derive(Debug)]
pub enum PostingOutcome {
    /// The entry was posted
    Posted(PostedEntry),
    /// Accounting impact was not recorded; a ticket was queued for an
    /// operator
    Skipped { ticket: RemediationTicket },
}

impl PostingOutcome {
    /// Returns the posted entry, if any
    pub fn posted(&self) -> Option<&PostedEntry> {
        match self {
            PostingOutcome::Posted(entry) => Some(entry),
            PostingOutcome::Skipped { .. } => None,
        }
    }

    /// Returns true if an entry was persisted
    pub fn is_posted(&self) -> bool {
        matches!(self, PostingOutcome::Posted(_))
    }
}

/// The posting rules engine
pub struct PostingRules<'a, S: LedgerStore> {
    store: &'a S,
    poster: LedgerPoster<'a, S>,
}

impl<'a, S: LedgerStore> PostingRules<'a, S> {
    /// Creates the rules engine over the given store
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            poster: LedgerPoster::new(store),
        }
    }

    /// Sale invoice: debit the client's receivable for the tax-inclusive
    /// total; credit sales revenue for the tax-exclusive amount; credit VAT
    /// collected for the tax amount when positive
    pub async fn post_sale_invoice(
        &self,
        event: SaleInvoice,
    ) -> Result<PostingOutcome, LedgerError> {
        let client = counterparty_ref(event.client_account, codes::CLIENTS);
        let label = format!("Invoice {} - {}", event.invoice_number, event.client_name);

        let mut lines = vec![
            DraftLine::debit(client, event.amount_incl, label.clone()),
            DraftLine::credit(AccountRef::code(codes::SALES), event.amount_excl, label.clone()),
        ];
        if event.tax.is_positive() {
            lines.push(DraftLine::credit(
                AccountRef::code(codes::VAT_COLLECTED),
                event.tax,
                format!("VAT on {}", event.invoice_number),
            ));
        }

        self.dispatch(
            format!("sale invoice {}", event.invoice_number),
            PostingRequest {
                tenant_id: event.tenant_id,
                journal: JournalType::Sales,
                date: event.date,
                label,
                external_ref: Some(event.invoice_number),
                lines,
            },
        )
        .await
    }

    /// Sale payment: debit the treasury account for the channel; credit the
    /// client's receivable for the settled amount
    pub async fn post_sale_payment(
        &self,
        event: SalePayment,
    ) -> Result<PostingOutcome, LedgerError> {
        let client = counterparty_ref(event.client_account, codes::CLIENTS);
        let label = format!("Payment {} - {}", event.reference, event.client_name);

        let lines = vec![
            DraftLine::debit(
                AccountRef::code(event.channel.treasury_code()),
                event.amount,
                label.clone(),
            ),
            DraftLine::credit(client, event.amount, label.clone()),
        ];

        self.dispatch(
            format!("sale payment {}", event.reference),
            PostingRequest {
                tenant_id: event.tenant_id,
                journal: event.channel.journal(),
                date: event.date,
                label,
                external_ref: Some(event.reference),
                lines,
            },
        )
        .await
    }

    /// Purchase invoice: debit purchases (or the goods-received clearing
    /// account when regularizing a provisional receipt, with a price
    /// variance sub-line for any difference); debit deductible VAT; credit
    /// the supplier's payable for the tax-inclusive total
    pub async fn post_purchase_invoice(
        &self,
        event: PurchaseInvoice,
    ) -> Result<PostingOutcome, LedgerError> {
        let supplier = counterparty_ref(event.supplier_account, codes::SUPPLIERS);
        let label = format!("Invoice {} - {}", event.invoice_number, event.supplier_name);

        let mut lines = Vec::with_capacity(4);
        match event.provisioned_excl {
            Some(provisioned) => {
                // Clear the provision at its booked amount; the difference
                // books as a variance
                lines.push(DraftLine::debit(
                    AccountRef::code(codes::SUPPLIER_INVOICES_PENDING),
                    provisioned,
                    format!("Clearing provision for {}", event.invoice_number),
                ));
                let variance = event.amount_excl.checked_sub(&provisioned)?;
                if variance.is_positive() {
                    lines.push(DraftLine::debit(
                        AccountRef::code(codes::MISC_EXPENSES),
                        variance,
                        format!("Unfavorable price variance on {}", event.invoice_number),
                    ));
                } else if variance.is_negative() {
                    lines.push(DraftLine::credit(
                        AccountRef::code(codes::MISC_REVENUE),
                        variance.abs(),
                        format!("Favorable price variance on {}", event.invoice_number),
                    ));
                }
            }
            None => {
                lines.push(DraftLine::debit(
                    AccountRef::code(codes::PURCHASES),
                    event.amount_excl,
                    label.clone(),
                ));
            }
        }
        if event.tax.is_positive() {
            lines.push(DraftLine::debit(
                AccountRef::code(codes::VAT_DEDUCTIBLE),
                event.tax,
                format!("Deductible VAT on {}", event.invoice_number),
            ));
        }
        lines.push(DraftLine::credit(supplier, event.amount_incl, label.clone()));

        self.dispatch(
            format!("purchase invoice {}", event.invoice_number),
            PostingRequest {
                tenant_id: event.tenant_id,
                journal: JournalType::Purchases,
                date: event.date,
                label,
                external_ref: Some(event.invoice_number),
                lines,
            },
        )
        .await
    }

    /// Purchase payment: debit the supplier's payable; credit the treasury
    /// account for the channel
    pub async fn post_purchase_payment(
        &self,
        event: PurchasePayment,
    ) -> Result<PostingOutcome, LedgerError> {
        let supplier = counterparty_ref(event.supplier_account, codes::SUPPLIERS);
        let label = format!("Payment {} - {}", event.reference, event.supplier_name);

        let lines = vec![
            DraftLine::debit(supplier, event.amount, label.clone()),
            DraftLine::credit(
                AccountRef::code(event.channel.treasury_code()),
                event.amount,
                label.clone(),
            ),
        ];

        self.dispatch(
            format!("purchase payment {}", event.reference),
            PostingRequest {
                tenant_id: event.tenant_id,
                journal: event.channel.journal(),
                date: event.date,
                label,
                external_ref: Some(event.reference),
                lines,
            },
        )
        .await
    }

    /// Expense reimbursement: debit staff advances; credit the treasury
    /// account for the channel
    pub async fn post_expense_reimbursement(
        &self,
        event: ExpenseReimbursement,
    ) -> Result<PostingOutcome, LedgerError> {
        let label = format!(
            "Reimbursement {} - {}",
            event.reference, event.employee_name
        );

        let lines = vec![
            DraftLine::debit(
                AccountRef::code(codes::STAFF_ADVANCES),
                event.amount,
                label.clone(),
            ),
            DraftLine::credit(
                AccountRef::code(event.channel.treasury_code()),
                event.amount,
                label.clone(),
            ),
        ];

        self.dispatch(
            format!("expense reimbursement {}", event.reference),
            PostingRequest {
                tenant_id: event.tenant_id,
                journal: event.channel.journal(),
                date: event.date,
                label,
                external_ref: Some(event.reference),
                lines,
            },
        )
        .await
    }

    /// Tax remittance: debit the relevant tax liability; credit the treasury
    /// account for the channel
    pub async fn post_tax_remittance(
        &self,
        event: TaxRemittance,
    ) -> Result<PostingOutcome, LedgerError> {
        let label = format!("Tax remittance {}", event.reference);

        let lines = vec![
            DraftLine::debit(
                AccountRef::code(event.kind.liability_code()),
                event.amount,
                label.clone(),
            ),
            DraftLine::credit(
                AccountRef::code(event.channel.treasury_code()),
                event.amount,
                label.clone(),
            ),
        ];

        self.dispatch(
            format!("tax remittance {}", event.reference),
            PostingRequest {
                tenant_id: event.tenant_id,
                journal: event.channel.journal(),
                date: event.date,
                label,
                external_ref: Some(event.reference),
                lines,
            },
        )
        .await
    }

    /// Posts the request, downgrading account-resolution failures to a
    /// skipped outcome with a remediation ticket
    async fn dispatch(
        &self,
        source: String,
        request: PostingRequest,
    ) -> Result<PostingOutcome, LedgerError> {
        let tenant_id = request.tenant_id;
        match self.poster.post(request).await {
            Ok(posted) => Ok(PostingOutcome::Posted(posted)),
            Err(LedgerError::UnresolvedAccount { reference }) => {
                let reason = format!("unresolved account ({})", reference);
                warn!(
                    tenant_id = %tenant_id,
                    source = %source,
                    reason = %reason,
                    "accounting impact not recorded"
                );
                let ticket = RemediationTicket::new(tenant_id, source, reason);
                self.store.insert_remediation(&ticket).await?;
                Ok(PostingOutcome::Skipped { ticket })
            }
            Err(other) => Err(other),
        }
    }
}

fn counterparty_ref(explicit: Option<AccountId>, fallback_code: &str) -> AccountRef {
    match explicit {
        Some(id) => AccountRef::Id(id),
        None => AccountRef::code(fallback_code),
    }
}

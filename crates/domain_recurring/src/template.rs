//! Recurring entry templates

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, TemplateId, TenantId};
use domain_ledger::{AccountRef, DraftLine, JournalType, Side, BALANCE_TOLERANCE};

/// One line of a recurring template
///
/// Unlike a draft posting line, a template line carries a single signed-free
/// amount plus the side it lands on; the amounts are fixed when the template
/// is authored and re-validated on every fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateLine {
    /// Target account
    pub account: AccountRef,
    /// Side the amount posts on
    pub side: Side,
    /// Line amount (>= 0)
    pub amount: Money,
    /// Line label
    pub label: String,
}

impl TemplateLine {
    /// Creates a template line
    pub fn new(
        account: AccountRef,
        side: Side,
        amount: Money,
        label: impl Into<String>,
    ) -> Self {
        Self {
            account,
            side,
            amount,
            label: label.into(),
        }
    }

    /// Converts into a draft posting line
    pub fn to_draft(&self) -> DraftLine {
        DraftLine::on_side(self.side, self.account.clone(), self.amount, self.label.clone())
    }
}

/// A recurring entry template
///
/// Templates describe a fixed set of lines (a rent payment, an insurance
/// premium, a standing subscription) posted on a schedule: every N months on
/// a configured day, from `start_date` until `end_date` if one is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    /// Unique identifier
    pub id: TemplateId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Template name, used in entry labels
    pub name: String,
    /// Free-text description for administrative screens
    pub description: String,
    /// Journal the generated entries land in
    pub journal: JournalType,
    /// Recurrence frequency
    pub frequency: crate::schedule::Frequency,
    /// Anchor day of month (1-31); clamped in short months
    pub day_of_month: u32,
    /// First occurrence
    pub start_date: NaiveDate,
    /// Last date an occurrence may fall on, if bounded
    pub end_date: Option<NaiveDate>,
    /// Occurrence most recently generated, if any
    pub last_generated: Option<NaiveDate>,
    /// Date of the next occurrence to generate
    pub next_date: NaiveDate,
    /// Headline amount of one occurrence (the debit total of the lines)
    pub reference_amount: Money,
    /// Inactive templates are never fired
    pub active: bool,
    /// The lines each occurrence posts
    pub lines: Vec<TemplateLine>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl RecurringTemplate {
    /// Creates a template whose first occurrence is `start_date`
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        journal: JournalType,
        frequency: crate::schedule::Frequency,
        start_date: NaiveDate,
        lines: Vec<TemplateLine>,
    ) -> Self {
        use chrono::Datelike;
        let reference_amount = debit_total(&lines);
        Self {
            id: TemplateId::new_v7(),
            tenant_id,
            name: name.into(),
            description: String::new(),
            journal,
            frequency,
            day_of_month: start_date.day(),
            start_date,
            end_date: None,
            last_generated: None,
            next_date: start_date,
            reference_amount,
            active: true,
            lines,
            created_at: Utc::now(),
        }
    }

    /// Bounds the template to a final occurrence date
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the administrative description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true if the template's debits equal its credits within
    /// tolerance
    ///
    /// Templates are validated when authored, but accounts and amounts can be
    /// edited afterwards, so the scheduler re-checks before every fire.
    pub fn is_balanced(&self) -> bool {
        let mut debits = rust_decimal::Decimal::ZERO;
        let mut credits = rust_decimal::Decimal::ZERO;
        for line in &self.lines {
            match line.side {
                Side::Debit => debits += line.amount.amount(),
                Side::Credit => credits += line.amount.amount(),
            }
        }
        (debits - credits).abs() <= BALANCE_TOLERANCE
    }

    /// Returns true if `date` falls past the template's end date
    pub fn is_expired_at(&self, date: NaiveDate) -> bool {
        self.end_date.map(|end| date > end).unwrap_or(false)
    }
}

fn debit_total(lines: &[TemplateLine]) -> Money {
    let currency = lines
        .first()
        .map(|l| l.amount.currency())
        .unwrap_or(Currency::XOF);
    let total = lines
        .iter()
        .filter(|l| matches!(l.side, Side::Debit))
        .fold(rust_decimal::Decimal::ZERO, |sum, l| sum + l.amount.amount());
    Money::new(total, currency)
}

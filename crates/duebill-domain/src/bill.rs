//! Domain model for recurring bills and their due-state classification.

use std::fmt;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Displayable, Identifiable},
    frequency::Frequency,
};

/// Days ahead of the reference date within which a bill counts as due soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A scheduled recurring expense with an amount, cadence, and next-due date.
pub struct RecurringBill {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expense magnitude; the generated ledger entry carries the negation.
    pub amount: Decimal,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub next_due: NaiveDate,
    pub is_active: bool,
    #[serde(default)]
    pub last_processed: Option<NaiveDate>,
    pub created_at: NaiveDate,
}

impl RecurringBill {
    /// Creates an active bill first due on its start date.
    pub fn new(
        name: impl Into<String>,
        account_id: Uuid,
        amount: Decimal,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            category_id: None,
            name: name.into(),
            description: None,
            amount,
            frequency,
            start_date,
            end_date: None,
            next_due: start_date,
            is_active: true,
            last_processed: None,
            created_at: Utc::now().date_naive(),
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Checks amount, name, and date ordering before the bill enters a batch.
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(BillValidationError::NonPositiveAmount);
        }
        if self.name.trim().is_empty() {
            return Err(BillValidationError::BlankName);
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(BillValidationError::EndBeforeStart);
            }
        }
        Ok(())
    }

    /// True when the end date has passed as of the given date.
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        matches!(self.end_date, Some(end) if end < as_of)
    }

    /// True for active bills whose next due date is on or before `as_of`.
    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        self.is_active && self.next_due <= as_of
    }

    /// The due date one period after the current one.
    pub fn next_due_after(&self) -> NaiveDate {
        self.frequency.next_date(self.next_due)
    }

    pub fn due_status(&self, reference: NaiveDate) -> DueStatus {
        DueStatus::classify(self.next_due, reference)
    }

    /// Whole days the bill is past due; zero when not overdue.
    pub fn days_overdue(&self, reference: NaiveDate) -> i64 {
        (reference - self.next_due).num_days().max(0)
    }
}

impl Identifiable for RecurringBill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for RecurringBill {
    fn display_label(&self) -> String {
        format!("{} ({} {})", self.name, self.amount, self.frequency.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Positions a bill's next due date relative to a reference date.
pub enum DueStatus {
    Overdue,
    DueSoon,
    Scheduled,
}

impl DueStatus {
    pub fn classify(next_due: NaiveDate, reference: NaiveDate) -> DueStatus {
        if next_due < reference {
            return DueStatus::Overdue;
        }
        if next_due <= reference + Duration::days(DUE_SOON_WINDOW_DAYS) {
            DueStatus::DueSoon
        } else {
            DueStatus::Scheduled
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueSoon => "Due Soon",
            DueStatus::Scheduled => "Scheduled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Reasons a bill fails pre-processing validation.
pub enum BillValidationError {
    NonPositiveAmount,
    BlankName,
    EndBeforeStart,
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            BillValidationError::NonPositiveAmount => "bill amount must be positive",
            BillValidationError::BlankName => "bill name must not be blank",
            BillValidationError::EndBeforeStart => "bill end date precedes its start date",
        };
        f.write_str(message)
    }
}

impl std::error::Error for BillValidationError {}

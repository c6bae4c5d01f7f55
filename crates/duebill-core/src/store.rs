//! Collaborator seams for bill persistence and ledger writes.
//!
//! The scheduler never touches storage directly; callers inject
//! implementations of these traits per invocation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use duebill_domain::{LedgerEntry, RecurringBill};

use crate::CoreError;

/// Read/write access to the recurring-bill records of a user.
pub trait BillStore: Send + Sync {
    /// Lists the active bills of a user in insertion order.
    fn list_active_bills(&self, user_id: Uuid) -> Result<Vec<RecurringBill>, CoreError>;

    /// Applies a partial update to a stored bill.
    ///
    /// Fails with [`CoreError::BillNotFound`] when the id is absent.
    fn update_bill(&self, id: Uuid, patch: BillPatch) -> Result<(), CoreError>;
}

/// Write access to the ledger and the account balances behind it.
pub trait LedgerWriter: Send + Sync {
    /// Appends one entry, failing with [`CoreError::AccountNotFound`] or
    /// [`CoreError::Validation`] when the entry cannot be accepted.
    fn insert_entry(&self, entry: &LedgerEntry) -> Result<Uuid, CoreError>;

    /// Applies a signed delta to an account balance.
    fn adjust_balance(&self, account_id: Uuid, delta: Decimal) -> Result<(), CoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Partial update applied to a stored bill; unset fields are left alone.
pub struct BillPatch {
    pub next_due: Option<NaiveDate>,
    pub last_processed: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl BillPatch {
    /// Patch recording a successful processing pass.
    pub fn processed(next_due: NaiveDate, processed_on: NaiveDate) -> Self {
        Self {
            next_due: Some(next_due),
            last_processed: Some(processed_on),
            is_active: None,
        }
    }

    /// Patch retiring a bill from future due-bill scans.
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }

    pub fn apply(&self, bill: &mut RecurringBill) {
        if let Some(next_due) = self.next_due {
            bill.next_due = next_due;
        }
        if let Some(last_processed) = self.last_processed {
            bill.last_processed = Some(last_processed);
        }
        if let Some(is_active) = self.is_active {
            bill.is_active = is_active;
        }
    }
}

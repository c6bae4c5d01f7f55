//! Services that turn recurring-bill schedules into ledger activity.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use duebill_domain::{
    BatchReport, DateWindow, Displayable, LedgerEntry, RecurringBill, SkipReason,
};

use crate::{
    store::{BillPatch, BillStore, LedgerWriter},
    CoreError,
};

/// Days ahead covered by upcoming-bill reports unless the caller overrides.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 30;

/// Turns due bills into ledger entries and advances their schedules.
///
/// One synchronous pass, strictly sequential per bill. Callers must
/// serialize concurrent passes over the same user's bills.
pub struct SchedulerService;

impl SchedulerService {
    /// Stable filter for active bills due on or before `as_of`.
    ///
    /// Output preserves input order; callers needing due-date order must
    /// pre-sort.
    pub fn select_due_bills(bills: &[RecurringBill], as_of: NaiveDate) -> Vec<&RecurringBill> {
        bills.iter().filter(|bill| bill.is_due(as_of)).collect()
    }

    /// Processes every due bill once, never aborting on a per-bill failure.
    ///
    /// Expired bills are deactivated in the store and skipped without
    /// ledger writes. Each remaining bill produces one ledger entry plus a
    /// balance debit before its schedule advances. A bill whose
    /// collaborator calls fail is skipped with the failure message and
    /// keeps its schedule.
    pub fn process_batch(
        bills: &[RecurringBill],
        as_of: NaiveDate,
        bill_store: &dyn BillStore,
        ledger: &dyn LedgerWriter,
    ) -> BatchReport {
        let due = Self::select_due_bills(bills, as_of);
        debug!("processing {} due bill(s) as of {}", due.len(), as_of);

        let mut report = BatchReport::new(as_of);
        for bill in due {
            if bill.is_expired(as_of) {
                match bill_store.update_bill(bill.id, BillPatch::deactivate()) {
                    Ok(()) => report.record_skip(bill.clone(), SkipReason::Expired),
                    Err(err) => {
                        warn!(
                            "failed to deactivate expired bill `{}`: {}",
                            bill.display_label(),
                            err
                        );
                        report.record_skip(bill.clone(), SkipReason::Failed(err.to_string()));
                    }
                }
                continue;
            }

            match Self::process_one(bill, as_of, bill_store, ledger) {
                Ok((entry_id, new_next_due)) => {
                    debug!(
                        "processed `{}`, next due {}",
                        bill.display_label(),
                        new_next_due
                    );
                    report.record_processed(bill.clone(), new_next_due, entry_id);
                }
                Err(err) => {
                    warn!("skipping `{}`: {}", bill.display_label(), err);
                    report.record_skip(bill.clone(), SkipReason::Failed(err.to_string()));
                }
            }
        }
        report
    }

    /// Lists a user's active bills and processes them in one pass.
    ///
    /// Only the listing step can fail; processing failures land in the
    /// report's skipped sequence.
    pub fn process_for_user(
        user_id: Uuid,
        as_of: NaiveDate,
        bill_store: &dyn BillStore,
        ledger: &dyn LedgerWriter,
    ) -> Result<BatchReport, CoreError> {
        let bills = bill_store.list_active_bills(user_id)?;
        Ok(Self::process_batch(&bills, as_of, bill_store, ledger))
    }

    /// Active bills due within `[from, from + window_days]`, ascending by
    /// due date; ties keep input order.
    pub fn upcoming_within_window(
        bills: &[RecurringBill],
        from: NaiveDate,
        window_days: i64,
    ) -> Vec<&RecurringBill> {
        let window = DateWindow::ahead_of(from, window_days);
        let mut upcoming: Vec<&RecurringBill> = bills
            .iter()
            .filter(|bill| bill.is_active && window.contains(bill.next_due))
            .collect();
        upcoming.sort_by_key(|bill| bill.next_due);
        upcoming
    }

    /// Previews the entries the next `periods` occurrences would produce,
    /// starting at the bill's current due date.
    pub fn project_entries(
        bill: &RecurringBill,
        periods: usize,
    ) -> Result<Vec<LedgerEntry>, CoreError> {
        bill.validate()?;
        let mut entries = Vec::with_capacity(periods);
        let mut due = bill.next_due;
        for _ in 0..periods {
            entries.push(LedgerEntry::for_bill(bill, due));
            due = bill.frequency.next_date(due);
        }
        Ok(entries)
    }

    /// Total monthly-equivalent cost of the active bills, to 2 decimal
    /// places.
    pub fn monthly_commitment(bills: &[RecurringBill]) -> Decimal {
        bills
            .iter()
            .filter(|bill| bill.is_active)
            .map(|bill| bill.frequency.monthly_equivalent(bill.amount))
            .sum::<Decimal>()
            .round_dp(2)
    }

    fn process_one(
        bill: &RecurringBill,
        as_of: NaiveDate,
        bill_store: &dyn BillStore,
        ledger: &dyn LedgerWriter,
    ) -> Result<(Uuid, NaiveDate), CoreError> {
        let entry = LedgerEntry::for_bill(bill, as_of);
        let entry_id = ledger.insert_entry(&entry)?;
        ledger.adjust_balance(bill.account_id, entry.amount)?;

        let new_next_due = bill.next_due_after();
        bill_store.update_bill(bill.id, BillPatch::processed(new_next_due, as_of))?;
        Ok((entry_id, new_next_due))
    }
}

//! Batch-processing report structures returned by the scheduler.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bill::RecurringBill;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A bill that produced a ledger entry, with its advanced schedule.
pub struct ProcessedBill {
    pub bill: RecurringBill,
    pub new_next_due: NaiveDate,
    pub entry_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A bill that was visited but produced no ledger entry.
pub struct SkippedBill {
    pub bill: RecurringBill,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Why a due bill was skipped during a processing pass.
pub enum SkipReason {
    Expired,
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Expired => f.write_str("Expired"),
            SkipReason::Failed(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Outcome of one processing pass over the bills that were due.
///
/// Every selected bill lands in exactly one of the two sequences, in the
/// order it was visited.
pub struct BatchReport {
    pub as_of: NaiveDate,
    pub processed: Vec<ProcessedBill>,
    pub skipped: Vec<SkippedBill>,
    /// Sum of the expense magnitudes of all processed bills.
    pub total_debited: Decimal,
}

impl BatchReport {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            processed: Vec::new(),
            skipped: Vec::new(),
            total_debited: Decimal::ZERO,
        }
    }

    pub fn record_processed(&mut self, bill: RecurringBill, new_next_due: NaiveDate, entry_id: Uuid) {
        self.total_debited += bill.amount;
        self.processed.push(ProcessedBill {
            bill,
            new_next_due,
            entry_id,
        });
    }

    pub fn record_skip(&mut self, bill: RecurringBill, reason: SkipReason) {
        self.skipped.push(SkippedBill { bill, reason });
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Bills visited in total, processed or skipped.
    pub fn visited_count(&self) -> usize {
        self.processed.len() + self.skipped.len()
    }
}

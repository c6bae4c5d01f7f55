//! Ledger entries generated from processed bills.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{bill::RecurringBill, common::Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// An immutable record of money movement tied to an account.
pub struct LedgerEntry {
    pub id: Uuid,
    /// Informational back-reference to the bill that produced the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<Uuid>,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// Signed amount; bill expenses are negative.
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LedgerEntry {
    /// Builds the expense entry a bill produces when processed on `date`.
    pub fn for_bill(bill: &RecurringBill, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            bill_id: Some(bill.id),
            account_id: bill.account_id,
            category_id: bill.category_id,
            amount: -bill.amount,
            date,
            description: bill.name.clone(),
            note: bill.description.clone(),
        }
    }
}

impl Identifiable for LedgerEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::frequency::Frequency;

    use super::*;

    #[test]
    fn entry_negates_the_bill_amount() {
        let bill = RecurringBill::new(
            "Rent",
            Uuid::new_v4(),
            dec!(1200.00),
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .with_description("Apartment 4B");

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let entry = LedgerEntry::for_bill(&bill, date);

        assert_eq!(entry.amount, dec!(-1200.00));
        assert_eq!(entry.date, date);
        assert_eq!(entry.bill_id, Some(bill.id));
        assert_eq!(entry.account_id, bill.account_id);
        assert_eq!(entry.description, "Rent");
        assert_eq!(entry.note.as_deref(), Some("Apartment 4B"));
    }
}

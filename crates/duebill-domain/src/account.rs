//! Account records owned by the ledger collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A financial account whose balance absorbs processed bill debits.
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, kind: AccountKind, opening_balance: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance: opening_balance,
        }
    }

    /// Applies a signed balance adjustment.
    pub fn apply_delta(&mut self, delta: Decimal) {
        self.balance += delta;
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.name, self.kind)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the supported account classifications.
pub enum AccountKind {
    Checking,
    Savings,
    CreditCard,
    Cash,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn delta_application_is_signed() {
        let mut account = Account::new("Checking", AccountKind::Checking, dec!(100.00));
        account.apply_delta(dec!(-15.99));
        assert_eq!(account.balance, dec!(84.01));
        account.apply_delta(dec!(20.00));
        assert_eq!(account.balance, dec!(104.01));
    }
}

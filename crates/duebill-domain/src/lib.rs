//! duebill-domain
//!
//! Pure domain models (RecurringBill, Frequency, LedgerEntry, Account, etc.).
//! No I/O, no storage. Only data types and the calendar arithmetic they own.

pub mod account;
pub mod bill;
pub mod common;
pub mod entry;
pub mod frequency;
pub mod report;

pub use account::*;
pub use bill::*;
pub use common::*;
pub use entry::*;
pub use frequency::*;
pub use report::*;

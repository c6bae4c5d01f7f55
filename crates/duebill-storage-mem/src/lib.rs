//! In-memory reference implementation of the duebill collaborator traits.
//!
//! Backs integration tests and embedders that do not bring their own
//! persistence. Records keep insertion order; JSON snapshots support
//! fixtures and ad-hoc durability.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use duebill_core::{BillPatch, BillStore, CoreError, LedgerWriter};
use duebill_domain::{Account, LedgerEntry, RecurringBill};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    accounts: Vec<Account>,
    bills: Vec<OwnedBill>,
    entries: Vec<LedgerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OwnedBill {
    user_id: Uuid,
    bill: RecurringBill,
}

/// Mutex-guarded account/bill/entry store implementing [`BillStore`] and
/// [`LedgerWriter`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, account: Account) -> Uuid {
        let id = account.id;
        self.state.lock().unwrap().accounts.push(account);
        id
    }

    pub fn add_bill(&self, user_id: Uuid, bill: RecurringBill) -> Uuid {
        let id = bill.id;
        self.state
            .lock()
            .unwrap()
            .bills
            .push(OwnedBill { user_id, bill });
        id
    }

    pub fn bill(&self, id: Uuid) -> Result<RecurringBill, CoreError> {
        self.state
            .lock()
            .unwrap()
            .bills
            .iter()
            .find(|owned| owned.bill.id == id)
            .map(|owned| owned.bill.clone())
            .ok_or(CoreError::BillNotFound(id))
    }

    pub fn account(&self, id: Uuid) -> Result<Account, CoreError> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|account| account.id == id)
            .cloned()
            .ok_or(CoreError::AccountNotFound(id))
    }

    /// All ledger entries in insertion order.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.state.lock().unwrap().entries.clone()
    }

    /// Writes a JSON snapshot of the whole store atomically.
    pub fn save_to_path(&self, path: &Path) -> Result<(), CoreError> {
        let state = self.state.lock().unwrap();
        let data = serde_json::to_string_pretty(&*state)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        drop(state);
        let tmp = tmp_path(path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Loads a store from a JSON snapshot previously written by
    /// [`MemoryStore::save_to_path`].
    pub fn load_from_path(path: &Path) -> Result<Self, CoreError> {
        let data = fs::read_to_string(path)?;
        let state: StoreState =
            serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
        Ok(Self {
            state: Mutex::new(state),
        })
    }
}

impl BillStore for MemoryStore {
    fn list_active_bills(&self, user_id: Uuid) -> Result<Vec<RecurringBill>, CoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .bills
            .iter()
            .filter(|owned| owned.user_id == user_id && owned.bill.is_active)
            .map(|owned| owned.bill.clone())
            .collect())
    }

    fn update_bill(&self, id: Uuid, patch: BillPatch) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        let owned = state
            .bills
            .iter_mut()
            .find(|owned| owned.bill.id == id)
            .ok_or(CoreError::BillNotFound(id))?;
        patch.apply(&mut owned.bill);
        Ok(())
    }
}

impl LedgerWriter for MemoryStore {
    fn insert_entry(&self, entry: &LedgerEntry) -> Result<Uuid, CoreError> {
        let mut state = self.state.lock().unwrap();
        if !state
            .accounts
            .iter()
            .any(|account| account.id == entry.account_id)
        {
            return Err(CoreError::AccountNotFound(entry.account_id));
        }
        if entry.amount == Decimal::ZERO {
            return Err(CoreError::Validation("entry amount must be non-zero".into()));
        }
        state.entries.push(entry.clone());
        Ok(entry.id)
    }

    fn adjust_balance(&self, account_id: Uuid, delta: Decimal) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or(CoreError::AccountNotFound(account_id))?;
        account.apply_delta(delta);
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

use std::collections::HashSet;

use log::{debug, error, warn};

use crate::backend::Storage;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ids::{IdGenerator, SequentialIds};
use crate::core::summary::Summary;
use crate::core::transaction::{parse_amount, Amount, Transaction, TransactionId};

/// Slot the ledger lives in unless told otherwise.
pub const DEFAULT_SLOT: &str = "transactions";

/// The ordered list of transactions (oldest first), mirrored in full to one
/// storage slot after every change.
pub struct LedgerStore<S: Storage> {
    storage: S,
    slot: String,
    transactions: Vec<Transaction>,
    ids: Box<dyn IdGenerator>
}

impl<S: Storage> LedgerStore<S> {
    pub fn open(storage: S) -> LedgerStore<S> {
        LedgerStore::open_slot(storage, DEFAULT_SLOT)
    }

    pub fn open_slot(storage: S, slot: &str) -> LedgerStore<S> {
        let transactions = LedgerStore::load(&storage, slot);
        debug!("opened slot {:?} with {} transactions", slot, transactions.len());
        return LedgerStore {
            storage,
            slot: slot.to_owned(),
            transactions,
            ids: Box::new(SequentialIds::new())
        };
    }

    pub fn with_ids(mut self, ids: Box<dyn IdGenerator>) -> LedgerStore<S> {
        self.ids = ids;
        self
    }

    /// Reads the transactions kept in `slot`. A slot that cannot be read or
    /// parsed counts as no data at all; single records breaking the ledger
    /// rules are left out.
    pub fn load(storage: &S, slot: &str) -> Vec<Transaction> {
        let contents = match storage.get(slot) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("could not read slot {:?}, starting empty: {}", slot, err);
                return Vec::new();
            }
        };

        match decode(slot, &contents) {
            Ok(transactions) => transactions,
            Err(reason) => {
                warn!("discarding malformed slot {:?}: {}", slot, reason);
                Vec::new()
            }
        }
    }

    /// Records a new transaction and persists the ledger.
    pub fn add(&mut self, description: &str, amount: Amount) -> LedgerResult<Transaction> {
        let mut transaction = Transaction::new(0, description, amount)?;
        transaction.id = self.ids.next_id(&self.transactions)
            .ok_or(LedgerError::IdsExhausted)?;

        self.transactions.push(transaction.clone());
        if let Err(err) = self.persist() {
            self.transactions.pop();
            error!("failed to persist new transaction {}, rolled back: {}", transaction.id, err);
            return Err(err);
        }

        debug!("added transaction {} ({})", transaction.id, transaction);
        return Ok(transaction);
    }

    /// Same as [`LedgerStore::add`], with the amount still as typed.
    pub fn submit(&mut self, description: &str, amount_text: &str) -> LedgerResult<Transaction> {
        // report the description first, as a form would
        if description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        let amount = parse_amount(amount_text)?;
        return self.add(description, amount);
    }

    /// Removes the transaction with `id`, if any, and persists the ledger
    /// either way. Returns what was removed.
    pub fn remove(&mut self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        let position = self.transactions.iter().position(|t| t.id == id);
        let removed = position.map(|index| self.transactions.remove(index));

        if let Err(err) = self.persist() {
            if let (Some(index), Some(transaction)) = (position, removed) {
                self.transactions.insert(index, transaction);
            }
            error!("failed to persist removal of {}, rolled back: {}", id, err);
            return Err(err);
        }

        match &removed {
            Some(_) => debug!("removed transaction {}", id),
            None => debug!("no transaction {} to remove", id)
        }
        return Ok(removed);
    }

    pub fn summarize(&self) -> Summary {
        Summary::of(&self.transactions)
    }

    /// Oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> LedgerResult<()> {
        let encoded = serde_json::to_string(&self.transactions)?;
        self.storage.set(&self.slot, &encoded)?;
        return Ok(());
    }
}

fn decode(slot: &str, contents: &str) -> Result<Vec<Transaction>, serde_json::Error> {
    let transactions: Vec<Transaction> = serde_json::from_str(contents)?;

    let mut seen = HashSet::new();
    let kept = transactions.into_iter()
        .filter(|transaction| {
            let problem = if transaction.description.trim().is_empty() {
                "an empty description"
            } else if !transaction.amount.is_finite() {
                "a non-finite amount"
            } else if !seen.insert(transaction.id) {
                "a duplicate id"
            } else {
                return true;
            };
            warn!("dropping transaction {} from slot {:?}: {}", transaction.id, slot, problem);
            false
        })
        .collect();
    return Ok(kept);
}

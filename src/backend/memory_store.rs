use std::{collections::HashMap, sync::{Arc, Mutex, MutexGuard, PoisonError}};

use crate::backend::interface::{Storage, Result, BackendError};

/// In-process slots. Clones share the same slots, so a handle kept aside
/// sees everything written through the one given to a ledger.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Limits the summed length of all keys and values, in bytes.
    pub fn with_quota(quota: usize) -> MemoryStore {
        MemoryStore { quota: Some(quota), ..MemoryStore::default() }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn used_except(&self, key: &str) -> usize {
        self.slots().iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(self.used_except(key));
            if needed > available {
                return Err(BackendError::QuotaExceeded { needed, available });
            }
        }
        self.slots().insert(key.to_owned(), value.to_owned());
        return Ok(());
    }
}

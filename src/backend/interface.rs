use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Occurs when a write would take the store past its size limit,
    /// the way browser local storage rejects writes over quota.
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        needed: usize,
        available: usize
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Durable key-value slots. Every write replaces the whole slot.
pub trait Storage {
    /// Reads a slot; `Ok(None)` when nothing was ever written to it.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

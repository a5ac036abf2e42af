use serde::Deserialize;

use crate::core::transaction::{Transaction, TransactionId};

pub trait IdGenerator: Send {
    /// Returns an id not used by any of `existing`, nor handed out before
    /// by this generator. `None` once the id space is used up.
    fn next_id(&mut self, existing: &[Transaction]) -> Option<TransactionId>;
}

fn max_id(existing: &[Transaction]) -> Option<TransactionId> {
    existing.iter().map(|t| t.id).max()
}

/// Counts up from one past the largest id seen.
#[derive(Debug)]
pub struct SequentialIds {
    next: Option<TransactionId>
}

impl SequentialIds {
    pub fn new() -> SequentialIds {
        SequentialIds { next: Some(1) }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, existing: &[Transaction]) -> Option<TransactionId> {
        let floor = match max_id(existing) {
            Some(max) => max.checked_add(1)?,
            None => 1
        };
        let id = self.next?.max(floor);
        self.next = id.checked_add(1);
        return Some(id);
    }
}

/// Milliseconds since the epoch, bumped forward when two entries land on
/// the same millisecond or the clock goes backwards.
pub struct TimestampIds {
    clock: Box<dyn Fn() -> i64 + Send>,
    last: Option<TransactionId>
}

impl TimestampIds {
    pub fn new() -> TimestampIds {
        TimestampIds::with_clock(|| chrono::Utc::now().timestamp_millis())
    }

    pub fn with_clock(clock: impl Fn() -> i64 + Send + 'static) -> TimestampIds {
        TimestampIds { clock: Box::new(clock), last: None }
    }
}

impl Default for TimestampIds {
    fn default() -> Self {
        TimestampIds::new()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, existing: &[Transaction]) -> Option<TransactionId> {
        let now = (self.clock)().max(0) as TransactionId;
        let floor = match self.last.max(max_id(existing)) {
            Some(id) => id.checked_add(1)?,
            None => 0
        };
        let id = now.max(floor);
        self.last = Some(id);
        return Some(id);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Sequential,
    Timestamp
}

impl IdStrategy {
    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Timestamp => Box::new(TimestampIds::new())
        }
    }
}

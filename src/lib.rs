mod core;
pub mod backend;

pub use crate::core::{LedgerStore, DEFAULT_SLOT, Summary, LedgerError, LedgerResult};
pub use crate::core::{Transaction, TransactionId, Amount, Kind, format_currency, parse_amount};
pub use crate::core::{IdGenerator, IdStrategy, SequentialIds, TimestampIds};
pub use crate::core::{error, ids, ledger, summary, transaction};

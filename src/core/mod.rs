pub mod error;
pub mod ids;
pub mod transaction;
pub mod summary;
pub mod ledger;

pub use error::{LedgerError, LedgerResult};
pub use ids::{IdGenerator, IdStrategy, SequentialIds, TimestampIds};
pub use transaction::{Transaction, TransactionId, Amount, Kind, format_currency, parse_amount};
pub use summary::Summary;
pub use ledger::{LedgerStore, DEFAULT_SLOT};

//! Append-only transaction journal.
//!
//! The journal is the sole authority for balance deltas: every change to a
//! customer balance is computed here as an immutable entry carrying the
//! balance snapshots before and after it. Corrections are new offsetting
//! entries; entries are never edited or removed.

pub mod entry;
pub mod error;
pub mod replay;
pub mod types;

pub use entry::{apply_to_account, build_entry};
pub use error::JournalError;
pub use replay::replay;
pub use types::{CustomerTransaction, EntryDetails, PaymentMethod, TransactionKind};

//! Signature ledger: append-only entries and their index-derived face/grid placement.

/// Signature entries and encoded images.
pub mod entry;
/// Face assignment and stamp grid geometry.
pub mod slot;
/// The append-only ledger.
pub mod store;

//! Error types

use thiserror::Error;

/// Errors from the durable side of selection storage.
///
/// In-memory store operations never fail; only opening, loading and saving
/// persisted state can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("unsupported persisted state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("could not determine a data directory for persisted selections")]
    NoDataDir,
    #[error("persister task is no longer running")]
    PersisterClosed,
}

//! Durable backing for selection tables.
//!
//! The whole [`SelectionTable`] is stored as one blob under a single name.
//! Backends only move bytes; encoding lives here and writes are serialized
//! through a background [`Persister`].

mod memory;
mod persister;
mod sqlite;

pub use memory::*;
pub use persister::*;
pub use sqlite::*;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::table::SelectionTable;

/// Current layout version of the persisted blob.
pub const STATE_VERSION: u32 = 1;

/// Backend trait for durable selection storage.
///
/// Implementations handle raw byte storage/retrieval under a name.
#[async_trait]
pub trait SelectionBackend: Send + Sync {
    /// Load the blob stored under `name`, if any.
    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Store `bytes` under `name`, replacing any previous blob.
    async fn save(&self, name: &str, bytes: Vec<u8>) -> Result<(), Error>;

    /// Remove the blob stored under `name`.
    async fn remove(&self, name: &str) -> Result<(), Error>;
}

#[async_trait]
impl<B: SelectionBackend + ?Sized> SelectionBackend for Arc<B> {
    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, Error> {
        (**self).load(name).await
    }

    async fn save(&self, name: &str, bytes: Vec<u8>) -> Result<(), Error> {
        (**self).save(name, bytes).await
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        (**self).remove(name).await
    }
}

#[derive(Serialize)]
struct PersistedStateRef<'a> {
    version: u32,
    selections: &'a SelectionTable,
}

#[derive(Deserialize)]
struct PersistedState {
    version: u32,
    selections: SelectionTable,
}

/// Encode a table for storage.
pub fn encode(table: &SelectionTable) -> Result<Vec<u8>, Error> {
    bincode::serialize(&PersistedStateRef {
        version: STATE_VERSION,
        selections: table,
    })
    .map_err(Error::Serialization)
}

/// Decode a stored table.
pub fn decode(bytes: &[u8]) -> Result<SelectionTable, Error> {
    let state: PersistedState = bincode::deserialize(bytes).map_err(Error::Deserialization)?;
    if state.version != STATE_VERSION {
        return Err(Error::UnsupportedVersion {
            found: state.version,
            expected: STATE_VERSION,
        });
    }
    Ok(state.selections)
}

/// Load and decode the table stored under `name`.
///
/// Any failure is logged and treated as "nothing persisted", so a broken
/// backing store never prevents startup.
pub async fn hydrate(backend: &dyn SelectionBackend, name: &str) -> SelectionTable {
    let bytes = match backend.load(name).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::debug!("no persisted selections under {:?}", name);
            return SelectionTable::new();
        }
        Err(e) => {
            log::warn!("failed to load persisted selections {:?}: {}", name, e);
            return SelectionTable::new();
        }
    };

    match decode(&bytes) {
        Ok(table) => {
            log::debug!("hydrated {} selection keys from {:?}", table.len(), name);
            table
        }
        Err(e) => {
            log::warn!("discarding persisted selections {:?}: {}", name, e);
            SelectionTable::new()
        }
    }
}

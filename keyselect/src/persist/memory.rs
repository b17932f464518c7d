//! In-memory backend using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::SelectionBackend;
use crate::error::Error;

/// A backend kept in a concurrent hash map.
///
/// Blobs survive as long as the backend value does, which makes it suitable
/// for tests and for sharing one "durable" store between hubs in a process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored blobs.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Seed a blob directly, bypassing encoding.
    pub fn insert_raw(&self, name: &str, bytes: Vec<u8>) {
        self.store.insert(name.to_string(), bytes);
    }
}

#[async_trait]
impl SelectionBackend for MemoryBackend {
    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.store.get(name).map(|entry| entry.value().clone()))
    }

    async fn save(&self, name: &str, bytes: Vec<u8>) -> Result<(), Error> {
        self.store.insert(name.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        self.store.remove(name);
        Ok(())
    }
}

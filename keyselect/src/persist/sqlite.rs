//! SQLite-backed persistent selection storage.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_sqlite::rusqlite;
use async_trait::async_trait;

use super::SelectionBackend;
use crate::error::Error;

/// Selection blobs stored in a SQLite database.
///
/// Data persists across process restarts. Uses WAL journal mode so the
/// background writer never blocks readers of the same file.
///
/// # Example
///
/// ```ignore
/// use keyselect::persist::SqliteBackend;
///
/// // File-based storage
/// let backend = SqliteBackend::open("selections.db").await?;
///
/// // In-memory storage (for testing)
/// let backend = SqliteBackend::open_in_memory().await?;
/// ```
pub struct SqliteBackend {
    client: Client,
}

impl SqliteBackend {
    /// Opens the database at `path`, creating the file and table if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory database. Data is lost when the backend is dropped.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), Error> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS selections (
                        name TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SelectionBackend for SqliteBackend {
    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, Error> {
        let name = name.to_string();
        let result = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM selections WHERE name = ?")?;
                let mut rows = stmt.query([&name])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(result)
    }

    async fn save(&self, name: &str, bytes: Vec<u8>) -> Result<(), Error> {
        let name = name.to_string();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO selections (name, value) VALUES (?, ?)
                     ON CONFLICT(name) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&name, &bytes],
                )
            })
            .await?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        let name = name.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM selections WHERE name = ?", [&name]))
            .await?;
        Ok(())
    }
}

//! Ephemeral and durable selection stores behind one entry point.

use std::sync::Arc;

use crate::config::PersistConfig;
use crate::error::Error;
use crate::persist::{self, Persister, SelectionBackend, SqliteBackend};
use crate::store::SelectionStore;
use crate::view::{ItemView, SelectActions, SelectionView};
use crate::wakeup::WakeupSender;

/// Which store a view reads and writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Persistence {
    /// Lives for the process only.
    #[default]
    Ephemeral,
    /// Survives restarts through the configured backend.
    Durable,
}

impl From<bool> for Persistence {
    fn from(persist: bool) -> Self {
        if persist {
            Self::Durable
        } else {
            Self::Ephemeral
        }
    }
}

/// Application-wide selection state.
///
/// Holds one ephemeral and one durable [`SelectionStore`]. Views pick one
/// with [`Persistence`]; the two never share keys.
///
/// # Example
///
/// ```ignore
/// use keyselect::{PersistConfig, Persistence, Selections};
///
/// let selections = Selections::open(PersistConfig::default()).await?;
/// let files = selections.view("files", Persistence::Durable);
/// files.select(&["README.md"], false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Selections {
    ephemeral: SelectionStore,
    durable: SelectionStore,
}

impl Selections {
    /// Two in-memory stores with no backend.
    ///
    /// The durable store behaves like the ephemeral one and is lost on exit.
    /// Use [`Selections::open`] or [`Selections::with_backend`] to persist it.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the SQLite database described by `config` and hydrate from it.
    pub async fn open(config: PersistConfig) -> Result<Self, Error> {
        let backend = if config.in_memory {
            SqliteBackend::open_in_memory().await?
        } else {
            let path = config.resolve_path()?;
            if let Some(parent) = path.parent() {
                // A missing directory surfaces as a database error on open.
                let _ = std::fs::create_dir_all(parent);
            }
            log::debug!("opening selection database at {}", path.display());
            SqliteBackend::open(path).await?
        };
        Ok(Self::with_backend(backend, &config).await)
    }

    /// Hydrate the durable store from `backend` and persist writes to it.
    ///
    /// A failing or corrupt backend yields an empty durable store.
    pub async fn with_backend(
        backend: impl SelectionBackend + 'static,
        config: &PersistConfig,
    ) -> Self {
        let backend: Arc<dyn SelectionBackend> = Arc::new(backend);
        let table = persist::hydrate(backend.as_ref(), &config.storage_key).await;
        let persister = Persister::spawn(backend, config.storage_key.clone());

        Self {
            ephemeral: SelectionStore::new(),
            durable: SelectionStore::persisted(table, persister),
        }
    }

    pub fn store(&self, persistence: impl Into<Persistence>) -> &SelectionStore {
        match persistence.into() {
            Persistence::Ephemeral => &self.ephemeral,
            Persistence::Durable => &self.durable,
        }
    }

    pub fn view(
        &self,
        key: impl Into<String>,
        persistence: impl Into<Persistence>,
    ) -> SelectionView {
        SelectionView::new(self.store(persistence).clone(), key)
    }

    pub fn item(
        &self,
        key: impl Into<String>,
        item: impl Into<String>,
        persistence: impl Into<Persistence>,
    ) -> ItemView {
        ItemView::new(self.store(persistence).clone(), key, item)
    }

    pub fn actions(
        &self,
        key: impl Into<String>,
        persistence: impl Into<Persistence>,
    ) -> SelectActions {
        SelectActions::new(self.store(persistence).clone(), key)
    }

    /// Report changed keys of both stores to `sender`, tagged by store.
    pub fn install_wakeup(&self, sender: &WakeupSender) {
        self.ephemeral.install_wakeup(sender.for_store(Persistence::Ephemeral));
        self.durable.install_wakeup(sender.for_store(Persistence::Durable));
    }

    /// Wait until queued durable writes have been attempted.
    pub async fn flush(&self) -> Result<(), Error> {
        self.durable.flush().await
    }
}

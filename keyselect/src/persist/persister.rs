//! Background writer for persisted selection tables.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::oneshot;

use super::SelectionBackend;
use super::encode;
use crate::error::Error;
use crate::table::SelectionTable;

enum Command {
    Save(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget writer for one persisted blob.
///
/// Saves are queued to a single task, so they hit the backend in call
/// order. Saves queued while a write is in flight collapse into the newest
/// one. The in-memory table stays the source of truth: a failed save is
/// logged and nothing is rolled back.
#[derive(Debug, Clone)]
pub struct Persister {
    tx: mpsc::UnboundedSender<Command>,
}

impl Persister {
    /// Spawn the writer task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(backend: Arc<dyn SelectionBackend>, name: impl Into<String>) -> Self {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(backend, name, rx));
        Self { tx }
    }

    /// Encode `table` and queue it for saving.
    pub fn save(&self, table: &SelectionTable) {
        let bytes = match encode(table) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("not persisting selections: {}", e);
                return;
            }
        };
        if self.tx.send(Command::Save(bytes)).is_err() {
            log::warn!("not persisting selections: persister task has stopped");
        }
    }

    /// Wait until every save queued before this call has been attempted.
    pub async fn flush(&self) -> Result<(), Error> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(Command::Flush(ack))
            .map_err(|_| Error::PersisterClosed)?;
        done.await.map_err(|_| Error::PersisterClosed)
    }
}

async fn run(
    backend: Arc<dyn SelectionBackend>,
    name: String,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        let mut latest = None;
        let mut acks = Vec::new();
        absorb(command, &mut latest, &mut acks);

        // Collapse whatever queued up behind this command.
        while let Ok(command) = rx.try_recv() {
            absorb(command, &mut latest, &mut acks);
        }

        if let Some(bytes) = latest {
            let len = bytes.len();
            match backend.save(&name, bytes).await {
                Ok(()) => log::trace!("persisted {} bytes of selections to {:?}", len, name),
                Err(e) => log::warn!("failed to persist selections to {:?}: {}", name, e),
            }
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }
    log::debug!("selection persister for {:?} stopped", name);
}

fn absorb(command: Command, latest: &mut Option<Vec<u8>>, acks: &mut Vec<oneshot::Sender<()>>) {
    match command {
        Command::Save(bytes) => *latest = Some(bytes),
        Command::Flush(ack) => acks.push(ack),
    }
}

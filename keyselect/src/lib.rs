//! Keyed selection state for interactive item lists.
//!
//! A [`SelectionStore`] tracks, per selection key, which item identifiers
//! are selected. Views bind to one key (or one item) and flag when their
//! projection changes, so any number of UI components can share a
//! selection without threading it through each other.

pub mod config;
pub mod error;
pub mod hub;
pub mod persist;
pub mod selection;
pub mod store;
pub mod subscription;
pub mod table;
pub mod view;
pub mod wakeup;

pub use config::PersistConfig;
pub use error::Error;
pub use hub::{Persistence, Selections};
pub use selection::Selection;
pub use store::SelectionStore;
pub use subscription::Subscription;
pub use table::SelectionTable;
pub use view::{ItemView, SelectActions, SelectionView};

pub mod prelude {
    pub use crate::config::PersistConfig;
    pub use crate::hub::{Persistence, Selections};
    pub use crate::selection::Selection;
    pub use crate::store::SelectionStore;
    pub use crate::view::{ItemView, SelectActions, SelectionView};
    pub use crate::wakeup::{WakeupReceiver, WakeupSender};
}

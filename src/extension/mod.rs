//! Client-side logic: service client, summary history and settings.
//!
//! Mirrors what the browser extension keeps outside its UI. The service never
//! reads or writes any of this state.

pub mod backend;
pub mod history;
pub mod settings;
pub mod store;

pub use backend::{BackendClient, ClientError, SummaryResponse};
pub use history::{HISTORY_CAP, HistoryEntry, push_entry};
pub use settings::Settings;
pub use store::{
    ClientStore, FileBackend, MemoryBackend, StorageBackend, StoreError, default_store_path,
};

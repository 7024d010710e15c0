//! Bowser Core
//!
//! Page model, the list of submitted pages, and the actor-confined store
//! that persists them. Rendering and bitmap capture belong to the host UI.

mod browser;
mod config;
mod error;
mod page;
mod page_list;
mod snapshot;
mod store;

pub use browser::Browser;
pub use config::{Config, DEFAULT_SEED_URLS};
pub use error::CoreError;
pub use page::Page;
pub use page_list::PageList;
pub use snapshot::{SnapshotError, Snapshotter};
pub use store::PageStore;

pub use bowser_storage::{PageData, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}

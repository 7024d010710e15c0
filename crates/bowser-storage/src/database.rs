//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use crate::page::{self, NewPageData, PageData};
use crate::schema;
use crate::Result;

/// Open the file at `path`, creating it if missing.
pub fn open_connection<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;

    tracing::info!(path = %path.display(), "Opened page database");

    Ok(conn)
}

/// Single SQLite connection behind a mutex.
///
/// Every call takes the lock for its whole duration, so operations on one
/// `Database` (and its clones) never overlap.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open the file at `path`, creating it if missing.
    ///
    /// The schema is not touched; call [`Database::initialize_schema`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = open_connection(path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the `PageData` table if it does not exist yet.
    pub fn initialize_schema(&self) -> Result<()> {
        self.with_connection(schema::initialize_schema)
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Insert one page. Fails on a duplicate id.
    pub fn insert_page(&self, page: &NewPageData<'_>) -> Result<()> {
        self.with_connection(|conn| page::insert_page(conn, page))
    }

    pub fn get_page(&self, id: &str) -> Result<Option<PageData>> {
        self.with_connection(|conn| page::get_page(conn, id))
    }

    pub fn list_pages(&self) -> Result<Vec<PageData>> {
        self.with_connection(page::list_pages)
    }

    pub fn count_pages(&self) -> Result<u64> {
        self.with_connection(page::count_pages)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

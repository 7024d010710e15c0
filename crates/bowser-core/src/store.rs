//! Actor-confined page store
//!
//! The connection lives on the background thread `tokio_rusqlite` starts for
//! it. Every call is queued to that thread and runs alone, so the database
//! only ever sees one operation at a time no matter how many tasks call in.
//!
//! A call runs to completion once queued. Dropping the returned future only
//! discards the reply.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use bowser_storage::{PageData, StorageError};

use crate::error::CoreError;
use crate::page::Page;
use crate::Result;

#[derive(Clone)]
pub struct PageStore {
    conn: tokio_rusqlite::Connection,
    closed: Arc<AtomicBool>,
}

impl PageStore {
    /// Open (creating if needed) the database at `path` and start the worker.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = bowser_storage::open_connection(path)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self::from_connection(conn))
    }

    /// Move `conn` onto its own worker thread.
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self {
            conn: tokio_rusqlite::Connection::from(conn),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn initialize_schema(&self) -> Result<()> {
        let result = self
            .conn
            .call(|conn| Ok(bowser_storage::initialize_schema(conn)))
            .await;
        flatten(result)
    }

    /// Insert `page` as a new row. A second insert with the same id fails
    /// with a constraint violation and leaves the first row untouched.
    pub async fn insert(&self, page: Page) -> Result<()> {
        let id = page.id();
        let result = self
            .conn
            .call(move |conn| Ok(bowser_storage::insert_page(conn, &page.as_row())))
            .await;

        let result = flatten(result);
        if let Err(e) = &result {
            tracing::warn!(page_id = %id, error = %e, "Failed to insert page");
        }
        result
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PageData>> {
        let result = self
            .conn
            .call(move |conn| Ok(bowser_storage::get_page(conn, &id.to_string())))
            .await;
        flatten(result)
    }

    pub async fn list(&self) -> Result<Vec<PageData>> {
        let result = self
            .conn
            .call(|conn| Ok(bowser_storage::list_pages(conn)))
            .await;
        flatten(result)
    }

    pub async fn count(&self) -> Result<u64> {
        let result = self
            .conn
            .call(|conn| Ok(bowser_storage::count_pages(conn)))
            .await;
        flatten(result)
    }

    /// Stop the worker and close the connection.
    ///
    /// Calls queued before the close still run. Anything sent afterwards,
    /// from this or any cloned handle, fails with `StoreClosed`.
    pub async fn close(&self) -> Result<()> {
        match self.conn.clone().close().await {
            Ok(()) => {
                self.closed.store(true, Ordering::Release);
                tracing::info!("Page store closed");
                Ok(())
            }
            Err(tokio_rusqlite::Error::Close((_, e))) => Err(StorageError::from(e).into()),
            Err(e) => Err(StorageError::other(e.to_string()).into()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Split the worker's transport error from the storage result it carried.
fn flatten<T>(result: tokio_rusqlite::Result<bowser_storage::Result<T>>) -> Result<T> {
    match result {
        Ok(inner) => Ok(inner?),
        Err(tokio_rusqlite::Error::ConnectionClosed) => Err(CoreError::StoreClosed),
        Err(tokio_rusqlite::Error::Rusqlite(e)) => Err(StorageError::from(e).into()),
        Err(e) => Err(StorageError::other(e.to_string()).into()),
    }
}

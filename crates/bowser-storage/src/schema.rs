//! Schema for the page store
//!
//! A single `PageData` table. Creation is guarded with `IF NOT EXISTS` so
//! opening an existing file and initializing again is a no-op.

use rusqlite::Connection;

use crate::Result;

pub const PAGE_DATA_TABLE: &str = "PageData";

pub const CREATE_PAGE_DATA: &str = r#"
CREATE TABLE IF NOT EXISTS PageData (
    id TEXT PRIMARY KEY NOT NULL,
    lastUpdated INTEGER NOT NULL,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    fullText TEXT,
    snapshot BLOB
)
"#;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    tracing::debug!(table = PAGE_DATA_TABLE, "Ensuring schema");

    // Prepared explicitly so a failure is reported at prepare, step or finalize.
    let mut stmt = conn.prepare(CREATE_PAGE_DATA)?;
    stmt.execute([])?;
    stmt.finalize()?;

    Ok(())
}

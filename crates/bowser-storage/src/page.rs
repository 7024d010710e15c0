//! `PageData` rows
//!
//! Statements are prepared per call. Writes finalize explicitly so a failing
//! finalize is reported; on early `?` returns the `Statement` drop finalizes.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::value::{bind_all, Bind};
use crate::Result;

const INSERT_PAGE: &str = "INSERT INTO PageData (id, title, url, lastUpdated, fullText, snapshot)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_COLUMNS: &str = "SELECT id, lastUpdated, url, title, fullText, snapshot FROM PageData";

/// A persisted page row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    pub id: String,
    /// Whole seconds; sub-second precision is dropped on insert.
    pub last_updated: DateTime<Utc>,
    pub url: String,
    pub title: String,
    pub full_text: Option<String>,
    pub snapshot: Option<Vec<u8>>,
}

/// Borrowed view of a page, bound positionally on insert.
#[derive(Debug, Clone, Copy)]
pub struct NewPageData<'a> {
    pub id: &'a Uuid,
    pub title: &'a str,
    pub url: &'a Url,
    pub last_updated: DateTime<Utc>,
    pub full_text: Option<&'a str>,
    pub snapshot: Option<&'a [u8]>,
}

pub fn insert_page(conn: &Connection, page: &NewPageData<'_>) -> Result<()> {
    let values: [&dyn Bind; 6] = [
        &page.id,
        &page.title,
        &page.url,
        &page.last_updated,
        &page.full_text,
        &page.snapshot,
    ];
    let params = bind_all(&values);

    let mut stmt = conn.prepare(INSERT_PAGE)?;
    stmt.execute(params_from_iter(params.iter()))?;
    stmt.finalize()?;

    tracing::debug!(
        page_id = %page.id,
        url = %page.url,
        has_snapshot = page.snapshot.is_some(),
        "Inserted page"
    );

    Ok(())
}

pub fn get_page(conn: &Connection, id: &str) -> Result<Option<PageData>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    let page = stmt.query_row([id], row_to_page).optional()?;
    Ok(page)
}

/// All rows, most recently updated first.
pub fn list_pages(conn: &Connection) -> Result<Vec<PageData>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} ORDER BY lastUpdated DESC, id ASC"
    ))?;
    let pages = stmt
        .query_map([], row_to_page)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(pages)
}

pub fn count_pages(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM PageData", [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

fn row_to_page(row: &Row<'_>) -> rusqlite::Result<PageData> {
    let seconds: i64 = row.get(1)?;
    let last_updated = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Integer,
            format!("timestamp out of range: {seconds}").into(),
        )
    })?;

    Ok(PageData {
        id: row.get(0)?,
        last_updated,
        url: row.get(2)?,
        title: row.get(3)?,
        full_text: row.get(4)?,
        snapshot: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::initialize_schema;
    use chrono::TimeZone;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_read_back() {
        let conn = conn();
        let id = Uuid::new_v4();
        let url = Url::parse("https://apple.com").unwrap();
        let at = Utc.timestamp_opt(1_741_500_123, 456_000_000).single().unwrap();

        insert_page(
            &conn,
            &NewPageData {
                id: &id,
                title: "Apple",
                url: &url,
                last_updated: at,
                full_text: Some("Think different"),
                snapshot: Some(&[0x89, b'P', b'N', b'G']),
            },
        )
        .unwrap();

        let row = get_page(&conn, &id.to_string()).unwrap().unwrap();
        assert_eq!(row.id, id.to_string());
        assert_eq!(row.title, "Apple");
        assert_eq!(row.url, "https://apple.com/");
        assert_eq!(row.last_updated.timestamp(), 1_741_500_123);
        assert_eq!(row.last_updated.timestamp_subsec_nanos(), 0);
        assert_eq!(row.full_text.as_deref(), Some("Think different"));
        assert_eq!(row.snapshot, Some(vec![0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_missing_row_is_none() {
        let conn = conn();
        assert!(get_page(&conn, "nope").unwrap().is_none());
        assert_eq!(count_pages(&conn).unwrap(), 0);
    }

    #[test]
    fn test_list_orders_newest_first() {
        let conn = conn();
        let url = Url::parse("https://example.com").unwrap();
        let older = Uuid::new_v4();
        let newer = Uuid::new_v4();

        for (id, secs) in [(&older, 100), (&newer, 200)] {
            insert_page(
                &conn,
                &NewPageData {
                    id,
                    title: "Example",
                    url: &url,
                    last_updated: Utc.timestamp_opt(secs, 0).single().unwrap(),
                    full_text: None,
                    snapshot: None,
                },
            )
            .unwrap();
        }

        let ids: Vec<String> = list_pages(&conn).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newer.to_string(), older.to_string()]);
    }

    #[test]
    fn test_failed_insert_leaves_no_open_statement() {
        let conn = conn();
        let id = Uuid::new_v4();
        let url = Url::parse("https://apple.com").unwrap();
        let page = NewPageData {
            id: &id,
            title: "Apple",
            url: &url,
            last_updated: Utc::now(),
            full_text: None,
            snapshot: None,
        };

        insert_page(&conn, &page).unwrap();
        assert!(insert_page(&conn, &page).is_err());
        assert_eq!(count_pages(&conn).unwrap(), 1);

        // sqlite3_close refuses to close while any statement is unfinalized.
        conn.close().map_err(|(_, e)| e).unwrap();
    }
}

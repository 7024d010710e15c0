//! Bowser Storage Layer
//!
//! A single SQLite file holding captured pages in one `PageData` table.
//! Parameters are bound by declared type through [`Bind`]; every engine
//! failure surfaces as [`StorageError::Engine`].
//!
//! [`Database`] serializes synchronous callers behind a mutex. The free
//! functions take a bare `rusqlite::Connection` for callers that confine the
//! connection some other way.

mod database;
mod error;
mod page;
mod schema;
mod value;

pub use database::{open_connection, Database};
pub use error::StorageError;
pub use page::{count_pages, get_page, insert_page, list_pages, NewPageData, PageData};
pub use schema::{initialize_schema, CREATE_PAGE_DATA, PAGE_DATA_TABLE};
pub use value::{bind_all, Bind, SqlValue};

pub type Result<T> = std::result::Result<T, StorageError>;

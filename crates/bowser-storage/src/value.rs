//! Typed parameter binding
//!
//! Every value that can be bound to a prepared-statement slot converts into a
//! [`SqlValue`] through the [`Bind`] capability. `SqlValue` is the single place
//! that knows how each kind is handed to SQLite, so statements can list
//! heterogeneous parameters positionally without format strings.
//!
//! rusqlite binds text and blobs with `SQLITE_TRANSIENT`, so the engine copies
//! the bytes before the call returns and borrowed buffers are fine here.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;
use url::Url;
use uuid::Uuid;

/// A value ready to be bound to one statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    /// 64-bit signed integer.
    Integer(i64),
    /// UTF-8 text.
    Text(Cow<'a, str>),
    /// Stored as whole seconds since the Unix epoch, truncated toward zero.
    Timestamp(DateTime<Utc>),
    /// Raw bytes.
    Blob(Cow<'a, [u8]>),
    Null,
}

impl ToSql for SqlValue<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Timestamp(t) => ToSqlOutput::Owned(Value::Integer(epoch_seconds(t))),
            SqlValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_ref())),
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

/// `DateTime::timestamp` floors; pre-epoch values need rounding back up.
fn epoch_seconds(t: &DateTime<Utc>) -> i64 {
    let secs = t.timestamp();
    secs + i64::from(secs < 0 && t.timestamp_subsec_nanos() > 0)
}

/// Capability of a type to serialize itself into a statement parameter.
pub trait Bind {
    fn to_value(&self) -> SqlValue<'_>;
}

impl Bind for i64 {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Integer(*self)
    }
}

impl Bind for i32 {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Integer(i64::from(*self))
    }
}

impl Bind for str {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self))
    }
}

impl Bind for String {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl Bind for Url {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl Bind for Uuid {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Owned(self.to_string()))
    }
}

impl Bind for DateTime<Utc> {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Timestamp(*self)
    }
}

impl Bind for [u8] {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Blob(Cow::Borrowed(self))
    }
}

impl Bind for Vec<u8> {
    fn to_value(&self) -> SqlValue<'_> {
        SqlValue::Blob(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: Bind + ?Sized> Bind for &T {
    fn to_value(&self) -> SqlValue<'_> {
        (**self).to_value()
    }
}

impl<T: Bind> Bind for Option<T> {
    fn to_value(&self) -> SqlValue<'_> {
        match self {
            Some(v) => v.to_value(),
            None => SqlValue::Null,
        }
    }
}

/// Collect positional parameters for a statement.
pub fn bind_all<'a>(values: &[&'a dyn Bind]) -> Vec<SqlValue<'a>> {
    values.iter().map(|v| Bind::to_value(*v)).collect()
}

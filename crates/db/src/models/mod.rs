pub mod block;
pub mod comment;
pub mod notification;
pub mod post;
pub mod report;
pub mod user;

pub use block::Block;
pub use comment::Comment;
pub use notification::{
    Notification, NotificationReason, NotificationSource, NotificationView, ReportFiling,
    SourceKind,
};
pub use post::Post;
pub use report::{Report, ReportCategory, ReportedResource, ResourceKind};
pub use user::User;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Row;
use rusqlite::types::Type;
use uuid::Uuid;

/// Current time truncated to millisecond precision, so values compare
/// equal after a round-trip through their INTEGER column.
pub fn now() -> DateTime<Utc> {
    millis_to_datetime(Utc::now().timestamp_millis())
}

pub fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
}

/// Read a UUID stored as TEXT.
pub fn uuid_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a timestamp stored as epoch milliseconds.
pub fn ts_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    Ok(millis_to_datetime(ms))
}

/// Read a TEXT-stored enum via its `FromStr` impl.
pub fn enum_col<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// A TEXT-stored enum column holding a string no variant matches.
#[derive(Debug, thiserror::Error)]
#[error("unknown {column} value: {value}")]
pub struct UnknownVariant {
    pub column: &'static str,
    pub value: String,
}

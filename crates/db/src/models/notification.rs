use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ReportCategory, ReportedResource, UnknownVariant, enum_col, ts_col, uuid_col};

/// Stored notification row.
///
/// At most one row exists per `(recipient_id, from_id, reason)`; re-triggers
/// of the same cause bump `updated_at` and reset `read` instead of inserting.
/// `created_at` never changes after the first insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub reason: NotificationReason,
    pub from_kind: SourceKind,
    pub from_id: Uuid,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    CommentedOnPost,
    MentionedInPost,
    MentionedInComment,
    FiledReportOnResource,
}

/// Which table `from_id` points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Post,
    Comment,
    Report,
}

/// The `from` resource resolved to its concrete projection, for consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationSource {
    Post {
        id: Uuid,
        author_id: Uuid,
        content: String,
    },
    Comment {
        id: Uuid,
        post_id: Uuid,
        author_id: Uuid,
        content: String,
    },
    Report {
        id: Uuid,
        creator_id: Uuid,
        filed: Vec<ReportFiling>,
    },
}

/// What a report-sourced notification carries: the category, the free-text
/// description, and the reported resource resolved to its concrete kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFiling {
    pub category: ReportCategory,
    pub reason: String,
    pub reported_resource: ReportedResource,
}

/// A notification joined with its resolved source, as handed to the
/// query layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub reason: NotificationReason,
    pub from: NotificationSource,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Maps a row selected as
    /// `id, recipient_id, reason, from_kind, from_id, read, created_at, updated_at`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_col(row, 0)?,
            recipient_id: uuid_col(row, 1)?,
            reason: enum_col(row, 2)?,
            from_kind: enum_col(row, 3)?,
            from_id: uuid_col(row, 4)?,
            read: row.get(5)?,
            created_at: ts_col(row, 6)?,
            updated_at: ts_col(row, 7)?,
        })
    }
}

impl NotificationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommentedOnPost => "commented_on_post",
            Self::MentionedInPost => "mentioned_in_post",
            Self::MentionedInComment => "mentioned_in_comment",
            Self::FiledReportOnResource => "filed_report_on_resource",
        }
    }
}

impl std::fmt::Display for NotificationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationReason {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commented_on_post" => Ok(Self::CommentedOnPost),
            "mentioned_in_post" => Ok(Self::MentionedInPost),
            "mentioned_in_comment" => Ok(Self::MentionedInComment),
            "filed_report_on_resource" => Ok(Self::FiledReportOnResource),
            _ => Err(UnknownVariant {
                column: "reason",
                value: s.to_owned(),
            }),
        }
    }
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Report => "report",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            "report" => Ok(Self::Report),
            _ => Err(UnknownVariant {
                column: "from_kind",
                value: s.to_owned(),
            }),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{UnknownVariant, enum_col, ts_col, uuid_col};

/// Immutable once filed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub category: ReportCategory,
    pub reason: String,
    pub reported_kind: ResourceKind,
    pub reported_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Spam,
    Harassment,
    ViolenceOrThreats,
    DiscriminationEtc,
    SexualContent,
    Misinformation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    User,
    Post,
    Comment,
}

/// The reported resource resolved to its concrete kind and the fields a
/// moderator needs to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportedResource {
    User { id: Uuid, name: String },
    Post { id: Uuid, content: String },
    Comment { id: Uuid, content: String },
}

impl Report {
    /// Maps a row selected as
    /// `id, creator_id, category, reason, reported_kind, reported_id, created_at`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_col(row, 0)?,
            creator_id: uuid_col(row, 1)?,
            category: enum_col(row, 2)?,
            reason: row.get(3)?,
            reported_kind: enum_col(row, 4)?,
            reported_id: uuid_col(row, 5)?,
            created_at: ts_col(row, 6)?,
        })
    }
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Harassment => "harassment",
            Self::ViolenceOrThreats => "violence_or_threats",
            Self::DiscriminationEtc => "discrimination_etc",
            Self::SexualContent => "sexual_content",
            Self::Misinformation => "misinformation",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spam" => Ok(Self::Spam),
            "harassment" => Ok(Self::Harassment),
            "violence_or_threats" => Ok(Self::ViolenceOrThreats),
            "discrimination_etc" => Ok(Self::DiscriminationEtc),
            "sexual_content" => Ok(Self::SexualContent),
            "misinformation" => Ok(Self::Misinformation),
            "other" => Ok(Self::Other),
            _ => Err(UnknownVariant {
                column: "category",
                value: s.to_owned(),
            }),
        }
    }
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            _ => Err(UnknownVariant {
                column: "reported_kind",
                value: s.to_owned(),
            }),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Deserializer, Serialize};

use uuid::Uuid;

/// Promotion lifecycle states.
///
/// Transitions are one-way and monotonic: draft, then active, then ended.
/// Ended is terminal. The allowed-transition and editable-field tables below
/// are the single source of truth consulted by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum PromotionStatus {
    Draft,
    Active,
    Ended,
}

impl PromotionStatus {
    /// Statuses reachable from this one, self excluded.
    pub fn allowed_transitions(self) -> &'static [PromotionStatus] {
        match self {
            Self::Draft => &[Self::Active],
            Self::Active => &[Self::Ended],
            // Terminal
            Self::Ended => &[],
        }
    }

    /// Fields that may still be edited while in this status.
    pub fn editable_fields(self) -> &'static [PromotionField] {
        match self {
            Self::Draft => &[
                PromotionField::Name,
                PromotionField::Description,
                PromotionField::StartAt,
                PromotionField::EndAt,
            ],
            Self::Active => &[PromotionField::Name, PromotionField::Description],
            // Read-only
            Self::Ended => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            other => Err(format!("'{}' is not a promotion status", other)),
        }
    }
}

/// The mutable fields of a promotion, as named in update payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionField {
    Name,
    Description,
    StartAt,
    EndAt,
}

impl PromotionField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::StartAt => "start_at",
            Self::EndAt => "end_at",
        }
    }
}

impl fmt::Display for PromotionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New Promotion request
#[derive(Debug)]
pub struct NewPromotion {
    pub name: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Stored Promotion record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Promotion {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: PromotionStatus,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// NOTE: Auto-set and refreshed by database triggers
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Partial promotion update. `None` means "not supplied"; absent fields are
/// left untouched by the store.
///
/// `description` is the one nullable field, so it carries a second `Option`
/// to keep "absent" and "explicitly null" apart: `Some(None)` is a supplied
/// value that clears the stored description, and counts as an edit for the
/// editability check like any other.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PromotionUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "some_or_null")]
    pub description: Option<Option<String>>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

/// A present field deserializes to `Some(..)` even when its value is null;
/// absent fields fall back to the field default of `None`.
fn some_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl PromotionUpdate {
    /// The fields actually present in this update.
    pub fn fields(&self) -> Vec<PromotionField> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(PromotionField::Name);
        }
        if self.description.is_some() {
            fields.push(PromotionField::Description);
        }
        if self.start_at.is_some() {
            fields.push(PromotionField::StartAt);
        }
        if self.end_at.is_some() {
            fields.push(PromotionField::EndAt);
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    pub fn touches_time_range(&self) -> bool {
        self.start_at.is_some() || self.end_at.is_some()
    }
}

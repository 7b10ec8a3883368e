use chrono::{DateTime, Utc};

use serde::Serialize;

use uuid::Uuid;

/// New Subscription request
#[derive(Debug)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub promotion_id: Uuid,
    /// Opaque bag of caller-supplied values (source, campaign info, ...);
    /// stored as JSONB and passed through unchanged.
    pub metadata: Option<serde_json::Value>,
}

/// Stored Subscription record
///
/// Created active; `is_active` flips to false exactly once on deactivation.
/// There is no `updated_at`: deactivation is the only mutation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub promotion_id: Uuid,
    pub is_active: bool,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

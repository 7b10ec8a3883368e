use chrono::{DateTime, Utc};

use uuid::Uuid;

use crate::domain::FullName;

/// New User request. Contact fields arrive already encrypted; the service
/// layer owns the cipher.
#[derive(Debug)]
pub struct NewUser {
    pub full_name: FullName,
    pub encrypted_email: String,
    pub encrypted_phone: Option<String>,
}

/// Stored User record. Email and phone exist only in encrypted form here;
/// decryption happens in the service layer on the way out.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub encrypted_email: String,
    pub encrypted_phone: Option<String>,
    /// NOTE: Auto-set and refreshed by database triggers
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

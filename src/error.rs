use std::fmt;

use actix_web::http::StatusCode;
use actix_web::ResponseError;

use thiserror::Error;

use uuid::Uuid;

use crate::crypto::DecryptError;
use crate::model::{PromotionField, PromotionStatus};

pub type Result<T> = std::result::Result<T, Error>;

/// Why a promotion cannot accept subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotActiveReason {
    /// No promotion exists for the given id
    NotFound,
    /// The promotion exists but is not in the active status
    Status(PromotionStatus),
}

impl fmt::Display for NotActiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not_found"),
            Self::Status(status) => status.fmt(f),
        }
    }
}

/// Expected business outcomes, plus the opaque failures underneath them.
///
/// Everything except `Database` and `Decryption` is an enumerable rule
/// violation the caller can act on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found")]
    NotFound,

    #[error("end_at must be after start_at")]
    InvalidTimeRange,

    #[error(
        "Cannot transition from {current} to {target}. \
         Valid transitions: draft\u{2192}active, active\u{2192}ended"
    )]
    InvalidStatusTransition {
        current: PromotionStatus,
        target: PromotionStatus,
    },

    #[error("Cannot edit field '{field}' when promotion is in {status} status")]
    NotEditable {
        status: PromotionStatus,
        field: PromotionField,
    },

    #[error("User {user_id} not found")]
    UserNotFound { user_id: Uuid },

    #[error(
        "Cannot subscribe to promotion {promotion_id} with status '{reason}'. \
         Promotion must be active to accept subscriptions"
    )]
    PromotionNotActive {
        promotion_id: Uuid,
        reason: NotActiveReason,
    },

    #[error(
        "User {user_id} is already subscribed to promotion {promotion_id}. \
         Duplicate subscriptions are not allowed"
    )]
    DuplicateSubscription { user_id: Uuid, promotion_id: Uuid },

    #[error("Subscription {subscription_id} is already inactive")]
    AlreadyInactive { subscription_id: Uuid },

    // Stored ciphertext that no longer decrypts
    #[error(transparent)]
    Decryption(#[from] DecryptError),

    // Database errors
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RestResult<T> = std::result::Result<T, RestError>;

/// Transport-facing error, mapped onto HTTP status codes.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Error> for RestError {
    fn from(e: Error) -> Self {
        use Error as E;
        match &e {
            E::NotFound | E::UserNotFound { .. } => Self::NotFound(e.to_string()),
            E::DuplicateSubscription { .. } => Self::Conflict(e.to_string()),
            E::InvalidTimeRange
            | E::InvalidStatusTransition { .. }
            | E::NotEditable { .. }
            | E::PromotionNotActive { .. }
            | E::AlreadyInactive { .. } => Self::Unprocessable(e.to_string()),
            E::Decryption(_) => {
                tracing::error!("Failed to decrypt a stored field: {}", e);
                Self::InternalError("Decryption failure".into())
            }
            E::Database(inner) => {
                tracing::error!("Database error: {}", inner);
                Self::InternalError("Database error".into())
            }
        }
    }
}

impl From<sqlx::Error> for RestError {
    fn from(e: sqlx::Error) -> Self {
        Error::Database(e).into()
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

use chrono::{DateTime, Utc};

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{NewPromotion, Promotion, PromotionStatus, PromotionUpdate};
use crate::repo::PromotionsRepo;

/// Promotion lifecycle engine.
///
/// Owns the three validation rules around promotions: the time range
/// invariant, the one-way status transition table and the status-gated field
/// editability table. Holds no entity state; current state is re-fetched
/// inside each mutating operation's transaction.
#[derive(Debug, Clone)]
pub struct PromotionService {
    pool: PgPool,
}

impl PromotionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new promotion in draft status.
    #[tracing::instrument(name = "Create a promotion", skip(self))]
    pub async fn create(&self, new_promotion: NewPromotion) -> Result<Promotion> {
        validate_time_range(new_promotion.start_at, new_promotion.end_at)?;

        let mut tx = self.pool.begin().await?;
        let promotion = PromotionsRepo::insert(&mut *tx, &new_promotion).await?;
        tx.commit().await?;

        tracing::info!(id = %promotion.id, "Promotion created");
        Ok(promotion)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<Promotion>> {
        Ok(PromotionsRepo::fetch_by_id(&self.pool, id).await?)
    }

    /// Page of promotions plus the total matching count; the count is
    /// computed independently of the pagination window.
    pub async fn list(
        &self,
        status_filter: Option<PromotionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Promotion>, i64)> {
        let total = PromotionsRepo::count(&self.pool, status_filter).await?;
        let promotions = PromotionsRepo::list(&self.pool, status_filter, limit, offset).await?;
        Ok((promotions, total))
    }

    /// Apply a partial update, honoring the editability table for the
    /// promotion's current status.
    #[tracing::instrument(name = "Update a promotion", skip(self))]
    pub async fn update(&self, id: Uuid, update: PromotionUpdate) -> Result<Promotion> {
        let mut tx = self.pool.begin().await?;

        let promotion = PromotionsRepo::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(Error::NotFound)?;

        let editable = promotion.status.editable_fields();
        for field in update.fields() {
            if !editable.contains(&field) {
                return Err(Error::NotEditable {
                    status: promotion.status,
                    field,
                });
            }
        }

        if update.touches_time_range() {
            // Validate against the effective values, supplied or stored
            let start_at = update.start_at.unwrap_or(promotion.start_at);
            let end_at = update.end_at.unwrap_or(promotion.end_at);
            validate_time_range(start_at, end_at)?;
        }

        let updated = PromotionsRepo::update_fields(&mut *tx, id, &update).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Transition a promotion to `target` per the one-way table.
    /// Requesting the current status is a no-op success.
    #[tracing::instrument(name = "Change promotion status", skip(self))]
    pub async fn change_status(&self, id: Uuid, target: PromotionStatus) -> Result<Promotion> {
        let mut tx = self.pool.begin().await?;

        let promotion = PromotionsRepo::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(Error::NotFound)?;

        if promotion.status == target {
            return Ok(promotion);
        }
        if !promotion.status.allowed_transitions().contains(&target) {
            return Err(Error::InvalidStatusTransition {
                current: promotion.status,
                target,
            });
        }

        let updated = PromotionsRepo::update_status(&mut *tx, id, target).await?;
        tx.commit().await?;

        tracing::info!(%id, from = %promotion.status, to = %target, "Promotion status changed");
        Ok(updated)
    }
}

fn validate_time_range(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Result<()> {
    if end_at <= start_at {
        return Err(Error::InvalidTimeRange);
    }
    Ok(())
}

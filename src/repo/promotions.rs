use sqlx::PgExecutor;

use uuid::Uuid;

use crate::model::{NewPromotion, Promotion, PromotionStatus, PromotionUpdate};

const COLUMNS: &str =
    "id, name, description, status, start_at, end_at, created_at, updated_at, created_by";

/// Postgres Promotion repository
pub struct PromotionsRepo;

impl PromotionsRepo {
    /// Insert a new promotion. Every promotion starts in draft.
    #[tracing::instrument(name = "Insert a new promotion record", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_promotion: &NewPromotion,
    ) -> sqlx::Result<Promotion> {
        let query = format!(
            "insert into promotions (name, description, status, start_at, end_at, created_by)
             values ($1, $2, $3, $4, $5, $6)
             returning {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(&new_promotion.name)
            .bind(&new_promotion.description)
            .bind(PromotionStatus::Draft)
            .bind(new_promotion.start_at)
            .bind(new_promotion.end_at)
            .bind(new_promotion.created_by)
            .fetch_one(executor)
            .await
    }

    pub async fn fetch_by_id<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<Promotion>> {
        let query = format!("select {COLUMNS} from promotions where id = $1");
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Persist the supplied fields only; absent fields keep their stored
    /// values. A supplied-but-null description clears the column, so it
    /// cannot ride through coalesce. `updated_at` is refreshed by the
    /// database trigger.
    #[tracing::instrument(name = "Update promotion fields", skip(executor))]
    pub async fn update_fields<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        update: &PromotionUpdate,
    ) -> sqlx::Result<Promotion> {
        let query = format!(
            "update promotions set
                 name = coalesce($2, name),
                 description = case when $3 then $4 else description end,
                 start_at = coalesce($5, start_at),
                 end_at = coalesce($6, end_at)
             where id = $1
             returning {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .bind(&update.name)
            .bind(update.description.is_some())
            .bind(update.description.as_ref().and_then(Option::as_deref))
            .bind(update.start_at)
            .bind(update.end_at)
            .fetch_one(executor)
            .await
    }

    #[tracing::instrument(name = "Update promotion status", skip(executor))]
    pub async fn update_status<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        status: PromotionStatus,
    ) -> sqlx::Result<Promotion> {
        let query = format!(
            "update promotions set status = $2 where id = $1 returning {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Page of promotions, newest first, optionally narrowed to one status.
    pub async fn list<'conn>(
        executor: impl PgExecutor<'conn>,
        status_filter: Option<PromotionStatus>,
        limit: i64,
        offset: i64,
    ) -> sqlx::Result<Vec<Promotion>> {
        let query = format!(
            "select {COLUMNS} from promotions
             where ($1::text is null or status = $1)
             order by created_at desc
             limit $2 offset $3"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(status_filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Total matching count, independent of any pagination window.
    pub async fn count<'conn>(
        executor: impl PgExecutor<'conn>,
        status_filter: Option<PromotionStatus>,
    ) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "select count(*) from promotions where ($1::text is null or status = $1)",
        )
        .bind(status_filter)
        .fetch_one(executor)
        .await
    }
}

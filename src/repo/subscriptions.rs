use sqlx::PgExecutor;

use uuid::Uuid;

use crate::model::{NewSubscription, Subscription};

const COLUMNS: &str = "id, user_id, promotion_id, is_active, metadata, created_at";

/// Postgres Subscription repository
///
/// Insert can surface a unique-constraint violation on
/// `(user_id, promotion_id)`; translating it is the service layer's job.
pub struct SubscriptionsRepo;

impl SubscriptionsRepo {
    #[tracing::instrument(name = "Insert a new subscription record", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_subscription: &NewSubscription,
    ) -> sqlx::Result<Subscription> {
        let query = format!(
            "insert into subscriptions (user_id, promotion_id, is_active, metadata)
             values ($1, $2, true, $3)
             returning {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(new_subscription.user_id)
            .bind(new_subscription.promotion_id)
            .bind(&new_subscription.metadata)
            .fetch_one(executor)
            .await
    }

    pub async fn fetch_by_id<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<Subscription>> {
        let query = format!("select {COLUMNS} from subscriptions where id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The active subscription for a user-promotion pair, if any. Used for
    /// the sequential duplicate check before insert.
    pub async fn fetch_active_pair<'conn>(
        executor: impl PgExecutor<'conn>,
        user_id: Uuid,
        promotion_id: Uuid,
    ) -> sqlx::Result<Option<Subscription>> {
        let query = format!(
            "select {COLUMNS} from subscriptions
             where user_id = $1 and promotion_id = $2 and is_active"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(promotion_id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_by_user<'conn>(
        executor: impl PgExecutor<'conn>,
        user_id: Uuid,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> sqlx::Result<Vec<Subscription>> {
        let query = format!(
            "select {COLUMNS} from subscriptions
             where user_id = $1 and ($2::boolean is null or is_active = $2)
             order by created_at desc
             limit $3 offset $4"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    pub async fn count_by_user<'conn>(
        executor: impl PgExecutor<'conn>,
        user_id: Uuid,
        is_active: Option<bool>,
    ) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "select count(*) from subscriptions
             where user_id = $1 and ($2::boolean is null or is_active = $2)",
        )
        .bind(user_id)
        .bind(is_active)
        .fetch_one(executor)
        .await
    }

    pub async fn list_by_promotion<'conn>(
        executor: impl PgExecutor<'conn>,
        promotion_id: Uuid,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> sqlx::Result<Vec<Subscription>> {
        let query = format!(
            "select {COLUMNS} from subscriptions
             where promotion_id = $1 and ($2::boolean is null or is_active = $2)
             order by created_at desc
             limit $3 offset $4"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(promotion_id)
            .bind(is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    pub async fn count_by_promotion<'conn>(
        executor: impl PgExecutor<'conn>,
        promotion_id: Uuid,
        is_active: Option<bool>,
    ) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "select count(*) from subscriptions
             where promotion_id = $1 and ($2::boolean is null or is_active = $2)",
        )
        .bind(promotion_id)
        .bind(is_active)
        .fetch_one(executor)
        .await
    }

    #[tracing::instrument(name = "Deactivate a subscription record", skip(executor))]
    pub async fn deactivate<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Subscription> {
        let query = format!(
            "update subscriptions set is_active = false where id = $1 returning {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }
}

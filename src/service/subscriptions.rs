use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{Error, NotActiveReason, Result};
use crate::model::{NewSubscription, PromotionStatus, Subscription};
use crate::repo::{PromotionsRepo, SubscriptionsRepo, UsersRepo};

/// Subscription validation service.
///
/// Enforces the cross-entity rules in front of the subscription store: the
/// user must exist, the promotion must be active and the user must not
/// already hold an active subscription to it. The duplicate check and the
/// insert cannot be atomic across concurrent callers, so the store's
/// uniqueness constraint on `(user_id, promotion_id)` acts as the backstop
/// and its violation is translated into the same duplicate error.
#[derive(Debug, Clone)]
pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Create a subscription", skip(self))]
    pub async fn create(&self, new_subscription: NewSubscription) -> Result<Subscription> {
        let user_id = new_subscription.user_id;
        let promotion_id = new_subscription.promotion_id;

        let mut tx = self.pool.begin().await?;

        if !UsersRepo::exists(&mut *tx, user_id).await? {
            return Err(Error::UserNotFound { user_id });
        }

        match PromotionsRepo::fetch_by_id(&mut *tx, promotion_id).await? {
            None => {
                return Err(Error::PromotionNotActive {
                    promotion_id,
                    reason: NotActiveReason::NotFound,
                })
            }
            Some(promotion) if promotion.status != PromotionStatus::Active => {
                return Err(Error::PromotionNotActive {
                    promotion_id,
                    reason: NotActiveReason::Status(promotion.status),
                })
            }
            Some(_) => {}
        }

        if SubscriptionsRepo::fetch_active_pair(&mut *tx, user_id, promotion_id)
            .await?
            .is_some()
        {
            return Err(Error::DuplicateSubscription {
                user_id,
                promotion_id,
            });
        }

        // The checks above and this insert race against concurrent creates;
        // a unique violation here means someone else won, and the loser gets
        // the same contract as a sequential duplicate. No retry.
        let subscription = match SubscriptionsRepo::insert(&mut *tx, &new_subscription).await {
            Ok(subscription) => subscription,
            Err(error) if is_unique_violation(&error) => {
                tracing::warn!(
                    %user_id,
                    %promotion_id,
                    "Uniqueness constraint hit on subscription insert (concurrent create)"
                );
                return Err(Error::DuplicateSubscription {
                    user_id,
                    promotion_id,
                });
            }
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        tracing::info!(id = %subscription.id, %user_id, %promotion_id, "Subscription created");
        Ok(subscription)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<Subscription>> {
        Ok(SubscriptionsRepo::fetch_by_id(&self.pool, id).await?)
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Subscription>, i64)> {
        let total = SubscriptionsRepo::count_by_user(&self.pool, user_id, is_active).await?;
        let subscriptions =
            SubscriptionsRepo::list_by_user(&self.pool, user_id, is_active, limit, offset).await?;
        Ok((subscriptions, total))
    }

    pub async fn list_by_promotion(
        &self,
        promotion_id: Uuid,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Subscription>, i64)> {
        let total =
            SubscriptionsRepo::count_by_promotion(&self.pool, promotion_id, is_active).await?;
        let subscriptions =
            SubscriptionsRepo::list_by_promotion(&self.pool, promotion_id, is_active, limit, offset)
                .await?;
        Ok((subscriptions, total))
    }

    /// Flip `is_active` to false, exactly once. Repeat calls are errors so
    /// client bugs surface instead of being silently absorbed.
    #[tracing::instrument(name = "Deactivate a subscription", skip(self))]
    pub async fn deactivate(&self, subscription_id: Uuid) -> Result<Subscription> {
        let mut tx = self.pool.begin().await?;

        let subscription = SubscriptionsRepo::fetch_by_id(&mut *tx, subscription_id)
            .await?
            .ok_or(Error::NotFound)?;

        if !subscription.is_active {
            return Err(Error::AlreadyInactive { subscription_id });
        }

        let deactivated = SubscriptionsRepo::deactivate(&mut *tx, subscription_id).await?;
        tx.commit().await?;

        tracing::info!(id = %subscription_id, "Subscription deactivated");
        Ok(deactivated)
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(e) if e.is_unique_violation())
}

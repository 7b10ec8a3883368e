use actix_web::dev::HttpServiceFactory;
use actix_web::{get, patch, post, web, HttpResponse, Responder};

use serde::Deserialize;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::{NewSubscription, Subscription};
use crate::service::SubscriptionService;

use super::{ListBody, Page};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    user_id: Uuid,
    promotion_id: Uuid,
    metadata: Option<serde_json::Value>,
}

/// Listing requires exactly one of `user_id` or `promotion_id` as the fixed
/// filter key; `is_active` narrows either listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    user_id: Option<Uuid>,
    promotion_id: Option<Uuid>,
    is_active: Option<bool>,
    #[serde(default = "Page::default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

impl ListQuery {
    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[tracing::instrument(name = "Create a subscription", skip(service))]
#[post("")]
async fn create(
    service: web::Data<SubscriptionService>,
    body: web::Json<CreateBody>,
) -> RestResult<impl Responder> {
    let body = body.into_inner();

    let subscription = service
        .create(NewSubscription {
            user_id: body.user_id,
            promotion_id: body.promotion_id,
            metadata: body.metadata,
        })
        .await?;

    Ok(HttpResponse::Created().json(subscription))
}

#[tracing::instrument(name = "Fetch a subscription", skip(service))]
#[get("/{id}")]
async fn fetch(
    service: web::Data<SubscriptionService>,
    id: web::Path<Uuid>,
) -> RestResult<impl Responder> {
    let subscription = service
        .fetch(id.into_inner())
        .await?
        .ok_or_else(|| RestError::NotFound("Subscription not found".into()))?;

    Ok(HttpResponse::Ok().json(subscription))
}

#[tracing::instrument(name = "List subscriptions", skip(service))]
#[get("")]
async fn list(
    service: web::Data<SubscriptionService>,
    query: web::Query<ListQuery>,
) -> RestResult<impl Responder> {
    let query = query.into_inner();
    query.page().validate()?;

    let (items, total) = match (query.user_id, query.promotion_id) {
        (Some(user_id), None) => {
            service
                .list_by_user(user_id, query.is_active, query.limit, query.offset)
                .await?
        }
        (None, Some(promotion_id)) => {
            service
                .list_by_promotion(promotion_id, query.is_active, query.limit, query.offset)
                .await?
        }
        (None, None) => {
            return Err(RestError::ParseError(
                "Must provide either user_id or promotion_id".into(),
            ))
        }
        (Some(_), Some(_)) => {
            return Err(RestError::ParseError(
                "Cannot filter by both user_id and promotion_id simultaneously".into(),
            ))
        }
    };

    Ok(HttpResponse::Ok().json(ListBody::<Subscription> { items, total }))
}

#[tracing::instrument(name = "Deactivate a subscription", skip(service))]
#[patch("/{id}/deactivate")]
async fn deactivate(
    service: web::Data<SubscriptionService>,
    id: web::Path<Uuid>,
) -> RestResult<impl Responder> {
    let subscription = service.deactivate(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(subscription))
}

/// Subscriptions API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/subscriptions")
        .service(create)
        .service(list)
        .service(fetch)
        .service(deactivate)
}

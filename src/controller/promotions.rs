use actix_web::dev::HttpServiceFactory;
use actix_web::{get, patch, post, web, HttpResponse, Responder};

use serde::Deserialize;

use chrono::{DateTime, Utc};

use uuid::Uuid;

use crate::auth::Principal;
use crate::error::{RestError, RestResult};
use crate::model::{NewPromotion, Promotion, PromotionStatus, PromotionUpdate};
use crate::service::PromotionService;

use super::{ListBody, Page};

const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    name: String,
    description: Option<String>,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusBody {
    status: PromotionStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<PromotionStatus>,
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

fn validate_name(name: &str) -> RestResult<()> {
    if name.trim().is_empty() {
        return Err(RestError::ParseError("name cannot be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(RestError::ParseError("name too long".into()));
    }
    Ok(())
}

#[tracing::instrument(name = "Create a promotion", skip(service))]
#[post("")]
async fn create(
    service: web::Data<PromotionService>,
    body: web::Json<CreateBody>,
) -> RestResult<impl Responder> {
    let body = body.into_inner();
    validate_name(&body.name)?;

    let new_promotion = NewPromotion {
        name: body.name,
        description: body.description,
        start_at: body.start_at,
        end_at: body.end_at,
        // TODO: Replace with the authenticated user once auth exists
        created_by: Principal::placeholder().user_id(),
    };

    let promotion = service.create(new_promotion).await?;

    Ok(HttpResponse::Created().json(promotion))
}

#[tracing::instrument(name = "Fetch a promotion", skip(service))]
#[get("/{id}")]
async fn fetch(
    service: web::Data<PromotionService>,
    id: web::Path<Uuid>,
) -> RestResult<impl Responder> {
    let promotion = service
        .fetch(id.into_inner())
        .await?
        .ok_or_else(|| RestError::NotFound("Promotion not found".into()))?;

    Ok(HttpResponse::Ok().json(promotion))
}

#[tracing::instrument(name = "List promotions", skip(service))]
#[get("")]
async fn list(
    service: web::Data<PromotionService>,
    query: web::Query<ListQuery>,
) -> RestResult<impl Responder> {
    let query = query.into_inner();
    query.page().validate()?;

    let (items, total) = service
        .list(query.status, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(ListBody::<Promotion> { items, total }))
}

#[tracing::instrument(name = "Update a promotion", skip(service))]
#[patch("/{id}")]
async fn update(
    service: web::Data<PromotionService>,
    id: web::Path<Uuid>,
    body: web::Json<PromotionUpdate>,
) -> RestResult<impl Responder> {
    let update = body.into_inner();
    if let Some(name) = &update.name {
        validate_name(name)?;
    }

    let promotion = service.update(id.into_inner(), update).await?;

    Ok(HttpResponse::Ok().json(promotion))
}

#[tracing::instrument(name = "Change promotion status", skip(service))]
#[post("/{id}/status")]
async fn change_status(
    service: web::Data<PromotionService>,
    id: web::Path<Uuid>,
    body: web::Json<ChangeStatusBody>,
) -> RestResult<impl Responder> {
    let promotion = service.change_status(id.into_inner(), body.status).await?;

    Ok(HttpResponse::Ok().json(promotion))
}

/// Promotions API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/promotions")
        .service(create)
        .service(list)
        .service(fetch)
        .service(update)
        .service(change_status)
}

use actix_web::dev::HttpServiceFactory;
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::{EmailAddress, FullName};
use crate::error::{RestError, RestResult};
use crate::service::UserService;

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
}

/// Outward user shape: contact fields in plaintext, encrypted columns never
/// leave the service layer.
#[derive(Debug, Serialize)]
pub struct UserBody {
    id: Uuid,
    full_name: String,
    email: String,
    phone: Option<String>,
}

#[tracing::instrument(name = "Create a user", skip(service, body))]
#[post("")]
async fn create(
    service: web::Data<UserService>,
    body: web::Json<CreateBody>,
) -> RestResult<impl Responder> {
    let body = body.into_inner();

    let full_name = FullName::compose(&body.first_name, &body.last_name)
        .map_err(RestError::ParseError)?;
    let email: EmailAddress = body.email.parse().map_err(RestError::ParseError)?;

    let user = service.create(full_name, email.clone(), body.phone.clone()).await?;

    Ok(HttpResponse::Created().json(UserBody {
        id: user.id,
        full_name: user.full_name,
        email: email.to_string(),
        phone: body.phone,
    }))
}

#[tracing::instrument(name = "Fetch a user", skip(service))]
#[get("/{id}")]
async fn fetch(
    service: web::Data<UserService>,
    id: web::Path<Uuid>,
) -> RestResult<impl Responder> {
    let contact = service
        .fetch(id.into_inner())
        .await?
        .ok_or_else(|| RestError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(UserBody {
        id: contact.user.id,
        full_name: contact.user.full_name,
        email: contact.email,
        phone: contact.phone,
    }))
}

/// Users API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/users").service(create).service(fetch)
}

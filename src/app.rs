use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::{promotions, subscriptions, users};
use crate::crypto::Cipher;
use crate::service::{PromotionService, SubscriptionService, UserService};

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, pool: PgPool, cipher: Cipher) -> anyhow::Result<Server> {
    // Services are constructed once and shared; all per-request state lives
    // in the store
    let promotion_service = web::Data::new(PromotionService::new(pool.clone()));
    let subscription_service = web::Data::new(SubscriptionService::new(pool.clone()));
    let user_service = web::Data::new(UserService::new(pool, cipher));

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(promotion_service.clone())
            .app_data(subscription_service.clone())
            .app_data(user_service.clone())
            .service(health_check)
            .service(users::scope())
            .service(promotions::scope())
            .service(subscriptions::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

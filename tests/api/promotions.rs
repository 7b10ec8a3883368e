use chrono::{Duration, Utc};

use reqwest::StatusCode;

use serde_json::json;

use sqlx::PgPool;

use uuid::Uuid;

use crate::helpers::{body_of, promotion_body, TestApp};

#[sqlx::test(migrations = "./migrations")]
async fn create_returns_a_draft_promotion(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let start_at = Utc::now();
    let res = app
        .promotion_create(&promotion_body("Sale", start_at, start_at + Duration::hours(1)))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_of(res).await;
    assert_eq!(body["status"], "draft");
    assert_eq!(body["name"], "Sale");

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn create_rejects_inverted_time_range(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let start_at = Utc::now();
    let res = app
        .promotion_create(&promotion_body("Sale", start_at, start_at))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn status_flow_is_one_way(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.seed_promotion("Sale").await;

    let res = app
        .promotion_change_status(id, "active")
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_of(res).await["status"], "active");

    // Going back to draft is refused
    let res = app
        .promotion_change_status(id, "draft")
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Still active
    let res = app
        .promotion_fetch(id)
        .await
        .expect("Failed to execute request");
    assert_eq!(body_of(res).await["status"], "active");

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn draft_cannot_skip_to_ended(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.seed_promotion("Sale").await;

    let res = app
        .promotion_change_status(id, "ended")
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn active_promotions_reject_time_range_edits(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.seed_active_promotion("Sale").await;

    let res = app
        .promotion_update(id, &json!({"name": "Renamed", "description": "New copy"}))
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_of(res).await["name"], "Renamed");

    let res = app
        .promotion_update(id, &json!({"start_at": Utc::now()}))
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn ended_promotions_reject_all_edits(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.seed_active_promotion("Sale").await;
    let res = app
        .promotion_change_status(id, "ended")
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .promotion_update(id, &json!({"name": "Too late"}))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn null_description_is_a_supplied_value(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    // On a draft it clears the stored description
    let id = app.seed_promotion("Sale").await;
    let res = app
        .promotion_update(id, &json!({"description": null}))
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_of(res).await["description"], serde_json::Value::Null);

    // On an ended promotion the same payload is refused, not ignored
    let id = app.seed_active_promotion("Over").await;
    let res = app
        .promotion_change_status(id, "ended")
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .promotion_update(id, &json!({"description": null}))
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn update_of_unknown_promotion_is_404(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .promotion_update(Uuid::new_v4(), &json!({"name": "Ghost"}))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn list_paginates_with_an_independent_total(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    for name in ["First", "Second", "Third"] {
        app.seed_promotion(name).await;
    }

    let res = app
        .promotion_list("limit=2&offset=0")
        .await
        .expect("Failed to execute request");
    let body = body_of(res).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 3);

    let res = app
        .promotion_list("limit=2&offset=2")
        .await
        .expect("Failed to execute request");
    let body = body_of(res).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 3);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_status(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.seed_promotion("Draft one").await;
    app.seed_active_promotion("Live one").await;

    let res = app
        .promotion_list("status=active")
        .await
        .expect("Failed to execute request");
    let body = body_of(res).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Live one");

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn out_of_range_pagination_is_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for query in ["limit=0", "limit=1001", "offset=-1"] {
        let res = app
            .promotion_list(query)
            .await
            .expect("Failed to execute request");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "query: {}", query);
    }

    Ok(())
}

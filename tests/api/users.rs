use reqwest::StatusCode;

use serde_json::json;

use sqlx::PgPool;

use uuid::Uuid;

use crate::helpers::{body_of, id_of, TestApp};

#[sqlx::test(migrations = "./migrations")]
async fn create_composes_name_and_echoes_plaintext_email(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .user_create(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "+15551234567",
        }))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_of(res).await;
    assert_eq!(body["full_name"], "Ada Lovelace");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["phone"], "+15551234567");

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn stored_contact_fields_are_encrypted(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .user_create(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
        }))
        .await
        .expect("Failed to execute request");
    let id = id_of(res).await;

    let encrypted_email: String =
        sqlx::query_scalar("select encrypted_email from users where id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await?;

    assert_ne!(encrypted_email, "ada@example.com");
    assert!(!encrypted_email.contains("example.com"));

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn fetch_round_trips_the_decrypted_email(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .user_create(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "Ada@Example.COM",
        }))
        .await
        .expect("Failed to execute request");
    let id = id_of(res).await;

    let res = app.user_fetch(id).await.expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_of(res).await;

    // Normalized on the way in, decrypted on the way out
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["phone"], serde_json::Value::Null);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn invalid_payloads_are_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let test_cases = [
        (
            "malformed email",
            json!({"first_name": "Ada", "last_name": "Lovelace", "email": "not-an-email"}),
        ),
        (
            "empty first name",
            json!({"first_name": "", "last_name": "Lovelace", "email": "ada@example.com"}),
        ),
        (
            "hostile name characters",
            json!({"first_name": "Ada<script>", "last_name": "Lovelace", "email": "ada@example.com"}),
        ),
    ];

    for (desc, body) in test_cases {
        let res = app
            .user_create(&body)
            .await
            .expect("Failed to execute request");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "case: {}", desc);
    }

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn fetch_of_the_seeded_system_user_is_404(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    // The migration-seeded attribution row never leaves the service layer
    let res = app
        .user_fetch(Uuid::from_u128(1))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn fetch_of_unknown_user_is_404(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .user_fetch(Uuid::new_v4())
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

use std::net::TcpListener;

use chrono::{DateTime, Duration, Utc};

use fernet::Fernet;

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use serde_json::json;

use sqlx::PgPool;

use uuid::Uuid;

use promopulse::app;
use promopulse::crypto::Cipher;

pub struct TestApp {
    addr: String,

    pub client: Client,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let cipher = {
            let key = Secret::new(Fernet::generate_key());
            Cipher::new(&key).expect("Failed to create PII cipher")
        };

        let server = app::run(listener, pool.clone(), cipher).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self { addr, client }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn user_create(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "users")
            .json(body)
            .send()
            .await
    }

    pub async fn user_fetch(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("users/{}", id))
            .send()
            .await
    }

    pub async fn promotion_create(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "promotions")
            .json(body)
            .send()
            .await
    }

    pub async fn promotion_fetch(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("promotions/{}", id))
            .send()
            .await
    }

    pub async fn promotion_list(&self, query: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("promotions?{}", query))
            .send()
            .await
    }

    pub async fn promotion_update(
        &self,
        id: Uuid,
        body: &serde_json::Value,
    ) -> reqwest::Result<Response> {
        self.request(Method::PATCH, &format!("promotions/{}", id))
            .json(body)
            .send()
            .await
    }

    pub async fn promotion_change_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, &format!("promotions/{}/status", id))
            .json(&json!({ "status": status }))
            .send()
            .await
    }

    pub async fn subscription_create(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "subscriptions")
            .json(body)
            .send()
            .await
    }

    pub async fn subscription_list(&self, query: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("subscriptions?{}", query))
            .send()
            .await
    }

    pub async fn subscription_deactivate(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::PATCH, &format!("subscriptions/{}/deactivate", id))
            .send()
            .await
    }

    /// POST /users with generated data, returning the new user's id.
    pub async fn seed_user(&self) -> Uuid {
        use fake::faker::internet::en::SafeEmail;
        use fake::faker::name::en::{FirstName, LastName};
        use fake::Fake;

        let body = json!({
            "first_name": FirstName().fake::<String>(),
            "last_name": LastName().fake::<String>(),
            "email": SafeEmail().fake::<String>(),
        });

        let res = self
            .user_create(&body)
            .await
            .expect("Failed to execute request");
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);

        id_of(res).await
    }

    /// POST /promotions with a one-hour window starting now.
    pub async fn seed_promotion(&self, name: &str) -> Uuid {
        let start_at = Utc::now();
        let res = self
            .promotion_create(&promotion_body(name, start_at, start_at + Duration::hours(1)))
            .await
            .expect("Failed to execute request");
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);

        id_of(res).await
    }

    /// Seeded promotion moved to active so it accepts subscriptions.
    pub async fn seed_active_promotion(&self, name: &str) -> Uuid {
        let id = self.seed_promotion(name).await;
        let res = self
            .promotion_change_status(id, "active")
            .await
            .expect("Failed to execute request");
        assert!(res.status().is_success());
        id
    }
}

pub fn promotion_body(
    name: &str,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
) -> serde_json::Value {
    json!({
        "name": name,
        "description": "Test promotion",
        "start_at": start_at,
        "end_at": end_at,
    })
}

pub async fn body_of(res: Response) -> serde_json::Value {
    res.json().await.expect("Failed to parse response body")
}

pub async fn id_of(res: Response) -> Uuid {
    let body = body_of(res).await;
    body["id"]
        .as_str()
        .expect("Response body has no id")
        .parse()
        .expect("Response id is not a UUID")
}

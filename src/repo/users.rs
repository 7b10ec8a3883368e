use sqlx::PgExecutor;

use uuid::Uuid;

use crate::model::{NewUser, User};

const COLUMNS: &str = "id, full_name, encrypted_email, encrypted_phone, created_at, updated_at";

/// Postgres User repository
pub struct UsersRepo;

impl UsersRepo {
    #[tracing::instrument(name = "Insert a new user record", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_user: &NewUser,
    ) -> sqlx::Result<User> {
        let query = format!(
            "insert into users (full_name, encrypted_email, encrypted_phone)
             values ($1, $2, $3)
             returning {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(new_user.full_name.as_ref())
            .bind(&new_user.encrypted_email)
            .bind(&new_user.encrypted_phone)
            .fetch_one(executor)
            .await
    }

    pub async fn fetch_by_id<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<User>> {
        let query = format!("select {COLUMNS} from users where id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn exists<'conn>(executor: impl PgExecutor<'conn>, id: Uuid) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>("select exists (select 1 from users where id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }
}

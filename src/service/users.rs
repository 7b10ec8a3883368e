use sqlx::PgPool;

use uuid::Uuid;

use crate::auth::Principal;
use crate::crypto::Cipher;
use crate::domain::{EmailAddress, FullName};
use crate::error::Result;
use crate::model::{NewUser, User};
use crate::repo::UsersRepo;

/// A user together with its decrypted contact fields.
#[derive(Debug)]
pub struct UserContact {
    pub user: User,
    pub email: String,
    pub phone: Option<String>,
}

/// User service: composes the stored name and runs contact fields through
/// the PII cipher in both directions.
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    cipher: Cipher,
}

impl UserService {
    pub fn new(pool: PgPool, cipher: Cipher) -> Self {
        Self { pool, cipher }
    }

    #[tracing::instrument(name = "Create a user", skip(self, email, phone))]
    pub async fn create(
        &self,
        full_name: FullName,
        email: EmailAddress,
        phone: Option<String>,
    ) -> Result<User> {
        let new_user = NewUser {
            encrypted_email: self.cipher.encrypt(email.as_ref()),
            encrypted_phone: self.cipher.encrypt_opt(phone.as_deref()),
            full_name,
        };

        let mut tx = self.pool.begin().await?;
        let user = UsersRepo::insert(&mut *tx, &new_user).await?;
        tx.commit().await?;

        tracing::info!(id = %user.id, "User created");
        Ok(user)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<UserContact>> {
        // The seeded system principal only backs write attribution; it holds
        // no real contact data and is not exposed as a user
        if id == Principal::placeholder().user_id() {
            return Ok(None);
        }

        let Some(user) = UsersRepo::fetch_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        let email = self.cipher.decrypt(&user.encrypted_email)?;
        let phone = self.cipher.decrypt_opt(user.encrypted_phone.as_deref())?;

        Ok(Some(UserContact { user, email, phone }))
    }
}

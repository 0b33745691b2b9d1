use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User};
use crate::database::store::{StoreResult, UserStore};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password, created_at";

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(self.pool())
        .await
        .map_err(|e| DatabaseError::conflict_or(e, "email already exists"))?;

        Ok(id)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_one(self.pool())
            .await
            .map_err(|e| DatabaseError::not_found_or(e, "user not found"))
    }

    async fn get_user_by_id(&self, id: Uuid) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(|e| DatabaseError::not_found_or(e, "user not found"))
    }
}

// handlers/public/auth/register.rs - POST /api/v1/register

use axum::extract::State;
use serde::Serialize;
use uuid::Uuid;

use crate::api::ValidatedJson;
use crate::auth::hash_password;
use crate::database::models::{NewUser, RegisterUserPayload};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUserPayload>,
) -> ApiResult<RegisterResponse> {
    match state.store.get_user_by_email(&payload.email).await {
        Ok(_) => return Err(email_taken(&payload.email)),
        Err(DatabaseError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let password_hash = hash_password(&payload.password)?;

    // A concurrent registration can still win; the unique index reports it as Conflict.
    let user_id = state
        .store
        .create_user(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email.clone(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            DatabaseError::Conflict(_) => email_taken(&payload.email),
            other => other.into(),
        })?;

    tracing::info!("Registered user {}", user_id);
    Ok(ApiResponse::created(RegisterResponse { user_id }))
}

fn email_taken(email: &str) -> ApiError {
    ApiError::conflict(format!("user with email {} already exists", email))
}

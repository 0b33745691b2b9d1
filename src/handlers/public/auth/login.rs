// handlers/public/auth/login.rs - POST /api/v1/login

use axum::extract::State;
use serde::Serialize;

use crate::api::ValidatedJson;
use crate::auth::verify_password;
use crate::database::models::LoginUserPayload;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Unknown email and wrong password both answer 404 with the same message.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginUserPayload>,
) -> ApiResult<LoginResponse> {
    let user = match state.store.get_user_by_email(&payload.email).await {
        Ok(user) => user,
        Err(DatabaseError::NotFound(_)) => return Err(invalid_credentials()),
        Err(e) => return Err(e.into()),
    };

    if !verify_password(&payload.password, &user.password) {
        tracing::info!("Failed login for user {}", user.id);
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(user.id)?;
    tracing::info!("User {} logged in", user.id);

    Ok(ApiResponse::success(LoginResponse { token }))
}

fn invalid_credentials() -> ApiError {
    ApiError::not_found("not found, invalid email or password")
}

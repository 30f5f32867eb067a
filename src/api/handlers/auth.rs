/*
 * Responsibility
 * - /auth 系 handler
 * - DTO validation → AuthService 呼び出し → {user: {...}} 応答
 * - validation 失敗時は service を呼ばずに 400 を返す
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{
            auth::{AuthResponse, LoginRequest, RegisterRequest, UserBody},
            validation_error,
        },
        extractors::json::ApiJson,
    },
    error::AppError,
    services::auth::auth_service::UserAccount,
    state::AppState,
};

fn account_to_response(account: UserAccount) -> AuthResponse {
    AuthResponse {
        user: UserBody {
            id: account.id,
            email: account.email,
            name: account.name,
        },
    }
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate().map_err(validation_error)?;

    let account = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(account_to_response(account)))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate().map_err(validation_error)?;

    let account = state
        .auth
        .register(&req.email, &req.password, req.name.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(account_to_response(account))))
}

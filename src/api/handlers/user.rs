/*
 * Responsibility
 * - /user 系 handler (profile 取得・部分更新)
 * - user_id は String で受けて UUID へ変換 (失敗は VALIDATION_ERROR)
 */
use axum::{
    Json,
    extract::{Query, State},
};
use uuid::Uuid;

use crate::{
    api::{
        dto::{
            single_violation,
            user::{ProfileBody, ProfileQuery, ProfileResponse, UpdateProfileRequest},
            validation_error,
        },
        extractors::json::ApiJson,
    },
    error::AppError,
    services::user_service::UserProfile,
    state::AppState,
};

fn profile_to_response(profile: UserProfile) -> ProfileResponse {
    ProfileResponse {
        user: ProfileBody {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            first_name: profile.first_name,
            last_name: profile.last_name,
        },
    }
}

fn parse_user_id(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| single_violation("user_id", "must be a UUID"))
}

pub async fn profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = query
        .user_id
        .as_deref()
        .ok_or_else(|| single_violation("user_id", "is required"))?;
    let user_id = parse_user_id(user_id)?;

    let profile = state
        .users
        .profile(user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(profile_to_response(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    req.validate().map_err(validation_error)?;
    let user_id = parse_user_id(&req.user_id)?;

    let profile = state
        .users
        .update_profile(
            user_id,
            req.name.as_deref(),
            req.first_name.as_deref(),
            req.last_name.as_deref(),
        )
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(profile_to_response(profile)))
}

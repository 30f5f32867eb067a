/*
 * Responsibility
 * - /content 系 CRUD handler
 * - Path の :content_id は公開 ID → extractor で復号して内部 ID で受ける
 * - repo が None/false を返したら handler が NOT_FOUND に引き上げる
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::{
        dto::{
            content::{
                ContentResponse, CreateContentRequest, ListContentQuery, UpdateContentRequest,
            },
            single_violation, validation_error,
        },
        extractors::{json::ApiJson, public_id::PublicContentId},
    },
    error::AppError,
    repos::content_repo::ContentRow,
    state::AppState,
};

fn row_to_response(state: &AppState, row: ContentRow) -> Result<ContentResponse, AppError> {
    let public_id = state.id_codec.encode(row.content_id)?;

    Ok(ContentResponse {
        id: public_id,
        title: row.title,
        body: row.body,
        published: row.published,
        author_id: row.author_id.to_string(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn parse_author_id(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| single_violation("author_id", "must be a UUID"))
}

pub async fn list_content(
    State(state): State<AppState>,
    Query(query): Query<ListContentQuery>,
) -> Result<Json<Vec<ContentResponse>>, AppError> {
    let author_id = query
        .author_id
        .as_deref()
        .ok_or_else(|| single_violation("author_id", "is required"))?;
    let author_id = parse_author_id(author_id)?;

    let rows = state.content.list_by_author(author_id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }
    Ok(Json(res))
}

pub async fn create_content(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), AppError> {
    req.validate().map_err(validation_error)?;
    let author_id = parse_author_id(&req.author_id)?;

    let row = state
        .content
        .create(
            &req.title,
            req.body.as_deref(),
            req.published.unwrap_or(false),
            author_id,
        )
        .await?;

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_content(
    State(state): State<AppState>,
    content_id: PublicContentId,
) -> Result<Json<ContentResponse>, AppError> {
    let row = state
        .content
        .get(content_id.id)
        .await?
        .ok_or(AppError::not_found("content"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_content(
    State(state): State<AppState>,
    content_id: PublicContentId,
    ApiJson(req): ApiJson<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    req.validate().map_err(validation_error)?;

    // body tri-state (see UpdateContentRequest)
    let body: Option<Option<&str>> = req.body.as_ref().map(|inner| inner.as_deref());

    let row = state
        .content
        .update(content_id.id, req.title.as_deref(), body, req.published)
        .await?
        .ok_or(AppError::not_found("content"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_content(
    State(state): State<AppState>,
    content_id: PublicContentId,
) -> Result<StatusCode, AppError> {
    let deleted = state.content.delete(content_id.id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("content"))
    }
}

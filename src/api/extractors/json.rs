/*
 * Responsibility
 * - Json extractor の rejection を error envelope に揃える
 * - handler は ApiJson<T> で受けるだけで 400 が統一形式になる
 */
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};

use crate::error::AppError;

pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text(), None))?;
        Ok(Self(value))
    }
}

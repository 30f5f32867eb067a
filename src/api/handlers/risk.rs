/*
 * Responsibility
 * - /risk-assessment 系 handler
 * - 照会 payload の validation → 評価エンジンへ委譲 → 結果をそのまま返す
 * - エンジン側の失敗は 500 (詳細は漏らさない)
 */
use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    api::{
        dto::{risk::EvaluateRiskRequest, validation_error},
        extractors::json::ApiJson,
    },
    error::AppError,
    state::AppState,
};

pub async fn evaluate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EvaluateRiskRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate().map_err(validation_error)?;

    let inquiry = serde_json::to_value(&req).map_err(|_| AppError::Internal)?;
    let evaluation = state.risk.evaluate(inquiry).await?;

    Ok(Json(evaluation))
}

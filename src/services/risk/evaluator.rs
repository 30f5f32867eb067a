//! Risk evaluator interface used by the risk-assessment handlers.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Result type for evaluator calls.
pub type RiskResult<T> = Result<T, RiskError>;

/// Evaluator-layer errors (transport/status/body).
///
/// Kept independent from `AppError` so callers decide how to fail; the
/// handlers collapse all of these into a 500 without leaking upstream
/// detail.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("risk evaluator connection error: {0}")]
    UpstreamConnection(String),
    #[error("risk evaluator returned status {0}")]
    UpstreamStatus(u16),
    #[error("risk evaluator returned an invalid body: {0}")]
    InvalidBody(String),
}

/// A minimal evaluator interface.
///
/// The credit-bureau side of this call is an external collaborator; this
/// trait pins down the only part we depend on: send a validated inquiry,
/// get a JSON evaluation back.
///
/// Implementations must be cheap to share (`Arc` them into `AppState`).
#[async_trait]
pub trait RiskEvaluator: Send + Sync + 'static {
    // Returns the evaluator backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Submit an inquiry, return the evaluation verbatim.
    async fn evaluate(&self, inquiry: Value) -> RiskResult<Value>;
}

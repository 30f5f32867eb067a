//! HTTP-backed risk evaluator.
//!
//! Speaks the upstream evaluator's JSON-over-HTTP contract and nothing
//! else. Non-2xx and undecodable bodies are surfaced as typed errors so
//! the handler can collapse them without leaking upstream detail.
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::services::risk::evaluator::{RiskError, RiskEvaluator, RiskResult};

#[derive(Clone, Debug)]
pub struct HttpRiskEvaluator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpRiskEvaluator {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, RiskError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RiskError::UpstreamConnection(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RiskEvaluator for HttpRiskEvaluator {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn evaluate(&self, inquiry: Value) -> RiskResult<Value> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&inquiry)
            .send()
            .await
            .map_err(|e| RiskError::UpstreamConnection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RiskError::UpstreamStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RiskError::InvalidBody(e.to_string()))
    }
}

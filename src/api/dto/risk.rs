/*
 * Responsibility
 * - risk-assessment 系 DTO
 * - 検証済みの照会 payload をそのまま評価エンジンに渡す (結果の形はエンジン側)
 */
use serde::{Deserialize, Serialize};

use crate::api::dto::FieldError;

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateRiskRequest {
    pub national_id: String,
    pub mobile: Option<String>,
    pub requested_amount: Option<i64>,
}

impl EvaluateRiskRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Vec::new();
        if !is_national_id(&self.national_id) {
            violations.push(FieldError {
                field: "national_id",
                message: "must be 10 digits",
            });
        }
        if let Some(mobile) = &self.mobile
            && !is_mobile(mobile)
        {
            violations.push(FieldError {
                field: "mobile",
                message: "must be an 11-digit number starting with 09",
            });
        }
        if let Some(amount) = self.requested_amount
            && amount <= 0
        {
            violations.push(FieldError {
                field: "requested_amount",
                message: "must be positive",
            });
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn is_national_id(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_mobile(value: &str) -> bool {
    value.len() == 11 && value.starts_with("09") && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(national_id: &str) -> EvaluateRiskRequest {
        EvaluateRiskRequest {
            national_id: national_id.into(),
            mobile: None,
            requested_amount: None,
        }
    }

    #[test]
    fn ten_digit_national_id_passes() {
        assert!(request("0012345678").validate().is_ok());
    }

    #[test]
    fn short_or_non_numeric_national_id_fails() {
        for bad in ["", "123", "00123456789", "00123456۷۸"] {
            let violations = request(bad).validate().unwrap_err();
            assert_eq!(violations[0].field, "national_id", "{bad:?}");
        }
    }

    #[test]
    fn mobile_must_match_the_local_format() {
        let mut req = request("0012345678");
        req.mobile = Some("09121234567".into());
        assert!(req.validate().is_ok());

        req.mobile = Some("9121234567".into());
        assert_eq!(req.validate().unwrap_err()[0].field, "mobile");
    }
}

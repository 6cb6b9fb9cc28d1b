use crate::prediction::PredictionResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a prediction submission did not produce a usable forecast.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmissionError {
    /// The request never got an HTTP response (connection failure, timeout, abort)
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint rejected the request body
    #[error("Validation error ({status}): {detail}")]
    Validation { status: u16, detail: String },

    /// Any other non-success HTTP status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A success status whose body is not a prediction
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl SubmissionError {
    /// Short label used in logs and alert headings.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Network(_) => "network",
            SubmissionError::Validation { .. } => "validation",
            SubmissionError::Server { .. } => "server",
            SubmissionError::UnexpectedShape(_) => "unexpected_shape",
        }
    }

    /// Message suitable for showing to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Network(_) => {
                "Could not reach the prediction service. Check your connection and try again."
                    .to_string()
            }
            SubmissionError::Validation { detail, .. } => {
                format!("The prediction service rejected the input: {}", detail)
            }
            SubmissionError::Server { status, .. } => {
                format!("The prediction service failed (HTTP {}). Please try again.", status)
            }
            SubmissionError::UnexpectedShape(_) => {
                "The prediction service returned an unexpected response.".to_string()
            }
        }
    }
}

/// Result of one submission; `Ok` is the success case.
pub type SubmissionOutcome = Result<PredictionResponse, SubmissionError>;

const MAX_DETAIL_CHARS: usize = 200;

/// Maps an HTTP status and raw body text to a submission outcome.
pub fn classify_response(status: u16, body: &str) -> SubmissionOutcome {
    if (200..300).contains(&status) {
        return serde_json::from_str::<PredictionResponse>(body).map_err(|e| {
            tracing::warn!(status, error = %e, "prediction response did not match expected shape");
            SubmissionError::UnexpectedShape(e.to_string())
        });
    }

    let detail = error_detail(body);
    tracing::warn!(status, detail = %detail, "prediction request failed");
    match status {
        400 | 422 => Err(SubmissionError::Validation { status, detail }),
        _ => Err(SubmissionError::Server {
            status,
            message: detail,
        }),
    }
}

// FastAPI-style bodies carry `detail` as a string or a list of `{loc, msg}` items.
fn error_detail(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let detail = parsed.as_ref().and_then(|value| match value.get("detail") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .and_then(|last| last.as_str());
                    Some(match field {
                        Some(field) => format!("{}: {}", field, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => value
            .get("error")
            .and_then(|e| e.as_str())
            .map(|s| s.to_string()),
    });

    let text = detail.unwrap_or_else(|| body.trim().to_string());
    if text.is_empty() {
        return "no details provided".to_string();
    }
    if text.chars().count() > MAX_DETAIL_CHARS {
        let truncated: String = text.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{}…", truncated)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_BODY: &str = r#"{"predicted_quantity":120.5,"safety_stock":30.2,"reorder_point":45.7,"inventory_suggestion":"Reorder soon"}"#;

    #[test]
    fn test_success_status_with_prediction_body() {
        let response = classify_response(200, OK_BODY).unwrap();
        assert_eq!(response.predicted_quantity, 120.5);
        assert_eq!(response.safety_stock, 30.2);
        assert_eq!(response.reorder_point, 45.7);
        assert_eq!(response.inventory_suggestion, "Reorder soon");
    }

    #[test]
    fn test_success_status_with_wrong_shape() {
        let err = classify_response(200, r#"{"predicted_quantity":"lots"}"#).unwrap_err();
        assert_eq!(err.kind(), "unexpected_shape");

        let err = classify_response(201, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, SubmissionError::UnexpectedShape(_)));
    }

    #[test]
    fn test_unprocessable_entity_is_validation_error() {
        let body = r#"{"detail":[{"loc":["body","market_share"],"msg":"value is not a valid integer","type":"type_error.integer"}]}"#;
        let err = classify_response(422, body).unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Validation {
                status: 422,
                detail: "market_share: value is not a valid integer".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_request_with_string_detail() {
        let err = classify_response(400, r#"{"detail":"Unknown region"}"#).unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Validation {
                status: 400,
                detail: "Unknown region".to_string(),
            }
        );
    }

    #[test]
    fn test_server_error_uses_plain_body() {
        let err = classify_response(503, "Service Unavailable\n").unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Server {
                status: 503,
                message: "Service Unavailable".to_string(),
            }
        );
        assert!(err.user_message().contains("HTTP 503"));
    }

    #[test]
    fn test_empty_error_body() {
        let err = classify_response(500, "").unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Server {
                status: 500,
                message: "no details provided".to_string(),
            }
        );
    }

    #[test]
    fn test_long_error_body_is_truncated() {
        let body = "x".repeat(500);
        match classify_response(500, &body).unwrap_err() {
            SubmissionError::Server { message, .. } => {
                assert_eq!(message.chars().count(), MAX_DETAIL_CHARS + 1);
                assert!(message.ends_with('…'));
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_kinds_are_distinct() {
        let kinds = [
            SubmissionError::Network("refused".into()).kind(),
            SubmissionError::Validation { status: 422, detail: String::new() }.kind(),
            SubmissionError::Server { status: 500, message: String::new() }.kind(),
            SubmissionError::UnexpectedShape(String::new()).kind(),
        ];
        let mut unique = kinds.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), kinds.len());
    }
}

//! Handler for `/api/generate`.
//!
//! One inbound request, exactly one response: every path — method check,
//! shape check, pipeline error, success — resolves to a status + JSON body.

use axum::{
    Json,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::generate::GenerateError;

use super::ApiState;

/// Build a JSON error response body.
fn json_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

/// ANY /api/generate — non-POST methods are answered here with 405.
pub(super) async fn generate(
    State(state): State<ApiState>,
    method: Method,
    body: String,
) -> Response {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            Json(json!({ "error": "Method not allowed" })),
        )
            .into_response();
    }

    // Shape check — a missing body, invalid JSON, absent `prompt`, or a
    // non-string `prompt` are all the same client error.
    let prompt = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("prompt").and_then(|p| p.as_str()).map(str::to_owned));
    let Some(prompt) = prompt else {
        return json_error(StatusCode::BAD_REQUEST, "Missing prompt");
    };

    match state.generator.generate(&prompt).await {
        Ok(listing) => (
            StatusCode::OK,
            Json(json!({ "code": listing.code, "cached": listing.cached })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Map a pipeline error to its status + message. Internal detail is logged,
/// never returned to the caller.
fn error_response(e: GenerateError) -> Response {
    match e {
        GenerateError::EmptyPrompt => json_error(StatusCode::BAD_REQUEST, "Empty prompt"),
        GenerateError::PromptTooLong => json_error(StatusCode::BAD_REQUEST, "Prompt too long"),
        GenerateError::NotConfigured => {
            error!("generation requested but no API key is configured");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Server not configured")
        }
        GenerateError::Upstream(detail) => {
            warn!(%detail, "upstream generation failed");
            json_error(StatusCode::BAD_GATEWAY, "Upstream generation failed")
        }
        GenerateError::NoContent => json_error(StatusCode::BAD_GATEWAY, "No content produced"),
        GenerateError::Internal(detail) => {
            error!(%detail, "unexpected internal error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: GenerateError) -> StatusCode {
        error_response(e).status()
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(status_of(GenerateError::EmptyPrompt), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(GenerateError::PromptTooLong), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(GenerateError::NotConfigured),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(GenerateError::Upstream("boom".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(GenerateError::NoContent), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(GenerateError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

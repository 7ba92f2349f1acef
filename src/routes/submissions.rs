use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{FieldError, NewSubmission, Submission, ValidationErrors},
    startup::AppState,
    webhook_client::ForwardError,
};

pub const SUCCESS_MESSAGE: &str = "Your cosmic data has been sent successfully! ✨";
pub const VALIDATION_MESSAGE: &str = "Please check your form data and try again.";
pub const CONFIGURATION_MESSAGE: &str = "Webhook configuration error. Please contact support.";
pub const DELIVERY_MESSAGE: &str = "Failed to send data to external service. Please try again.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str = "Submission not found.";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be valid JSON.";

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct SubmitResponse {
    pub message: String,
    pub id: u64,
}

#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("提交数据校验失败")]
    Validation(#[from] ValidationErrors),
    #[error("请求体无法解析")]
    MalformedBody(#[from] JsonRejection),
    #[error("转发提交失败")]
    Forward(#[from] ForwardError),
}

impl std::fmt::Debug for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        match self {
            SubmitError::Validation(errors) => {
                tracing::warn!(?errors, "提交数据校验失败");
                validation_response(errors.errors())
            }
            SubmitError::MalformedBody(rejection) => {
                tracing::warn!(error = %rejection, "请求体无法解析");
                let errors = [FieldError {
                    field: "body".to_string(),
                    message: MALFORMED_BODY_MESSAGE.to_string(),
                }];
                validation_response(&errors)
            }
            SubmitError::Forward(ref e) => {
                tracing::error!(error = ?self, "转发提交失败");
                let message = if e.is_configuration() {
                    CONFIGURATION_MESSAGE
                } else {
                    DELIVERY_MESSAGE
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message })),
                )
                    .into_response()
            }
        }
    }
}

fn validation_response(errors: &[FieldError]) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": VALIDATION_MESSAGE, "errors": errors })),
    )
        .into_response()
}

/// 记录错误以及完整的 source 链
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[tracing::instrument(
    name = "接收一个新的提交",
    skip(state, payload),
    fields(
        request_id = %Uuid::new_v4(),
        submission_email = tracing::field::Empty,
        horoscope_sign = tracing::field::Empty,
    )
)]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, SubmitError> {
    let Json(body) = payload?;
    let new_submission = NewSubmission::try_from(body)?;

    let span = tracing::Span::current();
    span.record("submission_email", tracing::field::display(&new_submission.email));
    span.record("horoscope_sign", tracing::field::display(new_submission.horoscope_sign));

    // 先保存再转发，转发失败时不回滚
    let submission = state.store.create(new_submission);
    state.webhook_client.forward(&submission).await?;

    Ok(Json(SubmitResponse {
        message: SUCCESS_MESSAGE.to_string(),
        id: submission.id,
    }))
}

#[tracing::instrument(name = "查询提交", skip(state))]
pub async fn get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Submission>, Response> {
    state.store.get(id).map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": NOT_FOUND_MESSAGE })),
        )
            .into_response()
    })
}

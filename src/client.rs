//! 提交表单的客户端部分
//!
//! 保存三个输入框的值，发请求前先用和服务端相同的规则校验，并记录页面当前应显示的状态：
//! 空闲、提交中、成功或失败。失败后不会自动重试，需要用户再次提交。

use reqwest::StatusCode;

use crate::{
    domain::{HoroscopeSign, NewSubmission, SubmissionFormData, ValidationErrors},
    routes::submissions::SubmitResponse,
};

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success { message: String, id: u64 },
    Error { message: String },
}

/// 星座下拉框中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn sign_options() -> impl Iterator<Item = SignOption> {
    HoroscopeSign::ALL.into_iter().map(|sign| SignOption {
        value: sign.as_str(),
        label: sign.label(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("无法连接到服务端")]
    Transport(#[from] reqwest::Error),
    #[error("服务端返回 {status}: {message}")]
    Server { status: StatusCode, message: String },
}

pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    #[tracing::instrument(name = "提交表单", skip(self, data))]
    pub async fn post_submission(
        &self,
        data: &SubmissionFormData,
    ) -> Result<SubmitResponse, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/api/submissions", self.base_url))
            .json(data)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        Err(ClientError::Server { status, message })
    }
}

#[derive(Debug)]
pub struct SubmissionForm {
    pub email: String,
    pub horoscope_sign: String,
    pub mood: String,
    state: FormState,
    field_errors: ValidationErrors,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            horoscope_sign: String::new(),
            mood: String::new(),
            state: FormState::Idle,
            field_errors: ValidationErrors::default(),
        }
    }
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    fn form_data(&self) -> SubmissionFormData {
        SubmissionFormData {
            email: Some(self.email.clone()),
            horoscope_sign: Some(self.horoscope_sign.clone()),
            mood: Some(self.mood.clone()),
        }
    }

    pub fn validate(&self) -> Result<NewSubmission, ValidationErrors> {
        NewSubmission::try_from(self.form_data())
    }

    /// 本地校验，通过时返回要发送的请求体；有字段不合法时返回 `None`，
    /// 表单保持空闲并记录字段错误
    pub fn begin_submit(&mut self) -> Option<SubmissionFormData> {
        if self.state == FormState::Submitting {
            return None;
        }
        match self.validate() {
            Ok(_) => {
                self.field_errors = ValidationErrors::default();
                self.state = FormState::Submitting;
                Some(self.form_data())
            }
            Err(errors) => {
                self.field_errors = errors;
                self.state = FormState::Idle;
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<SubmitResponse, ClientError>) {
        self.state = match result {
            Ok(response) => {
                self.email.clear();
                self.horoscope_sign.clear();
                self.mood.clear();
                FormState::Success {
                    message: response.message,
                    id: response.id,
                }
            }
            Err(ClientError::Server { message, .. }) => FormState::Error { message },
            Err(e) => {
                tracing::warn!(error = %e, "提交请求失败");
                FormState::Error {
                    message: FALLBACK_ERROR_MESSAGE.to_string(),
                }
            }
        };
    }

    pub async fn submit(&mut self, api: &ApiClient) -> &FormState {
        if let Some(data) = self.begin_submit() {
            let result = api.post_submission(&data).await;
            self.finish_submit(result);
        }
        &self.state
    }
}

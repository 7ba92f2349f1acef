use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::Submission;

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("未配置 webhook 地址")]
    MissingDestination,
    #[error("webhook 请求失败")]
    Transport(#[source] reqwest::Error),
    #[error("webhook 返回 {status}")]
    Rejected { status: StatusCode, reason: String },
}

impl ForwardError {
    /// 请求还没发出就失败（未配置地址）时为 `true`
    pub fn is_configuration(&self) -> bool {
        matches!(self, ForwardError::MissingDestination)
    }
}

#[derive(serde::Serialize)]
struct WebhookPayload<'a> {
    email: &'a str,
    horoscope_sign: &'a str,
    mood: &'a str,
}

pub struct WebhookClient {
    http_client: reqwest::Client,
    destination: Option<SecretString>,
}

impl WebhookClient {
    pub fn new(
        destination: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            destination,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.destination.is_some()
    }

    #[tracing::instrument(
        name = "转发提交到 webhook",
        skip(self, submission),
        fields(submission_id = submission.id)
    )]
    pub async fn forward(&self, submission: &Submission) -> Result<(), ForwardError> {
        let destination = self
            .destination
            .as_ref()
            .ok_or(ForwardError::MissingDestination)?;
        let url = normalize_destination(destination.expose_secret());

        let payload = WebhookPayload {
            email: submission.email.as_ref(),
            horoscope_sign: submission.horoscope_sign.as_str(),
            mood: submission.mood.as_ref(),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(ForwardError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Rejected {
                status,
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        tracing::info!(%status, "webhook 已接收");
        Ok(())
    }
}

/// 把简写的 webhook 地址补全成完整 URL
///
/// `<token>@hook.<region>.<domain>` 改写为 `https://hook.<region>.<domain>/<token>`，
/// 其他没有 `http://` 或 `https://` 前缀的地址直接补上 `https://`
pub fn normalize_destination(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    if let Some((token, host)) = raw.split_once('@') {
        let is_hook_host = host
            .strip_prefix("hook.")
            .and_then(|rest| rest.split_once('.'))
            .is_some_and(|(region, domain)| !region.is_empty() && !domain.is_empty());
        if !token.contains('/') && !host.contains('/') && is_hook_host {
            return format!("https://{host}/{token}");
        }
    }

    format!("https://{raw}")
}

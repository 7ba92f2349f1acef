use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    configuration::Settings,
    routes::{
        health_check::health_check,
        submissions::{UNEXPECTED_MESSAGE, get_submission, submit},
    },
    storage::SubmissionStore,
    webhook_client::WebhookClient,
};

/// 请求之间共享的全部状态，由调用方构造后注入路由
pub struct AppState {
    pub store: SubmissionStore,
    pub webhook_client: WebhookClient,
}

impl AppState {
    pub fn new(webhook_client: WebhookClient) -> Self {
        Self {
            store: SubmissionStore::new(),
            webhook_client,
        }
    }
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let timeout = configuration.webhook.timeout();
        let webhook_client = WebhookClient::new(configuration.webhook.destination, timeout)?;
        if !webhook_client.is_configured() {
            tracing::warn!("未配置 webhook 地址，所有提交都会返回配置错误");
        }

        let address = configuration.application.address();
        let listener = TcpListener::bind(&address).await?;
        let port = listener.local_addr()?.port();
        tracing::info!(%address, port, "开始监听");

        Ok(Self {
            port,
            listener,
            state: Arc::new(AppState::new(webhook_client)),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        run(self.listener, self.state).await
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/api/submissions", post(submit))
        .route("/api/submissions/{id}", get(get_submission))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

pub async fn run(listener: TcpListener, state: Arc<AppState>) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state)).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "处理请求时发生 panic");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": UNEXPECTED_MESSAGE })),
    )
        .into_response()
}

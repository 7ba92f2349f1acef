use axum::http::StatusCode;

/// 存活探针，不依赖 webhook 是否已配置
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

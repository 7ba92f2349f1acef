use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use horoscope_mood::{
    configuration::get_configuration,
    startup::{AppState, Application},
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use tokio::net::TcpListener;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        // 设置 TEST_LOG=true 运行测试时，捕获 日志输出
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("初始化 tracing 失败");
    } else {
        // 如果没有设置 TEST_LOG，则使用 sink, 不捕获日志
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("初始化 tracing 失败");
    }
});

pub struct TestApp {
    pub address: String,
    pub state: Arc<AppState>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_submission(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/submissions", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_submission(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/submissions", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// `destination` 为 `None` 时模拟未配置 webhook 的环境
pub async fn spawn_app(destination: Option<String>) -> TestApp {
    // 第一次执行会初始化Tracing，之后都会跳过
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.host = "127.0.0.1".to_string();
        // 端口为 0 时由操作系统分配随机端口
        c.application.port = 0;
        c.webhook.destination = destination.map(SecretString::from);
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    let state = application.state();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        state,
        api_client: reqwest::Client::builder().no_proxy().build().unwrap(),
    }
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "email": "ursula_le_guin@gmail.com",
        "horoscopeSign": "leo",
        "mood": "great"
    })
}

type Received = Arc<Mutex<Vec<serde_json::Value>>>;

/// 本地的假 webhook，记录收到的每个请求体，并返回固定的状态码
pub struct MockWebhook {
    pub uri: String,
    received: Received,
}

impl MockWebhook {
    pub async fn start(status: StatusCode) -> Self {
        let received: Received = Arc::default();
        let app = Router::new()
            .route("/hook", post(record))
            .with_state((Arc::clone(&received), status));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let _ = tokio::spawn(async move { axum::serve(listener, app).await });

        Self {
            uri: format!("http://127.0.0.1:{}/hook", port),
            received,
        }
    }

    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn record(
    State((received, status)): State<(Received, StatusCode)>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    assert_eq!(headers[CONTENT_TYPE], "application/json");
    received.lock().unwrap().push(body);
    status
}

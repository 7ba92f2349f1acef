use std::time::Duration;

use secrecy::SecretString;

/// 保存 webhook 地址的环境变量，按优先级排列
pub const WEBHOOK_DESTINATION_VARS: [&str; 2] = ["MAKE_WEBHOOK_URL", "WEBHOOK_URL"];

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub webhook: WebhookSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize)]
pub struct WebhookSettings {
    pub timeout_milliseconds: u64,
    /// 只从 [`WEBHOOK_DESTINATION_VARS`] 读取，不来自配置文件
    #[serde(skip)]
    pub destination: Option<SecretString>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl WebhookSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base")))
        .add_source(config::File::from(
            configuration_directory.join(environment.as_str()),
        ))
        // 例如 `APP_APPLICATION__PORT=5001` 会覆盖 `application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;
    settings.webhook.destination = webhook_destination(|name| std::env::var(name).ok());
    Ok(settings)
}

/// 按顺序取 [`WEBHOOK_DESTINATION_VARS`] 中第一个非空的值
pub fn webhook_destination(lookup: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
    WEBHOOK_DESTINATION_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{}不是一个合法的环境变量, 使用`local` 或 `production`",
                other
            )),
        }
    }
}

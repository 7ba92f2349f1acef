use anyhow::Context;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// 组合多个层构建 subscriber，`sink` 决定日志写到哪里（stdout 或者测试里的 sink）
pub fn get_subscriber<Sink>(name: String, level: String, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // 日志过滤层
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // 格式化层
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    // 创建订阅者
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// 只能调用一次，重复调用会返回错误
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    // 初始化 log 到 tracing 的日志桥接器，使用 log crate 的第三方库（比如 reqwest）的日志也能被 tracing 捕获
    LogTracer::init().context("设置 Logger 失败")?;
    set_global_default(subscriber).context("设置 subscriber 失败")?;
    Ok(())
}

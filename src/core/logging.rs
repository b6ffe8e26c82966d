//! 日志初始化
//!
//! 客户端内部统一使用 `tracing`，按区域划分 target：
//! `ldapi.binding`、`ldapi.dispatch`、`ldapi.events`、`ldapi.codec`、`ldapi.client`。

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// 初始化日志系统
///
/// `RUST_LOG` 优先，未设置时回退到配置中的级别。
/// 重复调用是安全的（`try_init`），宿主已安装订阅者时不会覆盖。
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init();

    tracing::debug!(target: "ldapi.client", level = config.level.as_filter(), "Logging initialized");
}

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;

/// 守护进程运行时配置
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// RFCOMM 服务信道
    pub rfcomm_channel: u8,

    /// nmcli 连接操作的超时上限（状态查询不限时）
    pub connect_timeout: Duration,
}

/// 用于解析 TOML 的临时结构
#[derive(Deserialize)]
struct DaemonConfigFile {
    rfcomm_channel: u8,
    connect_timeout_secs: u64,
}

impl From<DaemonConfigFile> for DaemonConfig {
    fn from(t: DaemonConfigFile) -> Self {
        DaemonConfig {
            rfcomm_channel: t.rfcomm_channel,
            connect_timeout: Duration::from_secs(t.connect_timeout_secs),
        }
    }
}

/// 从 TOML 字符串加载守护进程配置
pub fn daemon_config_from_toml_str(s: &str) -> DaemonConfig {
    let parsed: DaemonConfigFile = toml::from_str(s).expect("Failed to parse daemon config TOML");
    DaemonConfig::from(parsed)
}

// 从配置文件加载总配置
pub static CONFIG: Lazy<DaemonConfig> = Lazy::new(|| {
    const CONFIG_TOML: &str = include_str!("../../configs/btprov.toml");
    daemon_config_from_toml_str(CONFIG_TOML)
});

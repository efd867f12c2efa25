use async_trait::async_trait;
use serde::Serialize;

// 在这里定义共享的数据结构，和为所有 Wi-Fi 后端定义的 trait。

/// Current Wi-Fi association as reported to the peer.
/// 当前 Wi-Fi 关联状态。子查询失败时对应字段保持哨兵值，
/// 发往对端的结构永远是完整的。
#[derive(Debug, Clone, Serialize)]
pub struct NetworkStatus {
    pub ssid: String,
    pub ip: String,
    pub signal: String, // 信号强度，nmcli 的 0-100 百分比（字符串形式）
}

impl Default for NetworkStatus {
    fn default() -> Self {
        NetworkStatus {
            ssid: "Unknown".to_string(),
            ip: "Unknown".to_string(),
            signal: "0".to_string(),
        }
    }
}

/// Wi-Fi 控制后端能力：查询当前关联 + 发起连接
///
/// Both operations absorb tool-level failures instead of raising them:
/// `connect` folds every failure mode into `false`, `current_network`
/// falls back to sentinel fields. The dispatcher above this trait has no
/// failure path of its own.
#[async_trait]
pub trait WifiBackend: Send + Sync {
    /// 查询当前 Wi-Fi 关联状态（尽力而为，永不失败）
    async fn current_network(&self) -> NetworkStatus;

    /// 尝试连接到指定网络。空 SSID 立即返回 false，不触发任何外部命令。
    async fn connect(&self, ssid: &str, password: Option<&str>) -> bool;
}

//! 通过调用nmcli命令行工具实现的Wi-Fi后端，适用于使用NetworkManager管理
//! 网络连接的Linux系统。
//!
//! Connect runs under a bounded deadline so one wedged nmcli cannot hang a
//! session forever; the status queries follow the tool's own pace. Every
//! failure mode of the tools collapses into `success = false` or sentinel
//! fields, nothing propagates past this module.

use crate::config::CONFIG;
use crate::exec::{CommandRunner, SystemRunner};
use crate::traits::{NetworkStatus, WifiBackend};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct NmcliBackend<R = SystemRunner> {
    runner: R,
    connect_timeout: Duration,
}

impl NmcliBackend<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemRunner, CONFIG.connect_timeout)
    }
}

impl Default for NmcliBackend<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> NmcliBackend<R> {
    /// 注入自定义执行器（测试用）
    pub fn with_runner(runner: R, connect_timeout: Duration) -> Self {
        Self { runner, connect_timeout }
    }

    /// 第一条 ACTIVE=yes 的扫描行，返回 (ssid, signal)
    async fn active_wifi_row(&self) -> Option<(String, String)> {
        let out = match self
            .runner
            .run(
                "nmcli",
                &["-t", "-f", "ACTIVE,SSID,SIGNAL", "device", "wifi", "list"],
                None,
            )
            .await
        {
            Ok(out) if out.success() => out,
            Ok(out) => {
                debug!(code = ?out.code, "nmcli wifi list failed: {}", out.stderr.trim());
                return None;
            }
            Err(e) => {
                debug!("nmcli wifi list did not run: {e}");
                return None;
            }
        };
        parse_active_wifi(&out.stdout)
    }

    /// 活动连接名兜底（无线扫描不可用时，例如 Wi-Fi 关闭或驱动异常）
    async fn active_connection_name(&self) -> Option<String> {
        let out = self
            .runner
            .run("nmcli", &["-t", "-f", "NAME", "connection", "show", "--active"], None)
            .await
            .ok()
            .filter(|out| out.success())?;
        parse_first_name(&out.stdout)
    }

    async fn host_ip(&self) -> Option<String> {
        let out = self
            .runner
            .run("hostname", &["-I"], None)
            .await
            .ok()
            .filter(|out| out.success())?;
        out.stdout.split_whitespace().next().map(|s| s.to_string())
    }
}

#[async_trait]
impl<R: CommandRunner> WifiBackend for NmcliBackend<R> {
    async fn current_network(&self) -> NetworkStatus {
        let mut status = NetworkStatus::default();

        match self.active_wifi_row().await {
            Some((ssid, signal)) => {
                status.ssid = ssid;
                if !signal.is_empty() {
                    status.signal = signal;
                }
            }
            None => {
                if let Some(name) = self.active_connection_name().await {
                    status.ssid = name;
                }
            }
        }

        if let Some(ip) = self.host_ip().await {
            status.ip = ip;
        }

        debug!(?status, "current network");
        status
    }

    async fn connect(&self, ssid: &str, password: Option<&str>) -> bool {
        if ssid.is_empty() {
            warn!("connect requested without an SSID");
            return false;
        }

        info!("🌐 Connecting to '{ssid}'...");
        // 空密码与缺省等价：开放网络或已保存的配置直接拉起
        let args: Vec<&str> = match password {
            Some(pw) if !pw.is_empty() => {
                vec!["device", "wifi", "connect", ssid, "password", pw]
            }
            _ => vec!["connection", "up", ssid],
        };

        match self.runner.run("nmcli", &args, Some(self.connect_timeout)).await {
            Ok(out) if out.success() => {
                info!("✅ Connected to '{ssid}'");
                true
            }
            Ok(out) => {
                warn!(code = ?out.code, "nmcli connect failed: {}", out.stderr.trim());
                false
            }
            Err(e) => {
                warn!("nmcli connect did not finish: {e}");
                false
            }
        }
    }
}

/// `nmcli -t -f ACTIVE,SSID,SIGNAL device wifi list` 输出冒号分隔的行，
/// ACTIVE=yes 的第一行描述当前关联的网络。
fn parse_active_wifi(output: &str) -> Option<(String, String)> {
    for line in output.lines() {
        let parts = split_terse_line(line);
        if parts.first().map(String::as_str) != Some("yes") {
            continue;
        }
        let ssid = parts.get(1).cloned().unwrap_or_default();
        if ssid.is_empty() {
            continue;
        }
        let signal = parts.get(2).cloned().unwrap_or_default();
        return Some((ssid, signal));
    }
    None
}

/// 活动连接列表的第一行非空 NAME（可能是有线连接名，原样上报）
fn parse_first_name(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| split_terse_line(line).swap_remove(0))
}

/// 终端模式 (`-t`) 里值内部的 `:` 和 `\` 会被转义成 `\:`、`\\`，
/// 按未转义的冒号切分并还原字段。
fn split_terse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    field.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

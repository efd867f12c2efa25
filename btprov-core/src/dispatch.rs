//! 把一条解析好的请求映射到后端调用，并组装回复。

use crate::traits::WifiBackend;
use serde_json::{Value, json};

pub const ACTION_WIFI_INFO: &str = "wifi_info";
pub const ACTION_CONNECT_WIFI: &str = "connect_wifi";

/// Dispatch one decoded command.
///
/// Every well-formed request gets exactly one reply: the matching
/// `{action, ...}` object, or `{"error": "unknown_action"}` when the action
/// field is missing, not a string, or not one of ours. Backend failures
/// never surface here; they are already folded into the `success` flag or
/// the sentinel status fields.
pub async fn dispatch<B: WifiBackend>(request: &Value, backend: &B) -> Value {
    match request.get("action").and_then(Value::as_str) {
        Some(ACTION_WIFI_INFO) => {
            let status = backend.current_network().await;
            json!({ "action": ACTION_WIFI_INFO, "data": status })
        }
        Some(ACTION_CONNECT_WIFI) => {
            // 缺字段照样转发给后端，由后端决定怎么拒绝
            let ssid = request.get("ssid").and_then(Value::as_str).unwrap_or_default();
            let password = request.get("password").and_then(Value::as_str);
            let success = backend.connect(ssid, password).await;
            json!({ "action": ACTION_CONNECT_WIFI, "success": success })
        }
        _ => json!({ "error": "unknown_action" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NetworkStatus;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubBackend {
        connect_result: bool,
        connects: Mutex<Vec<(String, Option<String>)>>,
    }

    impl StubBackend {
        fn new(connect_result: bool) -> Self {
            Self { connect_result, connects: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl WifiBackend for StubBackend {
        async fn current_network(&self) -> NetworkStatus {
            NetworkStatus {
                ssid: "HomeNet".to_string(),
                ip: "192.168.1.23".to_string(),
                signal: "72".to_string(),
            }
        }

        async fn connect(&self, ssid: &str, password: Option<&str>) -> bool {
            self.connects
                .lock()
                .unwrap()
                .push((ssid.to_string(), password.map(String::from)));
            self.connect_result
        }
    }

    #[tokio::test]
    async fn wifi_info_reports_backend_status() {
        let backend = StubBackend::new(true);
        let reply = dispatch(&json!({"action": "wifi_info"}), &backend).await;
        assert_eq!(
            reply,
            json!({
                "action": "wifi_info",
                "data": { "ssid": "HomeNet", "ip": "192.168.1.23", "signal": "72" }
            })
        );
    }

    #[tokio::test]
    async fn connect_wifi_reports_success_flag() {
        let backend = StubBackend::new(true);
        let reply = dispatch(
            &json!({"action": "connect_wifi", "ssid": "HomeNet", "password": "secret123"}),
            &backend,
        )
        .await;
        assert_eq!(reply, json!({"action": "connect_wifi", "success": true}));
        assert_eq!(
            backend.connects.lock().unwrap().as_slice(),
            &[("HomeNet".to_string(), Some("secret123".to_string()))]
        );
    }

    #[tokio::test]
    async fn connect_wifi_failure_is_success_false() {
        let backend = StubBackend::new(false);
        let reply =
            dispatch(&json!({"action": "connect_wifi", "ssid": "HomeNet"}), &backend).await;
        assert_eq!(reply, json!({"action": "connect_wifi", "success": false}));
    }

    #[tokio::test]
    async fn missing_fields_are_passed_through() {
        let backend = StubBackend::new(false);
        dispatch(&json!({"action": "connect_wifi"}), &backend).await;
        assert_eq!(
            backend.connects.lock().unwrap().as_slice(),
            &[(String::new(), None)]
        );
    }

    #[tokio::test]
    async fn non_string_password_counts_as_absent() {
        let backend = StubBackend::new(true);
        dispatch(
            &json!({"action": "connect_wifi", "ssid": "HomeNet", "password": 42}),
            &backend,
        )
        .await;
        assert_eq!(
            backend.connects.lock().unwrap().as_slice(),
            &[("HomeNet".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn anything_else_is_unknown_action() {
        let backend = StubBackend::new(true);
        for request in [
            json!({"action": "reboot"}),
            json!({"action": 7}),
            json!({"ssid": "HomeNet"}),
            json!(42),
        ] {
            let reply = dispatch(&request, &backend).await;
            assert_eq!(reply, json!({"error": "unknown_action"}));
        }
        assert!(backend.connects.lock().unwrap().is_empty());
    }
}

use crate::traits::{NetworkStatus, WifiBackend};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// A mock backend for exercising the Bluetooth link on machines without
/// NetworkManager. It simulates status queries and connection attempts
/// without any real hardware interaction.
#[derive(Debug, Default)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WifiBackend for MockBackend {
    async fn current_network(&self) -> NetworkStatus {
        println!("🤖 [MockBackend] Reporting a fake association.");
        NetworkStatus {
            ssid: "MyHomeWiFi".to_string(),
            ip: "192.168.1.50".to_string(),
            signal: "88".to_string(),
        }
    }

    async fn connect(&self, ssid: &str, password: Option<&str>) -> bool {
        println!(
            "🤖 [MockBackend] Attempting to connect to SSID: '{}' with password: {}",
            ssid,
            if password.unwrap_or_default().is_empty() { "(none)" } else { "********" }
        );
        // Simulate a connection delay
        sleep(Duration::from_secs(1)).await;

        // Simulate a failure for a specific network for testing purposes
        if ssid.is_empty() || ssid == "xfinitywifi" {
            println!("🤖 [MockBackend] Connection failed to '{ssid}'");
            false
        } else {
            println!("🤖 [MockBackend] Connection successful to '{ssid}'");
            true
        }
    }
}

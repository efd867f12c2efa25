use anyhow::Result;
use btprov_core::rfcomm_server;
use tracing_subscriber::EnvFilter;

// --- 1. 选择后端实现 ---
#[cfg(not(feature = "backend_mock"))]
fn build_backend() -> btprov_core::backends::nmcli::NmcliBackend {
    tracing::info!("📶 Using nmcli backend");
    btprov_core::backends::nmcli::NmcliBackend::new()
}

#[cfg(feature = "backend_mock")]
fn build_backend() -> btprov_core::backends::mock::MockBackend {
    tracing::info!("🤖 Using mock backend");
    btprov_core::backends::mock::MockBackend::new()
}

// --- 2. 启动服务器 ---
#[tokio::main]
async fn main() -> Result<()> {
    // 1. 初始化日志（这是入口点的职责）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🚀 Starting Bluetooth Wi-Fi provisioner...");

    // 2. 上电并开启可发现性（尽力而为，失败不阻塞启动）
    if let Err(e) = rfcomm_server::make_discoverable().await {
        tracing::warn!("⚠️ Could not make the adapter discoverable: {e}");
    }

    // 3. 进入接入主循环；正常情况下永不返回
    let backend = build_backend();
    if let Err(e) = rfcomm_server::run(backend).await {
        tracing::error!("❌ Provisioner failed: {}", e);
        // 在这里处理退出码是合适的
        std::process::exit(1);
    }

    Ok(())
}

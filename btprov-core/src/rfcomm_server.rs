//! RFCOMM 监听与接入循环，整个守护进程的主控制流。
//!
//! One client at a time: the next `accept` only happens after the previous
//! session's loop has returned, so a second phone connecting mid-session
//! waits in the kernel backlog instead of racing the first. Accept errors
//! are logged and retried after a short pause; only failing to bind a local
//! RFCOMM endpoint at all is fatal.

use crate::config::CONFIG;
use crate::session;
use crate::traits::WifiBackend;
use bluer::Address;
use bluer::rfcomm::{Listener, SocketAddr};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// accept 出错后的重试间隔
const ACCEPT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Run the provisioning server forever.
///
/// Returns only when no listening socket can be bound; every later error
/// (client crashes, garbage input, transient accept failures) is absorbed
/// inside the loop.
pub async fn run<B: WifiBackend>(backend: B) -> crate::Result<()> {
    let listener = bind_listener().await?;
    info!("📡 RFCOMM server listening on channel {}", CONFIG.rfcomm_channel);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!("🔗 Client connected: {}", peer.addr);
                let end = session::run_session(stream, &backend).await;
                info!(reason = ?end, "session over, waiting for the next client");
            }
            Err(e) => {
                warn!("accept failed: {e}");
                sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}

/// Bind the listening socket on the configured channel.
///
/// 优先通配地址绑定；部分适配器/内核组合会拒绝，此时查询默认适配器的
/// 真实地址再绑定一次。
async fn bind_listener() -> crate::Result<Listener> {
    let channel = CONFIG.rfcomm_channel;

    match Listener::bind(SocketAddr::new(Address::any(), channel)).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            warn!("wildcard bind failed ({e}), retrying with the adapter address");
            let addr = local_adapter_address().await?;
            info!("binding to local adapter {addr}");
            Ok(Listener::bind(SocketAddr::new(addr, channel)).await?)
        }
    }
}

/// 查询默认蓝牙适配器的地址（绑定兜底用）
async fn local_adapter_address() -> crate::Result<Address> {
    let session = bluer::Session::new().await?;
    let adapter = session.default_adapter().await?;
    Ok(adapter.address().await?)
}

/// Power the adapter and make it visible for pairing.
///
/// Best-effort startup step: when it fails the daemon keeps going, since
/// already-paired peers can still connect without discoverability.
pub async fn make_discoverable() -> crate::Result<()> {
    let session = bluer::Session::new().await?;
    let adapter = session.default_adapter().await?;
    adapter.set_powered(true).await?;
    adapter.set_discoverable(true).await?;
    adapter.set_pairable(true).await?;
    info!("🔵 Adapter {} is powered and discoverable", adapter.name());
    Ok(())
}

//! 单条已接入连接的服务循环：收字节、切行、派发、回帧。

use crate::codec::{self, LineBuffer};
use crate::dispatch;
use crate::traits::WifiBackend;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// 单次 socket 读取的块大小
const RECV_CHUNK_SIZE: usize = 1024;

/// Why a session's serve loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// 对端正常关闭了连接
    PeerClosed,
    /// 读出错，连接按已断开处理
    ReadError,
    /// 回帧写失败，连接按已断开处理
    WriteError,
}

/// Serve one connection until the peer closes it or the socket fails.
///
/// Bad input never ends a session: lines that carry no parseable JSON are
/// logged and skipped, well-formed requests with an unknown action get an
/// error frame back. Replies go out in the order their lines arrived, each
/// one written before the next line is handled.
pub async fn run_session<S, B>(mut stream: S, backend: &B) -> SessionEnd
where
    S: AsyncRead + AsyncWrite + Unpin,
    B: WifiBackend,
{
    let mut lines = LineBuffer::new();
    let mut chunk = [0u8; RECV_CHUNK_SIZE];
    let mut requests: u64 = 0;

    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) => {
                debug!(requests, "peer closed the connection");
                return SessionEnd::PeerClosed;
            }
            Ok(n) => n,
            Err(e) => {
                warn!(requests, "socket read failed: {e}");
                return SessionEnd::ReadError;
            }
        };

        for line in lines.push(&chunk[..n]) {
            debug!(line = %line, "received");

            let Some(payload) = codec::extract_json_payload(&line) else {
                warn!(line = %line, "no JSON payload on line, skipping");
                continue;
            };
            let request: Value = match serde_json::from_str(payload) {
                Ok(value) => value,
                Err(e) => {
                    warn!(line = %line, "discarding unparseable line: {e}");
                    continue;
                }
            };

            let response = dispatch::dispatch(&request, backend).await;
            requests += 1;
            if let Err(e) = stream.write_all(&codec::encode_frame(&response)).await {
                warn!(requests, "reply write failed, dropping the connection: {e}");
                return SessionEnd::WriteError;
            }
        }
    }
}

//! 以换行符分帧的 JSON 编解码。
//!
//! The peer writes one JSON object per line. Reads come off the socket in
//! arbitrary chunks, so complete lines are carved out of an accumulation
//! buffer and the unterminated tail waits for the next read. Splitting
//! happens on raw bytes; a UTF-8 sequence torn across two reads decodes
//! correctly once its line completes.

use serde_json::Value;

/// Accumulates received bytes and yields complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every line it completes, in order.
    ///
    /// Lines are trimmed of surrounding whitespace (which also strips the
    /// `\r` of CRLF peers); lines that end up empty are dropped silently.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw[..pos]);
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines
    }
}

/// Serialize one response into a wire frame: compact JSON plus `\n`.
pub fn encode_frame(value: &Value) -> Vec<u8> {
    let mut frame = value.to_string().into_bytes();
    frame.push(b'\n');
    frame
}

/// Locate the JSON payload on a candidate line.
///
/// 某些客户端会在对象前带上少量杂音（提示符残留、转发前缀），
/// 第一个 `{` 之前的内容一律忽略。
pub fn extract_json_payload(line: &str) -> Option<&str> {
    line.find('{').map(|start| &line[start..])
}

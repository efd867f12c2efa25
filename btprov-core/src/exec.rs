//! 外部命令执行层。
//! Backends never spawn processes directly; they go through [`CommandRunner`]
//! so tests can substitute a scripted runner for the real system tools.

use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Captured result of one external command run.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CmdOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, optionally bounded by `timeout`.
    ///
    /// Launch failures surface as [`Error::Io`], an expired deadline as
    /// [`Error::CommandTimeout`]. A non-zero exit status is not an error at
    /// this layer; callers decide what an exit status means.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<CmdOutput>;
}

/// The real executor, backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<CmdOutput> {
        let mut cmd = Command::new(program);
        // 超时后不能留下孤儿进程
        cmd.args(args).kill_on_drop(true);

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| Error::CommandTimeout(program.to_string()))??,
            None => cmd.output().await?,
        };

        Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        })
    }
}

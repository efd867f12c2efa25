//! Core library for the Bluetooth Wi-Fi provisioner.
//! This crate implements the whole provisioning engine: the RFCOMM
//! listener with its adapter-address bind fallback, the one-client-at-a-time
//! session loop, newline-delimited JSON framing, command dispatch, and the
//! nmcli-backed Wi-Fi control. The binary crate (`btprov-daemon`) only picks
//! a backend and starts the server.

pub mod backends;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod exec;
pub mod rfcomm_server;
pub mod session;
pub mod traits;

// Define a shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),

    #[error("Command timed out: {0}")]
    CommandTimeout(String),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;

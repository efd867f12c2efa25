pub mod nmcli;

#[cfg(feature = "backend_mock")]
pub mod mock;

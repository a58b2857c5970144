pub mod ping_handler;
pub mod vm_handler;

use axum::extract::ConnectInfo;
use std::net::SocketAddr;

/// Адрес клиента для логов; без ConnectInfo (например, в тестах) - "unknown"
pub(crate) fn remote_addr(connect_info: &Option<ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .as_ref()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

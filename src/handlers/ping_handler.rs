use axum::{
    extract::ConnectInfo,
    http::{Method, StatusCode, Uri},
};
use std::net::SocketAddr;
use tracing::info;

use super::remote_addr;

/// GET /ping
pub async fn ping(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
) -> (StatusCode, &'static str) {
    info!(
        "Ping: {} {} from {}",
        method,
        uri.path(),
        remote_addr(&connect_info)
    );
    (StatusCode::OK, "pong\n")
}

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use std::net::SocketAddr;
use tokio::time::Instant;
use tracing::{error, info, warn};

use super::remote_addr;
use crate::{
    error::UpstreamError,
    models::{ApiResponse, StartVmRequest},
    services::within_deadline,
    AppState,
};

/// POST /start-vm
///
/// Запускает ВМ после OOM и сообщает результат в Telegram:
/// 1. старт ВМ через API Proxmox (ожидается 200);
/// 2. уведомление об успехе или неудаче (ошибки уведомления только логируются);
/// 3. удаление метрики oom_killer из Pushgateway (ожидается 202).
///
/// Тело декодируется как JSON независимо от Content-Type.
pub async fn start_vm(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let remote = remote_addr(&connect_info);
    info!("Start VM: {} {} from {}", method, uri.path(), remote);

    let request: StartVmRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(remote = %remote, "Invalid payload: {}", e);
            return (StatusCode::BAD_REQUEST, "invalid payload\n").into_response();
        }
    };

    let Some(instance) = state.config.cluster(&request.cluster) else {
        warn!(remote = %remote, cluster = %request.cluster, "Unknown cluster");
        return (StatusCode::BAD_REQUEST, "unknown cluster\n").into_response();
    };

    let budget = state.config.timeouts.start_vm_deadline;
    let deadline = Instant::now() + budget;

    let started = within_deadline(
        deadline,
        budget,
        state
            .proxmox
            .start_vm(instance, &request.node, request.vm_id),
    )
    .await;

    if let Err(e) = started {
        error!(
            remote = %remote,
            cluster = %request.cluster,
            node = %request.node,
            vm_id = request.vm_id,
            cause = e.cause(),
            "Start VM failed: {}",
            e
        );
        state
            .telegram
            .notify_oom_failed(&request.node, request.vm_id, &e)
            .await;
        return bad_gateway(&e);
    }
    info!(
        cluster = %request.cluster,
        node = %request.node,
        vm_id = request.vm_id,
        "VM started"
    );
    state
        .telegram
        .notify_oom_resolved(&request.node, request.vm_id)
        .await;

    let deleted = within_deadline(
        deadline,
        budget,
        state
            .pushgateway
            .delete_oom_gauge(instance, &request.cluster, &request.node, request.vm_id),
    )
    .await;

    if let Err(e) = deleted {
        error!(
            remote = %remote,
            pushgateway = instance.pushgateway_url.as_deref().unwrap_or(""),
            cluster = %request.cluster,
            node = %request.node,
            vm_id = request.vm_id,
            cause = e.cause(),
            "Delete oom_killer gauge failed: {}",
            e
        );
        return bad_gateway(&e);
    }
    info!(
        pushgateway = instance.pushgateway_url.as_deref().unwrap_or(""),
        cluster = %request.cluster,
        node = %request.node,
        vm_id = request.vm_id,
        "Metric oom_killer deleted"
    );

    (StatusCode::OK, Json(ApiResponse::success())).into_response()
}

fn bad_gateway(e: &UpstreamError) -> Response {
    (StatusCode::BAD_GATEWAY, Json(ApiResponse::error(e.to_string()))).into_response()
}

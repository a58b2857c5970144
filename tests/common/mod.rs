#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Once;
use std::time::Duration;

use axum_test::TestServer;
use webhook_handler::{
    app,
    config::{ProxmoxInstance, TelegramConfig, Timeouts, TlsPolicy},
    AppState, Config,
};

static INIT: Once = Once::new();

/// Инициализация логгирования для тестов (вызывается один раз)
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

pub const CLUSTER: &str = "dc1";
pub const NODE: &str = "pve-node-1";
pub const VM_ID: u32 = 101;
pub const BOT_TOKEN: &str = "123456:test-token";
pub const CHAT_ID: &str = "-1001234567890";

pub fn start_vm_path(node: &str, vm_id: u32) -> String {
    format!("/nodes/{}/qemu/{}/status/start", node, vm_id)
}

pub fn oom_gauge_path(cluster: &str, node: &str, vm_id: u32) -> String {
    format!(
        "/metrics/job/oom_killer/cluster/{}/node/{}/vm_id/{}",
        cluster, node, vm_id
    )
}

pub fn send_message_path() -> String {
    format!("/bot{}/sendMessage", BOT_TOKEN)
}

pub fn instance(name: &str, api_url: &str, pushgateway_url: Option<&str>) -> ProxmoxInstance {
    ProxmoxInstance {
        name: name.to_string(),
        api_url: api_url.to_string(),
        api_token_id: "root@pam!webhook".to_string(),
        api_token_secret: "00000000-aaaa-bbbb-cccc-000000000000".to_string(),
        pushgateway_url: pushgateway_url.map(str::to_string),
        api_tls: TlsPolicy::SkipVerify,
        pushgateway_tls: TlsPolicy::SkipVerify,
    }
}

/// Конфигурация, где Proxmox, Pushgateway и Telegram указывают на один мок-сервер
pub fn create_test_config(upstream_uri: &str) -> Config {
    let mut proxmox = HashMap::new();
    proxmox.insert(
        CLUSTER.to_string(),
        instance(CLUSTER, upstream_uri, Some(upstream_uri)),
    );

    Config {
        port: 8080,
        log_level: "debug".to_string(),
        proxmox,
        telegram: TelegramConfig {
            api_url: upstream_uri.to_string(),
            bot_token: BOT_TOKEN.to_string(),
            chat_id: CHAT_ID.to_string(),
            tls: TlsPolicy::Verify,
        },
        timeouts: Timeouts {
            upstream: Duration::from_secs(2),
            notification: Duration::from_secs(2),
            start_vm_deadline: Duration::from_secs(5),
        },
    }
}

pub fn create_test_server(config: Config) -> TestServer {
    let state = AppState::new(config).unwrap();
    TestServer::new(app(state)).unwrap()
}

// Webhook handler library
// Экспортируем модули для бинарника и интеграционных тестов

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use anyhow::Result;
use axum::{
    http::Method,
    middleware::from_fn_with_state,
    routing::any,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::UpstreamError;

use handlers::{ping_handler, vm_handler};
use services::{ProxmoxService, PushgatewayService, TelegramService, UpstreamClient};

// Состояние приложения: конфигурация только для чтения и HTTP-клиенты
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub proxmox: ProxmoxService,
    pub pushgateway: PushgatewayService,
    pub telegram: TelegramService,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let upstream = UpstreamClient::new(config.timeouts.upstream)?;
        let notification = UpstreamClient::new(config.timeouts.notification)?;

        Ok(Self {
            proxmox: ProxmoxService::new(upstream.clone()),
            pushgateway: PushgatewayService::new(upstream),
            telegram: TelegramService::new(config.telegram.clone(), notification),
            config: Arc::new(config),
        })
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/ping",
            any(ping_handler::ping).layer(from_fn_with_state(Method::GET, middleware::require_method)),
        )
        .route(
            "/start-vm",
            any(vm_handler::start_vm)
                .layer(from_fn_with_state(Method::POST, middleware::require_method)),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

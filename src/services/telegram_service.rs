use reqwest::StatusCode;
use std::fmt::Display;
use tracing::{error, info};

use crate::config::TelegramConfig;
use crate::error::UpstreamError;
use crate::models::SendMessageRequest;
use crate::services::upstream::{base_url, UpstreamClient};

/// Уведомления в Telegram. Ошибки только логируются и никогда
/// не влияют на ответ вызывающей стороне.
#[derive(Clone)]
pub struct TelegramService {
    config: TelegramConfig,
    http: UpstreamClient,
}

impl TelegramService {
    pub fn new(config: TelegramConfig, http: UpstreamClient) -> Self {
        Self { config, http }
    }

    pub fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            base_url(&self.config.api_url),
            self.config.bot_token
        )
    }

    pub async fn send_message(&self, text: String) -> Result<(), UpstreamError> {
        let body = SendMessageRequest {
            chat_id: self.config.chat_id.clone(),
            text,
        };

        let request = self
            .http
            .client(self.config.tls)
            .post(self.send_message_url())
            .json(&body);

        self.http
            .execute(self.config.tls, request, StatusCode::OK)
            .await?;
        Ok(())
    }

    pub async fn notify_oom_resolved(&self, node: &str, vm_id: u32) {
        match self.send_message(oom_resolved_text(node, vm_id)).await {
            Ok(()) => info!(node = %node, vm_id, "OOM resolved notification sent"),
            Err(e) => error!(
                node = %node,
                vm_id,
                cause = e.cause(),
                "Failed to send OOM resolved notification: {}",
                e
            ),
        }
    }

    pub async fn notify_oom_failed(&self, node: &str, vm_id: u32, reason: &(dyn Display + Sync)) {
        match self.send_message(oom_failed_text(node, vm_id, reason)).await {
            Ok(()) => info!(node = %node, vm_id, "OOM failure notification sent"),
            Err(e) => error!(
                node = %node,
                vm_id,
                cause = e.cause(),
                "Failed to send OOM failure notification: {}",
                e
            ),
        }
    }
}

pub fn oom_resolved_text(node: &str, vm_id: u32) -> String {
    format!("✅ OOM устранён\nНода: {}\nВМ: {}\n", node, vm_id)
}

pub fn oom_failed_text(node: &str, vm_id: u32, reason: &(dyn Display + Sync)) -> String {
    format!("❌ OOM не устранён\nНода: {}\nВМ: {}\n{}", node, vm_id, reason)
}

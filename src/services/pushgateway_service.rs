use reqwest::StatusCode;
use tracing::info;

use crate::config::ProxmoxInstance;
use crate::error::UpstreamError;
use crate::services::upstream::{base_url, UpstreamClient};

pub const OOM_JOB: &str = "oom_killer";

#[derive(Clone)]
pub struct PushgatewayService {
    http: UpstreamClient,
}

impl PushgatewayService {
    pub fn new(http: UpstreamClient) -> Self {
        Self { http }
    }

    pub fn oom_gauge_url(pushgateway_url: &str, cluster: &str, node: &str, vm_id: u32) -> String {
        format!(
            "{}/metrics/job/{}/cluster/{}/node/{}/vm_id/{}",
            base_url(pushgateway_url),
            OOM_JOB,
            cluster,
            node,
            vm_id
        )
    }

    /// Удаляет группу метрик oom_killer для ВМ; Pushgateway отвечает 202
    pub async fn delete_oom_gauge(
        &self,
        instance: &ProxmoxInstance,
        cluster: &str,
        node: &str,
        vm_id: u32,
    ) -> Result<(), UpstreamError> {
        let pushgateway_url = instance
            .pushgateway_url
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("pushgateway URL"))?;

        let url = Self::oom_gauge_url(pushgateway_url, cluster, node, vm_id);
        info!(cluster = %cluster, "Calling DELETE {}", url);

        let request = self
            .http
            .client(instance.pushgateway_tls)
            .delete(&url);

        self.http
            .execute(instance.pushgateway_tls, request, StatusCode::ACCEPTED)
            .await?;
        Ok(())
    }
}

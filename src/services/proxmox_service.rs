use reqwest::{header, StatusCode};
use tracing::info;

use crate::config::ProxmoxInstance;
use crate::error::UpstreamError;
use crate::services::upstream::{base_url, UpstreamClient};

#[derive(Clone)]
pub struct ProxmoxService {
    http: UpstreamClient,
}

impl ProxmoxService {
    pub fn new(http: UpstreamClient) -> Self {
        Self { http }
    }

    pub fn start_vm_url(instance: &ProxmoxInstance, node: &str, vm_id: u32) -> String {
        format!(
            "{}/nodes/{}/qemu/{}/status/start",
            base_url(&instance.api_url),
            node,
            vm_id
        )
    }

    /// Authorization в формате API-токена Proxmox VE
    pub fn api_token_header(instance: &ProxmoxInstance) -> String {
        format!(
            "PVEAPIToken={}={}",
            instance.api_token_id, instance.api_token_secret
        )
    }

    /// POST .../status/start, успех только при 200
    pub async fn start_vm(
        &self,
        instance: &ProxmoxInstance,
        node: &str,
        vm_id: u32,
    ) -> Result<(), UpstreamError> {
        let url = Self::start_vm_url(instance, node, vm_id);
        info!(cluster = %instance.name, "Calling POST {}", url);

        let request = self
            .http
            .client(instance.api_tls)
            .post(&url)
            .header(header::AUTHORIZATION, Self::api_token_header(instance))
            .header(header::ACCEPT, "application/json");

        self.http
            .execute(instance.api_tls, request, StatusCode::OK)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TlsPolicy;

    fn instance(api_url: &str) -> ProxmoxInstance {
        ProxmoxInstance {
            name: "dc1".to_string(),
            api_url: api_url.to_string(),
            api_token_id: "root@pam!webhook".to_string(),
            api_token_secret: "5f2c".to_string(),
            pushgateway_url: None,
            api_tls: TlsPolicy::SkipVerify,
            pushgateway_tls: TlsPolicy::SkipVerify,
        }
    }

    #[test]
    fn test_start_vm_url() {
        let inst = instance("https://pve1:8006/api2/json/");
        assert_eq!(
            ProxmoxService::start_vm_url(&inst, "node-a", 101),
            "https://pve1:8006/api2/json/nodes/node-a/qemu/101/status/start"
        );
    }

    #[test]
    fn test_api_token_header() {
        let inst = instance("https://pve1:8006/api2/json");
        assert_eq!(
            ProxmoxService::api_token_header(&inst),
            "PVEAPIToken=root@pam!webhook=5f2c"
        );
    }

    #[tokio::test]
    async fn test_empty_api_url_fails_to_build_request() {
        let service = ProxmoxService::new(
            UpstreamClient::new(std::time::Duration::from_secs(1)).unwrap(),
        );
        let result = service.start_vm(&instance(""), "node-a", 101).await;

        assert!(matches!(result, Err(UpstreamError::BuildRequest(_))));
    }
}

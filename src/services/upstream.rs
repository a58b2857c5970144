use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::config::TlsPolicy;
use crate::error::UpstreamError;

/// Пара HTTP-клиентов с одинаковым таймаутом: с проверкой TLS и без неё.
/// Клиент выбирается по политике конкретного адресата.
#[derive(Clone)]
pub struct UpstreamClient {
    verifying: Client,
    trust_all: Client,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let verifying = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let trust_all = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build trust-all HTTP client")?;

        Ok(Self {
            verifying,
            trust_all,
        })
    }

    pub fn client(&self, policy: TlsPolicy) -> &Client {
        match policy {
            TlsPolicy::Verify => &self.verifying,
            TlsPolicy::SkipVerify => &self.trust_all,
        }
    }

    /// Отправляет запрос; успех только при точном совпадении статуса.
    pub async fn execute(
        &self,
        policy: TlsPolicy,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<Response, UpstreamError> {
        let request = request.build().map_err(UpstreamError::BuildRequest)?;
        let response = self
            .client(policy)
            .execute(request)
            .await
            .map_err(UpstreamError::Transport)?;

        if response.status() != expected {
            return Err(UpstreamError::BadStatus(response.status()));
        }
        Ok(response)
    }
}

/// Ограничивает вызов общим сроком обработки запроса.
pub async fn within_deadline<T, F>(
    deadline: Instant,
    budget: Duration,
    call: F,
) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match timeout_at(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::DeadlineExceeded(budget)),
    }
}

/// Базовый URL без завершающего слэша
pub(crate) fn base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

use std::time::Duration;
use thiserror::Error;

/// Ошибка исходящего вызова (Proxmox, Pushgateway, Telegram)
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("create request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    #[error("do request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("bad status: {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl UpstreamError {
    /// Короткая метка причины для структурированных логов
    pub fn cause(&self) -> &'static str {
        match self {
            UpstreamError::BuildRequest(_) => "build_request",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::BadStatus(_) => "bad_status",
            UpstreamError::DeadlineExceeded(_) => "deadline",
            UpstreamError::NotConfigured(_) => "not_configured",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_message_carries_status_line() {
        let err = UpstreamError::BadStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "bad status: 500 Internal Server Error");
        assert_eq!(err.cause(), "bad_status");
    }

    #[test]
    fn test_not_configured_message() {
        let err = UpstreamError::NotConfigured("pushgateway URL");
        assert_eq!(err.to_string(), "pushgateway URL is not configured");
    }
}

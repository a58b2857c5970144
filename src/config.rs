use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Проверка TLS-сертификатов для исходящего HTTP-клиента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsPolicy {
    Verify,
    SkipVerify,
}

impl TlsPolicy {
    fn from_flag(value: Option<String>, default: TlsPolicy) -> Self {
        match value.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => TlsPolicy::Verify,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => TlsPolicy::SkipVerify,
            _ => default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxmoxInstance {
    pub name: String,
    pub api_url: String,
    pub api_token_id: String,
    pub api_token_secret: String,
    pub pushgateway_url: Option<String>,
    pub api_tls: TlsPolicy,
    pub pushgateway_tls: TlsPolicy,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
    pub tls: TlsPolicy,
}

#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Таймаут одного вызова Proxmox / Pushgateway
    pub upstream: Duration,
    pub notification: Duration,
    /// Общий срок на всю цепочку вызовов в /start-vm
    pub start_vm_deadline: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            upstream: Duration::from_secs(10),
            notification: Duration::from_secs(5),
            start_vm_deadline: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub proxmox: HashMap<String, ProxmoxInstance>,
    pub telegram: TelegramConfig,
    pub timeouts: Timeouts,
}

impl Config {
    pub fn load() -> Result<Self> {
        // .env не перезаписывает уже выставленные переменные окружения
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", p))?,
            None => DEFAULT_PORT,
        };

        let mut proxmox = HashMap::new();
        for name in parse_cluster_list(&var("PROXMOX_LIST")) {
            let upper = name.to_uppercase();
            let instance = ProxmoxInstance {
                api_url: var(&format!("PROXMOX_{}_URL", upper)),
                api_token_id: var(&format!("PROXMOX_{}_TOKEN_ID", upper)),
                api_token_secret: var(&format!("PROXMOX_{}_TOKEN_SECRET", upper)),
                pushgateway_url: lookup(&format!("PUSHGATEWAY_{}_URL", upper))
                    .filter(|url| !url.trim().is_empty()),
                api_tls: TlsPolicy::from_flag(
                    lookup(&format!("PROXMOX_{}_TLS_VERIFY", upper)),
                    TlsPolicy::SkipVerify,
                ),
                pushgateway_tls: TlsPolicy::from_flag(
                    lookup(&format!("PUSHGATEWAY_{}_TLS_VERIFY", upper)),
                    TlsPolicy::SkipVerify,
                ),
                name: name.clone(),
            };
            proxmox.insert(name, instance);
        }

        let telegram = TelegramConfig {
            api_url: lookup("TELEGRAM_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            bot_token: var("TELEGRAM_BOT_TOKEN"),
            chat_id: var("TELEGRAM_CHAT_ID"),
            tls: TlsPolicy::from_flag(lookup("TELEGRAM_TLS_VERIFY"), TlsPolicy::Verify),
        };

        let defaults = Timeouts::default();
        let timeouts = Timeouts {
            upstream: seconds(&lookup, "UPSTREAM_TIMEOUT_SECS", defaults.upstream)?,
            notification: seconds(&lookup, "TELEGRAM_TIMEOUT_SECS", defaults.notification)?,
            start_vm_deadline: seconds(
                &lookup,
                "START_VM_DEADLINE_SECS",
                defaults.start_vm_deadline,
            )?,
        };

        Ok(Config {
            port,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            proxmox,
            telegram,
            timeouts,
        })
    }

    pub fn server_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn cluster(&self, name: &str) -> Option<&ProxmoxInstance> {
        self.proxmox.get(name)
    }

    pub fn cluster_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.proxmox.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Логирует каждый клиент, для которого отключена проверка TLS
    pub fn warn_insecure_clients(&self) {
        for instance in self.proxmox.values() {
            if instance.api_tls == TlsPolicy::SkipVerify {
                warn!(cluster = %instance.name, "TLS verification disabled for Proxmox API (INSECURE)");
            }
            if instance.pushgateway_url.is_some() && instance.pushgateway_tls == TlsPolicy::SkipVerify {
                warn!(cluster = %instance.name, "TLS verification disabled for Pushgateway (INSECURE)");
            }
        }
        if self.telegram.tls == TlsPolicy::SkipVerify {
            warn!("TLS verification disabled for Telegram API (INSECURE)");
        }
    }
}

fn parse_cluster_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn seconds<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, v)),
        None => Ok(default),
    }
}
